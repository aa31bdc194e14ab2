use crate::game::{Board, Cell, COLS, ROWS};

/// Flat numeric board handed to external move predictors.
pub type EncodedBoard = [f32; ROWS * COLS];

/// Encode a board row-major, top row first: Empty = 0, Red = 1, Yellow = -1.
pub fn encode_board(board: &Board) -> EncodedBoard {
    let mut data = [0.0f32; ROWS * COLS];
    for row in 0..ROWS {
        for col in 0..COLS {
            data[row * COLS + col] = match board.get(row, col) {
                Cell::Empty => 0.0,
                Cell::Red => 1.0,
                Cell::Yellow => -1.0,
            };
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_encode_initial_board_is_zero() {
        let data = encode_board(GameState::initial().board());
        assert_eq!(data.len(), 42);
        assert!(data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_encode_after_two_moves() {
        let state = GameState::initial()
            .apply_move(3)
            .unwrap()
            .apply_move(3)
            .unwrap();
        let data = encode_board(state.board());

        // Red at (5, 3), Yellow stacked on top at (4, 3)
        assert_eq!(data[5 * 7 + 3], 1.0);
        assert_eq!(data[4 * 7 + 3], -1.0);
        assert_eq!(data.iter().filter(|&&v| v != 0.0).count(), 2);
    }
}
