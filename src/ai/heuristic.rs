//! Static position evaluation used at search cutoffs.

use crate::game::{Board, Cell, GameOutcome, GameState, Player, COLS, ROWS};

/// Score of a won position before the depth bonus. Larger than any heuristic
/// value can reach.
pub const WIN_SCORE: i32 = 1_000_000;

const CENTER_COL: usize = COLS / 2;
const CENTER_WEIGHT: i32 = 3;

/// Window directions, each walking away from its start cell: horizontal,
/// vertical, diagonal `\` and diagonal `/`.
const WINDOW_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Trait for evaluating a non-terminal board from a player's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Which heuristic a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    Center,
    #[default]
    Windows,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Center => Box::new(CenterHeuristic),
            HeuristicKind::Windows => Box::new(WindowHeuristic),
        }
    }
}

/// Center-column occupancy only.
pub struct CenterHeuristic;

impl Heuristic for CenterHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        center_score(board, player)
    }
}

/// Center bonus plus a score for every 4-cell window on the board.
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        match (own, opp, empty) {
            (3, 0, 1) => 50,
            (2, 0, 2) => 10,
            (0, 3, 1) => -80,
            (0, 2, 2) => -10,
            _ => 0,
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        let windows: i32 = windows(board)
            .map(|window| {
                let own = window.iter().filter(|&&c| c == own_cell).count();
                let opp = window.iter().filter(|&&c| c == opp_cell).count();
                Self::score_window(own, opp, 4 - own - opp)
            })
            .sum();

        center_score(board, player) + windows
    }
}

fn center_score(board: &Board, player: Player) -> i32 {
    let own_cell = player.to_cell();
    let opp_cell = player.other().to_cell();
    (0..ROWS)
        .map(|row| match board.get(row, CENTER_COL) {
            c if c == own_cell => CENTER_WEIGHT,
            c if c == opp_cell => -CENTER_WEIGHT,
            _ => 0,
        })
        .sum()
}

/// Every run of four cells on the board in all four orientations.
pub fn windows(board: &Board) -> impl Iterator<Item = [Cell; 4]> + '_ {
    (0..ROWS).flat_map(move |row| {
        (0..COLS).flat_map(move |col| {
            WINDOW_DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
                let end_row = row as isize + 3 * dr;
                let end_col = col as isize + 3 * dc;
                if !(0..ROWS as isize).contains(&end_row) || !(0..COLS as isize).contains(&end_col)
                {
                    return None;
                }
                Some(std::array::from_fn(|i| {
                    let r = row as isize + dr * i as isize;
                    let c = col as isize + dc * i as isize;
                    board.get(r as usize, c as usize)
                }))
            })
        })
    })
}

/// Count windows holding exactly `own` pieces of `cell` and `empty` empty
/// cells (and so no opposing piece when `own + empty == 4`).
pub fn count_windows(board: &Board, cell: Cell, own: usize, empty: usize) -> usize {
    windows(board)
        .filter(|window| {
            window.iter().filter(|&&c| c == cell).count() == own
                && window.iter().filter(|&&c| c == Cell::Empty).count() == empty
        })
        .count()
}

/// Score a search leaf from `searcher`'s point of view.
///
/// Wins carry a bonus of the remaining depth so that quicker wins outrank
/// slower ones, and slower losses outrank quicker ones.
pub fn evaluate(
    state: &GameState,
    searcher: Player,
    depth_remaining: u32,
    heuristic: &dyn Heuristic,
) -> i32 {
    let bonus = depth_remaining as i32;
    match state.outcome() {
        Some(GameOutcome::Winner(p)) if p == searcher => WIN_SCORE + bonus,
        Some(GameOutcome::Winner(_)) => -(WIN_SCORE + bonus),
        Some(GameOutcome::Draw) => 0,
        None => heuristic.evaluate(state.board(), searcher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_covers_board() {
        assert_eq!(windows(&Board::new()).count(), 69);
    }

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        for h in [HeuristicKind::Center.build(), HeuristicKind::Windows.build()] {
            assert_eq!(h.evaluate(&board, Player::Red), 0);
            assert_eq!(h.evaluate(&board, Player::Yellow), 0);
        }
    }

    #[test]
    fn heuristic_center_preference() {
        let h = WindowHeuristic;
        let mut board_center = Board::new();
        board_center.drop_piece(3, Cell::Red).unwrap();
        let mut board_edge = Board::new();
        board_edge.drop_piece(0, Cell::Red).unwrap();

        let score_center = h.evaluate(&board_center, Player::Red);
        let score_edge = h.evaluate(&board_edge, Player::Red);
        assert!(
            score_center > score_edge,
            "Center ({score_center}) should score higher than edge ({score_edge})"
        );
    }

    #[test]
    fn center_heuristic_counts_column_three() {
        let mut board = Board::new();
        board.drop_piece(3, Cell::Red).unwrap();
        board.drop_piece(3, Cell::Red).unwrap();
        board.drop_piece(3, Cell::Yellow).unwrap();
        board.drop_piece(0, Cell::Yellow).unwrap();
        assert_eq!(CenterHeuristic.evaluate(&board, Player::Red), 3);
        assert_eq!(CenterHeuristic.evaluate(&board, Player::Yellow), -3);
    }

    #[test]
    fn heuristic_three_in_a_row_scores_high() {
        let h = WindowHeuristic;
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        let score = h.evaluate(&board, Player::Red);
        assert!(score > 40, "3-in-a-row should score high, got {score}");
        assert!(h.evaluate(&board, Player::Yellow) < -40);
    }

    #[test]
    fn count_windows_finds_open_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        assert_eq!(count_windows(&board, Cell::Red, 3, 1), 1);
        assert_eq!(count_windows(&board, Cell::Yellow, 3, 1), 0);
    }

    #[test]
    fn evaluate_prefers_quick_wins_and_slow_losses() {
        let mut state = GameState::initial();
        for _ in 0..3 {
            state.play(0).unwrap();
            state.play(1).unwrap();
        }
        state.play(0).unwrap();
        let h = WindowHeuristic;

        assert_eq!(evaluate(&state, Player::Red, 0, &h), WIN_SCORE);
        assert!(evaluate(&state, Player::Red, 3, &h) > evaluate(&state, Player::Red, 1, &h));
        assert!(
            evaluate(&state, Player::Yellow, 3, &h) < evaluate(&state, Player::Yellow, 1, &h)
        );
    }

    #[test]
    fn heuristic_never_reaches_win_score() {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            "RRR.RRR",
            "YYY.YYY",
            "RRR.RRR",
            "YYY.YYY",
        ])
        .unwrap();
        let score = WindowHeuristic.evaluate(&board, Player::Red);
        assert!(score.abs() < WIN_SCORE / 10);
    }
}
