use std::fmt;

use crate::error::BoardError;

use super::board::{Board, Cell, LegalActions, MoveError};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Where a successful placement landed and whether it ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub outcome: Option<GameOutcome>,
}

/// Authoritative game state: grid, side to move and terminal outcome.
///
/// The turn only advances after a placement that does not end the game, so on
/// a terminal state `current_player` is the side that made the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
        }
    }

    /// Build a state from an arbitrary board.
    ///
    /// The side to move follows from the piece counts (Red moves first). The
    /// outcome comes from a full-board scan since no last move is known.
    pub fn from_board(board: Board) -> Result<Self, BoardError> {
        let red = board.count(Cell::Red);
        let yellow = board.count(Cell::Yellow);
        let to_move = if red == yellow {
            Player::Red
        } else if red == yellow + 1 {
            Player::Yellow
        } else {
            return Err(BoardError::PieceCountMismatch { red, yellow });
        };

        let red_won = board.has_won(Cell::Red);
        let yellow_won = board.has_won(Cell::Yellow);
        let (current_player, outcome) = match (red_won, yellow_won) {
            (true, true) => return Err(BoardError::BothSidesWon),
            // The winner made the last move, and the turn does not advance
            // past a terminal placement.
            (true, false) if to_move == Player::Yellow => {
                (Player::Red, Some(GameOutcome::Winner(Player::Red)))
            }
            (false, true) if to_move == Player::Red => {
                (Player::Yellow, Some(GameOutcome::Winner(Player::Yellow)))
            }
            (true, false) => return Err(BoardError::MoveAfterWin(Player::Red)),
            (false, true) => return Err(BoardError::MoveAfterWin(Player::Yellow)),
            (false, false) if board.is_full() => (to_move.other(), Some(GameOutcome::Draw)),
            (false, false) => (to_move, None),
        };

        Ok(GameState {
            board,
            current_player,
            outcome,
        })
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Winning side, if the game ended in a win.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(GameOutcome::Winner(p)) => Some(p),
            _ => None,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Number of pieces placed so far.
    pub fn move_count(&self) -> usize {
        self.board.count(Cell::Red) + self.board.count(Cell::Yellow)
    }

    /// Get list of legal columns (not full); empty once the game is over.
    pub fn legal_actions(&self) -> LegalActions {
        if self.is_terminal() {
            return LegalActions::new();
        }
        self.board.valid_columns()
    }

    /// Place a piece for `side` in `column`.
    ///
    /// The win check is anchored at the landing cell. On failure the state is
    /// left untouched.
    pub fn place(&mut self, column: usize, side: Player) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if side != self.current_player {
            return Err(MoveError::OutOfTurn {
                expected: self.current_player,
                got: side,
            });
        }

        let row = self.board.drop_piece(column, side.to_cell())?;

        if self.board.wins_through(row, column, side.to_cell()) {
            self.outcome = Some(GameOutcome::Winner(side));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_player = side.other();
        }

        Ok(Placement {
            row,
            column,
            outcome: self.outcome,
        })
    }

    /// Place a piece for the side to move.
    pub fn play(&mut self, column: usize) -> Result<Placement, MoveError> {
        self.place(column, self.current_player)
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.play(column)?;
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.outcome {
            Some(GameOutcome::Winner(p)) => write!(f, "{p} wins"),
            Some(GameOutcome::Draw) => write!(f, "Draw"),
            None => write!(f, "{} to move", self.current_player),
        }
    }
}
