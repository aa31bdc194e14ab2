//! Core Connect Four game logic: board representation and win detection,
//! player types, and the game state with its placement contract.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, LegalActions, MoveError, COLS, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState, Placement};
