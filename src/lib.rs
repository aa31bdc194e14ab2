//! # Minimax Connect Four
//!
//! Connect Four on the standard 6x7 board with a depth-bounded minimax search
//! (alpha-beta pruning, optional root parallelism) and simple baseline agents.
//!
//! ## Modules
//!
//! - [`game`]: board, players, turn and outcome tracking
//! - [`ai`]: agent trait, minimax search, heuristics, random and rule-based agents, predictor adapter
//! - [`arena`]: runs matches between two agents and records them
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
