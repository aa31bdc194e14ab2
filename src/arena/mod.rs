//! Match driving: alternate agents over one authoritative game state and keep
//! a serializable record of the moves.

mod game_loop;
mod record;

pub use game_loop::{play_from, play_match, play_match_observed};
pub use record::{MatchRecord, MoveRecord};
