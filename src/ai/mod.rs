//! Move selection: the agent interface, minimax search with alpha-beta
//! pruning, static evaluation, and the baseline agents.

mod agent;
pub mod heuristic;
pub mod minimax;
pub mod predictor;
mod random;
pub mod rules;
pub mod state_encoding;

pub use agent::{Agent, Decision, SearchStats};
pub use heuristic::{CenterHeuristic, Heuristic, HeuristicKind, WindowHeuristic, WIN_SCORE};
pub use minimax::{search, MinimaxAgent, MoveOrder, SearchConfig, SearchResult};
pub use predictor::{Predictor, PredictorAgent};
pub use random::RandomAgent;
pub use rules::{Rule, RuleBasedAgent};
