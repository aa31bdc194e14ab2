use crate::ai::SearchStats;
use crate::game::{Board, GameOutcome, Player};

/// One applied move.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stats: Option<SearchStats>,
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    pub red: String,
    pub yellow: String,
    pub moves: Vec<MoveRecord>,
    pub outcome: GameOutcome,
    pub final_board: Board,
}

impl MatchRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Draw => None,
        }
    }

    /// Name of the winning agent, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|p| match p {
            Player::Red => self.red.as_str(),
            Player::Yellow => self.yellow.as_str(),
        })
    }

    pub fn game_length(&self) -> usize {
        self.moves.len()
    }

    /// Nodes searched across every move that reported search stats.
    pub fn total_nodes(&self) -> u64 {
        self.moves
            .iter()
            .filter_map(|m| m.stats)
            .map(|s| s.nodes)
            .sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
