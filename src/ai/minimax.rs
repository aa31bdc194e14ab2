use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::game::{GameState, LegalActions, Player};

use super::agent::{Agent, Decision, SearchStats};
use super::heuristic::{evaluate, Heuristic, HeuristicKind};

/// Column ordering: center-first for better alpha-beta pruning.
const CENTER_FIRST: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

/// Order in which a node's children are searched. Among equally scored
/// columns the one searched first is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOrder {
    Ascending,
    #[default]
    CenterFirst,
}

impl MoveOrder {
    pub(crate) fn arrange(self, columns: LegalActions) -> LegalActions {
        match self {
            MoveOrder::Ascending => columns,
            MoveOrder::CenterFirst => CENTER_FIRST
                .iter()
                .copied()
                .filter(|col| columns.contains(col))
                .collect(),
        }
    }
}

/// Configuration for the minimax search.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum search depth in plies.
    pub depth: u32,
    /// Alpha-beta pruning. Off gives plain minimax with the same result.
    pub pruning: bool,
    /// Search the root's children on the rayon thread pool.
    pub parallel: bool,
    pub move_order: MoveOrder,
    pub heuristic: HeuristicKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 6,
            pruning: true,
            parallel: false,
            move_order: MoveOrder::CenterFirst,
            heuristic: HeuristicKind::Windows,
        }
    }
}

/// Best column found by [`search`] and its score for the searching side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root was already terminal or the depth was zero.
    pub column: Option<usize>,
    pub score: i32,
    pub stats: SearchStats,
}

/// Depth-bounded minimax with alpha-beta pruning.
///
/// Scores are from `searcher`'s point of view. The root is a maximizing node
/// when `searcher` is the side to move in `state`. Every explored move is
/// played on a clone; `state` itself is never modified.
pub fn search(
    state: &GameState,
    config: &SearchConfig,
    heuristic: &dyn Heuristic,
    searcher: Player,
) -> SearchResult {
    let ctx = SearchContext {
        config,
        heuristic,
        searcher,
    };
    let maximizing = state.current_player() == searcher;
    let mut stats = SearchStats {
        depth: config.depth,
        ..SearchStats::default()
    };

    let (column, score) = if config.parallel {
        ctx.root_parallel(state, maximizing, &mut stats)
    } else {
        ctx.alphabeta(state, config.depth, i32::MIN, i32::MAX, maximizing, &mut stats)
    };

    SearchResult {
        column,
        score,
        stats,
    }
}

struct SearchContext<'a> {
    config: &'a SearchConfig,
    heuristic: &'a dyn Heuristic,
    searcher: Player,
}

impl SearchContext<'_> {
    fn alphabeta(
        &self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        stats: &mut SearchStats,
    ) -> (Option<usize>, i32) {
        stats.nodes += 1;

        // Empty once either side has won or the board is full.
        let columns = self.config.move_order.arrange(state.legal_actions());
        if depth == 0 || columns.is_empty() {
            return (None, evaluate(state, self.searcher, depth, self.heuristic));
        }

        let mut best_column = columns[0];
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for &col in &columns {
            let Ok(child) = state.apply_move(col) else {
                continue;
            };
            let (_, score) = self.alphabeta(&child, depth - 1, alpha, beta, !maximizing, stats);

            if maximizing {
                if score > best {
                    best = score;
                    best_column = col;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_column = col;
                }
                beta = beta.min(best);
            }

            if self.config.pruning && alpha >= beta {
                stats.cutoffs += 1;
                break;
            }
        }

        (Some(best_column), best)
    }

    /// Root children searched in parallel, each with a full window. The
    /// reduction keeps the first strictly best column in move order, which
    /// matches what the sequential root picks.
    fn root_parallel(
        &self,
        state: &GameState,
        maximizing: bool,
        stats: &mut SearchStats,
    ) -> (Option<usize>, i32) {
        let depth = self.config.depth;
        let columns = self.config.move_order.arrange(state.legal_actions());
        if depth == 0 || columns.is_empty() {
            stats.nodes += 1;
            return (None, evaluate(state, self.searcher, depth, self.heuristic));
        }

        let scored: Vec<(usize, i32, SearchStats)> = columns
            .par_iter()
            .filter_map(|&col| {
                let child = state.apply_move(col).ok()?;
                let mut child_stats = SearchStats::default();
                let (_, score) = self.alphabeta(
                    &child,
                    depth - 1,
                    i32::MIN,
                    i32::MAX,
                    !maximizing,
                    &mut child_stats,
                );
                Some((col, score, child_stats))
            })
            .collect();

        stats.nodes += 1;
        let mut best_column = columns[0];
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (col, score, child_stats) in scored {
            stats.absorb(child_stats);
            let improves = if maximizing { score > best } else { score < best };
            if improves {
                best = score;
                best_column = col;
            }
        }

        (Some(best_column), best)
    }
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    config: SearchConfig,
    heuristic: Arc<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        Self::from_config(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    pub fn from_config(config: SearchConfig) -> Self {
        let heuristic = Arc::from(config.heuristic.build());
        MinimaxAgent { config, heuristic }
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Arc<dyn Heuristic>) -> Self {
        MinimaxAgent { config, heuristic }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Full search result for the side to move.
    pub fn analyze(&self, state: &GameState) -> SearchResult {
        search(state, &self.config, self.heuristic.as_ref(), state.current_player())
    }
}

impl Agent for MinimaxAgent {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        let result = self.analyze(state);
        let column = result.column?;
        debug!(
            "minimax ({}) chose column {} (score {}, {} nodes, {} cutoffs)",
            state.current_player(),
            column,
            result.score,
            result.stats.nodes,
            result.stats.cutoffs
        );
        Some(Decision {
            column,
            stats: Some(result.stats),
        })
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(MinimaxAgent::with_heuristic(
            self.config.clone(),
            Arc::clone(&self.heuristic),
        ))
    }
}
