use log::trace;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Cell, GameState};

use super::agent::{Agent, Decision};
use super::heuristic::count_windows;
use super::minimax::MoveOrder;

const CENTER_COL: usize = 3;

/// Which rule produced a rule-based move, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The move wins on the spot.
    Win,
    /// The move takes a cell where the opponent would win next.
    Block,
    /// The center column is open.
    Center,
    /// The move adds the most open twos and threes.
    Pattern,
    /// Nothing else applied.
    Random,
}

/// Hand-written priority rules; the first rule that applies picks the move.
pub struct RuleBasedAgent {
    rng: StdRng,
    seed: Option<u64>,
}

impl RuleBasedAgent {
    pub fn new() -> Self {
        RuleBasedAgent {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RuleBasedAgent {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Choose a column and report the rule that selected it.
    pub fn choose_with_rule(&mut self, state: &GameState) -> Option<(usize, Rule)> {
        let legal = state.legal_actions();
        if legal.is_empty() {
            return None;
        }
        let board = state.board();
        let own = state.current_player().to_cell();
        let opp = state.current_player().other().to_cell();

        if let Some(col) = legal.iter().copied().find(|&col| wins_with(board, col, own)) {
            return Some((col, Rule::Win));
        }

        if let Some(col) = legal.iter().copied().find(|&col| wins_with(board, col, opp)) {
            return Some((col, Rule::Block));
        }

        if legal.contains(&CENTER_COL) {
            return Some((CENTER_COL, Rule::Center));
        }

        let base = pattern_score(board, own);
        let mut best: Option<(usize, i64)> = None;
        for col in MoveOrder::CenterFirst.arrange(legal.clone()) {
            let mut trial = *board;
            if trial.drop_piece(col, own).is_err() {
                continue;
            }
            let gain = pattern_score(&trial, own) - base;
            if gain > 0 && best.map_or(true, |(_, g)| gain > g) {
                best = Some((col, gain));
            }
        }
        if let Some((col, _)) = best {
            return Some((col, Rule::Pattern));
        }

        let col = legal[self.rng.random_range(0..legal.len())];
        Some((col, Rule::Random))
    }
}

impl Default for RuleBasedAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether dropping `cell` into `col` on a copy of `board` makes four.
fn wins_with(board: &Board, col: usize, cell: Cell) -> bool {
    let mut trial = *board;
    match trial.drop_piece(col, cell) {
        Ok(row) => trial.wins_through(row, col, cell),
        Err(_) => false,
    }
}

/// Open threes weigh ten open twos.
fn pattern_score(board: &Board, cell: Cell) -> i64 {
    10 * count_windows(board, cell, 3, 1) as i64 + count_windows(board, cell, 2, 2) as i64
}

impl Agent for RuleBasedAgent {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        let (column, rule) = self.choose_with_rule(state)?;
        trace!("rules ({}) chose column {column} via {rule:?}", state.current_player());
        Some(Decision::plain(column))
    }

    fn name(&self) -> &str {
        "Rules"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(self.seed.map_or_else(RuleBasedAgent::new, RuleBasedAgent::with_seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, Player};

    fn play(moves: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &col in moves {
            state.play(col).unwrap();
        }
        state
    }

    #[test]
    fn takes_immediate_win() {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            "......Y",
            "......Y",
            "RRR...Y",
        ])
        .unwrap();
        let state = GameState::from_board(board).unwrap();
        assert_eq!(state.current_player(), Player::Red);

        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(agent.choose_with_rule(&state), Some((3, Rule::Win)));
    }

    #[test]
    fn blocks_opponent_win() {
        let state = play(&[6, 0, 6, 1, 5, 2]);
        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(agent.choose_with_rule(&state), Some((3, Rule::Block)));
    }

    #[test]
    fn blocks_vertical_threat() {
        let state = play(&[0, 3, 1, 3, 6, 3]);
        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(agent.choose_with_rule(&state), Some((3, Rule::Block)));
    }

    #[test]
    fn opens_in_the_center() {
        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(
            agent.choose_with_rule(&GameState::initial()),
            Some((3, Rule::Center))
        );
    }

    #[test]
    fn builds_patterns_when_center_is_full() {
        let state = play(&[3, 3, 3, 3, 3, 3]);
        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(agent.choose_with_rule(&state), Some((2, Rule::Pattern)));
    }

    #[test]
    fn falls_back_to_random_when_no_rule_applies() {
        // Two cells left, neither wins, blocks or builds a pattern, and the
        // center column is full.
        let board = Board::from_rows(&[
            "..YRYRY",
            "YRYRYRY",
            "RYRYRYR",
            "RYRYRYR",
            "YRYRYRY",
            "RYRYRYR",
        ])
        .unwrap();
        let state = GameState::from_board(board).unwrap();
        assert_eq!(state.current_player(), Player::Red);
        assert_eq!(state.legal_actions(), vec![0, 1]);

        let mut seen = [false; 2];
        for seed in 0..50 {
            let (col, rule) = RuleBasedAgent::with_seed(seed)
                .choose_with_rule(&state)
                .unwrap();
            assert_eq!(rule, Rule::Random);
            assert!(state.legal_actions().contains(&col));
            seen[col] = true;

            let again = RuleBasedAgent::with_seed(seed).choose_with_rule(&state);
            assert_eq!(again, Some((col, Rule::Random)));
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn seeded_clone_repeats_random_choices() {
        let board = Board::from_rows(&[
            "..YRYRY",
            "YRYRYRY",
            "RYRYRYR",
            "RYRYRYR",
            "YRYRYRY",
            "RYRYRYR",
        ])
        .unwrap();
        let state = GameState::from_board(board).unwrap();
        let agent = RuleBasedAgent::with_seed(8);
        let mut clone = agent.clone_agent();
        let mut fresh = RuleBasedAgent::with_seed(8);
        for _ in 0..20 {
            assert_eq!(clone.choose(&state), fresh.choose(&state));
        }
    }

    #[test]
    fn no_move_on_terminal_state() {
        let mut state = play(&[0, 1, 0, 1, 0, 1]);
        state.play(0).unwrap();
        let mut agent = RuleBasedAgent::with_seed(0);
        assert_eq!(agent.choose(&state), None);
    }

    #[test]
    fn beats_random_agent_mostly() {
        let mut wins = 0;
        let games = 20;
        for seed in 0..games {
            let rules_side = if seed % 2 == 0 { Player::Red } else { Player::Yellow };
            let mut rules = RuleBasedAgent::with_seed(seed);
            let mut random = RandomAgent::with_seed(seed + 1000);
            let mut state = GameState::initial();
            while !state.is_terminal() {
                let decision = if state.current_player() == rules_side {
                    rules.choose(&state)
                } else {
                    random.choose(&state)
                };
                let column = decision.unwrap().column;
                assert!(state.legal_actions().contains(&column));
                state.play(column).unwrap();
            }
            if state.outcome() == Some(GameOutcome::Winner(rules_side)) {
                wins += 1;
            }
        }
        assert!(wins * 10 >= games * 6, "rules won only {wins}/{games}");
    }
}
