use log::warn;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::GameState;

use super::agent::{Agent, Decision};
use super::state_encoding::{encode_board, EncodedBoard};

/// An external move predictor, such as a trained classifier.
///
/// The answer is untrusted: out-of-range or full columns are replaced by a
/// random legal column.
pub trait Predictor: Send {
    fn predict(&self, board: &EncodedBoard) -> usize;
}

impl<F> Predictor for F
where
    F: Fn(&EncodedBoard) -> usize + Send,
{
    fn predict(&self, board: &EncodedBoard) -> usize {
        self(board)
    }
}

/// Wraps a [`Predictor`] with legality checking and a random fallback.
pub struct PredictorAgent<P> {
    predictor: P,
    rng: StdRng,
    seed: Option<u64>,
    name: String,
}

impl<P: Predictor> PredictorAgent<P> {
    pub fn new(name: impl Into<String>, predictor: P) -> Self {
        PredictorAgent {
            predictor,
            rng: StdRng::from_os_rng(),
            seed: None,
            name: name.into(),
        }
    }

    pub fn with_seed(name: impl Into<String>, predictor: P, seed: u64) -> Self {
        PredictorAgent {
            predictor,
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
            name: name.into(),
        }
    }
}

impl<P: Predictor + Clone + 'static> Agent for PredictorAgent<P> {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        let legal = state.legal_actions();
        if legal.is_empty() {
            return None;
        }

        let predicted = self.predictor.predict(&encode_board(state.board()));
        if legal.contains(&predicted) {
            return Some(Decision::plain(predicted));
        }

        let fallback = legal[self.rng.random_range(0..legal.len())];
        warn!(
            "{} predicted unplayable column {predicted}, substituting {fallback}",
            self.name
        );
        Some(Decision::plain(fallback))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        let name = self.name.clone();
        let predictor = self.predictor.clone();
        Box::new(match self.seed {
            Some(seed) => PredictorAgent::with_seed(name, predictor, seed),
            None => PredictorAgent::new(name, predictor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ROWS;

    #[test]
    fn valid_prediction_is_used() {
        let mut agent = PredictorAgent::with_seed("Fixed", |_: &EncodedBoard| 5usize, 0);
        let decision = agent.choose(&GameState::initial()).unwrap();
        assert_eq!(decision, Decision::plain(5));
    }

    #[test]
    fn predictor_sees_encoded_board() {
        let state = GameState::initial().apply_move(2).unwrap();
        // Play wherever Red just played, read back from the encoding.
        let follow = |board: &EncodedBoard| {
            board
                .iter()
                .position(|&v| v == 1.0)
                .map(|idx| idx % 7)
                .unwrap_or(0)
        };
        let mut agent = PredictorAgent::with_seed("Follow", follow, 0);
        assert_eq!(agent.choose(&state).unwrap().column, 2);
    }

    #[test]
    fn out_of_range_prediction_falls_back_to_legal_column() {
        let mut agent = PredictorAgent::with_seed("Broken", |_: &EncodedBoard| 42usize, 3);
        let state = GameState::initial();
        for _ in 0..20 {
            let column = agent.choose(&state).unwrap().column;
            assert!(state.legal_actions().contains(&column));
        }
    }

    #[test]
    fn full_column_prediction_falls_back() {
        let mut state = GameState::initial();
        for _ in 0..ROWS {
            state.play(0).unwrap();
        }
        let mut agent = PredictorAgent::with_seed("Stubborn", |_: &EncodedBoard| 0usize, 11);
        for _ in 0..20 {
            assert_ne!(agent.choose(&state).unwrap().column, 0);
        }
    }

    #[test]
    fn seeded_clone_repeats_fallbacks() {
        let agent = PredictorAgent::with_seed("Broken", |_: &EncodedBoard| 9usize, 5);
        let mut clone = agent.clone_agent();
        let mut fresh = PredictorAgent::with_seed("Broken", |_: &EncodedBoard| 9usize, 5);
        let state = GameState::initial();
        for _ in 0..20 {
            assert_eq!(clone.choose(&state), fresh.choose(&state));
        }
    }

    #[test]
    fn clone_keeps_name() {
        let agent = PredictorAgent::new("Model", |_: &EncodedBoard| 3usize);
        assert_eq!(agent.clone_agent().name(), "Model");
    }
}
