use crate::game::GameState;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::{Agent, Decision};

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Deterministic agent for reproducible matches and tests.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose(&mut self, state: &GameState) -> Option<Decision> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(Decision::plain(actions[idx]))
    }

    fn name(&self) -> &str {
        "Random"
    }

    /// A seeded agent clones into a fresh agent with the same seed.
    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(self.seed.map_or_else(RandomAgent::new, RandomAgent::with_seed))
    }
}
