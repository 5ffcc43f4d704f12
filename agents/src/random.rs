// ═══════════════════════════════════════════════════════════════════════
// Random Agent — makes all decisions randomly.
// Serves as baseline and for testing game engine stability.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Agent;
use pandemic_engine::types::{Card, GameState};
use pandemic_engine::Action;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_action(&mut self, _state: &GameState, legal: &[Action]) -> Action {
        legal.choose(&mut self.rng).expect("No legal actions").clone()
    }

    fn choose_discard(&mut self, _state: &GameState, hand: &[Card]) -> Card {
        *hand.choose(&mut self.rng).expect("No cards to discard")
    }
}
