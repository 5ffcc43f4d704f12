// ═══════════════════════════════════════════════════════════════════════
// Heuristic Agent — makes decisions using simple strategic heuristics.
// Significantly stronger than RandomAgent: cures when it can, treats
// the worst fires, and otherwise walks toward the most infected city.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Agent;
use pandemic_engine::map::NUM_CITIES;
use pandemic_engine::types::{Card, CityId, GameState};
use pandemic_engine::Action;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct HeuristicAgent {
    rng: ChaCha8Rng,
}

impl HeuristicAgent {
    pub fn new(seed: u64) -> Self {
        HeuristicAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The most cube-laden city on the board, ties to the lowest id.
    fn hotspot(&self, state: &GameState) -> Option<CityId> {
        (0..NUM_CITIES as u8)
            .map(CityId)
            .max_by_key(|&c| {
                let total: u8 = state.city(c).cubes.iter().sum();
                (total, std::cmp::Reverse(c.0))
            })
            .filter(|&c| state.city(c).cubes.iter().sum::<u8>() > 0)
    }

    fn nearest_station(&self, state: &GameState, from: CityId) -> u8 {
        (0..NUM_CITIES as u8)
            .map(CityId)
            .filter(|&c| state.city(c).research_station)
            .map(|c| state.distance(from, c))
            .min()
            .unwrap_or(u8::MAX)
    }

    /// Destination of a free movement action, if it is one.
    fn free_move_target(action: &Action) -> Option<CityId> {
        match action {
            Action::DriveFerry { target } | Action::ShuttleFlight { target } => Some(*target),
            _ => None,
        }
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "Heuristic"
    }

    fn choose_action(&mut self, state: &GameState, legal: &[Action]) -> Action {
        let pos = state.current().position;

        // Cure whenever possible.
        if let Some(cure) = legal.iter().find(|a| matches!(a, Action::DiscoverCure { .. })) {
            return cure.clone();
        }

        // Treat the heaviest color here; always put out 3-cube fires.
        let mut best_treat: Option<(&Action, u8)> = None;
        for action in legal {
            if let Action::TreatDisease { color } = action {
                let cubes = state.city(pos).cubes[color.index()];
                if best_treat.is_none_or(|(_, best)| cubes > best) {
                    best_treat = Some((action, cubes));
                }
            }
        }
        if let Some((treat, cubes)) = best_treat {
            if cubes >= 3 {
                return treat.clone();
            }
        }

        // Build a station if the nearest one is far away.
        if self.nearest_station(state, pos) >= 3 {
            if let Some(build) = legal
                .iter()
                .find(|a| matches!(a, Action::BuildResearchStation { .. }))
            {
                return build.clone();
            }
        }

        // Walk toward the worst city; treat local cubes before leaving
        // if nothing on the board is worse.
        if let Some(target) = self.hotspot(state) {
            let local: u8 = state.city(pos).cubes.iter().sum();
            let remote: u8 = state.city(target).cubes.iter().sum();
            if local >= remote {
                if let Some((treat, _)) = best_treat {
                    return treat.clone();
                }
            }
            let here = state.distance(pos, target);
            let best_move = legal
                .iter()
                .filter_map(|a| Self::free_move_target(a).map(|dest| (a, dest)))
                .min_by_key(|&(_, dest)| state.distance(dest, target));
            if let Some((action, dest)) = best_move {
                if state.distance(dest, target) < here {
                    return action.clone();
                }
            }
        }

        if let Some((treat, _)) = best_treat {
            return treat.clone();
        }
        legal.choose(&mut self.rng).expect("No legal actions").clone()
    }

    fn choose_discard(&mut self, state: &GameState, hand: &[Card]) -> Card {
        // Cured colors are dead weight.
        if let Some(&card) = hand
            .iter()
            .find(|c| c.color().is_some_and(|col| state.cures[col.index()]))
        {
            return card;
        }
        // Otherwise shed the color we hold the least of.
        let mut counts = [0u8; 4];
        for card in hand {
            if let Some(color) = card.color() {
                counts[color.index()] += 1;
            }
        }
        hand.iter()
            .min_by_key(|c| c.color().map_or(0, |col| counts[col.index()]))
            .copied()
            .unwrap_or_else(|| *hand.choose(&mut self.rng).expect("No cards to discard"))
    }
}
