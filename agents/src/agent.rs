// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — interface that all AI agents must implement
//
// Agents see the full GameState, but the only hidden information in it
// is the order of cards inside the deck piles. Honest agents must not
// read pile order directly; `possible_deck` and `known_piles` give the
// legitimate, information-set view of the decks.
// ═══════════════════════════════════════════════════════════════════════

use pandemic_engine::types::{Card, GameState};
use pandemic_engine::Action;

/// A decision policy for one seat. The controller calls `choose_action`
/// with the legal action list in the ACTIONS phase, and
/// `choose_discard` with the hand when a forced discard is pending.
/// Both slices are guaranteed non-empty.
pub trait Agent: Send + Sync {
    /// Human-readable name for this agent (e.g., "Random", "Heuristic").
    fn name(&self) -> &str;

    /// Pick one of the legal actions.
    fn choose_action(&mut self, state: &GameState, legal: &[Action]) -> Action;

    /// Pick one card of the hand to discard.
    fn choose_discard(&mut self, state: &GameState, hand: &[Card]) -> Card;
}
