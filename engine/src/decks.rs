// ═══════════════════════════════════════════════════════════════════════
// Decks — the two pile-structured draw decks.
//
// Both decks are sequences of piles; the last pile is the top of the
// conceptual single deck. The player deck keeps observational
// bookkeeping (remaining count, epidemic countdown) for agents; the
// infection deck keeps a discard sequence that "intensify" shuffles
// back on top.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Card;

// ── Player deck ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDeck {
    /// Piles, innermost-last: draws pop from the end of the last pile.
    pub piles: Vec<Vec<Card>>,
    pub discard: Vec<Card>,
    /// Cards left. Deliberately signed: drawing from an exhausted deck
    /// keeps decrementing, and the loss check reads the negative value.
    pub remaining: i32,
    /// True when the current top pile is known to still hold its
    /// Epidemic card.
    pub expecting_epidemic: bool,
    /// Cards left in the top pile — draws before an epidemic is certain.
    pub epidemic_countdown: usize,
    /// City cards left in the deck per color. Observational, for agents.
    pub city_colors: [i32; 4],
    /// Epidemic cards left in the deck.
    pub epidemics: i32,
}

impl PlayerDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        PlayerDeck {
            piles: vec![cards],
            discard: Vec::new(),
            remaining: 0,
            expecting_epidemic: false,
            epidemic_countdown: 0,
            city_colors: [0; 4],
            epidemics: 0,
        }
    }

    /// Recount the per-color and epidemic tallies from the piles.
    pub fn recount_colors(&mut self) {
        self.city_colors = [0; 4];
        self.epidemics = 0;
        for pile in &self.piles {
            for card in pile {
                match card {
                    Card::City(_) => {
                        if let Some(color) = card.color() {
                            self.city_colors[color.index()] += 1;
                        }
                    }
                    Card::Epidemic => self.epidemics += 1,
                    _ => {}
                }
            }
        }
    }

    /// Pop one card from the top pile. On an exhausted deck, returns the
    /// Missing sentinel and still decrements `remaining`.
    pub fn draw(&mut self) -> Card {
        let card = match self.piles.last_mut() {
            Some(top) => match top.pop() {
                Some(card) => card,
                None => {
                    // Empty piles are removed eagerly, so this only
                    // happens on a freshly built deck of zero cards.
                    self.piles.pop();
                    self.remaining -= 1;
                    return Card::Missing;
                }
            },
            None => {
                self.remaining -= 1;
                return Card::Missing;
            }
        };
        self.remaining -= 1;
        self.epidemic_countdown = self.epidemic_countdown.saturating_sub(1);
        match card {
            Card::City(_) => {
                if let Some(color) = card.color() {
                    self.city_colors[color.index()] -= 1;
                }
            }
            Card::Epidemic => {
                self.epidemics -= 1;
                self.expecting_epidemic = false;
            }
            _ => {}
        }
        if self.piles.last().is_some_and(Vec::is_empty) {
            self.piles.pop();
            self.expecting_epidemic = true;
            self.epidemic_countdown = self.piles.last().map_or(0, Vec::len);
        }
        card
    }

    /// A hypothetical reshuffle of the unseen deck, preserving pile
    /// sizes and which piles still hold their Epidemic card. Used by
    /// agents for imperfect-information sampling; never mutates the
    /// real deck order.
    pub fn possible_deck(&self, rng: &mut impl Rng) -> Vec<Vec<Card>> {
        let pile_info: Vec<(usize, bool)> = self
            .piles
            .iter()
            .map(|p| (p.len(), p.contains(&Card::Epidemic)))
            .collect();
        let mut cards: Vec<Card> = self
            .piles
            .iter()
            .flatten()
            .copied()
            .filter(|c| *c != Card::Epidemic)
            .collect();
        cards.shuffle(rng);
        let mut deck = Vec::with_capacity(pile_info.len());
        for (size, has_epidemic) in pile_info {
            let mut pile = Vec::with_capacity(size);
            if has_epidemic {
                pile.push(Card::Epidemic);
            }
            while pile.len() < size {
                if let Some(c) = cards.pop() {
                    pile.push(c);
                }
            }
            pile.shuffle(rng);
            deck.push(pile);
        }
        deck
    }
}

// ── Infection deck ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfectionDeck {
    /// Piles, innermost-last: normal draws pop from the last pile's end,
    /// epidemics pop from the first pile's front.
    pub piles: Vec<Vec<Card>>,
    pub discard: Vec<Card>,
}

impl InfectionDeck {
    pub fn new(cities: Vec<Card>) -> Self {
        InfectionDeck {
            piles: vec![cities],
            discard: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    /// Draw from the top; the card moves to the discard sequence.
    pub fn draw(&mut self) -> Card {
        let card = match self.piles.last_mut().and_then(Vec::pop) {
            Some(card) => card,
            None => return Card::Missing,
        };
        if self.piles.last().is_some_and(Vec::is_empty) {
            self.piles.pop();
        }
        self.discard.push(card);
        card
    }

    /// Draw from the bottom of the deck (epidemic effect).
    pub fn draw_bottom(&mut self) -> Card {
        let card = match self.piles.first_mut() {
            Some(pile) if !pile.is_empty() => pile.remove(0),
            _ => return Card::Missing,
        };
        if self.piles.first().is_some_and(Vec::is_empty) {
            self.piles.remove(0);
        }
        self.discard.push(card);
        card
    }

    /// Shuffle the discard sequence and stack it as a new top pile.
    /// It does not merge with the undrawn piles below it.
    pub fn intensify(&mut self, rng: &mut impl Rng) {
        self.discard.shuffle(rng);
        let pile = std::mem::take(&mut self.discard);
        self.piles.push(pile);
    }

    /// Per-pile card names, each pile sorted. The pile structure is
    /// public knowledge; the order within a pile is not.
    pub fn known_piles(&self) -> Vec<Vec<&'static str>> {
        self.piles
            .iter()
            .map(|pile| {
                let mut names: Vec<&'static str> = pile.iter().map(|c| c.name()).collect();
                names.sort_unstable();
                names
            })
            .collect()
    }

    /// A hypothetical deck with each pile's order reshuffled, for
    /// information-set sampling by agents.
    pub fn possible_deck(&self, rng: &mut impl Rng) -> Vec<Vec<Card>> {
        self.piles
            .iter()
            .map(|pile| {
                let mut shuffled = pile.clone();
                shuffled.shuffle(rng);
                shuffled
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{self, NUM_CITIES};
    use crate::types::CityId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn all_city_cards() -> Vec<Card> {
        (0..NUM_CITIES as u8).map(|i| Card::City(CityId(i))).collect()
    }

    #[test]
    fn infection_deck_draws_without_replacement() {
        let mut deck = InfectionDeck::new(all_city_cards());
        let mut seen = Vec::new();
        for _ in 0..NUM_CITIES {
            let card = deck.draw();
            assert!(matches!(card, Card::City(_)));
            assert!(!seen.contains(&card), "{} drawn twice", card.name());
            seen.push(card);
        }
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.discard.len(), NUM_CITIES);
        assert_eq!(deck.draw(), Card::Missing);
    }

    #[test]
    fn infection_deck_bottom_draw_and_intensify() {
        let mut deck = InfectionDeck::new(all_city_cards());
        let bottom = deck.draw_bottom();
        assert_eq!(bottom, Card::City(map::ATLANTA));
        assert_eq!(deck.discard, vec![bottom]);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        deck.intensify(&mut rng);
        assert!(deck.discard.is_empty());
        assert_eq!(deck.piles.len(), 2);
        // The recycled card sits above the undrawn cards.
        assert_eq!(deck.draw(), bottom);
    }

    #[test]
    fn player_deck_missing_sentinel_goes_negative() {
        let mut deck = PlayerDeck::new(vec![Card::City(map::ATLANTA)]);
        deck.remaining = 1;
        assert_eq!(deck.draw(), Card::City(map::ATLANTA));
        assert_eq!(deck.remaining, 0);
        assert_eq!(deck.draw(), Card::Missing);
        assert_eq!(deck.remaining, -1);
    }

    #[test]
    fn player_deck_countdown_resets_on_pile_boundary() {
        let mut deck = PlayerDeck::new(Vec::new());
        deck.piles = vec![
            vec![Card::City(map::MIAMI), Card::Epidemic],
            vec![Card::City(map::PARIS), Card::City(map::LONDON)],
        ];
        deck.remaining = 4;
        deck.expecting_epidemic = true;
        deck.epidemic_countdown = 2;
        deck.recount_colors();

        assert_eq!(deck.draw(), Card::City(map::LONDON));
        assert_eq!(deck.epidemic_countdown, 1);
        assert!(deck.expecting_epidemic);
        assert_eq!(deck.draw(), Card::City(map::PARIS));
        // Top pile emptied without its epidemic ever existing there:
        // expectation re-arms and the countdown resets to the next pile.
        assert!(deck.expecting_epidemic);
        assert_eq!(deck.epidemic_countdown, 2);
        assert_eq!(deck.draw(), Card::Epidemic);
        assert!(!deck.expecting_epidemic);
        assert_eq!(deck.epidemics, 0);
    }

    #[test]
    fn possible_deck_preserves_structure() {
        let mut deck = PlayerDeck::new(Vec::new());
        deck.piles = vec![
            vec![Card::City(map::MIAMI), Card::Epidemic, Card::City(map::LIMA)],
            vec![Card::City(map::PARIS), Card::City(map::LONDON)],
        ];
        deck.recount_colors();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hypothetical = deck.possible_deck(&mut rng);
        assert_eq!(hypothetical.len(), 2);
        assert_eq!(hypothetical[0].len(), 3);
        assert_eq!(hypothetical[1].len(), 2);
        assert!(hypothetical[0].contains(&Card::Epidemic));
        assert!(!hypothetical[1].contains(&Card::Epidemic));
        // The real deck is untouched.
        assert_eq!(deck.piles[1], vec![Card::City(map::PARIS), Card::City(map::LONDON)]);
    }
}
