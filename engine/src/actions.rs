// ═══════════════════════════════════════════════════════════════════════
// Actions — the role-aware action catalog.
//
// Every action is a predicate-then-effect pair: legality is computed
// from current state and the declared arguments, and only a legal
// action mutates anything. An illegal action returns Ok(false) with no
// partial effects; an internal inconsistency while applying a legal
// action returns an EngineFault, which the controller treats as fatal.
//
// `available_actions` enumerates every legal argument tuple for the
// acting player; it must never contain a tuple `perform` would reject.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::infection;
use crate::map::{city_name, on_map, CITIES, NUM_CITIES};
use crate::types::{Card, CityId, Disease, GameState, PlayerState, Role, TurnPhase};

/// One player action with its argument payload. `discard` is not a
/// variant: it is only reachable through the DISCARD phase entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move to an adjacent city.
    DriveFerry { target: CityId },
    /// Discard the target's city card and fly there.
    DirectFlight { target: CityId },
    /// Discard the card matching the current city and fly anywhere.
    CharterFlight { target: CityId },
    /// Move between two research stations.
    ShuttleFlight { target: CityId },
    /// Build a station at the current city; at the 6-station cap,
    /// `replace` names the station to tear down.
    BuildResearchStation { replace: Option<CityId> },
    /// Remove one cube (all, for the Medic or a cured color).
    TreatDisease { color: Disease },
    /// Hand the target's city card to a colocated player.
    GiveKnowledge { receiver: usize, target: CityId },
    /// Take the target's city card from a colocated player.
    ReceiveKnowledge { giver: usize, target: CityId },
    /// Turn in 5 matching-color cards (4 for the Scientist) at a station.
    DiscoverCure { color: Disease, cards: Vec<CityId> },
    /// Dispatcher: move any pawn to any other pawn's city.
    RallyFlight { player: usize, target_player: usize },
    /// Operations Expert: once per turn, discard any city card at a
    /// station to fly anywhere.
    SpecialCharterFlight { discard: CityId, target: CityId },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::DriveFerry { .. } => "drive_ferry",
            Action::DirectFlight { .. } => "direct_flight",
            Action::CharterFlight { .. } => "charter_flight",
            Action::ShuttleFlight { .. } => "shuttle_flight",
            Action::BuildResearchStation { .. } => "build_researchstation",
            Action::TreatDisease { .. } => "treat_disease",
            Action::GiveKnowledge { .. } => "give_knowledge",
            Action::ReceiveKnowledge { .. } => "receive_knowledge",
            Action::DiscoverCure { .. } => "discover_cure",
            Action::RallyFlight { .. } => "rally_flight",
            Action::SpecialCharterFlight { .. } => "special_charter_flight",
        }
    }
}

/// Unexpected inconsistency while applying a legal action. Fatal: the
/// controller halts the match rather than continuing on corrupt state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFault(String);

impl EngineFault {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        EngineFault(msg.into())
    }
}

impl std::fmt::Display for EngineFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for EngineFault {}

// ── Hand bookkeeping helpers ───────────────────────────────────────────

fn take_city_card(player: &mut PlayerState, city: CityId) -> Option<Card> {
    let idx = player.hand.iter().position(|c| *c == Card::City(city))?;
    let card = player.hand.remove(idx);
    if let Some(color) = card.color() {
        player.color_counts[color.index()] -= 1;
    }
    Some(card)
}

fn add_to_hand(player: &mut PlayerState, card: Card) {
    if let Some(color) = card.color() {
        player.color_counts[color.index()] += 1;
    }
    player.hand.push(card);
}

/// Move a city card from a hand to the player discard pile, as part of
/// an already-validated effect. Absence at this point is a fault.
fn discard_from_hand(state: &mut GameState, pid: usize, city: CityId) -> Result<(), EngineFault> {
    let role = state.players[pid].role;
    let card = take_city_card(&mut state.players[pid], city).ok_or_else(|| {
        EngineFault::new(format!(
            "{role} should hold {} but the card is not in hand",
            city_name(city)
        ))
    })?;
    state.log(&format!("{role} discarded: {}", card.name()));
    state.player_deck.discard.push(card);
    Ok(())
}

// ── The discard action (DISCARD phase only) ────────────────────────────

/// Discard a card from a player's hand. Legality: the card is present.
pub fn discard_card(state: &mut GameState, pid: usize, card: Card) -> bool {
    let Some(idx) = state.players[pid].hand.iter().position(|c| *c == card) else {
        return false;
    };
    let role = state.players[pid].role;
    let removed = state.players[pid].hand.remove(idx);
    if let Some(color) = removed.color() {
        state.players[pid].color_counts[color.index()] -= 1;
    }
    state.log(&format!("{role} discarded: {}", removed.name()));
    state.player_deck.discard.push(removed);
    true
}

// ── Move triggers ──────────────────────────────────────────────────────

/// Passive role abilities re-evaluated after every position change.
pub fn move_triggers(state: &mut GameState, pid: usize) {
    match state.players[pid].role {
        Role::Medic => {
            let pos = state.players[pid].position;
            state.medic_position = Some(pos);
            for color in Disease::ALL {
                if state.cures[color.index()] {
                    let cubes = state.city(pos).cubes[color.index()];
                    if cubes > 0 {
                        infection::disinfect(state, pos, cubes, color);
                        state.log(&format!("Medic healed {color} at {}", city_name(pos)));
                    }
                }
            }
        }
        Role::QuarantineSpecialist => {
            // Replaces, never accumulates, the prior protection.
            let pos = state.players[pid].position;
            let mut protected = vec![pos];
            protected.extend_from_slice(CITIES[pos.0 as usize].neighbors);
            state.protected_cities = protected;
        }
        _ => {}
    }
}

// ── Action application ─────────────────────────────────────────────────

/// Apply `action` as the current player. Ok(false) means the legality
/// predicate rejected it and nothing was mutated.
pub fn perform(state: &mut GameState, action: &Action) -> Result<bool, EngineFault> {
    let pid = state.current_player;
    match action {
        Action::DriveFerry { target } => {
            let pos = state.players[pid].position;
            if !CITIES[pos.0 as usize].neighbors.contains(target) {
                return Ok(false);
            }
            let role = state.players[pid].role;
            state.log(&format!("{role} drove to: {}", city_name(*target)));
            state.players[pid].position = *target;
            move_triggers(state, pid);
            Ok(true)
        }

        Action::DirectFlight { target } => {
            let pos = state.players[pid].position;
            if *target == pos || !state.players[pid].has_city_card(*target) {
                return Ok(false);
            }
            let role = state.players[pid].role;
            state.log(&format!("{role} direct flew to: {}", city_name(*target)));
            discard_from_hand(state, pid, *target)?;
            state.players[pid].position = *target;
            move_triggers(state, pid);
            Ok(true)
        }

        Action::CharterFlight { target } => {
            let pos = state.players[pid].position;
            if !on_map(*target) || *target == pos || !state.players[pid].has_city_card(pos) {
                return Ok(false);
            }
            let role = state.players[pid].role;
            state.log(&format!("{role} charter flew to: {}", city_name(*target)));
            discard_from_hand(state, pid, pos)?;
            state.players[pid].position = *target;
            move_triggers(state, pid);
            Ok(true)
        }

        Action::ShuttleFlight { target } => {
            let pos = state.players[pid].position;
            if !on_map(*target)
                || *target == pos
                || !state.city(pos).research_station
                || !state.city(*target).research_station
            {
                return Ok(false);
            }
            let role = state.players[pid].role;
            state.log(&format!("{role} shuttle flew to: {}", city_name(*target)));
            state.players[pid].position = *target;
            move_triggers(state, pid);
            Ok(true)
        }

        Action::BuildResearchStation { replace } => {
            let pos = state.players[pid].position;
            let role = state.players[pid].role;
            let can_pay = state.players[pid].has_city_card(pos) || role == Role::OperationsExpert;
            if !can_pay || state.city(pos).research_station {
                return Ok(false);
            }
            if state.research_stations >= 6 {
                // At the cap a station must be torn down elsewhere.
                let Some(removed) = *replace else { return Ok(false) };
                if !on_map(removed) || !state.city(removed).research_station {
                    return Ok(false);
                }
                state.log(&format!("{role} built research station"));
                state.city_mut(removed).research_station = false;
                state.log(&format!(
                    "{role} removed research station at: {}",
                    city_name(removed)
                ));
            } else {
                state.log(&format!("{role} built research station"));
                state.research_stations += 1;
            }
            if role != Role::OperationsExpert {
                discard_from_hand(state, pid, pos)?;
            }
            state.city_mut(pos).research_station = true;
            crate::distance::recompute(state);
            Ok(true)
        }

        Action::TreatDisease { color } => {
            let pos = state.players[pid].position;
            let cubes = state.city(pos).cubes[color.index()];
            if cubes == 0 {
                return Ok(false);
            }
            let role = state.players[pid].role;
            state.log(&format!("{role} treated: {color}"));
            let amount = if role == Role::Medic || state.cures[color.index()] {
                cubes
            } else {
                1
            };
            infection::disinfect(state, pos, amount, *color);
            Ok(true)
        }

        Action::GiveKnowledge { receiver, target } => {
            let receiver = *receiver;
            if receiver == pid || receiver >= state.players.len() {
                return Ok(false);
            }
            let pos = state.players[pid].position;
            let legal = state.players[receiver].position == pos
                && state.players[pid].has_city_card(*target)
                && (pos == *target || state.players[pid].role == Role::Researcher);
            if !legal {
                return Ok(false);
            }
            let giver_role = state.players[pid].role;
            let receiver_role = state.players[receiver].role;
            let card = take_city_card(&mut state.players[pid], *target)
                .ok_or_else(|| EngineFault::new("give_knowledge: validated card vanished"))?;
            add_to_hand(&mut state.players[receiver], card);
            state.log(&format!(
                "{giver_role} gave {} to: {receiver_role}",
                city_name(*target)
            ));
            if state.players[receiver].must_discard() {
                // Usurp the turn: the receiver must discard before the
                // acting player gets control back.
                state.log(&format!("{receiver_role} must discard"));
                state.interrupted_player = Some(pid);
                state.current_player = receiver;
                state.turn_phase = TurnPhase::Discard;
            }
            Ok(true)
        }

        Action::ReceiveKnowledge { giver, target } => {
            let giver = *giver;
            if giver == pid || giver >= state.players.len() {
                return Ok(false);
            }
            let pos = state.players[pid].position;
            let legal = state.players[giver].position == pos
                && state.players[giver].has_city_card(*target)
                && (pos == *target || state.players[giver].role == Role::Researcher);
            if !legal {
                return Ok(false);
            }
            let giver_role = state.players[giver].role;
            let receiver_role = state.players[pid].role;
            let card = take_city_card(&mut state.players[giver], *target)
                .ok_or_else(|| EngineFault::new("receive_knowledge: validated card vanished"))?;
            add_to_hand(&mut state.players[pid], card);
            state.log(&format!(
                "{receiver_role} received {} from: {giver_role}",
                city_name(*target)
            ));
            if state.players[pid].must_discard() {
                state.log(&format!("{receiver_role} must discard"));
                state.interrupted_player = Some(pid);
                state.turn_phase = TurnPhase::Discard;
            }
            Ok(true)
        }

        Action::DiscoverCure { color, cards } => {
            let pos = state.players[pid].position;
            let role = state.players[pid].role;
            if !state.city(pos).research_station {
                return Ok(false);
            }
            let needed = cure_cards_needed(role);
            if cards.len() != needed {
                return Ok(false);
            }
            for (i, &c) in cards.iter().enumerate() {
                let duplicate = cards[..i].contains(&c);
                if duplicate
                    || !state.players[pid].has_city_card(c)
                    || CITIES[c.0 as usize].color != *color
                {
                    return Ok(false);
                }
            }
            state.log(&format!("{role} found cure for: {color}"));
            for &c in cards {
                discard_from_hand(state, pid, c)?;
            }
            state.cures[color.index()] = true;
            if state.stockpile[color.index()] == state.config.cube_stockpile {
                state.eradicated[color.index()] = true;
                state.log(&format!("Eradicated {color} disease"));
            }
            // The Medic now clears this color wherever it stands.
            for p in 0..state.players.len() {
                if state.players[p].role == Role::Medic {
                    move_triggers(state, p);
                }
            }
            Ok(true)
        }

        Action::RallyFlight { player, target_player } => {
            if state.players[pid].role != Role::Dispatcher {
                return Ok(false);
            }
            let (moved, anchor) = (*player, *target_player);
            if moved >= state.players.len() || anchor >= state.players.len() {
                return Ok(false);
            }
            if state.players[moved].position == state.players[anchor].position {
                return Ok(false);
            }
            let moved_role = state.players[moved].role;
            let anchor_role = state.players[anchor].role;
            state.log(&format!("Dispatcher rallied {moved_role} to: {anchor_role}"));
            state.players[moved].position = state.players[anchor].position;
            move_triggers(state, moved);
            Ok(true)
        }

        Action::SpecialCharterFlight { discard, target } => {
            let pos = state.players[pid].position;
            let legal = on_map(*target)
                && state.players[pid].role == Role::OperationsExpert
                && state.players[pid].special_move
                && state.city(pos).research_station
                && state.players[pid].has_city_card(*discard)
                && *target != pos;
            if !legal {
                return Ok(false);
            }
            state.log(&format!(
                "Operations Expert special charter flew to: {} discarding: {}",
                city_name(*target),
                city_name(*discard)
            ));
            state.players[pid].special_move = false;
            discard_from_hand(state, pid, *discard)?;
            state.players[pid].position = *target;
            Ok(true)
        }
    }
}

fn cure_cards_needed(role: Role) -> usize {
    if role == Role::Scientist {
        4
    } else {
        5
    }
}

// ── Legal action enumeration ───────────────────────────────────────────

/// All legal argument tuples for the current player in the ACTIONS
/// phase. This is the contract an external policy consumes.
pub fn available_actions(state: &GameState) -> Vec<Action> {
    let mut actions = Vec::new();
    if state.turn_phase != TurnPhase::Actions {
        return actions;
    }
    let me = state.current();
    let pos = me.position;

    for &n in CITIES[pos.0 as usize].neighbors {
        actions.push(Action::DriveFerry { target: n });
    }

    for card in &me.hand {
        if let Card::City(c) = card {
            if *c != pos {
                actions.push(Action::DirectFlight { target: *c });
            }
        }
    }

    if me.has_city_card(pos) {
        for i in 0..NUM_CITIES as u8 {
            let c = CityId(i);
            if c != pos {
                actions.push(Action::CharterFlight { target: c });
            }
        }
    }

    if state.city(pos).research_station && state.research_stations > 1 {
        for i in 0..NUM_CITIES as u8 {
            let c = CityId(i);
            if c != pos && state.city(c).research_station {
                actions.push(Action::ShuttleFlight { target: c });
            }
        }
    }

    if (me.has_city_card(pos) || me.role == Role::OperationsExpert)
        && !state.city(pos).research_station
    {
        if state.research_stations < 6 {
            actions.push(Action::BuildResearchStation { replace: None });
        } else {
            for i in 0..NUM_CITIES as u8 {
                let c = CityId(i);
                if state.city(c).research_station {
                    actions.push(Action::BuildResearchStation { replace: Some(c) });
                }
            }
        }
    }

    for color in Disease::ALL {
        if state.city(pos).cubes[color.index()] > 0 {
            actions.push(Action::TreatDisease { color });
        }
    }

    for other in &state.players {
        if other.pid == me.pid || other.position != pos {
            continue;
        }
        for card in &me.hand {
            if let Card::City(c) = card {
                if *c == pos || me.role == Role::Researcher {
                    actions.push(Action::GiveKnowledge {
                        receiver: other.pid,
                        target: *c,
                    });
                }
            }
        }
        for card in &other.hand {
            if let Card::City(c) = card {
                if *c == pos || other.role == Role::Researcher {
                    actions.push(Action::ReceiveKnowledge {
                        giver: other.pid,
                        target: *c,
                    });
                }
            }
        }
    }

    if state.city(pos).research_station {
        let needed = cure_cards_needed(me.role);
        for color in Disease::ALL {
            let matching: Vec<CityId> = me
                .hand
                .iter()
                .filter_map(|card| match card {
                    Card::City(c) if CITIES[c.0 as usize].color == color => Some(*c),
                    _ => None,
                })
                .collect();
            if matching.len() >= needed {
                for cards in combinations(&matching, needed) {
                    actions.push(Action::DiscoverCure { color, cards });
                }
            }
        }
    }

    if me.role == Role::Dispatcher {
        for a in &state.players {
            for b in &state.players {
                if a.position != b.position {
                    actions.push(Action::RallyFlight {
                        player: a.pid,
                        target_player: b.pid,
                    });
                }
            }
        }
    }

    if me.role == Role::OperationsExpert && me.special_move && state.city(pos).research_station {
        for card in &me.hand {
            if let Card::City(c) = card {
                for i in 0..NUM_CITIES as u8 {
                    let target = CityId(i);
                    if target != pos {
                        actions.push(Action::SpecialCharterFlight {
                            discard: *c,
                            target,
                        });
                    }
                }
            }
        }
    }

    actions
}

/// Legal discard choices: the discarding player's whole hand.
pub fn legal_discards(state: &GameState) -> Vec<Card> {
    if state.turn_phase == TurnPhase::Discard {
        state.current().hand.clone()
    } else {
        Vec::new()
    }
}

/// All k-element subsets of `items`, in lexicographic index order.
fn combinations(items: &[CityId], k: usize) -> Vec<Vec<CityId>> {
    fn recurse(
        items: &[CityId],
        k: usize,
        start: usize,
        current: &mut Vec<CityId>,
        out: &mut Vec<Vec<CityId>>,
    ) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            if items.len() - i < k - current.len() {
                break;
            }
            current.push(items[i]);
            recurse(items, k, i + 1, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    recurse(items, k, 0, &mut current, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    #[test]
    fn combinations_counts() {
        let items: Vec<CityId> = (0..6).map(CityId).collect();
        assert_eq!(combinations(&items, 5).len(), 6); // C(6,5)
        assert_eq!(combinations(&items, 4).len(), 15); // C(6,4)
        assert_eq!(combinations(&items[..4], 5).len(), 0);
    }

    #[test]
    fn combinations_are_distinct_subsets() {
        let items = [map::ATLANTA, map::CHICAGO, map::ESSEN];
        let combos = combinations(&items, 2);
        assert_eq!(combos.len(), 3);
        for combo in &combos {
            assert_eq!(combo.len(), 2);
            assert_ne!(combo[0], combo[1]);
        }
    }
}
