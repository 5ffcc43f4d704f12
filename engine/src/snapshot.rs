// ═══════════════════════════════════════════════════════════════════════
// Snapshot — the observable-state export for agents and UIs.
//
// Everything a player may legally know: public board state, own and
// teammates' hands, the infection deck's pile structure (but not the
// order within a pile), and the legal moves right now. Taking a
// snapshot drains the incremental game log.
// ═══════════════════════════════════════════════════════════════════════

use std::collections::BTreeMap;

use serde::Serialize;

use crate::actions::{available_actions, legal_discards, Action};
use crate::map::{city_name, CITIES, NUM_CITIES};
use crate::types::{Card, CityId, Disease, GameState, GameStatus, TurnPhase};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub role: String,
    pub location: &'static str,
    pub cards: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitySnapshot {
    pub cubes: BTreeMap<&'static str, u8>,
    pub research_station: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfectionDeckSnapshot {
    /// Pile structure bottom-to-top, each pile's names sorted: which
    /// cards are where is public, their order is not.
    pub known_piles: Vec<Vec<&'static str>>,
    pub discard: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDeckSnapshot {
    pub cards_left: i32,
    /// Undrawn city cards, sorted. Membership is deducible from the
    /// discard and hands; order is hidden.
    pub deck: Vec<&'static str>,
    pub discard: Vec<&'static str>,
    pub epidemic_countdown: usize,
    pub epidemic_expectation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub game_state: &'static str,
    pub game_turn: u32,
    pub turn_phase: &'static str,
    pub current_player: usize,
    pub infections: u8,
    pub infection_rate: u8,
    pub outbreaks: u8,
    pub cures: BTreeMap<&'static str, bool>,
    pub eradicated: BTreeMap<&'static str, bool>,
    pub disease_cubes: BTreeMap<&'static str, i32>,
    pub players: Vec<PlayerSnapshot>,
    pub cities: BTreeMap<&'static str, CitySnapshot>,
    pub quarantine_cities: Vec<&'static str>,
    pub infection_deck: InfectionDeckSnapshot,
    pub player_deck: PlayerDeckSnapshot,
    /// Legal actions in the ACTIONS phase, grouped by action name.
    pub actions: BTreeMap<&'static str, Vec<Action>>,
    /// Legal discard choices in the DISCARD phase.
    pub discards: Vec<&'static str>,
    pub remaining_actions: u8,
    pub game_log: String,
}

fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotPlaying => "not_playing",
        GameStatus::Playing => "playing",
        GameStatus::Lost => "lost",
        GameStatus::Won => "won",
    }
}

fn phase_name(phase: TurnPhase) -> &'static str {
    match phase {
        TurnPhase::Inactive => "inactive",
        TurnPhase::New => "new",
        TurnPhase::Actions => "actions",
        TurnPhase::Draw => "draw",
        TurnPhase::Discard => "discard",
        TurnPhase::Infect => "infect",
    }
}

fn color_name(color: Disease) -> &'static str {
    match color {
        Disease::Blue => "blue",
        Disease::Yellow => "yellow",
        Disease::Black => "black",
        Disease::Red => "red",
    }
}

fn by_color<T: Copy>(values: [T; 4]) -> BTreeMap<&'static str, T> {
    Disease::ALL
        .iter()
        .map(|&c| (color_name(c), values[c.index()]))
        .collect()
}

/// Export the full observable state, draining the game log buffer.
pub fn take(state: &mut GameState) -> Snapshot {
    let mut grouped: BTreeMap<&'static str, Vec<Action>> = BTreeMap::new();
    for action in available_actions(state) {
        grouped.entry(action.name()).or_default().push(action);
    }

    let mut deck_names: Vec<&'static str> = state
        .player_deck
        .piles
        .iter()
        .flatten()
        .filter(|c| **c != Card::Epidemic)
        .map(|c| c.name())
        .collect();
    deck_names.sort_unstable();

    Snapshot {
        game_state: status_name(state.status),
        game_turn: state.turn,
        turn_phase: phase_name(state.turn_phase),
        current_player: state.current_player,
        infections: state.infection_counter,
        infection_rate: state.infection_rate,
        outbreaks: state.outbreak_counter,
        cures: by_color(state.cures),
        eradicated: by_color(state.eradicated),
        disease_cubes: by_color(state.stockpile),
        players: state
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                role: p.role.to_string(),
                location: city_name(p.position),
                cards: p.hand.iter().map(|c| c.name()).collect(),
            })
            .collect(),
        cities: (0..NUM_CITIES as u8)
            .map(|i| {
                let id = CityId(i);
                let city = state.city(id);
                (
                    CITIES[i as usize].name,
                    CitySnapshot {
                        cubes: by_color(city.cubes),
                        research_station: city.research_station,
                    },
                )
            })
            .collect(),
        quarantine_cities: state.protected_cities.iter().map(|&c| city_name(c)).collect(),
        infection_deck: InfectionDeckSnapshot {
            known_piles: state.infection_deck.known_piles(),
            discard: state.infection_deck.discard.iter().map(|c| c.name()).collect(),
        },
        player_deck: PlayerDeckSnapshot {
            cards_left: state.player_deck.remaining,
            deck: deck_names,
            discard: state.player_deck.discard.iter().map(|c| c.name()).collect(),
            epidemic_countdown: state.player_deck.epidemic_countdown,
            epidemic_expectation: state.player_deck.expecting_epidemic,
        },
        actions: grouped,
        discards: legal_discards(state).iter().map(|c| c.name()).collect(),
        remaining_actions: state.actions_left,
        game_log: state.drain_log(),
    }
}
