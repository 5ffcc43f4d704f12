// ═══════════════════════════════════════════════════════════════════════
// Setup — deterministic match construction.
//
// Everything random flows through the state's seeded RNG streams, so
// one (seed, roles, config) triple always produces the same opening
// board, hands, and deck order.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;

use crate::actions::move_triggers;
use crate::distance;
use crate::decks::{InfectionDeck, PlayerDeck};
use crate::infection::infect;
use crate::map::{CITIES, NUM_CITIES};
use crate::types::{
    Card, CityId, CityState, GameConfig, GameState, GameStatus, PlayerState, Role, TurnPhase,
};

/// Cards dealt at setup: hand sizes shrink as the table grows.
fn opening_hand_size(player_count: usize) -> usize {
    6 - player_count
}

/// Create a match with roles sampled from the random-assignment pool.
pub fn create_game(player_count: usize, seed: u64, config: GameConfig) -> Result<GameState, String> {
    if !(2..=4).contains(&player_count) {
        return Err(format!("player count must be 2-4, got {player_count}"));
    }
    let mut state = blank_state(player_count, seed, config);
    let mut rng = state.next_rng();
    let mut pool = Role::RANDOM_POOL.to_vec();
    pool.shuffle(&mut rng);
    for (pid, role) in pool.into_iter().take(player_count).enumerate() {
        state.players[pid].role = role;
    }
    setup(&mut state);
    Ok(state)
}

/// Create a match with an explicit role list (duplicates allowed; used
/// by drivers and tests).
pub fn create_game_with_roles(roles: &[Role], seed: u64, config: GameConfig) -> Result<GameState, String> {
    if !(2..=4).contains(&roles.len()) {
        return Err(format!("player count must be 2-4, got {}", roles.len()));
    }
    let mut state = blank_state(roles.len(), seed, config);
    for (pid, &role) in roles.iter().enumerate() {
        state.players[pid].role = role;
    }
    setup(&mut state);
    Ok(state)
}

fn all_city_cards() -> Vec<Card> {
    (0..NUM_CITIES as u8).map(|i| Card::City(CityId(i))).collect()
}

fn blank_state(player_count: usize, seed: u64, config: GameConfig) -> GameState {
    GameState {
        config,
        status: GameStatus::NotPlaying,
        turn: 0,
        turn_phase: TurnPhase::Inactive,
        current_player: 0,
        interrupted_player: None,
        players: (0..player_count)
            .map(|pid| PlayerState {
                pid,
                role: Role::Medic,
                position: config.starting_city,
                hand: Vec::new(),
                color_counts: [0; 4],
                special_move: false,
            })
            .collect(),
        cities: vec![CityState::default(); NUM_CITIES],
        player_deck: PlayerDeck::new(all_city_cards()),
        infection_deck: InfectionDeck::new(all_city_cards()),
        cures: [false; 4],
        eradicated: [false; 4],
        stockpile: [config.cube_stockpile; 4],
        outbreak_counter: 0,
        infection_counter: 0,
        infection_rate: 2,
        research_stations: 0,
        protected_cities: Vec::new(),
        medic_position: None,
        actions_left: 0,
        distances: Vec::new(),
        error_flag: false,
        game_log: String::new(),
        seed,
        rng_counter: 0,
    }
}

/// Run the full setup sequence on a state whose roles are already set.
/// Reusable: a finished match can be set up again for a fresh one.
fn setup(state: &mut GameState) {
    state.game_log.clear();
    state.log("Setting game up");

    // Board reset. Hands from a previous match go back through the
    // discard so the deck rebuild below reclaims every card.
    for player in &mut state.players {
        player.position = state.config.starting_city;
        state.player_deck.discard.append(&mut player.hand);
        player.color_counts = [0; 4];
        player.special_move = false;
    }
    for city in &mut state.cities {
        *city = CityState::default();
    }
    state.city_mut(state.config.starting_city).research_station = true;
    state.research_stations = 1;
    distance::recompute(state);

    state.stockpile = [state.config.cube_stockpile; 4];
    state.cures = [false; 4];
    state.eradicated = [false; 4];
    state.outbreak_counter = 0;
    state.infection_counter = 0;
    state.infection_rate = 2;
    state.protected_cities.clear();
    state.medic_position = None;
    state.interrupted_player = None;
    state.actions_left = 0;

    // Rebuild and shuffle the player deck: every city card, no
    // epidemics yet.
    let mut cards: Vec<Card> = state
        .player_deck
        .piles
        .iter()
        .flatten()
        .chain(state.player_deck.discard.iter())
        .copied()
        .filter(|c| *c != Card::Epidemic)
        .collect();
    let mut rng = state.next_rng();
    cards.shuffle(&mut rng);

    // Opening hands.
    let hand_size = opening_hand_size(state.player_count());
    for pid in 0..state.player_count() {
        for _ in 0..hand_size {
            if let Some(card) = cards.pop() {
                let role = state.players[pid].role;
                state.log(&format!("{role} drew: {}", card.name()));
                if let Some(color) = card.color() {
                    state.players[pid].color_counts[color.index()] += 1;
                }
                state.players[pid].hand.push(card);
            }
        }
    }

    // The holder of the highest-population city card starts; on a tie
    // the later seat wins.
    let mut starting_player = 0;
    let mut best_population = 0;
    for player in &state.players {
        for card in &player.hand {
            if let Card::City(c) = card {
                let population = CITIES[c.0 as usize].population;
                if population >= best_population {
                    best_population = population;
                    starting_player = player.pid;
                }
            }
        }
    }

    // Split the rest into one sub-pile per epidemic card, seed each
    // with its Epidemic, and stack them; the last pile is the top.
    let epidemics = state.config.epidemic_cards;
    let piles: Vec<Vec<Card>> = if epidemics == 0 {
        vec![cards]
    } else {
        let mut piles: Vec<Vec<Card>> = vec![vec![Card::Epidemic]; epidemics];
        for (i, card) in cards.into_iter().enumerate() {
            piles[i % epidemics].push(card);
        }
        for pile in &mut piles {
            pile.shuffle(&mut rng);
        }
        piles
    };
    state.player_deck.remaining = piles.iter().map(Vec::len).sum::<usize>() as i32;
    state.player_deck.epidemic_countdown = piles.last().map_or(0, Vec::len);
    state.player_deck.expecting_epidemic = epidemics > 0;
    state.player_deck.piles = piles;
    state.player_deck.discard.clear();
    state.player_deck.recount_colors();

    // Rebuild and shuffle the infection deck into a single pile.
    let mut infection_cards: Vec<Card> = state
        .infection_deck
        .piles
        .iter()
        .flatten()
        .chain(state.infection_deck.discard.iter())
        .copied()
        .collect();
    infection_cards.shuffle(&mut rng);
    state.infection_deck.piles = vec![infection_cards];
    state.infection_deck.discard.clear();

    // Nine opening infections: three cities each at 1, 2, and 3 cubes.
    for i in 0..9u8 {
        if let Card::City(city) = state.infection_deck.draw() {
            let color = CITIES[city.0 as usize].color;
            infect(state, city, i / 3 + 1, color);
        }
    }

    for pid in 0..state.player_count() {
        move_triggers(state, pid);
    }

    state.error_flag = false;
    state.current_player = starting_player;
    state.turn = 1;
    state.turn_phase = TurnPhase::New;
    state.status = GameStatus::Playing;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    fn two_player_roles() -> [Role; 2] {
        [Role::Medic, Role::Scientist]
    }

    #[test]
    fn rejects_bad_player_counts() {
        assert!(create_game(1, 0, GameConfig::default()).is_err());
        assert!(create_game(5, 0, GameConfig::default()).is_err());
        assert!(create_game_with_roles(&[Role::Medic], 0, GameConfig::default()).is_err());
    }

    #[test]
    fn opening_board_shape() {
        let state = create_game_with_roles(&two_player_roles(), 11, GameConfig::default())
            .unwrap();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.turn_phase, TurnPhase::New);
        assert_eq!(state.turn, 1);

        // Hands: 6 - player_count cards each.
        for player in &state.players {
            assert_eq!(player.hand.len(), 4);
            assert_eq!(player.position, map::ATLANTA);
        }

        // Player deck: 48 cities - 8 dealt + 4 epidemics.
        assert_eq!(state.player_deck.remaining, 44);
        assert_eq!(state.player_deck.piles.len(), 4);
        assert_eq!(state.player_deck.epidemics, 4);
        assert!(state.player_deck.expecting_epidemic);

        // Infection deck: 9 opening draws gone, all in the discard.
        assert_eq!(state.infection_deck.remaining(), 39);
        assert_eq!(state.infection_deck.discard.len(), 9);

        assert!(state.city(map::ATLANTA).research_station);
        assert_eq!(state.research_stations, 1);
    }

    #[test]
    fn opening_infections_place_eighteen_cubes() {
        let state = create_game_with_roles(&two_player_roles(), 23, GameConfig::default())
            .unwrap();
        let on_board: u8 = state.cities.iter().flat_map(|c| c.cubes).sum();
        assert_eq!(on_board, 18);
        let drawn: i32 = state.stockpile.iter().map(|&s| 24 - s).sum();
        assert_eq!(drawn, 18);
        assert_eq!(state.outbreak_counter, 0);
    }

    #[test]
    fn starting_player_holds_biggest_city_card() {
        let state = create_game_with_roles(&two_player_roles(), 5, GameConfig::default())
            .unwrap();
        let starter = state.current();
        let best_of = |p: &PlayerState| {
            p.hand
                .iter()
                .filter_map(|c| match c {
                    Card::City(id) => Some(CITIES[id.0 as usize].population),
                    _ => None,
                })
                .max()
                .unwrap_or(0)
        };
        let starter_best = best_of(starter);
        for player in &state.players {
            assert!(best_of(player) <= starter_best);
        }
    }

    #[test]
    fn same_seed_same_game() {
        let a = create_game_with_roles(&two_player_roles(), 99, GameConfig::default()).unwrap();
        let b = create_game_with_roles(&two_player_roles(), 99, GameConfig::default()).unwrap();
        assert_eq!(a.state_key(), b.state_key());
        assert_eq!(a.player_deck, b.player_deck);
        assert_eq!(a.infection_deck, b.infection_deck);

        let c = create_game_with_roles(&two_player_roles(), 100, GameConfig::default()).unwrap();
        assert_ne!(c.state_key(), a.state_key());
    }

    #[test]
    fn setup_reclaims_cards_from_a_finished_match() {
        let mut state = create_game_with_roles(&two_player_roles(), 55, GameConfig::default())
            .unwrap();
        // Simulate a played match: dealt hands plus a few drawn cards
        // sitting in the player discard.
        for _ in 0..2 {
            let card = state.player_deck.draw();
            state.player_deck.discard.push(card);
        }

        setup(&mut state);
        assert_eq!(state.player_deck.remaining, 44);
        let mut copies = [0u8; NUM_CITIES];
        let dealt = state.players.iter().flat_map(|p| p.hand.iter());
        for card in state.player_deck.piles.iter().flatten().chain(dealt) {
            if let Card::City(c) = card {
                copies[c.0 as usize] += 1;
            }
        }
        assert!(copies.iter().all(|&n| n == 1), "a city card was lost or duplicated");
    }

    #[test]
    fn random_roles_come_from_the_pool() {
        for seed in 0..8 {
            let state = create_game(4, seed, GameConfig::default()).unwrap();
            let mut seen = Vec::new();
            for player in &state.players {
                assert!(Role::RANDOM_POOL.contains(&player.role));
                assert!(!seen.contains(&player.role), "role assigned twice");
                seen.push(player.role);
            }
        }
    }

    #[test]
    fn quarantine_specialist_protects_opening_city() {
        let roles = [Role::QuarantineSpecialist, Role::Researcher];
        let state = create_game_with_roles(&roles, 7, GameConfig::default()).unwrap();
        assert!(state.protected_cities.contains(&map::ATLANTA));
        for &n in CITIES[map::ATLANTA.0 as usize].neighbors {
            assert!(state.protected_cities.contains(&n));
        }
    }
}
