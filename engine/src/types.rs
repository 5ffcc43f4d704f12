// ═══════════════════════════════════════════════════════════════════════
// Core types — diseases, roles, cards, player and game state
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::decks::{InfectionDeck, PlayerDeck};
use crate::map::{self, NUM_CITIES};

// ── Enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    Blue,
    Yellow,
    Black,
    Red,
}

impl Disease {
    pub const ALL: [Disease; 4] = [Disease::Blue, Disease::Yellow, Disease::Black, Disease::Red];

    pub fn index(self) -> usize {
        match self {
            Disease::Blue => 0,
            Disease::Yellow => 1,
            Disease::Black => 2,
            Disease::Red => 3,
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disease::Blue => write!(f, "blue"),
            Disease::Yellow => write!(f, "yellow"),
            Disease::Black => write!(f, "black"),
            Disease::Red => write!(f, "red"),
        }
    }
}

/// Player roles. ContingencyPlanner and Dispatcher are not fully
/// implemented and OperationsExpert blows up the action search space,
/// so random assignment only samples from `RANDOM_POOL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    ContingencyPlanner,
    Dispatcher,
    Medic,
    OperationsExpert,
    QuarantineSpecialist,
    Researcher,
    Scientist,
}

impl Role {
    /// Roles eligible for random assignment at setup.
    pub const RANDOM_POOL: [Role; 4] = [
        Role::Medic,
        Role::QuarantineSpecialist,
        Role::Researcher,
        Role::Scientist,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::ContingencyPlanner => write!(f, "Contingency Planner"),
            Role::Dispatcher => write!(f, "Dispatcher"),
            Role::Medic => write!(f, "Medic"),
            Role::OperationsExpert => write!(f, "Operations Expert"),
            Role::QuarantineSpecialist => write!(f, "Quarantine Specialist"),
            Role::Researcher => write!(f, "Researcher"),
            Role::Scientist => write!(f, "Scientist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    NotPlaying,
    Playing,
    Lost,
    Won,
}

/// Sub-phases of a player turn. `Inactive` is the emergency halt state:
/// the match has ended or an internal fault made it unplayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Inactive,
    New,
    Actions,
    Draw,
    Discard,
    Infect,
}

// ── City ID ────────────────────────────────────────────────────────────
// Compact, copyable city identifier. Index into the static CITIES array.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct CityId(pub u8);

// ── Card ───────────────────────────────────────────────────────────────

/// A card in the player or infection deck. `Missing` is the sentinel
/// returned when drawing from an exhausted deck; it never occurs in a
/// correctly functioning game and is tolerated rather than raised as an
/// error (the loss check reads the negative remaining count instead).
/// `Event` is reserved for the event-card extension and never built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    City(CityId),
    Epidemic,
    Event,
    Missing,
}

impl Card {
    pub fn color(self) -> Option<Disease> {
        match self {
            Card::City(id) => Some(map::CITIES[id.0 as usize].color),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Card::City(id) => map::city_name(id),
            Card::Epidemic => "Epidemic",
            Card::Event => "Event",
            Card::Missing => "",
        }
    }
}

// ── Per-city mutable state ─────────────────────────────────────────────

/// Dynamic state of one city; the static half lives in `map::CITIES`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityState {
    /// Disease cubes per color, each in 0..=3.
    pub cubes: [u8; 4],
    pub research_station: bool,
}

// ── Player ─────────────────────────────────────────────────────────────

/// Hand size above which a player is forced to discard.
pub const HAND_LIMIT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pid: usize,
    pub role: Role,
    pub position: CityId,
    pub hand: Vec<Card>,
    /// City cards in hand per color. Cache, must equal a recount of `hand`.
    pub color_counts: [u8; 4],
    /// Operations Expert once-per-turn charter token.
    pub special_move: bool,
}

impl PlayerState {
    pub fn must_discard(&self) -> bool {
        self.hand.len() > HAND_LIMIT
    }

    pub fn has_city_card(&self, city: CityId) -> bool {
        self.hand.contains(&Card::City(city))
    }
}

// ── Configuration ──────────────────────────────────────────────────────

/// Immutable game parameters, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of Epidemic cards mixed into the player deck.
    pub epidemic_cards: usize,
    pub starting_city: CityId,
    /// Cube stockpile per disease color.
    pub cube_stockpile: i32,
    /// Whether to accumulate the human-readable game log buffer.
    pub log_game: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            epidemic_cards: 4,
            starting_city: map::ATLANTA,
            cube_stockpile: 24,
            log_game: true,
        }
    }
}

// ── Game State ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub status: GameStatus,
    pub turn: u32,
    pub turn_phase: TurnPhase,
    pub current_player: usize,
    /// Seat whose turn was usurped by a forced-discard interrupt
    /// (give/receive knowledge pushing someone over the hand limit).
    pub interrupted_player: Option<usize>,

    pub players: Vec<PlayerState>,
    /// Dynamic state per city, indexed by CityId.
    pub cities: Vec<CityState>,
    pub player_deck: PlayerDeck,
    pub infection_deck: InfectionDeck,

    pub cures: [bool; 4],
    pub eradicated: [bool; 4],
    /// Cubes left in the supply per color. May transiently go negative,
    /// which the loss check observes.
    pub stockpile: [i32; 4],
    pub outbreak_counter: u8,
    pub infection_counter: u8,
    pub infection_rate: u8,
    /// Research stations currently on the board (cap 6).
    pub research_stations: u8,
    /// Cities shielded by the Quarantine Specialist; replaced wholesale
    /// on every move of that player.
    pub protected_cities: Vec<CityId>,
    /// Cached Medic position for the disinfect-on-cure fast path.
    pub medic_position: Option<CityId>,
    /// Action budget left in the current turn (0..=4).
    pub actions_left: u8,

    /// All-pairs shortest path lengths; research stations form a clique.
    /// Recomputed only when station topology changes.
    pub distances: Vec<Vec<u8>>,

    /// Sticky internal-fault flag. Once set the match is unrecoverable.
    pub error_flag: bool,
    /// Incremental human-readable log, drained on snapshot export.
    pub game_log: String,

    // Deterministic RNG: every shuffle draws a fresh stream from these.
    pub seed: u64,
    pub rng_counter: u64,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn city(&self, id: CityId) -> &CityState {
        &self.cities[id.0 as usize]
    }

    pub fn city_mut(&mut self, id: CityId) -> &mut CityState {
        &mut self.cities[id.0 as usize]
    }

    pub fn current(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    /// Shortest path length between two cities, counting the
    /// research-station clique edges.
    pub fn distance(&self, from: CityId, to: CityId) -> u8 {
        self.distances[from.0 as usize][to.0 as usize]
    }

    /// Append a line to the game log buffer.
    pub fn log(&mut self, line: &str) {
        if self.config.log_game {
            self.game_log.push_str(line);
            self.game_log.push('\n');
        }
    }

    /// Take the accumulated log lines, leaving the buffer empty.
    pub fn drain_log(&mut self) -> String {
        std::mem::take(&mut self.game_log)
    }

    /// Derive a fresh deterministic RNG stream for one shuffle event.
    pub fn next_rng(&mut self) -> rand_chacha::ChaCha8Rng {
        use rand::SeedableRng;
        self.rng_counter += 1;
        rand_chacha::ChaCha8Rng::seed_from_u64(
            self.seed ^ self.rng_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15),
        )
    }

    /// Loss: player deck underflow, any stockpile exhausted, or the
    /// outbreak counter at its limit.
    pub fn lost(&self) -> bool {
        self.player_deck.remaining < 0
            || self.stockpile.iter().any(|&c| c < 0)
            || self.outbreak_counter >= 8
    }

    /// Win: all four cures discovered.
    pub fn won(&self) -> bool {
        self.cures.iter().all(|&c| c)
    }

    /// Compact identity key over everything that cannot be derived from
    /// other data. Cheap equality for memoization by search agents.
    pub fn state_key(&self) -> StateKey {
        StateKey {
            status: self.status,
            turn: self.turn,
            turn_phase: self.turn_phase,
            infection_counter: self.infection_counter,
            outbreak_counter: self.outbreak_counter,
            cures: self.cures,
            eradicated: self.eradicated,
            stockpile: self.stockpile,
            players: self
                .players
                .iter()
                .map(|p| (p.position, p.hand.clone()))
                .collect(),
            cities: self.cities.iter().map(|c| (c.cubes, c.research_station)).collect(),
            actions_left: self.actions_left,
        }
    }
}

/// Hashable identity of a game state, for transposition tables and
/// imperfect-information sampling by external agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub status: GameStatus,
    pub turn: u32,
    pub turn_phase: TurnPhase,
    pub infection_counter: u8,
    pub outbreak_counter: u8,
    pub cures: [bool; 4],
    pub eradicated: [bool; 4],
    pub stockpile: [i32; 4],
    pub players: Vec<(CityId, Vec<Card>)>,
    pub cities: Vec<([u8; 4], bool)>,
    pub actions_left: u8,
}

/// Sanity bound used by distance initialization.
pub const DIST_INFINITY: u8 = NUM_CITIES as u8;
