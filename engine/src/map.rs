// ═══════════════════════════════════════════════════════════════════════
// Static world map — the 48 cities and their flight connections.
// Everything here is fixed for the duration of a game.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{CityId, Disease};

/// Static description of a city (compile-time constant).
#[derive(Debug, Clone)]
pub struct CityDef {
    pub id: CityId,
    pub name: &'static str,
    pub color: Disease,
    pub population: u32,
    pub neighbors: &'static [CityId],
}

// ── City ID constants ──────────────────────────────────────────────────
// Ordered by home color: Blue (0–11), Yellow (12–23), Black (24–35),
// Red (36–47).

// BLUE
pub const ATLANTA: CityId = CityId(0);
pub const CHICAGO: CityId = CityId(1);
pub const ESSEN: CityId = CityId(2);
pub const LONDON: CityId = CityId(3);
pub const MADRID: CityId = CityId(4);
pub const MILAN: CityId = CityId(5);
pub const MONTREAL: CityId = CityId(6);
pub const NEW_YORK: CityId = CityId(7);
pub const PARIS: CityId = CityId(8);
pub const SAN_FRANCISCO: CityId = CityId(9);
pub const ST_PETERSBURG: CityId = CityId(10);
pub const WASHINGTON: CityId = CityId(11);
// YELLOW
pub const BOGOTA: CityId = CityId(12);
pub const BUENOS_AIRES: CityId = CityId(13);
pub const JOHANNESBURG: CityId = CityId(14);
pub const KHARTOUM: CityId = CityId(15);
pub const KINSHASA: CityId = CityId(16);
pub const LAGOS: CityId = CityId(17);
pub const LIMA: CityId = CityId(18);
pub const LOS_ANGELES: CityId = CityId(19);
pub const MEXICO_CITY: CityId = CityId(20);
pub const MIAMI: CityId = CityId(21);
pub const SANTIAGO: CityId = CityId(22);
pub const SAO_PAULO: CityId = CityId(23);
// BLACK
pub const ALGIERS: CityId = CityId(24);
pub const BAGHDAD: CityId = CityId(25);
pub const CAIRO: CityId = CityId(26);
pub const CHENNAI: CityId = CityId(27);
pub const DELHI: CityId = CityId(28);
pub const ISTANBUL: CityId = CityId(29);
pub const KARACHI: CityId = CityId(30);
pub const KOLKATA: CityId = CityId(31);
pub const MOSCOW: CityId = CityId(32);
pub const MUMBAI: CityId = CityId(33);
pub const RIYADH: CityId = CityId(34);
pub const TEHRAN: CityId = CityId(35);
// RED
pub const BANGKOK: CityId = CityId(36);
pub const BEIJING: CityId = CityId(37);
pub const HO_CHI_MINH_CITY: CityId = CityId(38);
pub const HONG_KONG: CityId = CityId(39);
pub const JAKARTA: CityId = CityId(40);
pub const MANILA: CityId = CityId(41);
pub const OSAKA: CityId = CityId(42);
pub const SEOUL: CityId = CityId(43);
pub const SHANGHAI: CityId = CityId(44);
pub const SYDNEY: CityId = CityId(45);
pub const TAIPEI: CityId = CityId(46);
pub const TOKYO: CityId = CityId(47);

pub const NUM_CITIES: usize = 48;

/// Whether an id refers to a real city. Ids arrive from outside the
/// crate (deserialized actions), so they cannot be trusted to index
/// the catalog.
pub fn on_map(id: CityId) -> bool {
    (id.0 as usize) < NUM_CITIES
}

/// Lookup city name by CityId.
pub fn city_name(id: CityId) -> &'static str {
    CITIES[id.0 as usize].name
}

/// Reverse lookup, for parsing snapshot/CLI input.
pub fn city_by_name(name: &str) -> Option<CityId> {
    CITIES.iter().find(|c| c.name == name).map(|c| c.id)
}

// ── Static city definitions ────────────────────────────────────────────

macro_rules! city {
    ($id:expr, $name:expr, $color:expr, pop: $pop:expr, adj: [$($a:expr),* $(,)?]) => {
        CityDef {
            id: $id,
            name: $name,
            color: $color,
            population: $pop,
            neighbors: &[$($a),*],
        }
    };
}

pub static CITIES: [CityDef; NUM_CITIES] = [
    // BLUE
    city!(ATLANTA, "atlanta", Disease::Blue, pop: 4_715_000,
        adj: [CHICAGO, WASHINGTON, MIAMI]),
    city!(CHICAGO, "chicago", Disease::Blue, pop: 9_121_000,
        adj: [SAN_FRANCISCO, MONTREAL, ATLANTA, MEXICO_CITY, LOS_ANGELES]),
    city!(ESSEN, "essen", Disease::Blue, pop: 575_000,
        adj: [LONDON, PARIS, ST_PETERSBURG, MILAN]),
    city!(LONDON, "london", Disease::Blue, pop: 8_568_000,
        adj: [NEW_YORK, ESSEN, PARIS, MADRID]),
    city!(MADRID, "madrid", Disease::Blue, pop: 5_427_000,
        adj: [NEW_YORK, LONDON, PARIS, ALGIERS, SAO_PAULO]),
    city!(MILAN, "milan", Disease::Blue, pop: 5_232_000,
        adj: [PARIS, ESSEN, ISTANBUL]),
    city!(MONTREAL, "montreal", Disease::Blue, pop: 3_429_000,
        adj: [CHICAGO, NEW_YORK, WASHINGTON]),
    city!(NEW_YORK, "new_york", Disease::Blue, pop: 20_464_000,
        adj: [MONTREAL, LONDON, MADRID, WASHINGTON]),
    city!(PARIS, "paris", Disease::Blue, pop: 10_755_000,
        adj: [LONDON, MADRID, ESSEN, MILAN, ALGIERS]),
    city!(SAN_FRANCISCO, "san_francisco", Disease::Blue, pop: 5_864_000,
        adj: [CHICAGO, LOS_ANGELES, MANILA, TOKYO]),
    city!(ST_PETERSBURG, "st_petersburg", Disease::Blue, pop: 4_879_000,
        adj: [ESSEN, MOSCOW, ISTANBUL]),
    city!(WASHINGTON, "washington", Disease::Blue, pop: 4_679_000,
        adj: [MONTREAL, NEW_YORK, ATLANTA, MIAMI]),
    // YELLOW
    city!(BOGOTA, "bogota", Disease::Yellow, pop: 8_702_000,
        adj: [MEXICO_CITY, MIAMI, SAO_PAULO, BUENOS_AIRES, LIMA]),
    city!(BUENOS_AIRES, "buenos_aires", Disease::Yellow, pop: 13_639_000,
        adj: [BOGOTA, SAO_PAULO]),
    city!(JOHANNESBURG, "johannesburg", Disease::Yellow, pop: 3_888_000,
        adj: [KINSHASA, KHARTOUM]),
    city!(KHARTOUM, "khartoum", Disease::Yellow, pop: 4_887_000,
        adj: [LAGOS, KINSHASA, JOHANNESBURG, CAIRO]),
    city!(KINSHASA, "kinshasa", Disease::Yellow, pop: 9_046_000,
        adj: [LAGOS, KHARTOUM, JOHANNESBURG]),
    city!(LAGOS, "lagos", Disease::Yellow, pop: 11_547_000,
        adj: [SAO_PAULO, KHARTOUM, KINSHASA]),
    city!(LIMA, "lima", Disease::Yellow, pop: 9_121_000,
        adj: [MEXICO_CITY, BOGOTA, SANTIAGO]),
    city!(LOS_ANGELES, "los_angeles", Disease::Yellow, pop: 14_900_000,
        adj: [SAN_FRANCISCO, CHICAGO, MEXICO_CITY, SYDNEY]),
    city!(MEXICO_CITY, "mexico_city", Disease::Yellow, pop: 19_463_000,
        adj: [CHICAGO, LOS_ANGELES, MIAMI, BOGOTA, LIMA]),
    city!(MIAMI, "miami", Disease::Yellow, pop: 5_582_000,
        adj: [ATLANTA, MEXICO_CITY, WASHINGTON, BOGOTA]),
    city!(SANTIAGO, "santiago", Disease::Yellow, pop: 6_015_000,
        adj: [LIMA]),
    city!(SAO_PAULO, "sao_paulo", Disease::Yellow, pop: 20_186_000,
        adj: [MADRID, BOGOTA, LAGOS, BUENOS_AIRES]),
    // BLACK
    city!(ALGIERS, "algiers", Disease::Black, pop: 2_946_000,
        adj: [MADRID, PARIS, ISTANBUL, CAIRO]),
    city!(BAGHDAD, "baghdad", Disease::Black, pop: 6_204_000,
        adj: [ISTANBUL, CAIRO, TEHRAN, KARACHI, RIYADH]),
    city!(CAIRO, "cairo", Disease::Black, pop: 14_718_000,
        adj: [KHARTOUM, ALGIERS, ISTANBUL, BAGHDAD, RIYADH]),
    city!(CHENNAI, "chennai", Disease::Black, pop: 8_865_000,
        adj: [MUMBAI, DELHI, KOLKATA, BANGKOK, JAKARTA]),
    city!(DELHI, "delhi", Disease::Black, pop: 22_242_000,
        adj: [TEHRAN, KARACHI, MUMBAI, KOLKATA, CHENNAI]),
    city!(ISTANBUL, "istanbul", Disease::Black, pop: 13_576_000,
        adj: [MILAN, ST_PETERSBURG, ALGIERS, MOSCOW, BAGHDAD, CAIRO]),
    city!(KARACHI, "karachi", Disease::Black, pop: 20_711_000,
        adj: [BAGHDAD, RIYADH, TEHRAN, DELHI, MUMBAI]),
    city!(KOLKATA, "kolkata", Disease::Black, pop: 14_374_000,
        adj: [DELHI, CHENNAI, HONG_KONG, BANGKOK]),
    city!(MOSCOW, "moscow", Disease::Black, pop: 15_512_000,
        adj: [ST_PETERSBURG, ISTANBUL, TEHRAN]),
    city!(MUMBAI, "mumbai", Disease::Black, pop: 16_910_000,
        adj: [KARACHI, DELHI, CHENNAI]),
    city!(RIYADH, "riyadh", Disease::Black, pop: 5_037_000,
        adj: [CAIRO, BAGHDAD, KARACHI]),
    city!(TEHRAN, "tehran", Disease::Black, pop: 7_419_000,
        adj: [MOSCOW, BAGHDAD, DELHI, KARACHI]),
    // RED
    city!(BANGKOK, "bangkok", Disease::Red, pop: 7_151_000,
        adj: [CHENNAI, KOLKATA, HONG_KONG, HO_CHI_MINH_CITY, JAKARTA]),
    city!(BEIJING, "beijing", Disease::Red, pop: 17_311_000,
        adj: [SEOUL, SHANGHAI]),
    city!(HO_CHI_MINH_CITY, "ho_chi_minh_city", Disease::Red, pop: 8_314_000,
        adj: [BANGKOK, JAKARTA, HONG_KONG, MANILA]),
    city!(HONG_KONG, "hong_kong", Disease::Red, pop: 7_106_000,
        adj: [KOLKATA, BANGKOK, SHANGHAI, TAIPEI, MANILA, HO_CHI_MINH_CITY]),
    city!(JAKARTA, "jakarta", Disease::Red, pop: 26_063_000,
        adj: [CHENNAI, BANGKOK, HO_CHI_MINH_CITY, SYDNEY]),
    city!(MANILA, "manila", Disease::Red, pop: 20_767_000,
        adj: [SAN_FRANCISCO, HONG_KONG, HO_CHI_MINH_CITY, TAIPEI, SYDNEY]),
    city!(OSAKA, "osaka", Disease::Red, pop: 2_871_000,
        adj: [TAIPEI, TOKYO]),
    city!(SEOUL, "seoul", Disease::Red, pop: 22_547_000,
        adj: [BEIJING, SHANGHAI, TOKYO]),
    city!(SHANGHAI, "shanghai", Disease::Red, pop: 13_482_000,
        adj: [BEIJING, SEOUL, TOKYO, HONG_KONG, TAIPEI]),
    city!(SYDNEY, "sydney", Disease::Red, pop: 3_785_000,
        adj: [LOS_ANGELES, JAKARTA, MANILA]),
    city!(TAIPEI, "taipei", Disease::Red, pop: 8_338_000,
        adj: [HONG_KONG, OSAKA, MANILA, SHANGHAI]),
    city!(TOKYO, "tokyo", Disease::Red, pop: 13_189_000,
        adj: [SAN_FRANCISCO, SHANGHAI, SEOUL, OSAKA]),
];
