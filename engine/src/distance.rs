// ═══════════════════════════════════════════════════════════════════════
// Distances — all-pairs shortest paths over the city graph.
//
// Edges are the printed adjacencies plus a clique over every city with
// a research station (shuttle flights). Recomputed only when station
// topology changes; heuristics read the cached table.
// ═══════════════════════════════════════════════════════════════════════

use std::collections::VecDeque;

use crate::map::{CITIES, NUM_CITIES};
use crate::types::{CityId, GameState, DIST_INFINITY};

fn visit(next: CityId, here: u8, row: &mut [u8], queue: &mut VecDeque<CityId>) {
    if row[next.0 as usize] == DIST_INFINITY {
        row[next.0 as usize] = here + 1;
        queue.push_back(next);
    }
}

/// Rebuild the cached distance table from the current station layout.
pub fn recompute(state: &mut GameState) {
    let stations: Vec<CityId> = (0..NUM_CITIES as u8)
        .map(CityId)
        .filter(|&c| state.city(c).research_station)
        .collect();

    let mut table = vec![vec![DIST_INFINITY; NUM_CITIES]; NUM_CITIES];
    for start in 0..NUM_CITIES {
        let row = &mut table[start];
        row[start] = 0;
        let mut queue = VecDeque::from([CityId(start as u8)]);
        while let Some(city) = queue.pop_front() {
            let here = row[city.0 as usize];
            for &neighbor in CITIES[city.0 as usize].neighbors {
                visit(neighbor, here, row, &mut queue);
            }
            if stations.contains(&city) {
                for &station in &stations {
                    if station != city {
                        visit(station, here, row, &mut queue);
                    }
                }
            }
        }
    }
    state.distances = table;
}
