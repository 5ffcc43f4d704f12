// ═══════════════════════════════════════════════════════════════════════
// Infection — cube placement, removal, and outbreak cascades.
// ═══════════════════════════════════════════════════════════════════════

use crate::map::{city_name, CITIES};
use crate::types::{CityId, Disease, GameState};

/// Place up to `amount` cubes of `color` on `city`. A no-op if the
/// color is eradicated, the city is quarantine-protected, or the Medic
/// sits there with that color cured. If the city was already at or near
/// the 3-cube cap, the overflow triggers an outbreak: the counter bumps
/// once and every neighbor is infected with amount 1, except neighbors
/// that already outbroke in this same cascade.
pub fn infect(state: &mut GameState, city: CityId, amount: u8, color: Disease) {
    let mut chain: Vec<CityId> = Vec::new();
    infect_chain(state, city, amount, color, &mut chain);
}

fn infect_chain(
    state: &mut GameState,
    city: CityId,
    amount: u8,
    color: Disease,
    chain: &mut Vec<CityId>,
) {
    let prevented = state.eradicated[color.index()]
        || state.protected_cities.contains(&city)
        || (state.medic_position == Some(city) && state.cures[color.index()]);
    if prevented {
        state.log(&format!("Infection prevented at: {}", city_name(city)));
        return;
    }

    let current = state.city(city).cubes[color.index()];
    let net = amount.min(3 - current);
    state.city_mut(city).cubes[color.index()] += net;
    state.stockpile[color.index()] -= i32::from(net);
    state.log(&format!("Infect {net}-{color} at: {}", city_name(city)));

    if amount > net {
        state.log(&format!("Outbreak at: {}", city_name(city)));
        chain.push(city);
        state.outbreak_counter += 1;
        for &neighbor in CITIES[city.0 as usize].neighbors {
            if !chain.contains(&neighbor) {
                infect_chain(state, neighbor, 1, color, chain);
            }
        }
    }
}

/// Remove `amount` cubes of `color` from `city`, returning them to the
/// stockpile. If the color is cured and the stockpile is back at full
/// capacity, the disease is eradicated.
pub fn disinfect(state: &mut GameState, city: CityId, amount: u8, color: Disease) {
    state.city_mut(city).cubes[color.index()] -= amount;
    state.stockpile[color.index()] += i32::from(amount);
    if state.cures[color.index()] && state.stockpile[color.index()] == state.config.cube_stockpile
    {
        state.eradicated[color.index()] = true;
        state.log(&format!("Eradicated {color} disease"));
    }
}
