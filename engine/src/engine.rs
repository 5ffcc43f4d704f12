// ═══════════════════════════════════════════════════════════════════════
// Turn controller — the phase state machine.
//
// Every entry point is gated on the current phase: a call in the wrong
// phase is a protocol violation and returns false without touching the
// state. The only way the machine reaches Inactive mid-match is a
// terminal result (win/loss) or an internal fault, which sets the
// sticky error flag.
//
// Phase order within a turn: New → Actions → Draw → [Discard] → Infect,
// then the next player's New. Forced discards triggered by knowledge
// transfers interrupt the Actions phase and resume it afterwards.
// ═══════════════════════════════════════════════════════════════════════

use crate::actions::{self, Action};
use crate::infection;
use crate::map::city_name;
use crate::types::{Card, GameState, GameStatus, Role, TurnPhase};

/// Actions granted at the start of every turn.
pub const ACTIONS_PER_TURN: u8 = 4;

/// NEW → ACTIONS: grant the action budget.
pub fn start_turn(state: &mut GameState) -> bool {
    if state.turn_phase != TurnPhase::New {
        return false;
    }
    let role = state.current().role;
    state.log(&format!("Turn begin: {role}"));
    state.actions_left = ACTIONS_PER_TURN;
    state.turn_phase = TurnPhase::Actions;
    true
}

/// Apply one action in the ACTIONS phase. The budget is spent even when
/// the action interrupts into a forced discard; the interrupted seat
/// resumes with whatever budget is left.
pub fn do_action(state: &mut GameState, action: &Action) -> bool {
    if state.turn_phase != TurnPhase::Actions {
        return false;
    }
    match actions::perform(state, action) {
        Ok(true) => {
            state.actions_left -= 1;
            if state.actions_left == 0 && state.turn_phase == TurnPhase::Actions {
                state.turn_phase = TurnPhase::Draw;
            }
            if state.won() {
                state.log("Game won");
                state.status = GameStatus::Won;
                state.turn_phase = TurnPhase::Inactive;
            }
            true
        }
        Ok(false) => false,
        Err(fault) => {
            state.log(&format!("Engine fault: {fault}"));
            state.error_flag = true;
            state.turn_phase = TurnPhase::Inactive;
            false
        }
    }
}

/// DRAW: take two cards from the player deck, resolving epidemics
/// inline, then move to DISCARD (over the hand limit) or INFECT.
pub fn draw_phase(state: &mut GameState) -> bool {
    if state.turn_phase != TurnPhase::Draw {
        return false;
    }
    draw_cards(state, 2);
    if state.lost() {
        state.log("Game lost");
        state.status = GameStatus::Lost;
        state.turn_phase = TurnPhase::Inactive;
        return true;
    }
    if state.current().role == Role::OperationsExpert {
        // The once-per-turn charter token re-arms here, ready for the
        // next Actions phase.
        state.players[state.current_player].special_move = true;
    }
    state.turn_phase = if state.current().must_discard() {
        TurnPhase::Discard
    } else {
        TurnPhase::Infect
    };
    true
}

/// Draw `n` cards for the current player. Exhausted-deck draws yield
/// the Missing sentinel, which does nothing here; the loss condition
/// reads the deck's negative remaining count instead.
pub(crate) fn draw_cards(state: &mut GameState, n: usize) {
    for _ in 0..n {
        let card = state.player_deck.draw();
        match card {
            Card::City(_) | Card::Event => {
                let role = state.current().role;
                state.log(&format!("{role} drew: {}", card.name()));
                if let Some(color) = card.color() {
                    state.players[state.current_player].color_counts[color.index()] += 1;
                }
                state.players[state.current_player].hand.push(card);
            }
            Card::Epidemic => epidemic(state),
            Card::Missing => {}
        }
    }
}

/// The epidemic pipeline: Increase (infection rate track), Infect
/// (bottom card, three cubes), Intensify (reshuffle the infection
/// discard onto the top of the deck).
fn epidemic(state: &mut GameState) {
    let role = state.current().role;
    state.log(&format!("{role} drew: Epidemic"));
    state.player_deck.discard.push(Card::Epidemic);

    state.infection_counter += 1;
    if state.infection_counter == 3 || state.infection_counter == 5 {
        state.infection_rate += 1;
    }

    if let Card::City(city) = state.infection_deck.draw_bottom() {
        state.log(&format!("Epidemic at: {}", city_name(city)));
        let color = crate::map::CITIES[city.0 as usize].color;
        infection::infect(state, city, 3, color);
    }

    let mut rng = state.next_rng();
    state.infection_deck.intensify(&mut rng);
}

/// Discard one card in the DISCARD phase. Once back at the hand limit,
/// either resume the interrupted seat's Actions phase or fall through
/// to INFECT.
pub fn do_discard(state: &mut GameState, card: Card) -> bool {
    if state.turn_phase != TurnPhase::Discard {
        return false;
    }
    if !actions::discard_card(state, state.current_player, card) {
        return false;
    }
    if !state.current().must_discard() {
        match state.interrupted_player.take() {
            Some(original) => {
                state.current_player = original;
                state.turn_phase = if state.actions_left > 0 {
                    TurnPhase::Actions
                } else {
                    TurnPhase::Draw
                };
            }
            None => state.turn_phase = TurnPhase::Infect,
        }
    }
    true
}

/// INFECT: draw infection cards at the current rate, place one cube
/// each, then pass the turn.
pub fn end_turn(state: &mut GameState) -> bool {
    if state.turn_phase != TurnPhase::Infect {
        return false;
    }
    for _ in 0..state.infection_rate {
        if let Card::City(city) = state.infection_deck.draw() {
            let color = crate::map::CITIES[city.0 as usize].color;
            infection::infect(state, city, 1, color);
        }
    }
    state.current_player = (state.current_player + 1) % state.player_count();
    if state.lost() {
        state.log("Game lost");
        state.status = GameStatus::Lost;
        state.turn_phase = TurnPhase::Inactive;
    } else {
        state.turn += 1;
        state.turn_phase = TurnPhase::New;
    }
    true
}
