// ═══════════════════════════════════════════════════════════════════════
// Game Runner — runs a complete headless game with agents
// ═══════════════════════════════════════════════════════════════════════

use pandemic_agents::Agent;
use pandemic_engine::engine;
use pandemic_engine::types::{GameConfig, GameStatus, TurnPhase};
use pandemic_engine::{available_actions, create_game, legal_discards};

/// Result of a completed game.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub seed: u64,
    pub won: bool,
    pub turns: u32,
    pub outbreaks: u8,
    pub cures_found: u8,
}

/// Run a complete cooperative game with one agent per seat. Returns
/// the report when the game ends; an agent choosing an illegal move,
/// an engine fault, or blowing the decision budget is an error.
pub fn run_game(
    agents: &mut [Box<dyn Agent>],
    seed: u64,
    config: GameConfig,
    max_decisions: usize, // safety limit to prevent infinite loops
) -> Result<GameReport, String> {
    let mut state = create_game(agents.len(), seed, config)?;
    let mut decisions = 0usize;

    while state.status == GameStatus::Playing {
        match state.turn_phase {
            TurnPhase::New => {
                engine::start_turn(&mut state);
            }
            TurnPhase::Actions => {
                let legal = available_actions(&state);
                let seat = state.current_player;
                let action = agents[seat].choose_action(&state, &legal);
                if !engine::do_action(&mut state, &action) {
                    if state.error_flag {
                        return Err(format!("engine fault on turn {}", state.turn));
                    }
                    return Err(format!(
                        "{} chose illegal {} on turn {}",
                        agents[seat].name(),
                        action.name(),
                        state.turn
                    ));
                }
                decisions += 1;
            }
            TurnPhase::Draw => {
                engine::draw_phase(&mut state);
            }
            TurnPhase::Discard => {
                let hand = legal_discards(&state);
                let seat = state.current_player;
                let card = agents[seat].choose_discard(&state, &hand);
                if !engine::do_discard(&mut state, card) {
                    return Err(format!(
                        "{} chose a discard not in hand on turn {}",
                        agents[seat].name(),
                        state.turn
                    ));
                }
                decisions += 1;
            }
            TurnPhase::Infect => {
                engine::end_turn(&mut state);
            }
            TurnPhase::Inactive => break,
        }
        if decisions > max_decisions {
            return Err(format!(
                "game exceeded {} decisions without finishing (turn {})",
                max_decisions, state.turn
            ));
        }
    }

    Ok(GameReport {
        seed,
        won: state.status == GameStatus::Won,
        turns: state.turn,
        outbreaks: state.outbreak_counter,
        cures_found: state.cures.iter().filter(|&&c| c).count() as u8,
    })
}
