// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for running games and batches
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use pandemic_agents::{Agent, HeuristicAgent, RandomAgent};
use pandemic_engine::types::{GameConfig, GameStatus, TurnPhase};
use pandemic_engine::{available_actions, create_game, engine, legal_discards, snapshot};
use pandemic_lab::{run_batch, Database, MAX_DECISIONS};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "pandemic-runner", about = "Pandemic Strategy Lab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single game and print the game log as it happens
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 2)]
        players: usize,
        #[arg(short, long, default_value_t = 4)]
        epidemics: usize,
        /// Agent type: "random", "heuristic", or "mixed"
        #[arg(short, long, default_value = "random")]
        agent: String,
        /// Print the final observable state as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a batch of N games in parallel and store the results
    Batch {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 2)]
        players: usize,
        #[arg(short, long, default_value_t = 4)]
        epidemics: usize,
        #[arg(short, long, default_value = "results.db")]
        db: String,
        /// Agent type: "random", "heuristic", or "mixed"
        #[arg(short, long, default_value = "random")]
        agent: String,
    },
    /// Show win-rate summary from the database
    Stats {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, players, epidemics, agent, json } => {
            cmd_play(seed, players, epidemics, &agent, json)
        }
        Commands::Batch { games, players, epidemics, db, agent } => {
            cmd_batch(games, players, epidemics, &db, &agent)
        }
        Commands::Stats { db } => cmd_stats(&db),
    }
}

fn game_config(epidemics: usize) -> GameConfig {
    GameConfig { epidemic_cards: epidemics, ..GameConfig::default() }
}

fn cmd_play(seed: u64, players: usize, epidemics: usize, agent_type: &str, json: bool) {
    println!("=== Pandemic Strategy Lab ===\n");
    println!("Running single game: seed={}, players={}, agent={}\n", seed, players, agent_type);

    let mut agents = make_agents(seed, players, agent_type);
    let mut state = match create_game(players, seed, game_config(epidemics)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Setup error: {}", e);
            return;
        }
    };
    print!("{}", state.drain_log());

    let mut decisions = 0usize;
    while state.status == GameStatus::Playing && decisions < MAX_DECISIONS {
        match state.turn_phase {
            TurnPhase::New => {
                engine::start_turn(&mut state);
            }
            TurnPhase::Actions => {
                let legal = available_actions(&state);
                let seat = state.current_player;
                let action = agents[seat].choose_action(&state, &legal);
                if !engine::do_action(&mut state, &action) {
                    eprintln!("{} chose illegal {} -- aborting", agents[seat].name(), action.name());
                    break;
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
                    eprintln!("{} chose a discard not in hand -- aborting", agents[seat].name());
                    break;
                }
                decisions += 1;
            }
            TurnPhase::Infect => {
                engine::end_turn(&mut state);
            }
            TurnPhase::Inactive => break,
        }
        print!("{}", state.drain_log());
    }

    if json {
        let snap = snapshot::take(&mut state);
        match serde_json::to_string_pretty(&snap) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Snapshot error: {}", e),
        }
        return;
    }

    println!("\nGame finished!");
    println!("  Result: {:?}", state.status);
    println!("  Turns: {}", state.turn);
    println!("  Outbreaks: {}", state.outbreak_counter);
    println!("  Cures: {}", state.cures.iter().filter(|&&c| c).count());
}

fn cmd_batch(games: u32, players: usize, epidemics: usize, db_path: &str, agent_type: &str) {
    println!(
        "=== Batch: {} games, {} players, {} epidemics, agent={} ===\n",
        games, players, epidemics, agent_type
    );

    let db = Database::new(db_path);
    let agent_id = db.register_agent(agent_type);

    let agent_type_owned = agent_type.to_string();
    let reports = run_batch(games, 42, game_config(epidemics), |seed| {
        make_agents(seed, players, &agent_type_owned)
    });

    let mut wins = 0u32;
    let mut errors = 0u32;
    for (g, report) in reports.iter().enumerate() {
        match report {
            Ok(report) => {
                if report.won {
                    wins += 1;
                }
                db.store_game(report, agent_id, players);
            }
            Err(e) => {
                errors += 1;
                eprintln!("Game {}: ERROR -- {}", g + 1, e);
            }
        }
    }

    let played = games - errors;
    let pct = if played > 0 { wins as f64 / played as f64 * 100.0 } else { 0.0 };
    println!("--- Summary ({} games, {} errors) ---", games, errors);
    println!("  {}: {} wins ({:.1}%)", agent_type, wins, pct);
    println!("\nResults saved to: {}", db_path);
    println!("Total games in DB: {}", db.game_count());
}

fn cmd_stats(db_path: &str) {
    let db = Database::new(db_path);
    let summary = db.summary();
    if summary.is_empty() {
        println!("No agents found. Run some batches first.");
        return;
    }
    println!("=== Win rates ===\n");
    println!("{:<20} {:>8} {:>8} {:>9}", "Agent", "Games", "Wins", "Win rate");
    println!("{}", "-".repeat(48));
    for (name, games, wins, rate) in &summary {
        println!("{:<20} {:>8} {:>8} {:>8.1}%", name, games, wins, rate * 100.0);
    }
}

fn make_agents(seed: u64, players: usize, agent_type: &str) -> Vec<Box<dyn Agent>> {
    let mut seeds = ChaCha8Rng::seed_from_u64(seed);
    (0..players)
        .map(|i| {
            let agent_seed: u64 = seeds.gen();
            let agent: Box<dyn Agent> = match agent_type {
                "heuristic" => Box::new(HeuristicAgent::new(agent_seed)),
                "mixed" if i % 2 == 1 => Box::new(HeuristicAgent::new(agent_seed)),
                _ => Box::new(RandomAgent::new(agent_seed)),
            };
            agent
        })
        .collect()
}
