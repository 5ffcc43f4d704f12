pub mod database;
pub mod runner;

pub use database::Database;
pub use runner::{run_game, GameReport};

use pandemic_agents::Agent;
use pandemic_engine::types::GameConfig;
use rayon::prelude::*;

/// Decision budget per game; random agents finish far below this.
pub const MAX_DECISIONS: usize = 50_000;

/// Run `games` independent games in parallel. `make_agents` builds a
/// fresh table of agents per game from that game's seed.
pub fn run_batch<F>(
    games: u32,
    base_seed: u64,
    config: GameConfig,
    make_agents: F,
) -> Vec<Result<GameReport, String>>
where
    F: Fn(u64) -> Vec<Box<dyn Agent>> + Sync,
{
    (0..games)
        .into_par_iter()
        .map(|g| {
            let seed = base_seed + u64::from(g) * 1000;
            let mut agents = make_agents(seed);
            run_game(&mut agents, seed, config, MAX_DECISIONS)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandemic_agents::{HeuristicAgent, RandomAgent};

    fn random_table(seed: u64) -> Vec<Box<dyn Agent>> {
        vec![Box::new(RandomAgent::new(seed)), Box::new(RandomAgent::new(seed ^ 1))]
    }

    #[test]
    fn random_game_runs_to_completion() {
        let mut agents = random_table(9);
        let report = run_game(&mut agents, 9, GameConfig::default(), MAX_DECISIONS).unwrap();
        assert_eq!(report.seed, 9);
        assert!(report.turns >= 1);
        assert!(report.cures_found <= 4);
    }

    #[test]
    fn heuristic_game_runs_to_completion() {
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(HeuristicAgent::new(3)),
            Box::new(HeuristicAgent::new(4)),
            Box::new(HeuristicAgent::new(5)),
        ];
        let report = run_game(&mut agents, 12, GameConfig::default(), MAX_DECISIONS).unwrap();
        assert!(report.outbreaks <= 8);
    }

    #[test]
    fn batch_reports_every_seed() {
        let reports = run_batch(4, 100, GameConfig::default(), random_table);
        assert_eq!(reports.len(), 4);
        for (i, report) in reports.iter().enumerate() {
            let report = report.as_ref().unwrap();
            assert_eq!(report.seed, 100 + i as u64 * 1000);
        }
    }

    #[test]
    fn database_round_trip() {
        let db = Database::in_memory();
        let id = db.register_agent("Random");
        assert_eq!(db.register_agent("Random"), id);

        let report = GameReport { seed: 7, won: true, turns: 30, outbreaks: 3, cures_found: 4 };
        db.store_game(&report, id, 2);
        let lost = GameReport { seed: 8, won: false, turns: 21, outbreaks: 8, cures_found: 1 };
        db.store_game(&lost, id, 2);

        assert_eq!(db.game_count(), 2);
        let summary = db.summary();
        assert_eq!(summary.len(), 1);
        let (name, games, wins, rate) = &summary[0];
        assert_eq!(name, "Random");
        assert_eq!(*games, 2);
        assert_eq!(*wins, 1);
        assert!((rate - 0.5).abs() < 1e-9);
    }
}
