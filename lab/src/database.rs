// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for batch results and win-rate stats
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::GameReport;
use rusqlite::{params, Connection};

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &str) -> Self {
        let conn = Connection::open(path).expect("Failed to open database");
        let db = Database { conn };
        db.create_schema();
        db
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
        let db = Database { conn };
        db.create_schema();
        db
    }

    fn create_schema(&self) {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                games       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                id          INTEGER PRIMARY KEY,
                agent_id    INTEGER NOT NULL REFERENCES agents(id),
                seed        INTEGER NOT NULL,
                players     INTEGER NOT NULL,
                won         INTEGER NOT NULL,
                turns       INTEGER NOT NULL,
                outbreaks   INTEGER NOT NULL,
                cures       INTEGER NOT NULL,
                played_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );
        ",
            )
            .expect("Failed to create schema");
    }

    /// Register an agent (or return existing ID).
    pub fn register_agent(&self, name: &str) -> i64 {
        self.conn
            .execute("INSERT OR IGNORE INTO agents (name) VALUES (?1)", params![name])
            .expect("Failed to register agent");
        self.conn
            .query_row("SELECT id FROM agents WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .expect("Failed to get agent id")
    }

    /// Store a completed game report and roll up the agent's tally.
    pub fn store_game(&self, report: &GameReport, agent_id: i64, players: usize) -> i64 {
        self.conn
            .execute(
                "INSERT INTO games (agent_id, seed, players, won, turns, outbreaks, cures)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    agent_id,
                    report.seed as i64,
                    players as i64,
                    report.won,
                    report.turns as i64,
                    report.outbreaks as i64,
                    report.cures_found as i64,
                ],
            )
            .expect("Failed to store game");
        let game_id = self.conn.last_insert_rowid();

        self.conn
            .execute(
                "UPDATE agents SET games = games + 1, wins = wins + ?1 WHERE id = ?2",
                params![if report.won { 1 } else { 0 }, agent_id],
            )
            .expect("Failed to update agent stats");

        game_id
    }

    /// Per-agent summary: (name, games, wins, win rate), best first.
    pub fn summary(&self) -> Vec<(String, u32, u32, f64)> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name, games, wins,
                        CASE WHEN games > 0 THEN CAST(wins AS REAL) / games ELSE 0.0 END AS rate
                 FROM agents ORDER BY rate DESC, games DESC",
            )
            .expect("Failed to prepare summary query");

        stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })
        .expect("Failed to query summary")
        .filter_map(|r| r.ok())
        .collect()
    }

    /// Get total number of games stored.
    pub fn game_count(&self) -> u32 {
        self.conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .unwrap_or(0)
    }
}
