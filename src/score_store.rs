use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::app_dirs::AppDirs;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not prepare score directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt best score record: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, ScoreStoreError>;

/// Persistence for the all-time best score.
pub trait BestScoreStore {
    /// Best score recorded so far, 0 when nothing has been saved.
    fn load(&self) -> Result<u32>;
    fn save(&mut self, best: u32) -> Result<()>;
}

/// A new best score and when it was set.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRecord {
    pub score: u32,
    pub achieved_at: DateTime<Local>,
}

/// SQLite-backed store. Every new best is a row, so the table doubles as a
/// history of records.
#[derive(Debug)]
pub struct SqliteScoreStore {
    conn: Connection,
}

impl SqliteScoreStore {
    /// Opens the store at the default location under the state directory.
    pub fn open_default() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("recall_scores.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ScoreStoreError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS best_scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                score INTEGER NOT NULL,
                achieved_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_best_scores_score ON best_scores(score)",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Most recent records first.
    pub fn history(&self, limit: usize) -> Result<Vec<BestRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT score, achieved_at FROM best_scores ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (score, stamp) = row?;
            let achieved_at = DateTime::parse_from_rfc3339(&stamp)
                .map_err(|e| ScoreStoreError::Corrupt(format!("{stamp}: {e}")))?
                .with_timezone(&Local);
            records.push(BestRecord { score, achieved_at });
        }
        Ok(records)
    }

    pub fn latest_record(&self) -> Result<Option<BestRecord>> {
        Ok(self.history(1)?.into_iter().next())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM best_scores", [])?;
        Ok(())
    }
}

impl BestScoreStore for SqliteScoreStore {
    fn load(&self) -> Result<u32> {
        let best: Option<u32> = self
            .conn
            .query_row("SELECT MAX(score) FROM best_scores", [], |row| row.get(0))
            .optional()?
            .flatten();
        Ok(best.unwrap_or(0))
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO best_scores (score, achieved_at) VALUES (?1, ?2)",
            params![best, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Keeps the best score in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    best: u32,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}
