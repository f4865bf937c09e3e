//! Storage seam for the development ideas table.
//!
//! Production talks to Postgres through `psql`; the SQLite store mirrors the
//! same contract on the local database for offline runs and tests.

use crate::config::{Config, IdeasBackend};
use crate::db::initialize::open_initialized;
use crate::db::psql::PsqlStore;
use crate::db::sqlite_store::SqliteStore;
use crate::errors::AppResult;
use crate::models::{Idea, IdeaStats};

pub trait IdeaStore {
    /// Number of rows with `is_fixed = false`.
    fn pending_count(&mut self) -> AppResult<i64>;

    /// Pending rows ordered by id.
    fn pending(&mut self) -> AppResult<Vec<Idea>>;

    /// Whether a row with exactly this text exists (fixed or not).
    fn exists(&mut self, idea: &str) -> AppResult<bool>;

    fn insert(&mut self, idea: &str) -> AppResult<()>;

    /// Set `is_fixed` and stamp `fixed_at`.
    fn mark_fixed(&mut self, id: i64) -> AppResult<()>;

    /// Same as [`IdeaStore::mark_fixed`], appending ` (note)` to the idea text.
    fn mark_fixed_with_note(&mut self, id: i64, note: &str) -> AppResult<()>;

    fn stats(&mut self) -> AppResult<IdeaStats>;
}

/// Build the store selected by `ideas.backend`.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn IdeaStore>> {
    match cfg.ideas.backend {
        IdeasBackend::Psql => Ok(Box::new(PsqlStore::from_config(&cfg.ideas))),
        IdeasBackend::Sqlite => {
            let pool = open_initialized(&cfg.local_db_path())?;
            Ok(Box::new(SqliteStore::new(pool)))
        }
    }
}

/// Double single quotes for embedding in a SQL string literal.
pub fn sql_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
