//! `IdeaStore` over the local SQLite database.

use crate::db::ideas::IdeaStore;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Idea, IdeaStats};
use rusqlite::params;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// The schema must already be migrated (see `db::initialize`).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }
}

impl IdeaStore for SqliteStore {
    fn pending_count(&mut self) -> AppResult<i64> {
        let n = self.pool.conn.query_row(
            "SELECT COUNT(*) FROM travel_development_ideas WHERE is_fixed = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    fn pending(&mut self) -> AppResult<Vec<Idea>> {
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT id, idea, created_at FROM travel_development_ideas
             WHERE is_fixed = 0 ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Idea {
                id: row.get(0)?,
                idea: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;

        let mut ideas = Vec::new();
        for r in rows {
            ideas.push(r?);
        }
        Ok(ideas)
    }

    fn exists(&mut self, idea: &str) -> AppResult<bool> {
        let n: i64 = self.pool.conn.query_row(
            "SELECT COUNT(*) FROM travel_development_ideas WHERE idea = ?1",
            [idea],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    fn insert(&mut self, idea: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO travel_development_ideas (idea) VALUES (?1)",
            [idea],
        )?;
        Ok(())
    }

    fn mark_fixed(&mut self, id: i64) -> AppResult<()> {
        self.pool.conn.execute(
            "UPDATE travel_development_ideas
             SET is_fixed = 1, fixed_at = datetime('now', 'localtime')
             WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    fn mark_fixed_with_note(&mut self, id: i64, note: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "UPDATE travel_development_ideas
             SET is_fixed = 1, fixed_at = datetime('now', 'localtime'),
                 idea = idea || ?2
             WHERE id = ?1",
            params![id, format!(" ({note})")],
        )?;
        Ok(())
    }

    fn stats(&mut self) -> AppResult<IdeaStats> {
        let stats = self.pool.conn.query_row(
            "SELECT COUNT(*),
                    COUNT(CASE WHEN is_fixed THEN 1 END),
                    COUNT(CASE WHEN NOT is_fixed THEN 1 END)
             FROM travel_development_ideas",
            [],
            |row| {
                Ok(IdeaStats {
                    total: row.get(0)?,
                    completed: row.get(1)?,
                    pending: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }
}
