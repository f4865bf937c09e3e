//! `IdeaStore` over the `psql` command-line client.

use crate::config::IdeasConfig;
use crate::core::process::run_checked;
use crate::db::ideas::{IdeaStore, sql_quote};
use crate::errors::{AppError, AppResult};
use crate::models::{Idea, IdeaStats};

pub struct PsqlStore {
    database: String,
    user: String,
    host: String,
    table: String,
}

impl PsqlStore {
    /// `table` must already be validated as `[schema.]identifier` (see `Config::validate`).
    pub fn from_config(cfg: &IdeasConfig) -> Self {
        Self {
            database: cfg.database.clone(),
            user: cfg.user.clone(),
            host: cfg.host.clone(),
            table: cfg.table.clone(),
        }
    }

    /// Run one statement in unaligned, tuples-only mode with `|` as separator.
    fn query(&self, sql: &str) -> AppResult<String> {
        tracing::debug!(sql, "psql");
        let out = run_checked(
            "psql",
            [
                "-h",
                self.host.as_str(),
                "-U",
                self.user.as_str(),
                "-d",
                self.database.as_str(),
                "-v",
                "ON_ERROR_STOP=1",
                "-t",
                "-A",
                "-F",
                "|",
                "-c",
                sql,
            ],
            None,
        )?;
        Ok(out.stdout)
    }

    fn scalar(&self, sql: &str) -> AppResult<i64> {
        let out = self.query(sql)?;
        let value = out.trim();
        value
            .parse::<i64>()
            .map_err(|_| AppError::UnexpectedOutput("psql".into(), value.to_string()))
    }
}

/// Parse `id|idea|created_at` lines. The idea text may itself contain `|`,
/// so id is taken from the left and created_at from the right.
pub fn parse_pending_rows(output: &str) -> Vec<Idea> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| {
            let (id, rest) = line.split_once('|')?;
            let (idea, created_at) = rest.rsplit_once('|')?;
            Some(Idea {
                id: id.trim().parse().ok()?,
                idea: idea.trim().to_string(),
                created_at: created_at.trim().to_string(),
            })
        })
        .collect()
}

/// Parse a single `total|completed|pending` line.
pub fn parse_stats_row(output: &str) -> Option<IdeaStats> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.split('|').map(|p| p.trim().parse::<i64>());
    Some(IdeaStats {
        total: parts.next()?.ok()?,
        completed: parts.next()?.ok()?,
        pending: parts.next()?.ok()?,
    })
}

impl IdeaStore for PsqlStore {
    fn pending_count(&mut self) -> AppResult<i64> {
        self.scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE is_fixed = false;",
            self.table
        ))
    }

    fn pending(&mut self) -> AppResult<Vec<Idea>> {
        let out = self.query(&format!(
            "SELECT id, idea, created_at FROM {} WHERE is_fixed = false ORDER BY id;",
            self.table
        ))?;
        Ok(parse_pending_rows(&out))
    }

    fn exists(&mut self, idea: &str) -> AppResult<bool> {
        let n = self.scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE idea = {};",
            self.table,
            sql_quote(idea)
        ))?;
        Ok(n > 0)
    }

    fn insert(&mut self, idea: &str) -> AppResult<()> {
        self.query(&format!(
            "INSERT INTO {} (idea) VALUES ({});",
            self.table,
            sql_quote(idea)
        ))?;
        Ok(())
    }

    fn mark_fixed(&mut self, id: i64) -> AppResult<()> {
        self.query(&format!(
            "UPDATE {} SET is_fixed = true, fixed_at = NOW() WHERE id = {id};",
            self.table
        ))?;
        Ok(())
    }

    fn mark_fixed_with_note(&mut self, id: i64, note: &str) -> AppResult<()> {
        self.query(&format!(
            "UPDATE {} SET is_fixed = true, fixed_at = NOW(), idea = idea || {} WHERE id = {id};",
            self.table,
            sql_quote(&format!(" ({note})"))
        ))?;
        Ok(())
    }

    fn stats(&mut self) -> AppResult<IdeaStats> {
        let out = self.query(&format!(
            "SELECT COUNT(*), \
                    COUNT(CASE WHEN is_fixed THEN 1 END), \
                    COUNT(CASE WHEN NOT is_fixed THEN 1 END) \
             FROM {};",
            self.table
        ))?;
        parse_stats_row(&out).ok_or_else(|| AppError::UnexpectedOutput("psql".into(), out))
    }
}
