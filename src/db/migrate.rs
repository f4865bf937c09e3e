use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ideas_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='travel_development_ideas'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the ideas table has a `fixed_at` column.
fn ideas_has_fixed_at_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('travel_development_ideas')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "fixed_at" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Offline mirror of the Postgres `travel_development_ideas` table.
fn create_ideas_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS travel_development_ideas (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            idea       TEXT NOT NULL,
            is_fixed   INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime')),
            fixed_at   TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_ideas_is_fixed ON travel_development_ideas(is_fixed);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Tables created before completion timestamps were tracked lack `fixed_at`.
fn migrate_add_fixed_at(conn: &Connection) -> Result<()> {
    let version = "20260214_0002_ideas_fixed_at";

    if migration_applied(conn, version)? || ideas_has_fixed_at_column(conn)? {
        return Ok(());
    }

    warning("Adding 'fixed_at' column to travel_development_ideas...");
    conn.execute(
        "ALTER TABLE travel_development_ideas ADD COLUMN fixed_at TEXT",
        [],
    )?;
    mark_migration(conn, version, "Added fixed_at to travel_development_ideas")?;
    success(format!("Migration applied: {version}"));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if ideas_table_exists(conn)? {
        migrate_add_fixed_at(conn)?;
    } else {
        create_ideas_table(conn)?;
        tracing::debug!("created travel_development_ideas table");
    }

    Ok(())
}
