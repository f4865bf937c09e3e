use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (unless it exists or `--test` is given)
///  - the local SQLite database with all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = cli.config.clone().unwrap_or_else(Config::config_file);
    let db_path = cfg.local_db_path();

    println!("⚙️  Initializing travelkit…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", db_path.display());

    if cli.test {
        info("Test mode: configuration file not written");
    } else if path.exists() {
        info("Configuration file already present, left untouched");
    } else {
        cfg.save(&path)?;
        success(format!("Configuration written to {}", path.display()));
    }

    let pool = open_initialized(&db_path)?;
    success(format!("Database initialized at {}", db_path.display()));

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        &db_path.display().to_string(),
        "Database initialized",
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 travelkit initialization completed!");
    Ok(())
}
