use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::silver::{CommitMode, SilverLogic, SilverOptions};
use crate::errors::AppResult;
use crate::utils::formatting::usd;
use std::io;

/// Handle the `silver` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Silver {
        auto,
        no_commit,
        source,
        fetcher,
    } = cmd
    else {
        return Ok(());
    };

    let commit = if *auto {
        CommitMode::Auto
    } else if *no_commit {
        CommitMode::Never
    } else {
        CommitMode::Ask
    };

    let opts = SilverOptions {
        fetcher: fetcher.unwrap_or(cfg.silver.fetcher),
        source: source.clone(),
        commit,
    };

    let stdin = io::stdin();
    let outcome = SilverLogic::run(cfg, &opts, &mut stdin.lock())?;

    super::record(
        cfg,
        "silver",
        &outcome.csv.display().to_string(),
        &format!(
            "{} USD/oz{}",
            usd(outcome.price),
            if outcome.committed { " (committed)" } else { "" }
        ),
    );

    Ok(())
}
