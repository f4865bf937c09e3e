use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::git::GitRepo;
use crate::core::ideas::CheckLogic;
use crate::db::open_store;
use crate::errors::AppResult;

/// Handle the `check` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Check { no_git } = cmd else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let repo = GitRepo::new(&cfg.website_path());
    let git = (!*no_git).then_some(&repo);

    let summary = CheckLogic::run(store.as_mut(), cfg, git)?;

    super::record(
        cfg,
        "check",
        &cfg.website_path().display().to_string(),
        &format!(
            "pending {}, completed {}{}",
            summary.pending,
            summary.completed(),
            if summary.checked_in { ", checked in" } else { "" }
        ),
    );

    Ok(())
}
