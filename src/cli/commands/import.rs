use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ideas::ImportLogic;
use crate::db::open_store;
use crate::errors::AppResult;

/// Handle the `import` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Import { files } = cmd else {
        return Ok(());
    };

    let files = if files.is_empty() {
        cfg.sql_file_paths()
    } else {
        files.clone()
    };

    let mut store = open_store(cfg)?;
    let summary = ImportLogic::run(store.as_mut(), &files)?;

    super::record(
        cfg,
        "import",
        &format!("{} file(s)", files.len()),
        &format!(
            "imported {}, skipped {}, failed {}",
            summary.imported, summary.skipped, summary.failed
        ),
    );

    Ok(())
}
