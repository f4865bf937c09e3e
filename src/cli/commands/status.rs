use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ideas::StatusLogic;
use crate::db::open_store;
use crate::errors::AppResult;

/// Handle the `status` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Status { json } = cmd else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let stats = store.stats()?;

    if *json {
        StatusLogic::print_json(&stats)?;
    } else {
        StatusLogic::print(&stats);
    }

    Ok(())
}
