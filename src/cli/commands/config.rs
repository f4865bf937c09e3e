use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    {
        let path = cli.config.clone().unwrap_or_else(Config::config_file);

        if *print_config {
            ConfigLogic::print(cfg, &path)?;
        }

        if *edit_config {
            if !path.exists() {
                cfg.save(&path)?;
            }
            ConfigLogic::edit(&path, editor.as_deref())?;
        }
    }

    Ok(())
}
