use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::carousel::CarouselPlan;
use crate::core::site::CarouselLogic;
use crate::errors::{AppError, AppResult};

/// Handle the `carousel` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Carousel {
        file,
        plan,
        dry_run,
        verify,
    } = cmd
    else {
        return Ok(());
    };

    let index = file.clone().unwrap_or_else(|| cfg.index_path());
    if !index.exists() {
        return Err(AppError::Carousel(format!(
            "{} not found",
            index.display()
        )));
    }

    let plan = match plan {
        Some(p) => CarouselPlan::load(p)?,
        None => CarouselPlan::builtin()?,
    };

    let target = index.display().to_string();

    if *verify {
        let ok = CarouselLogic::verify(&index, &plan)?;
        super::record(cfg, "carousel", &target, if ok { "verify ok" } else { "verify failed" });
        if !ok {
            return Err(AppError::Carousel("verification failed".into()));
        }
        return Ok(());
    }

    let report = CarouselLogic::apply(&index, &plan, *dry_run)?;
    if !*dry_run && report.changed() {
        super::record(
            cfg,
            "carousel",
            &target,
            &format!(
                "{} cities in {} slides",
                report.links_after, report.slides_after
            ),
        );
    }

    Ok(())
}
