//! `carousel` command flow: load, patch, report, write.

use crate::core::carousel::{CarouselPlan, PatchReport, apply_plan, verify};
use crate::errors::AppResult;
use crate::ui::messages::{check, info, success, warning};
use std::fs;
use std::path::Path;

pub struct CarouselLogic;

impl CarouselLogic {
    /// Apply `plan` to `index`; with `dry_run` nothing is written.
    pub fn apply(index: &Path, plan: &CarouselPlan, dry_run: bool) -> AppResult<PatchReport> {
        println!("📝 Patching carousel in {}", index.display());

        let html = fs::read_to_string(index)?;
        let (patched, report) = apply_plan(&html, plan)?;

        for (slug, line) in &report.moved {
            println!("  ✂️  Moved '{slug}' (was at line {line})");
        }
        for slug in &report.already_in_place {
            info(format!("'{slug}' already in the last slide"));
        }
        for slug in &report.missing {
            warning(format!("Card '{slug}' not found, nothing to move"));
        }
        for slug in &report.added {
            println!("  ➕ Added '{slug}'");
        }
        for slug in &report.already_present {
            info(format!("'{slug}' already present, not added again"));
        }
        if let Some(line) = report.slide_line {
            println!("  🆕 New slide inserted at line {line}");
        }
        if let Some((old, new)) = report.title {
            println!("  🏷️  Title: {old} → {new} cities");
        }
        if let Some((old, new)) = report.counter {
            println!("  🔢 Slide counter: 1 / {old} → 1 / {new}");
        }

        if !report.changed() {
            success("Carousel already up to date");
            return Ok(report);
        }

        if dry_run {
            info("Dry run: file not written");
        } else {
            fs::write(index, &patched)?;
            success(format!(
                "Carousel fixed: {} cities in {} slides",
                report.links_after, report.slides_after
            ));
        }

        println!("\n🔍 Verifying changes:");
        Self::print_checks(&patched, plan)?;

        Ok(report)
    }

    /// Print the checks for `index`; returns whether every check passed.
    pub fn verify(index: &Path, plan: &CarouselPlan) -> AppResult<bool> {
        println!("🔍 Verifying {}", index.display());
        let html = fs::read_to_string(index)?;
        Self::print_checks(&html, plan)
    }

    fn print_checks(html: &str, plan: &CarouselPlan) -> AppResult<bool> {
        let checks = verify(html, plan)?;
        for (ok, msg) in &checks {
            check(*ok, msg);
        }
        Ok(checks.iter().all(|(ok, _)| *ok))
    }
}
