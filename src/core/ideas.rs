//! Command-level flows over the development ideas table.

use crate::config::Config;
use crate::core::checker::{Checker, TaskResult};
use crate::core::git::GitRepo;
use crate::core::import::{ImportSummary, import_files};
use crate::db::IdeaStore;
use crate::errors::AppResult;
use crate::models::IdeaStats;
use crate::ui::messages::{error, header, rule, success, warning};
use crate::utils::colors::{CYAN, RESET, color_for_pending};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::time::banner_stamp;
use std::path::PathBuf;

pub struct StatusLogic;

impl StatusLogic {
    pub fn print(stats: &IdeaStats) {
        println!(
            "   Total: {}   Completed: {}{}{}   Pending: {}{}{}",
            bold(&stats.total.to_string()),
            CYAN,
            stats.completed,
            RESET,
            color_for_pending(stats.pending),
            stats.pending,
            RESET
        );
    }

    pub fn print_json(stats: &IdeaStats) -> AppResult<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(stats).map_err(|e| {
                crate::errors::AppError::Other(format!("cannot serialize status: {e}"))
            })?
        );
        Ok(())
    }

    /// Status block printed at the end of `import` and `check`; never fatal.
    pub fn print_footer(store: &mut dyn IdeaStore, title: &str) {
        println!("\n📊 {title}:");
        match store.stats() {
            Ok(stats) => Self::print(&stats),
            Err(e) => error(format!("Could not read table status: {e}")),
        }
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn run(store: &mut dyn IdeaStore, files: &[PathBuf]) -> AppResult<ImportSummary> {
        header("📥 IMPORTING DEVELOPMENT TASKS FROM SQL FILES");

        let summary = import_files(store, files)?;

        println!();
        rule();
        println!("📊 IMPORT SUMMARY");
        success(format!("Imported: {} new idea(s)", summary.imported));
        println!("⏭️  Skipped: {} existing idea(s)", summary.skipped);
        if summary.failed > 0 {
            error(format!("Failed: {} idea(s)", summary.failed));
        }

        StatusLogic::print_footer(store, "DATABASE STATUS AFTER IMPORT");
        rule();

        Ok(summary)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckSummary {
    pub pending: usize,
    pub results: Vec<TaskResult>,
    pub checked_in: bool,
}

impl CheckSummary {
    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.completed()).count()
    }
}

pub struct CheckLogic;

impl CheckLogic {
    /// One polling pass. `git` is `None` when check-in is disabled.
    pub fn run(
        store: &mut dyn IdeaStore,
        cfg: &Config,
        git: Option<&GitRepo>,
    ) -> AppResult<CheckSummary> {
        header(format!(
            "🚀 TRAVEL DEVELOPMENT IDEAS CHECKER\n⏰ {}",
            banner_stamp()
        ));

        let website = cfg.website_path();
        let mut summary = CheckSummary::default();

        let checker = Checker::new(&website, cfg.images.quality);
        checker.report_pending_count(store);

        println!("🔍 Checking for pending tasks...");
        let tasks = checker.pending(store)?;
        summary.pending = tasks.len();

        if tasks.is_empty() {
            success("No pending tasks found");
        } else {
            println!("📋 Found {} pending task(s)", tasks.len());
            print_task_table(&tasks);
            summary.results = checker.process_all(store, &tasks);
        }

        let completed = summary.completed();
        if !tasks.is_empty() {
            if completed > 0 {
                println!("\n📊 Completed {completed} task(s)");
            } else {
                warning("No tasks were completed");
            }
        }

        // With nothing pending there may still be earlier work to push.
        if tasks.is_empty() || completed > 0 {
            summary.checked_in = Self::check_in(cfg, git);
        }

        println!();
        rule();
        println!("📈 SUMMARY");
        println!("Pending tasks checked: {}", summary.pending);
        println!("Tasks completed: {completed}");

        StatusLogic::print_footer(store, "DATABASE STATUS");
        rule();

        Ok(summary)
    }

    fn check_in(cfg: &Config, git: Option<&GitRepo>) -> bool {
        let Some(repo) = git else {
            return false;
        };

        println!("\n🔍 Checking for changes to commit in {}...", repo.dir().display());
        match repo.check_in(&cfg.git) {
            Ok(_) => true,
            Err(e) => {
                error(format!("Check-in failed: {e}"));
                false
            }
        }
    }
}

fn print_task_table(tasks: &[crate::models::Idea]) {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("CREATED", 19),
        Column::new("IDEA", 60),
    ]);

    for t in tasks {
        let wrapped = textwrap::wrap(&t.idea, 60);
        for (i, line) in wrapped.iter().enumerate() {
            if i == 0 {
                table.add_row(vec![t.id.to_string(), t.created_at.clone(), line.to_string()]);
            } else {
                table.add_row(vec![String::new(), String::new(), line.to_string()]);
            }
        }
    }

    print!("{}", table.render());
}
