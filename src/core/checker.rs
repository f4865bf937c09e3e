//! Pending development ideas: complete what can be automated, mark rows fixed.

use crate::core::image_opt::optimize_image;
use crate::db::IdeaStore;
use crate::errors::AppResult;
use crate::models::{Idea, TaskKind};
use crate::ui::messages::{error, info, success, warning};
use std::path::{Path, PathBuf};

pub const NOTE_IMAGE_MISSING: &str = "image file not found";
pub const NOTE_AUTO_COMPLETED: &str = "auto-completed by checker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Image re-encoded; message describes the savings.
    Optimized(String),
    ImageMissing,
    AutoCompleted,
    /// Work done (or attempted) but the row was not marked fixed.
    Failed(String),
}

impl Outcome {
    pub fn completed(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub id: i64,
    pub idea: String,
    pub outcome: Outcome,
}

/// Resolves image paths against the website checkout and re-encodes at `quality`.
pub struct Checker {
    website_dir: PathBuf,
    quality: u8,
}

impl Checker {
    pub fn new(website_dir: &Path, quality: u8) -> Self {
        Self {
            website_dir: website_dir.to_path_buf(),
            quality,
        }
    }

    /// Print the pending count; failures only produce a message.
    pub fn report_pending_count(&self, store: &mut dyn IdeaStore) -> Option<i64> {
        match store.pending_count() {
            Ok(n) => {
                println!("📊 Found {n} pending task(s)");
                Some(n)
            }
            Err(e) => {
                error(format!("Could not check pending task count: {e}"));
                None
            }
        }
    }

    pub fn pending(&self, store: &mut dyn IdeaStore) -> AppResult<Vec<Idea>> {
        store.pending()
    }

    /// Process every pending idea in order.
    pub fn process_all(&self, store: &mut dyn IdeaStore, tasks: &[Idea]) -> Vec<TaskResult> {
        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            println!("\n🔹 Task {}: {}", task.id, task.idea);
            let outcome = self.process(store, task);
            results.push(TaskResult {
                id: task.id,
                idea: task.idea.clone(),
                outcome,
            });
        }
        results
    }

    pub fn process(&self, store: &mut dyn IdeaStore, task: &Idea) -> Outcome {
        match TaskKind::classify(&task.idea) {
            TaskKind::OptimizeImage { path } => self.process_image(store, task.id, &path),
            TaskKind::Other => {
                info("Non-image task");
                mark_with_note(store, task.id, NOTE_AUTO_COMPLETED, Outcome::AutoCompleted)
            }
        }
    }

    fn process_image(&self, store: &mut dyn IdeaStore, id: i64, rel: &str) -> Outcome {
        let path = self.website_dir.join(rel);

        if !path.exists() {
            error(format!("Image file not found: {}", path.display()));
            return mark_with_note(store, id, NOTE_IMAGE_MISSING, Outcome::ImageMissing);
        }

        println!("   📁 Found image: {}", path.display());

        let report = match optimize_image(&path, self.quality) {
            Ok(r) => r,
            Err(e) => {
                error(format!("Image optimization failed: {e}"));
                return Outcome::Failed(e.to_string());
            }
        };

        match store.mark_fixed(id) {
            Ok(()) => {
                success(format!(
                    "Task completed: {} [{}]",
                    report.message(),
                    report.dimensions()
                ));
                Outcome::Optimized(report.message())
            }
            Err(e) => {
                warning(format!("Image optimized but database update failed: {e}"));
                Outcome::Failed(e.to_string())
            }
        }
    }
}

fn mark_with_note(store: &mut dyn IdeaStore, id: i64, note: &str, done: Outcome) -> Outcome {
    match store.mark_fixed_with_note(id, note) {
        Ok(()) => {
            success(format!("Marked as completed ({note})"));
            done
        }
        Err(e) => {
            error(format!("Could not mark task {id} as completed: {e}"));
            Outcome::Failed(e.to_string())
        }
    }
}
