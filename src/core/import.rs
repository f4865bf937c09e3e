//! Import development ideas from `INSERT INTO ... VALUES ('...')` SQL files.

use crate::db::IdeaStore;
use crate::errors::AppResult;
use crate::ui::messages::{error, skip, success};
use crate::utils::path::file_label;
use crate::utils::truncate_chars;
use regex::RegexBuilder;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub missing_files: usize,
}

/// Every single-value `INSERT` literal in `sql`, with `''` unescaped.
pub fn extract_ideas(sql: &str) -> AppResult<Vec<String>> {
    let re = RegexBuilder::new(r"INSERT\s+INTO.*?VALUES\s*\(\s*'((?:[^']|'')+)'\s*\)")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;

    Ok(re
        .captures_iter(sql)
        .map(|c| c[1].replace("''", "'"))
        .collect())
}

/// Import every idea from `files` that the store does not already hold.
/// Per-idea failures are reported and counted; they do not stop the run.
pub fn import_files(store: &mut dyn IdeaStore, files: &[PathBuf]) -> AppResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for file in files {
        if !file.exists() {
            error(format!("File not found: {}", file.display()));
            summary.missing_files += 1;
            continue;
        }

        println!("\n📋 Processing: {}", file_label(file));
        let ideas = extract_ideas(&fs::read_to_string(file)?)?;

        if ideas.is_empty() {
            println!("   No ideas found in file");
            continue;
        }
        println!("   Found {} idea(s)", ideas.len());

        for idea in ideas {
            let label = truncate_chars(&idea, 60);

            match store.exists(&idea) {
                Ok(true) => {
                    skip(format!("Skipping (already in DB): {label}"));
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    error(format!("Failed to check: {label} ({e})"));
                    summary.failed += 1;
                    continue;
                }
            }

            match store.insert(&idea) {
                Ok(()) => {
                    success(format!("Imported: {label}"));
                    summary.imported += 1;
                }
                Err(e) => {
                    error(format!("Failed to import: {label} ({e})"));
                    summary.failed += 1;
                }
            }
        }
    }

    Ok(summary)
}
