//! Thin wrapper over the `git` CLI: status, add, commit, push.

use crate::config::GitConfig;
use crate::core::process::{ProcessOutput, run, run_checked};
use crate::errors::AppResult;
use crate::ui::messages::{info, skip, success};
use crate::utils::time::commit_stamp;
use std::path::{Path, PathBuf};

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: String,
    pub path: String,
}

/// Parse `git status --porcelain -z` output. Paths arrive verbatim (no
/// quoting or octal escapes); a rename or copy entry is followed by its
/// source path, which is dropped.
pub fn parse_porcelain(out: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut fields = out.split('\0');

    while let Some(field) = fields.next() {
        let (Some(code), Some(path)) = (field.get(..2), field.get(3..)) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        if code.contains(['R', 'C']) {
            fields.next();
        }
        entries.push(StatusEntry {
            code: code.to_string(),
            path: path.to_string(),
        });
    }

    entries
}

/// Files that are produced by the automation itself and never committed.
#[derive(Debug, Clone)]
pub struct CommitFilter {
    suffixes: Vec<String>,
    contains: Vec<String>,
}

impl CommitFilter {
    pub fn from_config(cfg: &GitConfig) -> Self {
        Self {
            suffixes: cfg.skip_suffixes.clone(),
            contains: cfg.skip_contains.clone(),
        }
    }

    pub fn is_skipped(&self, path: &str) -> bool {
        self.suffixes.iter().any(|s| path.ends_with(s.as_str()))
            || self.contains.iter().any(|c| path.contains(c.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckIn {
    NoChanges,
    /// Only skipped files changed; the count is how many were skipped.
    OnlySkipped(usize),
    Pushed { files: Vec<String>, message: String },
}

pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn git(&self, args: &[&str]) -> AppResult<ProcessOutput> {
        run_checked("git", args, Some(&self.dir))
    }

    pub fn is_repo(&self) -> bool {
        match run("git", ["rev-parse", "--is-inside-work-tree"], Some(&self.dir)) {
            Ok(out) => out.success() && out.stdout.trim() == "true",
            Err(_) => false,
        }
    }

    pub fn status(&self) -> AppResult<Vec<StatusEntry>> {
        let out = self.git(&["status", "--porcelain", "-z"])?;
        Ok(parse_porcelain(&out.stdout))
    }

    pub fn add(&self, paths: &[String]) -> AppResult<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.git(&args)?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> AppResult<()> {
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    /// `git push [remote branch]`; without a remote, git's upstream is used.
    pub fn push(&self, target: Option<(&str, &str)>) -> AppResult<()> {
        match target {
            Some((remote, branch)) => self.git(&["push", remote, branch])?,
            None => self.git(&["push"])?,
        };
        Ok(())
    }

    /// Stage every relevant change, commit with an auto-generated message and
    /// push to the configured remote/branch.
    pub fn check_in(&self, cfg: &GitConfig) -> AppResult<CheckIn> {
        let changes = self.status()?;
        if changes.is_empty() {
            success("No changes to commit");
            return Ok(CheckIn::NoChanges);
        }

        info(format!("Found {} change(s) to commit", changes.len()));

        let filter = CommitFilter::from_config(cfg);
        let mut files = Vec::new();
        let mut skipped = 0;
        for entry in changes {
            if filter.is_skipped(&entry.path) {
                skip(format!("Skipping: {} (log/status file)", entry.path));
                skipped += 1;
            } else {
                files.push(entry.path);
            }
        }

        if files.is_empty() {
            success("No relevant changes to commit (only log files)");
            return Ok(CheckIn::OnlySkipped(skipped));
        }

        println!("📝 Committing {} file(s):", files.len());
        for f in &files {
            println!("   + {f}");
        }

        self.add(&files)?;

        let message = format!(
            "Auto-commit: {} - Completed development tasks",
            commit_stamp()
        );
        self.commit(&message)?;
        success(format!("Committed: {message}"));

        println!("🚀 Pushing to {}/{}...", cfg.remote, cfg.branch);
        self.push(Some((cfg.remote.as_str(), cfg.branch.as_str())))?;
        success("Successfully pushed");

        Ok(CheckIn::Pushed { files, message })
    }

    /// Commit a single file (the prices CSV) and push upstream.
    pub fn commit_file(&self, file: &Path, subject: &str) -> AppResult<String> {
        let path = file.to_string_lossy().to_string();
        self.add(&[path])?;

        let message = format!("{subject} - {}", commit_stamp());
        self.commit(&message)?;
        self.push(None)?;
        Ok(message)
    }
}
