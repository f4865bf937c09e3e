use crate::config::{Config, FetcherKind};
use crate::core::fetch::build_fetcher;
use crate::core::git::GitRepo;
use crate::core::price::PriceExtractor;
use crate::core::prices::{append_record, last_price};
use crate::errors::{AppError, AppResult};
use crate::models::PriceRecord;
use crate::ui::messages::{header, info, rule, success, warning};
use crate::utils::formatting::usd;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Commit and push without asking (cron).
    Auto,
    /// Offer a menu on stdin.
    Ask,
    Never,
}

#[derive(Debug, Clone)]
pub struct SilverOptions {
    pub fetcher: FetcherKind,
    pub source: Option<PathBuf>,
    pub commit: CommitMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SilverOutcome {
    pub price: f64,
    pub csv: PathBuf,
    pub committed: bool,
}

pub struct SilverLogic;

impl SilverLogic {
    pub fn run<R: BufRead>(
        cfg: &Config,
        opts: &SilverOptions,
        input: &mut R,
    ) -> AppResult<SilverOutcome> {
        header("SILVER PRICE SCRAPER");

        let fetcher = build_fetcher(&cfg.silver, opts.fetcher, opts.source.clone())?;
        println!("\n🔄 Fetching current silver price ({})...", fetcher.name());

        let page = fetcher.fetch(&cfg.silver.url)?;
        let quote = PriceExtractor::new()?
            .extract(&page.content, page.cascade)
            .ok_or(AppError::PriceNotFound)?;
        let price = quote.price;

        println!("💰 Current price: {} USD/oz", usd(price));
        println!("📅 Date: {}", crate::utils::time::today_ymd());

        let csv = cfg.prices_csv_path();
        if let Ok(Some(prev)) = last_price(&csv) {
            let delta = price - prev;
            println!("📈 Change since last observation: {delta:+.2}");
        }

        let record = PriceRecord::new(price, &cfg.silver.source_name, &cfg.silver.url);
        append_record(&csv, &record)?;
        success(format!("Saved {} to {}", usd(price), csv.display()));

        if let Some(mirror) = cfg.mirror_csv_path() {
            append_record(&mirror, &record)?;
            success(format!("Also saved to {}", mirror.display()));
        }

        let committed = match opts.commit {
            CommitMode::Never => false,
            CommitMode::Auto => {
                println!("\n🤖 Auto-commit mode enabled");
                Self::commit(&csv)
            }
            CommitMode::Ask => Self::ask_and_commit(&csv, input)?,
        };

        println!();
        rule();
        println!("COMPLETE");
        rule();

        Ok(SilverOutcome {
            price,
            csv,
            committed,
        })
    }

    fn ask_and_commit<R: BufRead>(csv: &Path, input: &mut R) -> AppResult<bool> {
        println!("\n📊 Data saved. Commit to GitHub?");
        println!("Options:");
        println!("1. Yes, commit and push now");
        println!("2. No, just save locally");
        println!("3. Auto-commit (for cron jobs)");
        println!("\nEnter choice (1-3): ");

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            info("Run with '--auto' for automated GitHub commits");
            return Ok(false);
        }

        match answer.trim() {
            "1" => Ok(Self::commit(csv)),
            "3" => {
                info("Use the '--auto' flag for cron jobs");
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Commit failures never fail the run: the price is already saved.
    fn commit(csv: &Path) -> bool {
        let dir = csv.parent().unwrap_or_else(|| Path::new("."));
        let repo = GitRepo::new(dir);

        if !repo.is_repo() {
            warning("Not in a git repository or git not available");
            return false;
        }

        match repo.commit_file(csv, "Update silver price") {
            Ok(message) => {
                success(format!("Committed and pushed: {message}"));
                true
            }
            Err(e) => {
                warning(format!("Automated commit failed: {e}"));
                false
            }
        }
    }
}
