use crate::config::FetcherKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for travelkit
/// Maintenance tasks for the travel website: carousel, silver prices, development ideas
#[derive(Parser)]
#[command(
    name = "travelkit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Maintenance automation for the travel website: carousel patches, silver prices, development ideas",
    long_about = None
)]
pub struct Cli {
    /// Use a configuration file other than the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the local database path (useful for tests)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the local database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Move city cards into a new carousel slide and fix the counters
    Carousel {
        /// HTML file to patch (default: index file of the website)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// YAML plan replacing the built-in one
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,

        #[arg(long = "dry-run", help = "Report the changes without writing the file")]
        dry_run: bool,

        #[arg(long, conflicts_with = "dry_run", help = "Only run the consistency checks")]
        verify: bool,
    },

    /// Fetch the current silver price and append it to the CSV
    Silver {
        #[arg(long, help = "Commit and push without asking (for cron jobs)")]
        auto: bool,

        #[arg(long = "no-commit", conflicts_with = "auto", help = "Never touch git")]
        no_commit: bool,

        /// Read a saved page text instead of fetching
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,

        /// Override the configured fetcher
        #[arg(long, value_enum)]
        fetcher: Option<FetcherKind>,
    },

    /// Import development ideas from SQL files
    Import {
        /// SQL files (default: the configured list, relative to the website)
        files: Vec<PathBuf>,
    },

    /// Process pending development ideas and check in the website changes
    Check {
        #[arg(long = "no-git", help = "Skip the git check-in")]
        no_git: bool,
    },

    /// Show totals of the development ideas table
    Status {
        #[arg(long, help = "Print the totals as JSON")]
        json: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
