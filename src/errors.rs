//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // External processes
    // ---------------------------
    #[error("`{program}` failed ({}): {stderr}", exit_label(.code))]
    Command {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{0}` could not be started: {1}")]
    Spawn(String, io::Error),

    #[error("Unexpected output from `{0}`: {1}")]
    UnexpectedOutput(String, String),

    // ---------------------------
    // Network / scraping
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not extract a price from the page content")]
    PriceNotFound,

    // ---------------------------
    // HTML patching
    // ---------------------------
    #[error("Carousel patch error: {0}")]
    Carousel(String),

    // ---------------------------
    // Images
    // ---------------------------
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit {c}"),
        None => "killed by signal".to_string(),
    }
}
