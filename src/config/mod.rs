use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, resolve_in};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the website git checkout; relative paths below resolve against it.
    pub website_dir: String,
    pub index_file: String,
    /// Local SQLite file holding the operation log (and the offline ideas table).
    pub local_db: String,
    pub silver: SilverConfig,
    pub ideas: IdeasConfig,
    pub git: GitConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    Http,
    Curl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SilverConfig {
    pub url: String,
    pub source_name: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub fetcher: FetcherKind,
    pub csv: String,
    pub mirror_csv: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeasBackend {
    Psql,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeasConfig {
    pub backend: IdeasBackend,
    pub database: String,
    pub user: String,
    pub host: String,
    pub table: String,
    pub sql_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
    pub branch: String,
    pub skip_suffixes: Vec<String>,
    pub skip_contains: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub quality: u8,
}

impl Default for SilverConfig {
    fn default() -> Self {
        Self {
            url: "https://www.kitco.com/charts/livesilver.html".to_string(),
            source_name: "Kitco".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            timeout_secs: 10,
            fetcher: FetcherKind::Http,
            csv: "data/silver_prices.csv".to_string(),
            mirror_csv: None,
        }
    }
}

impl Default for IdeasConfig {
    fn default() -> Self {
        Self {
            backend: IdeasBackend::Psql,
            database: "travel_website".to_string(),
            user: env::var("USER").unwrap_or_else(|_| "postgres".to_string()),
            host: "localhost".to_string(),
            table: "travel.travel_development_ideas".to_string(),
            sql_files: vec![
                "insert_layout_tasks.sql".to_string(),
                "insert_new_ideas.sql".to_string(),
                "insert_more_new_ideas.sql".to_string(),
                "insert_beijing_layout_ideas.sql".to_string(),
            ],
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            skip_suffixes: vec![
                ".log".to_string(),
                "_status.json".to_string(),
                "_report.json".to_string(),
            ],
            skip_contains: vec!["SEND_TO_TELEGRAM".to_string(), "TELEGRAM_NOW".to_string()],
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { quality: 85 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            website_dir: "~/clawd/travel-website".to_string(),
            index_file: "index.html".to_string(),
            local_db: Self::database_file().to_string_lossy().to_string(),
            silver: SilverConfig::default(),
            ideas: IdeasConfig::default(),
            git: GitConfig::default(),
            images: ImageConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        match dirs::home_dir() {
            Some(home) if cfg!(target_os = "windows") => home.join("AppData").join("travelkit"),
            Some(home) => home.join(".travelkit"),
            None => PathBuf::from(".travelkit"),
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("travelkit.conf")
    }

    /// Return the default path of the local SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("travelkit.sqlite")
    }

    /// Load configuration from `path` (or the default location).
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        let cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str::<Config>(&content).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")?;
        if !ident.is_match(&self.ideas.table) {
            return Err(AppError::Config(format!(
                "ideas.table '{}' is not a valid [schema.]table name",
                self.ideas.table
            )));
        }

        if !(1..=100).contains(&self.images.quality) {
            return Err(AppError::Config(format!(
                "images.quality must be between 1 and 100, got {}",
                self.images.quality
            )));
        }

        if self.silver.timeout_secs == 0 {
            return Err(AppError::Config("silver.timeout_secs must be > 0".into()));
        }

        Ok(())
    }

    pub fn website_path(&self) -> PathBuf {
        expand_tilde(&self.website_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        resolve_in(&self.website_path(), &self.index_file)
    }

    pub fn local_db_path(&self) -> PathBuf {
        expand_tilde(&self.local_db)
    }

    pub fn prices_csv_path(&self) -> PathBuf {
        resolve_in(&self.website_path(), &self.silver.csv)
    }

    pub fn mirror_csv_path(&self) -> Option<PathBuf> {
        self.silver
            .mirror_csv
            .as_deref()
            .map(|p| resolve_in(&self.website_path(), p))
    }

    pub fn sql_file_paths(&self) -> Vec<PathBuf> {
        let base = self.website_path();
        self.ideas
            .sql_files
            .iter()
            .map(|f| resolve_in(&base, f))
            .collect()
    }
}
