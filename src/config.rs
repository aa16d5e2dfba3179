use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ZidekConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub embedding: EmbeddingConfig,
    pub recall: RecallConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub log_dir: String,
    pub default_room: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub stopwords_path: String,
    /// Empty means the built-in category taxonomy.
    pub lexicon_path: String,
    pub top_categories: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub dimensions: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecallConfig {
    pub default_top_n: usize,
}

impl Default for ZidekConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            storage: StorageConfig::default(),
            analysis: AnalysisConfig::default(),
            embedding: EmbeddingConfig::default(),
            recall: RecallConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let log_dir = default_zidek_dir()
            .join("memory_logs")
            .to_string_lossy()
            .into_owned();
        Self {
            log_dir,
            default_room: "room_1".into(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let stopwords_path = default_zidek_dir()
            .join("stopwords.txt")
            .to_string_lossy()
            .into_owned();
        Self {
            stopwords_path,
            lexicon_path: String::new(),
            top_categories: 10,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "seeded".into(),
            dimensions: crate::embedding::EMBEDDING_DIM,
        }
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            default_top_n: crate::memory::recall::DEFAULT_TOP_N,
        }
    }
}

/// Returns `~/.zidek/`, or `./.zidek/` when no home directory is known.
pub fn default_zidek_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".zidek")
}

/// Returns the default config file path: `~/.zidek/config.toml`
pub fn default_config_path() -> PathBuf {
    default_zidek_dir().join("config.toml")
}

impl ZidekConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ZidekConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (ZIDEK_LOG_DIR, ZIDEK_ROOM, ZIDEK_STOPWORDS, ZIDEK_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ZIDEK_LOG_DIR") {
            self.storage.log_dir = val;
        }
        if let Ok(val) = std::env::var("ZIDEK_ROOM") {
            self.storage.default_room = val;
        }
        if let Ok(val) = std::env::var("ZIDEK_STOPWORDS") {
            self.analysis.stopwords_path = val;
        }
        if let Ok(val) = std::env::var("ZIDEK_LOG_LEVEL") {
            self.logging.log_level = val;
        }
    }

    /// Resolve the memory log root, expanding `~` if needed.
    pub fn resolved_log_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.log_dir)
    }

    pub fn resolved_stopwords_path(&self) -> PathBuf {
        expand_tilde(&self.analysis.stopwords_path)
    }

    /// `None` when the built-in lexicon should be used.
    pub fn resolved_lexicon_path(&self) -> Option<PathBuf> {
        let raw = self.analysis.lexicon_path.trim();
        if raw.is_empty() {
            None
        } else {
            Some(expand_tilde(raw))
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
