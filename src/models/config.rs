use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::chunk::TextNormalizationMode;
use super::search::OutputFormat;
use crate::error::ConfigError;

pub const DEFAULT_TARGET_SIZE: usize = 500;
pub const DEFAULT_OVERLAP: usize = 50;
pub const DEFAULT_MAX_RESULTS: usize = 3;

pub const ENV_CHUNK_SIZE: &str = "STUDYDOC_CHUNK_SIZE";
pub const ENV_CHUNK_OVERLAP: &str = "STUDYDOC_CHUNK_OVERLAP";
pub const ENV_MAX_RESULTS: &str = "STUDYDOC_MAX_RESULTS";

const CONFIG_DIR_NAME: &str = "studydoc";
const PROJECT_DIR_NAME: &str = ".studydoc";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration merged from the global file, the project file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub config: Config,
    pub global_path: Option<PathBuf>,
    pub project_path: Option<PathBuf>,
}

impl Config {
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn project_config_dir() -> Option<PathBuf> {
        std::env::current_dir()
            .ok()
            .map(|p| p.join(PROJECT_DIR_NAME))
    }

    pub fn project_path() -> Option<PathBuf> {
        Self::project_config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }

    /// Load configuration. The project file wins over the global file and
    /// environment variables win over both.
    pub fn load() -> Result<ResolvedConfig, ConfigError> {
        let _ = dotenvy::dotenv();

        let global_path = Self::global_path().filter(|p| p.exists());
        let project_path = Self::project_path().filter(|p| p.exists());

        let mut config = match project_path.as_deref().or(global_path.as_deref()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;

        Ok(ResolvedConfig {
            config,
            global_path,
            project_path,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn init_global() -> Result<PathBuf, ConfigError> {
        let path = Self::global_path().ok_or_else(|| {
            ConfigError::PathError("could not determine config directory".to_string())
        })?;
        Self::default().save_to(&path)?;
        Ok(path)
    }

    pub fn init_project() -> Result<PathBuf, ConfigError> {
        let path = Self::project_path().ok_or_else(|| {
            ConfigError::PathError("could not determine project directory".to_string())
        })?;
        Self::default().save_to(&path)?;
        Ok(path)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            env_usize(ENV_CHUNK_SIZE)?,
            env_usize(ENV_CHUNK_OVERLAP)?,
            env_usize(ENV_MAX_RESULTS)?,
        )
    }

    /// Apply environment overrides. A chunk size override must still exceed
    /// the overlap in effect, whether that overlap came from the environment
    /// or from the config file.
    fn apply_overrides(
        &mut self,
        size: Option<usize>,
        overlap: Option<usize>,
        max_results: Option<usize>,
    ) -> Result<(), ConfigError> {
        if let Some(size) = size {
            self.chunking.target_size = size;
        }
        if let Some(overlap) = overlap {
            self.chunking.overlap = overlap;
        }
        if let Some(max) = max_results {
            self.ranking.max_results = max;
        }

        if let Some(size) = size
            && overlap.is_none()
            && self.chunking.overlap >= size
        {
            return Err(ConfigError::ValidationError(format!(
                "{ENV_CHUNK_SIZE}={size} must be greater than the configured overlap ({}); \
                 set {ENV_CHUNK_OVERLAP} to a smaller value as well",
                self.chunking.overlap
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.validate()?;
        self.ranking.validate()?;
        self.retrieval.validate()
    }
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse::<usize>().map(Some).map_err(|_| {
            ConfigError::ValidationError(format!("{name} must be a non-negative integer"))
        }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in words
    #[serde(default = "default_target_size")]
    pub target_size: usize,

    /// Words repeated between adjacent chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,

    #[serde(default)]
    pub normalization: TextNormalizationMode,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_target_size() -> usize {
    DEFAULT_TARGET_SIZE
}

fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            overlap: default_overlap(),
            normalization: TextNormalizationMode::default(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl ChunkingConfig {
    pub fn new(target_size: usize, overlap: usize) -> Self {
        Self {
            target_size,
            overlap,
            ..Default::default()
        }
    }

    pub fn with_normalization(mut self, normalization: TextNormalizationMode) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunking.target_size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.target_size {
            return Err(ConfigError::ValidationError(format!(
                "chunking.overlap ({}) must be less than chunking.target_size ({})",
                self.overlap, self.target_size
            )));
        }
        Ok(())
    }
}

/// Scoring weights and keyword filtering for the ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Points per whole-word keyword occurrence
    #[serde(default = "default_occurrence_weight")]
    pub occurrence_weight: f64,

    /// Points per distinct keyword when more than one keyword matches
    #[serde(default = "default_coverage_weight")]
    pub coverage_weight: f64,

    /// Maximum fraction taken off the score of the last chunk in a document
    #[serde(default = "default_position_decay")]
    pub position_decay: f64,

    /// Query tokens shorter than this many characters are ignored
    #[serde(default = "default_min_keyword_chars")]
    pub min_keyword_chars: usize,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Appended to the built-in English and Portuguese stop words
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

fn default_occurrence_weight() -> f64 {
    3.0
}

fn default_coverage_weight() -> f64 {
    2.0
}

fn default_position_decay() -> f64 {
    0.1
}

fn default_min_keyword_chars() -> usize {
    3
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            occurrence_weight: default_occurrence_weight(),
            coverage_weight: default_coverage_weight(),
            position_decay: default_position_decay(),
            min_keyword_chars: default_min_keyword_chars(),
            max_results: default_max_results(),
            extra_stop_words: Vec::new(),
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.occurrence_weight >= 0.0 && self.coverage_weight >= 0.0) {
            return Err(ConfigError::ValidationError(
                "ranking weights must be non-negative".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.position_decay) {
            return Err(ConfigError::ValidationError(
                "ranking.position_decay must be in [0, 1)".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "ranking.max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Chunks kept from each query variant
    #[serde(default = "default_per_query_results")]
    pub per_query_results: usize,

    /// Chunks kept after merging all variants
    #[serde(default = "default_max_context_chunks")]
    pub max_context_chunks: usize,

    #[serde(default = "default_context_separator")]
    pub context_separator: String,
}

fn default_per_query_results() -> usize {
    2
}

fn default_max_context_chunks() -> usize {
    5
}

fn default_context_separator() -> String {
    "\n\n".to_string()
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            per_query_results: default_per_query_results(),
            max_context_chunks: default_max_context_chunks(),
            context_separator: default_context_separator(),
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_query_results == 0 || self.max_context_chunks == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}
