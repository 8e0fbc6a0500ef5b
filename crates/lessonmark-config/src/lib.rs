use lessonmark_engine::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default root scanned by `lessonmark check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_path: Option<PathBuf>,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Cell type names recognised in cell headers and fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub text_types: Vec<String>,
    pub code_types: Vec<String>,
    pub quiz_types: Vec<String>,
    pub fenced_cells: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let defaults = ParseOptions::default();
        Self {
            text_types: defaults.text_types,
            code_types: defaults.code_types,
            quiz_types: defaults.quiz_types,
            fenced_cells: defaults.fenced_cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded lessons path
        config.lessons_path = config
            .lessons_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/lessonmark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The parser configuration as the engine's explicit options value.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            text_types: self.parser.text_types.clone(),
            code_types: self.parser.code_types.clone(),
            quiz_types: self.parser.quiz_types.clone(),
            fenced_cells: self.parser.fenced_cells,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
