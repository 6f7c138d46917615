//! Configuration loading and types for makesite.
//!
//! One optional YAML file covers the whole surface: where pages go and
//! which template shapes them. Everything has a stock default so the
//! tool runs without any config at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file looked for in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "makesite.yaml";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory the generated pages are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Template file every page is rendered through
    #[serde(default = "default_template")]
    pub template: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("pages")
}

fn default_template() -> PathBuf {
    PathBuf::from("template.tmpl")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            template: default_template(),
        }
    }
}

impl SiteConfig {
    /// Load the config from the command line argument, defaulting to
    /// `makesite.yaml`.
    ///
    /// An explicitly named file must exist and parse. The default file is
    /// optional; when it is absent the stock settings apply.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = config_file.is_some();
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        if !explicit && !config_file.exists() {
            return Ok(Self::default());
        }

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
