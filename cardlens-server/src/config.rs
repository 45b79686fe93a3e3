//! Server configuration: optional `cardlens.toml` plus environment overrides.
//!
//! The model API key is deliberately not part of the file; it comes only from
//! the `GOOGLE_API_KEY` environment variable.

use anyhow::{Context, Result};
use cardlens_extract::model::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use cardlens_extract::MAX_INPUT_CHARS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerSection,
    pub model: ModelSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// Model identifier passed to the generateContent endpoint.
    pub name: String,
    /// Per-request timeout for model calls.
    pub timeout_secs: u64,
    /// Character budget for statement text sent to the model.
    pub max_input_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            model: ModelSection {
                name: DEFAULT_MODEL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                max_input_chars: MAX_INPUT_CHARS,
            },
        }
    }
}

/// Load configuration.
///
/// An explicitly passed path must exist; otherwise `cardlens.toml` in the
/// working directory is used when present, and defaults apply when it is not.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = Path::new("cardlens.toml");
            if !default.exists() {
                return Ok(Config::default());
            }
            default.to_path_buf()
        }
    };

    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}
