//! Configuration management for poshterm
//!
//! Engine configuration (which theme to load, the fallback prompt and
//! context overrides) plus the theme file model.

pub mod loader;
pub mod theme;

use crate::prompt::{ContextUpdate, FALLBACK_PROMPT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for poshterm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme file loaded at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_path: Option<PathBuf>,

    /// Prompt shown when no theme is loaded
    pub fallback_prompt: String,

    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Values merged over the default context
    pub context: ContextUpdate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_path: None,
            fallback_prompt: FALLBACK_PROMPT.to_string(),
            log_level: "info".to_string(),
            context: ContextUpdate::default(),
        }
    }
}
