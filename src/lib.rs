//! poshterm - Oh My Posh style prompt rendering for terminal hosts
//!
//! This library turns an Oh My Posh theme plus a description of the shell
//! environment into a colored prompt string, and decodes ANSI colored text
//! back into styled runs a host UI can draw.
//!
//! ## Module Organization
//!
//! - [`prompt`] - Prompt engine, context, segments, template language
//! - [`config`] - Engine configuration, config file loading, theme model
//! - [`ansi`] - ANSI SGR decoding into styled runs, HTML export
//! - [`color`] - Hex colors, the 256-color palette, SGR encoding
//! - [`state`] - Thread-safe shared engine
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use poshterm::{ContextUpdate, PromptEngine};
//!
//! let mut engine = PromptEngine::new();
//! let theme = r#"{"blocks":[{"type":"prompt","segments":[{"type":"path"}]}]}"#;
//! if engine.load_theme(theme) {
//!     engine.update_context(ContextUpdate {
//!         pwd: Some("/home/user/src".to_string()),
//!         ..Default::default()
//!     });
//!     println!("{}", engine.render_prompt().prompt);
//! }
//! ```
//!
//! Rendering never fails. A missing theme yields the fallback prompt, an
//! unknown segment type falls back to a minimal template and malformed
//! template tags are emitted literally.

#[macro_use]
extern crate tracing;

pub mod ansi;
pub mod color;
pub mod config;
pub mod error;
pub mod prompt;
pub mod state;

pub use ansi::{decode, has_ansi_codes, strip_ansi_codes, to_html, Style, StyledRun};
pub use config::loader::ConfigLoader;
pub use config::theme::{load_theme_file, Theme, ThemeInfo};
pub use config::Config;
pub use error::{Error, Result, ThemeLoadError};
pub use prompt::{ContextUpdate, PromptContext, PromptEngine, PromptPart, RenderedPrompt};
pub use state::SharedEngine;

/// The current version of poshterm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build an engine from the default configuration locations.
///
/// A configuration file that fails to load is logged and replaced by the
/// defaults. A configured theme that cannot be read is an error.
pub fn init() -> Result<PromptEngine> {
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };
    engine_from_config(&config)
}

/// Build an engine from a specific configuration file
pub fn init_with_config(path: &std::path::Path) -> Result<PromptEngine> {
    let config = ConfigLoader::load_from_path(path)?;
    engine_from_config(&config)
}

/// Engine for `config`, with its theme file loaded when one is set
pub fn engine_from_config(config: &Config) -> Result<PromptEngine> {
    info!("Initializing {} v{}", NAME, VERSION);

    let mut engine = PromptEngine::with_config(config);
    if let Some(path) = &config.theme_path {
        engine.set_theme(load_theme_file(path)?);
    }
    Ok(engine)
}
