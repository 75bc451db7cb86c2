//! Prompt rendering engine
//!
//! [`PromptEngine`] owns the active [`Theme`] and the live
//! [`PromptContext`] and is the single entry point used by a host shell:
//! load a theme, merge context updates, render the prompt, decode colored
//! output.

pub mod composer;
pub mod context;
pub mod segment;
pub mod template;

pub use composer::{PromptComposer, PromptPart, RenderedPrompt, SegmentStyle, FALLBACK_PROMPT};
pub use context::{ContextUpdate, PromptContext};
pub use segment::SegmentKind;
pub use template::{Template, TemplateData, Value};

use crate::ansi::{self, StyledRun};
use crate::config::theme::{Theme, ThemeInfo};
use crate::config::Config;
use crate::error::ThemeLoadError;

/// Theme plus context, rendered on demand
#[derive(Debug, Clone, Default)]
pub struct PromptEngine {
    theme: Option<Theme>,
    context: PromptContext,
    composer: PromptComposer,
}

impl PromptEngine {
    /// Engine with the default context and no theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine configured from `config`: context overrides and fallback prompt
    pub fn with_config(config: &Config) -> Self {
        let mut context = PromptContext::default();
        context.merge(config.context.clone());
        Self {
            theme: None,
            context,
            composer: PromptComposer::with_fallback(config.fallback_prompt.clone()),
        }
    }

    /// Replace the active theme with JSON text.
    ///
    /// Returns `false` and keeps the previous theme when the text is not a
    /// valid theme object.
    pub fn load_theme(&mut self, json: &str) -> bool {
        self.try_load_theme(json).is_ok()
    }

    /// Replace the active theme with an already parsed JSON value
    pub fn load_theme_value(&mut self, value: serde_json::Value) -> bool {
        match Theme::from_json_value(value) {
            Ok(theme) => {
                self.set_theme(theme);
                true
            }
            Err(e) => {
                warn!("Failed to load theme: {}", e);
                false
            }
        }
    }

    /// Like [`load_theme`](Self::load_theme) but reports why a theme was rejected
    pub fn try_load_theme(&mut self, json: &str) -> Result<(), ThemeLoadError> {
        match Theme::from_json_str(json) {
            Ok(theme) => {
                self.set_theme(theme);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load theme: {}", e);
                Err(e)
            }
        }
    }

    /// Install a theme that was built or parsed elsewhere
    pub fn set_theme(&mut self, theme: Theme) {
        let info = theme.info();
        debug!(
            version = %info.version,
            blocks = info.block_count,
            segments = info.segment_count,
            "theme loaded"
        );
        self.theme = Some(theme);
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Summary of the active theme, `None` when nothing is loaded
    pub fn theme_info(&self) -> Option<ThemeInfo> {
        self.theme.as_ref().map(Theme::info)
    }

    /// Merge `update` into the live context
    pub fn update_context(&mut self, update: ContextUpdate) {
        self.context.merge(update);
    }

    /// Merge a JSON object keyed like `{"PWD": "/tmp", "Code": 1}`
    pub fn update_context_json(&mut self, update: &serde_json::Value) {
        self.update_context(ContextUpdate::from_json(update));
    }

    pub fn context(&self) -> &PromptContext {
        &self.context
    }

    /// Render the active theme against the current context
    pub fn render_prompt(&self) -> RenderedPrompt {
        self.composer.render(self.theme.as_ref(), &self.context)
    }

    /// Decode colored text into styled runs
    pub fn decode(&self, text: &str) -> Vec<StyledRun> {
        ansi::decode(text)
    }
}
