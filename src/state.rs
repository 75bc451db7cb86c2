//! Shared Engine State
//!
//! Thread-safe handle around a [`PromptEngine`] so a host can render from
//! several threads while another one loads themes or pushes context updates.

use crate::ansi::StyledRun;
use crate::config::theme::{Theme, ThemeInfo};
use crate::config::Config;
use crate::error::ThemeLoadError;
use crate::prompt::{ContextUpdate, PromptContext, PromptEngine, RenderedPrompt};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, thread-safe prompt engine
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<PromptEngine>>,
}

impl SharedEngine {
    pub fn new(engine: PromptEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(PromptEngine::with_config(config))
    }

    // Writers never leave the engine partially updated, so a poisoned lock
    // still guards a usable value.
    fn read(&self) -> RwLockReadGuard<'_, PromptEngine> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("engine lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, PromptEngine> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("engine lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn load_theme(&self, json: &str) -> bool {
        self.write().load_theme(json)
    }

    pub fn try_load_theme(&self, json: &str) -> Result<(), ThemeLoadError> {
        self.write().try_load_theme(json)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write().set_theme(theme);
    }

    pub fn update_context(&self, update: ContextUpdate) {
        self.write().update_context(update);
    }

    pub fn update_context_json(&self, update: &serde_json::Value) {
        self.write().update_context_json(update);
    }

    /// Snapshot of the live context
    pub fn context(&self) -> PromptContext {
        self.read().context().clone()
    }

    pub fn theme_info(&self) -> Option<ThemeInfo> {
        self.read().theme_info()
    }

    pub fn render_prompt(&self) -> RenderedPrompt {
        self.read().render_prompt()
    }

    pub fn decode(&self, text: &str) -> Vec<StyledRun> {
        self.read().decode(text)
    }
}

impl From<PromptEngine> for SharedEngine {
    fn from(engine: PromptEngine) -> Self {
        Self::new(engine)
    }
}
