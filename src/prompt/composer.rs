//! Prompt composition
//!
//! Walks a theme's blocks and segments in order and joins the colorized
//! pieces into the final prompt string.

use super::context::PromptContext;
use super::segment;
use crate::color;
use crate::config::theme::{Alignment, Block, Segment, Theme};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Prompt used when no theme (or a theme without blocks) is loaded
pub const FALLBACK_PROMPT: &str = "$ ";

/// Colors a segment was rendered with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentStyle {
    pub foreground: Option<String>,
    pub background: Option<String>,
}

/// One visible segment of a rendered prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPart {
    /// Segment type name
    #[serde(rename = "type")]
    pub kind: String,
    /// Colorized text including diamonds and separators
    pub text: String,
    pub style: SegmentStyle,
}

/// Result of rendering a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub prompt: String,
    pub parts: Vec<PromptPart>,
}

impl RenderedPrompt {
    fn fallback(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            parts: Vec::new(),
        }
    }
}

/// Renders themes into prompt strings
#[derive(Debug, Clone)]
pub struct PromptComposer {
    fallback: String,
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_PROMPT)
    }

    /// Use a different prompt for the no-theme case
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Render `theme` against `context` using the local clock
    pub fn render(&self, theme: Option<&Theme>, context: &PromptContext) -> RenderedPrompt {
        self.render_at(theme, context, Local::now().naive_local())
    }

    /// Render as of `now`
    pub fn render_at(
        &self,
        theme: Option<&Theme>,
        context: &PromptContext,
        now: NaiveDateTime,
    ) -> RenderedPrompt {
        let Some((theme, blocks)) = theme.and_then(|t| t.blocks.as_ref().map(|b| (t, b))) else {
            return RenderedPrompt::fallback(&self.fallback);
        };

        let mut prompt = String::new();
        let mut parts = Vec::new();

        for block in blocks.iter().filter(|b| b.is_prompt()) {
            for segment in &block.segments {
                if let Some(part) = render_segment(theme, block, segment, context, now) {
                    prompt.push_str(&part.text);
                    parts.push(part);
                }
            }

            if block.breaks_line() {
                prompt.push('\n');
            }
        }

        trace!(parts = parts.len(), "rendered prompt");
        RenderedPrompt { prompt, parts }
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one segment, or `None` when it has no visible content
fn render_segment(
    theme: &Theme,
    block: &Block,
    segment: &Segment,
    context: &PromptContext,
    now: NaiveDateTime,
) -> Option<PromptPart> {
    let content = segment::resolve_at(segment, context, now);
    if content.is_empty() {
        return None;
    }

    let style = SegmentStyle {
        foreground: theme.resolve_color(segment.foreground.as_deref()),
        background: theme.resolve_color(segment.background.as_deref()),
    };
    let paint = |text: &str| {
        color::colorize(text, style.foreground.as_deref(), style.background.as_deref())
    };

    let mut text = String::new();
    if let Some(diamond) = &segment.leading_diamond {
        text.push_str(&paint(diamond));
    }
    if let Some(symbol) = &segment.powerline_symbol {
        if block.alignment != Alignment::Right {
            text.push_str(&paint(symbol));
        }
    }
    text.push_str(&paint(&content));
    if let Some(diamond) = &segment.trailing_diamond {
        text.push_str(&paint(diamond));
    }

    Some(PromptPart {
        kind: segment.kind.to_string(),
        text,
        style,
    })
}
