//! Prompt theme model
//!
//! Deserializes Oh My Posh style theme JSON. Only the fields the renderer
//! uses are modelled; anything else in the document is ignored.

use crate::error::{Error, Result, ThemeLoadError};
use crate::prompt::segment::SegmentKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Prefix marking a palette reference in a color field
pub const PALETTE_PREFIX: &str = "p:";

/// A loaded prompt theme.
///
/// Every field is lenient: a value of the wrong JSON type is treated as if
/// it were absent, so a partially broken theme still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme schema version, a string or a number in the wild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_json::Value>,

    /// Blocks in render order, `None` unless the theme has a blocks array
    #[serde(default, deserialize_with = "optional_seq", skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,

    /// Named colors referenced as `p:<name>`
    #[serde(default, deserialize_with = "optional_string_map", skip_serializing_if = "Option::is_none")]
    pub palette: Option<HashMap<String, String>>,
}

/// A group of segments rendered together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type; only `prompt` blocks are rendered
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: String,

    #[serde(default, deserialize_with = "or_default")]
    pub alignment: Alignment,

    /// Emit a line break after this block
    #[serde(default, deserialize_with = "or_default")]
    pub newline: bool,

    #[serde(default, deserialize_with = "seq")]
    pub segments: Vec<Segment>,
}

impl Block {
    pub fn is_prompt(&self) -> bool {
        self.kind == "prompt"
    }

    /// Whether a line break follows the block
    pub fn breaks_line(&self) -> bool {
        self.newline || self.alignment == Alignment::Newline
    }
}

/// Block placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Right,
    Newline,
    /// Also used for unrecognised values
    #[default]
    #[serde(other)]
    Left,
}

/// One prompt segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: SegmentKind,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Color reference, `#rrggbb` or `p:<name>`
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub leading_diamond: Option<String>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub trailing_diamond: Option<String>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub powerline_symbol: Option<String>,
}

/// A value that does not fit `T` (including `null`) becomes `T::default()`
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Array elements that fit `T`; `None` for anything but an array
fn optional_seq<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

fn seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_seq(deserializer)?.unwrap_or_default())
}

/// String entries of an object; `None` for anything but an object
fn optional_string_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<HashMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Object(entries) => entries,
        _ => return Ok(None),
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(hex) => Some((name, hex)),
                _ => None,
            })
            .collect(),
    ))
}

/// Summary of a loaded theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    pub version: String,
    pub block_count: usize,
    pub segment_count: usize,
    pub has_palette: bool,
}

impl Theme {
    /// Parse theme JSON text
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ThemeLoadError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ThemeLoadError::MalformedJson(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Build a theme from an already parsed JSON document
    pub fn from_json_value(value: serde_json::Value) -> std::result::Result<Self, ThemeLoadError> {
        let kind = match &value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some("null"),
            serde_json::Value::Bool(_) => Some("a boolean"),
            serde_json::Value::Number(_) => Some("a number"),
            serde_json::Value::String(_) => Some("a string"),
            serde_json::Value::Array(_) => Some("an array"),
        };
        if let Some(kind) = kind {
            return Err(ThemeLoadError::NotAnObject(kind));
        }

        serde_json::from_value(value).map_err(|e| ThemeLoadError::InvalidShape(e.to_string()))
    }

    /// Resolve a color reference through the palette.
    ///
    /// Never fails: an empty reference, or a palette reference whose palette
    /// or key is missing, resolves to no color. Literals are returned as is.
    pub fn resolve_color(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.filter(|r| !r.is_empty())?;
        match reference.strip_prefix(PALETTE_PREFIX) {
            Some(key) => self
                .palette
                .as_ref()
                .and_then(|palette| palette.get(key))
                .filter(|hex| !hex.is_empty())
                .cloned(),
            None => Some(reference.to_string()),
        }
    }

    /// Version, block and segment counts
    pub fn info(&self) -> ThemeInfo {
        let version = match &self.version {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => "unknown".to_string(),
        };
        let blocks = self.blocks.as_deref().unwrap_or_default();

        ThemeInfo {
            version,
            block_count: blocks.len(),
            segment_count: blocks.iter().map(|b| b.segments.len()).sum(),
            has_palette: self.palette.is_some(),
        }
    }
}

/// Read and parse a theme file
pub fn load_theme_file(path: &Path) -> Result<Theme> {
    let content = fs::read_to_string(path).map_err(|e| Error::ThemeReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let theme = Theme::from_json_str(&content)?;
    debug!(path = %path.display(), "loaded theme file");
    Ok(theme)
}
