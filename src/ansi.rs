//! ANSI escape sequence decoding
//!
//! Turns text containing SGR escape sequences into an ordered list of
//! [`StyledRun`]s. Every call starts from the default style, so nothing
//! leaks from one blob of output into the next.

use crate::color;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const ESC: u8 = 0x1b;

static SGR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9]+(?:;[0-9]+)*m").expect("SGR regex is valid"));

/// Text style accumulated from SGR codes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Foreground color as `#rrggbb`
    pub foreground: Option<String>,
    /// Background color as `#rrggbb`
    pub background: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    /// Whether this is the reset state
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }

    /// Apply the codes of one escape body, left to right.
    ///
    /// Extended color codes (38/48) consume their arguments from the same
    /// slice; unknown codes are ignored.
    pub fn apply_codes(&mut self, codes: &[u32]) {
        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => *self = Style::default(),
                1 => self.bold = true,
                3 => self.italic = true,
                4 => self.underline = true,
                22 => self.bold = false,
                23 => self.italic = false,
                24 => self.underline = false,
                code @ (30..=37 | 90..=97) => {
                    self.foreground = color::standard_color(code).map(str::to_string);
                }
                code @ (40..=47 | 100..=107) => {
                    self.background = color::standard_color(code).map(str::to_string);
                }
                38 => {
                    if let Some((hex, consumed)) = extended_color(&codes[i + 1..]) {
                        self.foreground = hex;
                        i += consumed;
                    }
                }
                48 => {
                    if let Some((hex, consumed)) = extended_color(&codes[i + 1..]) {
                        self.background = hex;
                        i += consumed;
                    }
                }
                39 => self.foreground = None,
                49 => self.background = None,
                _ => {}
            }
            i += 1;
        }
    }
}

/// Parse the arguments of a 38/48 code.
///
/// Returns the resulting color (an out of range palette index gives no
/// color) and how many codes were consumed, or `None` when the form is
/// incomplete.
fn extended_color(args: &[u32]) -> Option<(Option<String>, usize)> {
    match args {
        [5, index, ..] => Some((
            color::palette_256(*index as usize).map(str::to_string),
            2,
        )),
        [2, r, g, b, ..] => {
            let channel = |v: u32| v.min(255) as u8;
            Some((Some(color::rgb_to_hex(channel(*r), channel(*g), channel(*b))), 4))
        }
        _ => None,
    }
}

/// A contiguous piece of text with a single style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub content: String,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    /// Plain text
    Text,
    /// Saw ESC, expecting `[`
    Escape,
    /// Inside the parameter list, `digit_pending` is true right after `[` or `;`
    Parameters { digit_pending: bool },
}

/// Decode `text` into styled runs.
///
/// Only complete `ESC [ n(;n)* m` sequences are interpreted; anything else,
/// including a dangling ESC, is kept as literal content.
pub fn decode(text: &str) -> Vec<StyledRun> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut style = Style::default();

    let mut state = ScanState::Text;
    let mut literal_start = 0;
    let mut escape_start = 0;
    let mut codes: Vec<u32> = Vec::new();
    let mut current: u32 = 0;

    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            ScanState::Text => {
                if byte == ESC {
                    escape_start = i;
                    state = ScanState::Escape;
                }
            }
            ScanState::Escape => {
                if byte == b'[' {
                    codes.clear();
                    current = 0;
                    state = ScanState::Parameters {
                        digit_pending: true,
                    };
                } else {
                    // Not a CSI, rescan this byte as text
                    state = ScanState::Text;
                    continue;
                }
            }
            ScanState::Parameters { digit_pending } => match byte {
                b'0'..=b'9' => {
                    current = current
                        .saturating_mul(10)
                        .saturating_add(u32::from(byte - b'0'));
                    state = ScanState::Parameters {
                        digit_pending: false,
                    };
                }
                b';' if !digit_pending => {
                    codes.push(current);
                    current = 0;
                    state = ScanState::Parameters {
                        digit_pending: true,
                    };
                }
                b'm' if !digit_pending => {
                    codes.push(current);
                    push_run(&mut runs, &text[literal_start..escape_start], &style);
                    style.apply_codes(&codes);
                    literal_start = i + 1;
                    state = ScanState::Text;
                }
                _ => {
                    // Malformed sequence stays in the literal text
                    state = ScanState::Text;
                    continue;
                }
            },
        }
        i += 1;
    }

    push_run(&mut runs, &text[literal_start..], &style);
    runs
}

fn push_run(runs: &mut Vec<StyledRun>, content: &str, style: &Style) {
    if !content.is_empty() {
        runs.push(StyledRun {
            content: content.to_string(),
            style: style.clone(),
        });
    }
}

/// Remove every SGR sequence, keeping malformed escapes as text
pub fn strip_ansi_codes(text: &str) -> String {
    SGR_REGEX.replace_all(text, "").into_owned()
}

/// Whether `text` contains at least one SGR sequence
pub fn has_ansi_codes(text: &str) -> bool {
    SGR_REGEX.is_match(text)
}

/// Render runs as HTML `<span>` elements with inline styles
pub fn to_html(runs: &[StyledRun]) -> String {
    let mut html = String::new();
    for run in runs {
        let mut css = String::new();
        if let Some(fg) = &run.style.foreground {
            css.push_str(&format!("color: {};", fg));
        }
        if let Some(bg) = &run.style.background {
            css.push_str(&format!("background-color: {};", bg));
        }
        if run.style.bold {
            css.push_str("font-weight: bold;");
        }
        if run.style.italic {
            css.push_str("font-style: italic;");
        }
        if run.style.underline {
            css.push_str("text-decoration: underline;");
        }

        let content = escape_html(&run.content);
        if css.is_empty() {
            html.push_str(&content);
        } else {
            html.push_str(&format!("<span style=\"{}\">{}</span>", css, content));
        }
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
