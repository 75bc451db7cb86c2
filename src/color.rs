//! Color codec
//!
//! Hex/RGB conversion, the xterm 256-color table and 24-bit SGR encoding.
//! Both the prompt composer and the escape-sequence decoder go through this
//! module so that an encoded color always decodes back to the same hex.

use once_cell::sync::Lazy;

/// Full SGR reset
pub const RESET: &str = "\x1b[0m";

/// The 16 standard and bright colors, indexed 0-15.
pub const BASE_16: [&str; 16] = [
    "#000000", // Black
    "#cd3131", // Red
    "#0dbc79", // Green
    "#e5e510", // Yellow
    "#2472c8", // Blue
    "#bc3fbc", // Magenta
    "#11a8cd", // Cyan
    "#e5e5e5", // White
    "#666666", // Bright Black (Gray)
    "#f14c4c", // Bright Red
    "#23d18b", // Bright Green
    "#f5f543", // Bright Yellow
    "#3b8eea", // Bright Blue
    "#d670d6", // Bright Magenta
    "#29b8db", // Bright Cyan
    "#ffffff", // Bright White
];

static PALETTE_256: Lazy<Vec<String>> = Lazy::new(build_256_palette);

/// Parse `#rrggbb` (the `#` is optional, digits are case-insensitive).
///
/// Anything that is not exactly six hex digits yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format a color as lowercase `#rrggbb`
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Build the 256-color table.
///
/// 0-15 are [`BASE_16`], 16-231 the 6x6x6 cube (red outermost) and 232-255
/// a 24 step grayscale ramp.
pub fn build_256_palette() -> Vec<String> {
    let mut colors = Vec::with_capacity(256);
    colors.extend(BASE_16.iter().map(|hex| hex.to_string()));

    let level = |n: u8| if n == 0 { 0 } else { 55 + n * 40 };
    for r in 0..6u8 {
        for g in 0..6u8 {
            for b in 0..6u8 {
                colors.push(rgb_to_hex(level(r), level(g), level(b)));
            }
        }
    }

    for i in 0..24u8 {
        let gray = 8 + i * 10;
        colors.push(rgb_to_hex(gray, gray, gray));
    }

    colors
}

/// Look up an index in the shared 256-color table
pub fn palette_256(index: usize) -> Option<&'static str> {
    PALETTE_256.get(index).map(String::as_str)
}

/// Map a standard SGR color code to its hex value.
///
/// Accepts foreground (30-37, 90-97) and background (40-47, 100-107) codes.
pub fn standard_color(code: u32) -> Option<&'static str> {
    let index = match code {
        30..=37 => code - 30,
        40..=47 => code - 40,
        90..=97 => code - 90 + 8,
        100..=107 => code - 100 + 8,
        _ => return None,
    };
    BASE_16.get(index as usize).copied()
}

/// 24-bit foreground escape, or an empty string unless `hex` is `#rrggbb`
pub fn encode_foreground(hex: &str) -> String {
    encode_truecolor(hex, 38)
}

/// 24-bit background escape, or an empty string for an invalid color
pub fn encode_background(hex: &str) -> String {
    encode_truecolor(hex, 48)
}

fn encode_truecolor(hex: &str, selector: u8) -> String {
    // Theme colors must be written as `#rrggbb`
    if !hex.starts_with('#') {
        return String::new();
    }
    match hex_to_rgb(hex) {
        Some((r, g, b)) => format!("\x1b[{};2;{};{};{}m", selector, r, g, b),
        None => String::new(),
    }
}

/// Wrap `text` in background then foreground escapes and a trailing reset.
///
/// Empty text stays empty. The reset is only appended when at least one
/// escape was actually emitted.
pub fn colorize(text: &str, foreground: Option<&str>, background: Option<&str>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let bg = background.map(encode_background).unwrap_or_default();
    let fg = foreground.map(encode_foreground).unwrap_or_default();
    let styled = !bg.is_empty() || !fg.is_empty();

    let mut out = String::with_capacity(bg.len() + fg.len() + text.len() + RESET.len());
    out.push_str(&bg);
    out.push_str(&fg);
    out.push_str(text);
    if styled {
        out.push_str(RESET);
    }
    out
}
