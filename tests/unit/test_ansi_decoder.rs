//! Unit tests for the ANSI decoder
//!
//! Exercises SGR decoding through the public API: standard, 256 and
//! truecolor codes, attribute toggles and malformed input.

use poshterm::ansi::{decode, has_ansi_codes, strip_ansi_codes, to_html, Style, StyledRun};
use poshterm::color::{colorize, encode_foreground, RESET};

fn run(content: &str, style: Style) -> StyledRun {
    StyledRun {
        content: content.to_string(),
        style,
    }
}

fn fg(hex: &str) -> Style {
    Style {
        foreground: Some(hex.to_string()),
        ..Style::default()
    }
}

#[test]
fn test_standard_red_then_reset() {
    let runs = decode("\x1b[31mRED \x1b[0mplain");
    assert_eq!(runs, vec![run("RED ", fg("#cd3131")), run("plain", Style::default())]);
}

#[test]
fn test_encoded_foreground_decodes_to_same_color() {
    let text = format!("{}hi{}", encode_foreground("#ff0000"), RESET);
    assert_eq!(decode(&text), vec![run("hi", fg("#ff0000"))]);

    let colorized = colorize("hi", Some("#ff0000"), None);
    assert_eq!(colorized, text);
}

#[test]
fn test_bright_and_background_codes() {
    let runs = decode("\x1b[91;44mx");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].style.foreground.as_deref(), Some("#f14c4c"));
    assert_eq!(runs[0].style.background.as_deref(), Some("#2472c8"));

    let runs = decode("\x1b[102my");
    assert_eq!(runs[0].style.background.as_deref(), Some("#23d18b"));
}

#[test]
fn test_256_color_codes() {
    let runs = decode("\x1b[38;5;196ma\x1b[48;5;232mb");
    assert_eq!(runs[0].style.foreground.as_deref(), Some("#ff0000"));
    assert_eq!(runs[1].style.foreground.as_deref(), Some("#ff0000"));
    assert_eq!(runs[1].style.background.as_deref(), Some("#080808"));
}

#[test]
fn test_extended_codes_consume_their_arguments() {
    // 38;5;1 must not be read as 38, then bold, then red
    let runs = decode("\x1b[38;5;1mx");
    assert_eq!(runs, vec![run("x", fg("#cd3131"))]);
    assert!(!runs[0].style.bold);

    let runs = decode("\x1b[38;2;1;2;3;1mx");
    assert_eq!(runs[0].style.foreground.as_deref(), Some("#010203"));
    assert!(runs[0].style.bold);
}

#[test]
fn test_truecolor_clamps_components() {
    let runs = decode("\x1b[38;2;300;0;999mx");
    assert_eq!(runs[0].style.foreground.as_deref(), Some("#ff00ff"));
}

#[test]
fn test_out_of_range_palette_index() {
    let runs = decode("\x1b[31m\x1b[38;5;300mx");
    assert_eq!(runs[0].style.foreground, None);
}

#[test]
fn test_incomplete_extended_code_is_ignored() {
    let runs = decode("\x1b[32m\x1b[38;2;10mx");
    assert_eq!(runs[0].style.foreground.as_deref(), Some("#0dbc79"));
}

#[test]
fn test_attributes_toggle() {
    let runs = decode("\x1b[1;3;4ma\x1b[22mb\x1b[23;24mc");
    assert!(runs[0].style.bold && runs[0].style.italic && runs[0].style.underline);
    assert!(!runs[1].style.bold && runs[1].style.italic);
    assert!(runs[2].style.is_default());
}

#[test]
fn test_default_color_codes() {
    let runs = decode("\x1b[31;41ma\x1b[39mb\x1b[49mc");
    assert_eq!(runs[1].style.foreground, None);
    assert!(runs[1].style.background.is_some());
    assert!(runs[2].style.is_default());
}

#[test]
fn test_malformed_sequences_stay_literal() {
    assert_eq!(decode("\x1b[mx"), vec![run("\x1b[mx", Style::default())]);
    assert_eq!(decode("a\x1b[31"), vec![run("a\x1b[31", Style::default())]);
    assert_eq!(decode("\x1bx"), vec![run("\x1bx", Style::default())]);
    assert_eq!(decode("\x1b[2Jok"), vec![run("\x1b[2Jok", Style::default())]);
}

#[test]
fn test_malformed_then_valid() {
    let runs = decode("\x1b[;\x1b[32mgo");
    assert_eq!(runs, vec![run("\x1b[;", Style::default()), run("go", fg("#0dbc79"))]);
}

#[test]
fn test_empty_and_escape_only_input() {
    assert!(decode("").is_empty());
    assert!(decode("\x1b[31m\x1b[0m").is_empty());
}

#[test]
fn test_each_decode_starts_fresh() {
    let _ = decode("\x1b[31munterminated style");
    assert_eq!(decode("next"), vec![run("next", Style::default())]);
}

#[test]
fn test_multibyte_content() {
    let runs = decode("\x1b[32m❯ 日本\x1b[0m ✓");
    assert_eq!(runs[0].content, "❯ 日本");
    assert_eq!(runs[1].content, " ✓");
}

#[test]
fn test_strip_and_detect() {
    let text = "\x1b[1;31mError:\x1b[0m file \x1b[38;5;33mnot\x1b[0m found";
    assert!(has_ansi_codes(text));
    assert_eq!(strip_ansi_codes(text), "Error: file not found");
    assert!(!has_ansi_codes("plain \x1b[m"));
    assert_eq!(strip_ansi_codes("plain \x1b[m"), "plain \x1b[m");
}

#[test]
fn test_html_export() {
    let runs = decode("\x1b[1;31m<b>\x1b[0m & done");
    assert_eq!(
        to_html(&runs),
        "<span style=\"color: #cd3131;font-weight: bold;\">&lt;b&gt;</span> &amp; done"
    );
}
