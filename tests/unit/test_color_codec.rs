//! Unit tests for the color codec

use poshterm::color::{
    build_256_palette, colorize, encode_background, encode_foreground, hex_to_rgb, palette_256,
    rgb_to_hex, standard_color, BASE_16, RESET,
};

#[test]
fn test_hex_parsing() {
    assert_eq!(hex_to_rgb("#ff8000"), Some((255, 128, 0)));
    assert_eq!(hex_to_rgb("FF8000"), Some((255, 128, 0)));
    assert_eq!(hex_to_rgb("#AbCdEf"), Some((171, 205, 239)));
    assert_eq!(hex_to_rgb("#fff"), None);
    assert_eq!(hex_to_rgb("#ff80001"), None);
    assert_eq!(hex_to_rgb("#gg0000"), None);
    assert_eq!(hex_to_rgb(""), None);
    assert_eq!(hex_to_rgb("#ff800é"), None);
}

#[test]
fn test_hex_formatting() {
    assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    assert_eq!(rgb_to_hex(255, 15, 160), "#ff0fa0");
}

#[test]
fn test_palette_layout() {
    let palette = build_256_palette();
    assert_eq!(palette.len(), 256);
    assert_eq!(palette, build_256_palette());

    assert_eq!(palette[0], "#000000");
    assert_eq!(palette[1], "#cd3131");
    assert_eq!(palette[15], "#ffffff");
    assert_eq!(palette[16], "#000000");
    assert_eq!(palette[17], "#00005f");
    assert_eq!(palette[21], "#0000ff");
    assert_eq!(palette[231], "#ffffff");
    assert_eq!(palette[232], "#080808");
    assert_eq!(palette[255], "#eeeeee");

    assert_eq!(palette_256(232), Some("#080808"));
    assert_eq!(palette_256(256), None);
}

#[test]
fn test_standard_codes() {
    assert_eq!(standard_color(31), Some(BASE_16[1]));
    assert_eq!(standard_color(41), Some(BASE_16[1]));
    assert_eq!(standard_color(97), Some("#ffffff"));
    assert_eq!(standard_color(100), Some("#666666"));
    assert_eq!(standard_color(38), None);
    assert_eq!(standard_color(0), None);
}

#[test]
fn test_encoding() {
    assert_eq!(encode_foreground("#0077c2"), "\x1b[38;2;0;119;194m");
    assert_eq!(encode_background("#0077C2"), "\x1b[48;2;0;119;194m");
    assert_eq!(encode_foreground("blue"), "");
    assert_eq!(encode_background("#12"), "");
}

#[test]
fn test_encoding_requires_hash_prefix() {
    assert_eq!(hex_to_rgb("ff0000"), Some((255, 0, 0)));
    assert_eq!(encode_foreground("ff0000"), "");
    assert_eq!(encode_background("ff0000"), "");
    assert_eq!(colorize("user", Some("ff0000"), None), "user");
}

#[test]
fn test_colorize_order() {
    assert_eq!(
        colorize("x", Some("#ffffff"), Some("#000000")),
        format!("\x1b[48;2;0;0;0m\x1b[38;2;255;255;255mx{}", RESET)
    );
}

#[test]
fn test_colorize_without_colors() {
    assert_eq!(colorize("x", None, None), "x");
    assert_eq!(colorize("x", Some("nope"), Some("")), "x");
    assert_eq!(colorize("", Some("#ffffff"), None), "");
}
