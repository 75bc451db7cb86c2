//! Property-based tests for the ANSI decoder
//!
//! These tests use proptest to generate random inputs and verify
//! that decoding never panics and never loses text.

use poshterm::ansi::{decode, strip_ansi_codes};
use poshterm::color::{colorize, rgb_to_hex};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_decoder_doesnt_panic_on_random_input(s in "\\PC*") {
        let _ = decode(&s);
    }

    #[test]
    fn test_decoder_handles_escape_heavy_input(s in "[\x1b\\[;0-9ma-z]{0,200}") {
        let runs = decode(&s);
        prop_assert!(runs.iter().all(|r| !r.content.is_empty()));
    }

    #[test]
    fn test_plain_text_is_one_unstyled_run(s in "[a-zA-Z0-9 ]{1,500}") {
        let runs = decode(&s);
        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(&runs[0].content, &s);
        prop_assert!(runs[0].style.is_default());
    }

    #[test]
    fn test_runs_concatenate_to_stripped_text(
        parts in prop::collection::vec(("[a-z ]{0,20}", 0u32..110), 0..10)
    ) {
        let text: String = parts
            .iter()
            .map(|(t, code)| format!("\x1b[{}m{}", code, t))
            .collect();
        let joined: String = decode(&text).into_iter().map(|r| r.content).collect();
        prop_assert_eq!(joined, strip_ansi_codes(&text));
    }

    #[test]
    fn test_colorized_text_decodes_to_its_color(
        text in "[a-zA-Z0-9]{1,40}",
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
    ) {
        let hex = rgb_to_hex(r, g, b);
        let runs = decode(&colorize(&text, Some(&hex), Some(&hex)));
        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(&runs[0].content, &text);
        prop_assert_eq!(runs[0].style.foreground.as_deref(), Some(hex.as_str()));
        prop_assert_eq!(runs[0].style.background.as_deref(), Some(hex.as_str()));
    }
}
