//! Integration Tests for Configuration Loading
//!
//! Config discovery across search directories, format precedence and
//! the configured context reaching the rendered prompt.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use poshterm::config::loader::LoadOptions;
use poshterm::{init_with_config, Config, ConfigLoader, Error};
use std::fs;
use tempfile::TempDir;
use test_utils::{path_theme, write_theme};

#[test]
fn test_first_search_path_wins() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("config.json"), r#"{"fallback_prompt": "first> "}"#).unwrap();
    fs::write(second.path().join("config.toml"), "fallback_prompt = \"second> \"").unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);
    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(config.fallback_prompt, "first> ");
    assert_eq!(
        loader.current_path(),
        Some(first.path().join("config.json").as_path())
    );
}

#[test]
fn test_toml_preferred_over_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "fallback_prompt = \"toml> \"").unwrap();
    fs::write(dir.path().join("config.json"), r#"{"fallback_prompt": "json> "}"#).unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![dir.path().to_path_buf()]);
    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(config.fallback_prompt, "toml> ");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "fallback_prompt = \"\"").unwrap();

    let mut loader = ConfigLoader::with_search_paths(vec![dir.path().to_path_buf()]);
    let result = loader.load_with_options(LoadOptions::default());
    assert!(matches!(result, Err(Error::ConfigValidationFailed { .. })));

    let unchecked = loader
        .load_with_options(LoadOptions {
            create_default: true,
            validate: false,
        })
        .unwrap();
    assert!(unchecked.fallback_prompt.is_empty());
}

#[test]
fn test_added_search_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "log_level = \"debug\"").unwrap();

    let mut loader = ConfigLoader::with_search_paths(Vec::new());
    loader.add_search_path(dir.path().to_path_buf());
    let config = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.fallback_prompt, Config::default().fallback_prompt);
}

#[test]
fn test_config_drives_engine() {
    let dir = TempDir::new().unwrap();
    let theme_path = write_theme(dir.path(), "path.omp.json", path_theme());
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "theme_path = {:?}\n\n[context]\nPWD = \"/opt/app/src\"\nHOME = \"/opt/app\"\n",
            theme_path.display().to_string()
        ),
    )
    .unwrap();

    let engine = init_with_config(&config_path).unwrap();
    assert_eq!(
        engine.render_prompt().prompt,
        "\x1b[38;2;255;255;255m~/src\x1b[0m"
    );
}

#[test]
fn test_missing_explicit_config() {
    let result = ConfigLoader::load_from_path(std::path::Path::new("/no/such/poshterm.toml"));
    assert!(matches!(result, Err(Error::ConfigLoadFailed { .. })));
}
