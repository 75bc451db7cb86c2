//! Configuration File Loading
//!
//! Finds and loads the poshterm configuration file from the usual locations,
//! falling back to built-in defaults.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory and file stem used in every search location
const APP_DIR: &str = "poshterm";
const CONFIG_STEM: &str = "config";

/// Configuration file loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directories searched for a config file, in order
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats, in preference order
    supported_formats: Vec<ConfigFormat>,
    /// Path of the file that was loaded, if any
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    /// Guess the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Fall back to the default config when no file exists
    pub create_default: bool,
    /// Validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Loader over the default search locations
    pub fn new() -> Self {
        Self::with_search_paths(Self::default_search_paths())
    }

    /// Loader over explicit directories
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Config> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Search this loader's paths
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<Config> {
        if let Some((path, config)) = self.find_and_load_config()? {
            if options.validate {
                validate_config(&config)?;
            }
            debug!(path = %path.display(), "loaded configuration");
            self.current_path = Some(path);
            return Ok(config);
        }

        if options.create_default {
            debug!("no configuration file found, using defaults");
            Ok(Config::default())
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load and validate a specific file
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let config = load_config_file(path, ConfigFormat::from_path(path))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration, format chosen from the file extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let format = ConfigFormat::from_path(path);
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        }
        .map_err(|reason| Error::ConfigSerializationFailed {
            format: format.name().to_string(),
            reason,
        })?;

        fs::write(path, content)?;
        Ok(())
    }

    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for dir in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = dir.join(CONFIG_STEM).with_extension(format.extension());
                if !config_path.exists() {
                    continue;
                }

                match load_config_file(&config_path, *format) {
                    Ok(config) => return Ok(Some((config_path, config))),
                    Err(e) => {
                        // Keep searching
                        warn!("Failed to load config from {}: {}", config_path.display(), e);
                    }
                }
            }
        }

        Ok(None)
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join(APP_DIR));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join(APP_DIR);
            if !paths.contains(&dir) {
                paths.push(dir);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", APP_DIR)));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(format!(".{}", APP_DIR)));
        }

        paths
    }

    /// File the configuration was loaded from
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config_file(path: &Path, format: ConfigFormat) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let parsed = match format {
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| Error::ConfigParseFailed {
        format: format.name().to_string(),
        reason,
    })
}

/// Reject configurations the engine cannot use
pub fn validate_config(config: &Config) -> Result<()> {
    if config.fallback_prompt.is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "fallback_prompt".to_string(),
            reason: "Fallback prompt cannot be empty".to_string(),
        });
    }

    if let Some(path) = &config.theme_path {
        if path.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "theme_path".to_string(),
                reason: "Theme path cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}
