mod schema;

pub use schema::{Config, InputConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/credit-xai/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("credit-xai"))
}

/// Get the default config file path (~/.config/credit-xai/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/credit-xai/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate the whole config at startup, collecting every error.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(input) = &config.input {
        if let Some(paths) = &input.search_paths {
            for (i, path) in paths.iter().enumerate() {
                if path.trim().is_empty() {
                    errors.push(format!("input.search_paths[{}]: must not be empty", i));
                }
            }
        }
        if let Some(pattern) = &input.holistic_pattern {
            if pattern.trim().is_empty() {
                errors.push("input.holistic_pattern: must not be empty".to_string());
            } else if let Err(e) = glob::Pattern::new(pattern) {
                errors.push(format!(
                    "input.holistic_pattern: invalid glob '{}' - {}",
                    pattern, e
                ));
            }
        }
    }

    if let Some(quests) = &config.quests {
        if let Err(quest_errors) = crate::quests::validate_quests(quests) {
            errors.extend(quest_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
