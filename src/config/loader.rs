//! Configuration loading and discovery for `spritegrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SpritegridConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up from the working directory
pub const CONFIG_FILE_NAME: &str = "spritegrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritegrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values shared by every command
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
}

/// Find spritegrid.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find spritegrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        // Reached root, no config found
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise uses
/// [`find_config`]; without any config file the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<SpritegridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(SpritegridConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritegridConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpritegridConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SpritegridConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }

    if let Some(jobs) = overrides.jobs {
        config.output.jobs = jobs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[render]\npadding = 2");

        let subdir = temp.path().join("sprites").join("heroes");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        assert_eq!(find_config_from(subdir), Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[render]\npixel_size = 8\npadding = 2");

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.render.pixel_size, 8);
        assert_eq!(config.render.padding, 2);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[render\npixel_size = 8");

        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[split]\npixel_size = 0");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("split.pixel_size"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let missing = temp.path().join("nope.toml");
        assert!(matches!(load_config(Some(&missing)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = SpritegridConfig::default();
        let overrides = CliOverrides {
            out: Some(PathBuf::from("dist")),
            jobs: Some(3),
        };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.dir, PathBuf::from("dist"));
        assert_eq!(config.output.jobs, 3);
    }
}
