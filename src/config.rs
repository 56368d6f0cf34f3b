use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_stop_on_completion")]
    pub stop_on_completion: bool,
    #[serde(default = "default_show_cursor_position")]
    pub show_cursor_position: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_stop_on_completion() -> bool {
    true
}
fn default_show_cursor_position() -> bool {
    false
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typesnip")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            stop_on_completion: default_stop_on_completion(),
            show_cursor_position: default_show_cursor_position(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typesnip")
            .join("config.toml")
    }

    /// Lowercased log level, or `info` if the configured one is unknown.
    pub fn log_filter(&self) -> String {
        let level = self.log_level.trim().to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            default_log_level()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert!(config.stop_on_completion);
        assert!(!config.show_cursor_position);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.contains("typesnip"));
    }

    #[test]
    fn test_config_partial_fields() {
        let toml_str = r#"
theme = "catppuccin-mocha"
stop_on_completion = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert!(!config.stop_on_completion);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            show_cursor_position: true,
            log_level: "debug".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [unterminated").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_log_filter_normalizes() {
        let mut config = Config::default();
        config.log_level = " DEBUG ".to_string();
        assert_eq!(config.log_filter(), "debug");
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_filter(), "info");
    }
}
