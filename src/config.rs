use crate::error::TaskwiseError;
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// How suggestion chips render dates and times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime pattern for calendar days
    pub date_format: String,
    /// strftime pattern for times of day
    pub time_format: String,
    /// Show "Today" / "Tomorrow" instead of a formatted date
    pub relative_day_labels: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%a, %b %-d".to_string(),
            time_format: "%-I:%M %p".to_string(),
            relative_day_labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Fill in a missing date from a present time (and re-anchor times)
    pub smart_defaults: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { smart_defaults: true }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TaskwiseError::ConfigParse(e.to_string()))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Reject strftime patterns chrono cannot render
    pub fn validate(&self) -> Result<(), TaskwiseError> {
        for pattern in [&self.display.date_format, &self.display.time_format] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(TaskwiseError::InvalidFormat(pattern.clone()));
            }
        }
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("com", "taskwise", "taskwise").ok_or(TaskwiseError::ConfigDir)?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.display.date_format, "%a, %b %-d");
        assert_eq!(config.display.time_format, "%-I:%M %p");
        assert!(config.display.relative_day_labels);
        assert!(config.parser.smart_defaults);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.time_format = "%H:%M".to_string();
        config.parser.smart_defaults = false;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[display]\ntime_format = \"%H:%M\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.display.time_format, "%H:%M");
        assert_eq!(loaded.display.date_format, "%a, %b %-d");
        assert!(loaded.parser.smart_defaults);

        Ok(())
    }

    #[test]
    fn test_invalid_format_rejected() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[display]\ndate_format = \"%Q\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskwiseError>(),
            Some(TaskwiseError::InvalidFormat(_))
        ));

        Ok(())
    }

    #[test]
    fn test_malformed_toml() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[display\n")?;

        assert!(Config::load_from(&config_path).is_err());
        Ok(())
    }
}
