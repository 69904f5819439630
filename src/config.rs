//! Configuration paths and timeline settings file.
//!
//! Settings live in `timeline.json` (all fields optional):
//! ```json
//! { "buffer_us": 1000000.0, "default_view_length_us": 30000000.0, "start_live": false }
//! ```

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::timeline::{DEFAULT_BUFFER_US, DEFAULT_VIEW_LENGTH_US};

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "timeline.json";

/// Log file name inside the data directory
pub const LOG_FILE: &str = "profiler-timeline.log";

const APP_DIR: &str = "profiler-timeline";
const CONFIG_DIR_ENV: &str = "PROFILER_TIMELINE_CONFIG_DIR";

/// Timeline construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Gap between the view's right edge and the data edge while Live
    pub buffer_us: f64,
    /// Width restored by reset_zoom()
    pub default_view_length_us: f64,
    /// Enter Live mode right after construction
    pub start_live: bool,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            buffer_us: DEFAULT_BUFFER_US,
            default_view_length_us: DEFAULT_VIEW_LENGTH_US,
            start_live: false,
        }
    }
}

impl TimelineSettings {
    /// Load from a JSON file. A missing file yields defaults; an unreadable
    /// or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings: {}", path.display()))?;
        Ok(())
    }
}

/// Overrides for the default application paths
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI arg -> PROFILER_TIMELINE_CONFIG_DIR -> None (defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Path to a configuration file.
///
/// Priority:
/// 1. custom directory (CLI / ENV)
/// 2. current directory, if it already holds `timeline.json` or the log
/// 3. platform config dir (`~/.config/profiler-timeline` on Linux)
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir).join(name)
}

/// Path to a data file (logs). Same priority, platform data dir last.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir).join(name)
}

/// Create config and data directories if missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = resolve_dir(config, dirs_next::config_dir);
    let data_dir = resolve_dir(config, dirs_next::data_dir);

    for dir in [&config_dir, &data_dir] {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

fn has_local_config_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: fn() -> Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Ok(current_dir) = std::env::current_dir() {
        if has_local_config_files(&current_dir) {
            return current_dir;
        }
    }
    platform()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("profiler_timeline_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };
        assert_eq!(config_file(SETTINGS_FILE, &config), PathBuf::from("/custom/timeline.json"));
        assert_eq!(data_file(LOG_FILE, &config), PathBuf::from("/custom/profiler-timeline.log"));
    }

    #[test]
    fn test_cli_dir_wins() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from/cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let dir = scratch_dir("missing");
        let settings = TimelineSettings::load(&dir.join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, TimelineSettings::default());
        assert_eq!(settings.buffer_us, 1_000_000.0);
        assert_eq!(settings.default_view_length_us, 30_000_000.0);
        assert!(!settings.start_live);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let dir = scratch_dir("partial");
        let path = dir.join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "buffer_us": 250000.0 }"#).unwrap();

        let settings = TimelineSettings::load(&path).unwrap();
        assert_eq!(settings.buffer_us, 250_000.0);
        assert_eq!(settings.default_view_length_us, DEFAULT_VIEW_LENGTH_US);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_settings_error() {
        let dir = scratch_dir("malformed");
        let path = dir.join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = TimelineSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let path = dir.join(SETTINGS_FILE);
        let settings = TimelineSettings {
            buffer_us: 5.0,
            default_view_length_us: 60.0,
            start_live: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(TimelineSettings::load(&path).unwrap(), settings);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_ensure_dirs_creates_custom_dir() {
        let dir = scratch_dir("ensure").join("nested");
        let config = PathConfig {
            config_dir: Some(dir.clone()),
        };
        ensure_dirs(&config).unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
