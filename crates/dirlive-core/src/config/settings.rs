//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::sort::{SortDirection, SortField, SortPolicy};

/// Top-level configuration.
///
/// All fields have defaults so dirlive works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: DisplaySettings,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub volumes: VolumeConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Listing preferences that affect scan results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default = "default_true")]
    pub ascending: bool,
    #[serde(default)]
    pub mix_folders_and_files: bool,
}

impl DisplaySettings {
    pub fn sort_policy(&self) -> SortPolicy {
        SortPolicy::new(
            self.sort_by,
            SortDirection::from_ascending(self.ascending),
            self.mix_folders_and_files,
        )
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_by: SortField::Name,
            ascending: true,
            mix_folders_and_files: false,
        }
    }
}

/// Change watcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl WatcherConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Paths always listed as volumes, whatever their on-disk type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    #[serde(default)]
    pub mount_points: Vec<PathBuf>,
}

/// Identifies which preference changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceKey {
    ShowHidden,
    SortBy,
    Ascending,
    MixFoldersAndFiles,
    /// Theme changes restart the frontend and never affect listing data.
    Theme,
    Other(String),
}

impl PreferenceKey {
    /// Returns `false` only for preferences with no effect on listing data.
    pub fn triggers_rescan(&self) -> bool {
        !matches!(self, PreferenceKey::Theme)
    }
}

impl From<&str> for PreferenceKey {
    fn from(key: &str) -> Self {
        match key {
            "show_hidden" => PreferenceKey::ShowHidden,
            "sort_by" => PreferenceKey::SortBy,
            "ascending" => PreferenceKey::Ascending,
            "mix_folders_and_files" => PreferenceKey::MixFoldersAndFiles,
            "theme" => PreferenceKey::Theme,
            other => PreferenceKey::Other(other.to_string()),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Minimum interval between two delivered change signals.
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_general() {
        let config = Config::default();

        assert!(!config.general.show_hidden);
        assert_eq!(config.general.sort_by, SortField::Name);
        assert!(config.general.ascending);
        assert!(!config.general.mix_folders_and_files);
    }

    #[test]
    fn default_config_watcher() {
        let config = Config::default();

        assert!(config.watcher.enabled);
        assert_eq!(config.watcher.debounce(), Duration::from_millis(2000));
        assert!(config.volumes.mount_points.is_empty());
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
sort_by = "size"
ascending = false
mix_folders_and_files = true

[watcher]
enabled = false
debounce_ms = 500

[volumes]
mount_points = ["/mnt/sdcard"]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert_eq!(config.general.sort_by, SortField::Size);
        assert!(!config.general.ascending);
        assert!(config.general.mix_folders_and_files);
        assert!(!config.watcher.enabled);
        assert_eq!(config.watcher.debounce_ms, 500);
        assert_eq!(config.volumes.mount_points, vec![PathBuf::from("/mnt/sdcard")]);
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general]\nshow_hidden = true\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert_eq!(config.general.sort_by, SortField::Name);
        assert!(config.general.ascending);
        assert!(config.watcher.enabled);
        assert_eq!(config.watcher.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.general, DisplaySettings::default());
        assert_eq!(config.watcher, WatcherConfig::default());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general]\nsort_by = \"colour\"\n").unwrap();

        assert!(matches!(
            Config::load(&path).unwrap_err(),
            CoreError::ConfigParse(_)
        ));
    }

    #[test]
    fn sort_policy_reflects_settings() {
        let settings = DisplaySettings {
            sort_by: SortField::Date,
            ascending: false,
            mix_folders_and_files: true,
            ..DisplaySettings::default()
        };
        let policy = settings.sort_policy();

        assert_eq!(policy.field, SortField::Date);
        assert_eq!(policy.direction, SortDirection::Descending);
        assert!(policy.mix_folders_and_files);
    }

    #[test]
    fn theme_does_not_trigger_rescan() {
        assert!(!PreferenceKey::from("theme").triggers_rescan());
        assert!(PreferenceKey::from("show_hidden").triggers_rescan());
        assert!(PreferenceKey::from("sort_by").triggers_rescan());
        assert_eq!(
            PreferenceKey::from("font_size"),
            PreferenceKey::Other("font_size".to_string())
        );
        assert!(PreferenceKey::from("font_size").triggers_rescan());
    }
}
