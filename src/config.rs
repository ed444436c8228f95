//! Configuration management for taskpanel.
//!
//! Settings live in `<vault>/.taskpanel/settings.json`. Every key is optional
//! and falls back to its default.
//!
//! # Example settings.json
//!
//! ```json
//! {
//!   "taskFolderPath": "Tasks",
//!   "logFilesFolderPath": "Journal",
//!   "refreshInterval": 0
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskPanelError};
use crate::panel::RefreshSchedule;
use crate::vault::normalize_path;

/// Default folder scanned for task files.
pub const DEFAULT_TASK_FOLDER: &str = "AutoTask 任务";

/// Default folder for plugin data such as the log template.
pub const DEFAULT_DATA_FOLDER: &str = "_Root/PluginSettings/AutoTaskPanel";

/// Default location of the daily log template.
pub const DEFAULT_LOG_TEMPLATE: &str = "_Root/PluginSettings/AutoTaskPanel/diarySettings.md";

/// Default folder for daily log files.
pub const DEFAULT_LOG_FOLDER: &str = "AutoTask 日志";

/// Default refresh interval: one minute.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;

/// Settings of a task panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Folder whose Markdown files are scanned for tasks.
    #[serde(default = "default_task_folder")]
    pub task_folder_path: String,

    /// Folder holding panel data.
    #[serde(default = "default_data_folder")]
    pub data_folder_path: String,

    /// Template used for new daily logs; `{date}` is replaced.
    #[serde(default = "default_log_template")]
    pub log_template_file_path: String,

    /// Root folder of daily logs.
    #[serde(default = "default_log_folder")]
    pub log_files_folder_path: String,

    /// Create today's log on `init`.
    #[serde(default = "default_true")]
    pub daily_log_enabled: bool,

    /// Milliseconds between full reparses; 0 disables periodic refresh.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

fn default_task_folder() -> String {
    DEFAULT_TASK_FOLDER.to_string()
}

fn default_data_folder() -> String {
    DEFAULT_DATA_FOLDER.to_string()
}

fn default_log_template() -> String {
    DEFAULT_LOG_TEMPLATE.to_string()
}

fn default_log_folder() -> String {
    DEFAULT_LOG_FOLDER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            task_folder_path: default_task_folder(),
            data_folder_path: default_data_folder(),
            log_template_file_path: default_log_template(),
            log_files_folder_path: default_log_folder(),
            daily_log_enabled: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl PanelConfig {
    /// Load configuration from a vault directory.
    ///
    /// A missing settings file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskPanelError::Config`] if the file exists but cannot be
    /// read or parsed, and [`TaskPanelError::InvalidConfig`] if a value is
    /// unusable.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let settings_path = Self::settings_path(vault_dir);

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path).map_err(|e| {
            TaskPanelError::config_with_path(e.to_string(), settings_path.clone())
        })?;
        let config: PanelConfig = serde_json::from_str(&content).map_err(|e| {
            TaskPanelError::config_with_path(e.to_string(), settings_path.clone())
        })?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Write the configuration to the vault's settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn save(&self, vault_dir: &Path) -> Result<()> {
        let settings_path = Self::settings_path(vault_dir);
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&settings_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get the settings.json path for a vault
    pub fn settings_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join(".taskpanel/settings.json")
    }

    /// Check that every folder and file setting names a vault-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`TaskPanelError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("taskFolderPath", &self.task_folder_path),
            ("dataFolderPath", &self.data_folder_path),
            ("logTemplateFilePath", &self.log_template_file_path),
            ("logFilesFolderPath", &self.log_files_folder_path),
        ];

        for (field, value) in paths {
            let normalized = normalize_path(value);
            if normalized.is_empty() {
                return Err(TaskPanelError::invalid_config(field, "must not be empty"));
            }
            if normalized.split('/').any(|segment| segment == "..") {
                return Err(TaskPanelError::invalid_config(
                    field,
                    "must stay inside the vault",
                ));
            }
        }
        Ok(())
    }

    /// Copy with every path normalized to `/`-separated vault form.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            task_folder_path: normalize_path(&self.task_folder_path),
            data_folder_path: normalize_path(&self.data_folder_path),
            log_template_file_path: normalize_path(&self.log_template_file_path),
            log_files_folder_path: normalize_path(&self.log_files_folder_path),
            ..self.clone()
        }
    }

    /// How often the panel reparses.
    #[must_use]
    pub fn refresh_schedule(&self) -> RefreshSchedule {
        RefreshSchedule::from_millis(self.refresh_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_panel_config_default() {
        let config = PanelConfig::default();
        assert_eq!(config.task_folder_path, "AutoTask 任务");
        assert_eq!(config.log_files_folder_path, "AutoTask 日志");
        assert!(config.daily_log_enabled);
        assert_eq!(config.refresh_interval, 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_panel_config_load_missing() {
        let temp = TempDir::new().unwrap();
        let config = PanelConfig::load(temp.path()).unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_panel_config_load_partial() {
        let temp = TempDir::new().unwrap();
        let path = PanelConfig::settings_path(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"taskFolderPath": "/Tasks/", "refreshInterval": 0}"#).unwrap();

        let config = PanelConfig::load(temp.path()).unwrap();
        assert_eq!(config.task_folder_path, "Tasks");
        assert_eq!(config.refresh_interval, 0);
        assert_eq!(config.log_files_folder_path, DEFAULT_LOG_FOLDER);
    }

    #[test]
    fn test_panel_config_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = PanelConfig::settings_path(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = PanelConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, TaskPanelError::Config { path: Some(_), .. }));
    }

    #[test]
    fn test_panel_config_save_then_load() {
        let temp = TempDir::new().unwrap();
        let config = PanelConfig {
            task_folder_path: "Inbox".into(),
            daily_log_enabled: false,
            ..PanelConfig::default()
        };
        config.save(temp.path()).unwrap();

        assert_eq!(PanelConfig::load(temp.path()).unwrap(), config);
    }

    #[test]
    fn test_panel_config_validate_rejects_bad_paths() {
        let empty = PanelConfig {
            task_folder_path: "/".into(),
            ..PanelConfig::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(TaskPanelError::InvalidConfig { ref field, .. }) if field == "taskFolderPath"
        ));

        let escaping = PanelConfig {
            log_files_folder_path: "../outside".into(),
            ..PanelConfig::default()
        };
        assert!(escaping.validate().is_err());
    }

    #[test]
    fn test_panel_config_refresh_schedule() {
        let mut config = PanelConfig::default();
        assert_eq!(
            config.refresh_schedule(),
            RefreshSchedule::Every(Duration::from_millis(60_000))
        );
        config.refresh_interval = 0;
        assert_eq!(config.refresh_schedule(), RefreshSchedule::Disabled);
    }
}
