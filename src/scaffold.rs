//! Vault scaffolding: folders, the log template, task sets and daily logs.
//!
//! Daily logs are laid out by date:
//!
//! ```text
//! <logFolder>/
//! └── 2025/
//!     └── 25.03/
//!         └── 25.03.07.md
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::PanelConfig;
use crate::error::{Result, TaskPanelError};
use crate::vault::{normalize_path, parent_folder, Vault};

/// Content of a freshly created log template.
pub const DEFAULT_LOG_TEMPLATE: &str = "## {date}\n\n";

/// Placeholder replaced by the log date.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Create whatever part of the vault layout is missing.
///
/// Returns a description of every item that was created; an empty list
/// means the layout was already complete.
///
/// # Errors
///
/// Returns an error if a folder or the template file cannot be created.
pub fn ensure_layout<V: Vault>(vault: &mut V, config: &PanelConfig) -> Result<Vec<String>> {
    let mut created = Vec::new();

    for (label, folder) in [
        ("task folder", &config.task_folder_path),
        ("data folder", &config.data_folder_path),
    ] {
        let folder = normalize_path(folder);
        if !vault.exists(&folder) {
            vault.create_dir(&folder)?;
            info!("Created {}: {}", label, folder);
            created.push(format!("{}: {}", label, folder));
        }
    }

    let template = normalize_path(&config.log_template_file_path);
    if !vault.exists(&template) {
        if let Some(parent) = parent_folder(&template) {
            vault.create_dir(parent)?;
        }
        vault.write_text(&template, DEFAULT_LOG_TEMPLATE)?;
        info!("Created log template: {}", template);
        created.push(format!("log template: {}", template));
    }

    Ok(created)
}

/// Vault path of the task file created at `now`.
#[must_use]
pub fn task_file_path(config: &PanelConfig, now: NaiveDateTime) -> String {
    format!(
        "{}/任务_{}.md",
        normalize_path(&config.task_folder_path),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Create an empty, timestamped task file.
///
/// # Errors
///
/// Returns [`TaskPanelError::AlreadyExists`] if a file with the same
/// timestamp exists, or an error if it cannot be written.
pub fn create_task_file<V: Vault>(
    vault: &mut V,
    config: &PanelConfig,
    now: NaiveDateTime,
) -> Result<String> {
    let path = task_file_path(config, now);
    vault.create_dir(&normalize_path(&config.task_folder_path))?;

    if vault.exists(&path) {
        return Err(TaskPanelError::AlreadyExists { path });
    }

    vault.write_text(&path, "")?;
    info!("Created task file: {}", path);
    Ok(path)
}

/// Vault path of the daily log for `date`.
#[must_use]
pub fn daily_log_path(config: &PanelConfig, date: NaiveDate) -> String {
    format!(
        "{}/{}/{}/{}.md",
        normalize_path(&config.log_files_folder_path),
        date.format("%Y"),
        date.format("%y.%m"),
        date.format("%y.%m.%d")
    )
}

/// Fill the template for `date`.
#[must_use]
pub fn render_log_template(template: &str, date: NaiveDate) -> String {
    template.replace(DATE_PLACEHOLDER, &date.format("%Y.%m.%d").to_string())
}

/// Create the daily log for `today` unless it already exists.
///
/// The content comes from the configured template. An unreadable or
/// missing template falls back to [`DEFAULT_LOG_TEMPLATE`].
///
/// # Errors
///
/// Returns an error if the folders or the log file cannot be created.
pub fn create_daily_log<V: Vault>(
    vault: &mut V,
    config: &PanelConfig,
    today: NaiveDate,
) -> Result<Option<String>> {
    let path = daily_log_path(config, today);
    if let Some(parent) = parent_folder(&path) {
        vault.create_dir(parent)?;
    }

    if vault.exists(&path) {
        debug!("Daily log {} already exists", path);
        return Ok(None);
    }

    let template = match vault.read_text(&config.log_template_file_path) {
        Ok(template) => template,
        Err(e) => {
            warn!("Using default log template: {}", e);
            DEFAULT_LOG_TEMPLATE.to_string()
        }
    };

    vault.write_text(&path, &render_log_template(&template, today))?;
    info!("Created daily log: {}", path);
    Ok(Some(path))
}
