//! RON settings file for the command line front end.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use panel_engine::{ContentLocator, CONTAINER_SELECTOR, CONTENT_SELECTOR};
use panel_logging::{Logger, LoggerConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const SETTINGS_FILENAME: &str = "panel_export.ron";

/// Missing fields take their default, so a file may set only what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub output_dir: PathBuf,
    pub container_selector: String,
    pub content_selector: String,
    /// Signals that the page has finished rendering its controls.
    pub action_container_selector: String,
    /// Present when download buttons were already injected into the page.
    pub download_button_selector: String,
    pub logger: LoggerConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            container_selector: CONTAINER_SELECTOR.to_string(),
            content_selector: CONTENT_SELECTOR.to_string(),
            action_container_selector: "div.action-buttons".to_string(),
            download_button_selector: r#"[data-test-id="md-download-button"]"#.to_string(),
            logger: LoggerConfig {
                debug_mode: true,
                ..LoggerConfig::default()
            },
        }
    }
}

impl AppSettings {
    pub fn locator(&self) -> ContentLocator {
        ContentLocator {
            container_selector: self.container_selector.clone(),
            content_selector: self.content_selector.clone(),
        }
    }
}

/// Reads `path`, or `./panel_export.ron` when none is given. Any problem falls
/// back to defaults with a warning.
pub fn load_settings(path: Option<&Path>, logger: &Logger) -> AppSettings {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(SETTINGS_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
            return AppSettings::default();
        }
        Err(err) => {
            logger.warn_with(
                "failed to read settings, using defaults",
                &json!({ "path": path.display().to_string(), "error": err.to_string() }),
            );
            return AppSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            logger.debug_with(
                "settings loaded",
                &json!({ "path": path.display().to_string() }),
            );
            settings
        }
        Err(err) => {
            logger.warn_with(
                "failed to parse settings, using defaults",
                &json!({ "path": path.display().to_string(), "error": err.to_string() }),
            );
            AppSettings::default()
        }
    }
}
