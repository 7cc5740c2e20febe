#![deny(missing_docs)]
//! Shared logging utilities for the panel export workspace.
//!
//! Every component that logs holds its own [`Logger`], built from an explicit
//! [`LoggerConfig`]. There is no process-wide configuration: reconfiguring one
//! logger never affects another. Formatted lines are forwarded to the `log`
//! facade, whose backend is installed once by the binary (or by
//! [`initialize_for_tests`]).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a log line, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug = 0,
    /// Normal operation.
    Info = 1,
    /// Something unexpected that did not stop the request.
    Warn = 2,
    /// A failed request.
    Error = 3,
}

impl LogLevel {
    /// Upper-case label used in formatted lines.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(LogLevel::Debug),
            1 => Ok(LogLevel::Info),
            2 => Ok(LogLevel::Warn),
            3 => Ok(LogLevel::Error),
            other => Err(format!("unknown log level {other}")),
        }
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level as u8
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Configuration carried by a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Lines below this level are dropped.
    pub min_level: LogLevel,
    /// Exposed to callers through [`Logger::is_debug_mode`]; does not lower `min_level`.
    pub debug_mode: bool,
    /// Prefix each line with an RFC 3339 timestamp.
    pub show_timestamp: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_mode: false,
            show_timestamp: true,
        }
    }
}

impl LoggerConfig {
    /// Returns a copy with the fields set in `patch` replaced.
    pub fn merged(mut self, patch: LoggerConfigPatch) -> Self {
        self.apply(patch);
        self
    }

    /// Replaces the fields set in `patch`.
    pub fn apply(&mut self, patch: LoggerConfigPatch) {
        if let Some(level) = patch.min_level {
            self.min_level = level;
        }
        if let Some(debug) = patch.debug_mode {
            self.debug_mode = debug;
        }
        if let Some(show) = patch.show_timestamp {
            self.show_timestamp = show;
        }
    }
}

/// Partial update for a [`LoggerConfig`]; unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerConfigPatch {
    /// New minimum level.
    pub min_level: Option<LogLevel>,
    /// New debug-mode flag.
    pub debug_mode: Option<bool>,
    /// New timestamp flag.
    pub show_timestamp: Option<bool>,
}

/// A logger bound to one component.
#[derive(Debug, Clone)]
pub struct Logger {
    config: LoggerConfig,
    target: &'static str,
}

impl Logger {
    /// Creates a logger that reports under `target`.
    pub fn new(config: LoggerConfig, target: &'static str) -> Self {
        Self { config, target }
    }

    /// Creates a logger sharing this logger's configuration under another target.
    pub fn for_target(&self, target: &'static str) -> Self {
        Self {
            config: self.config,
            target,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Applies a partial update to this logger only.
    pub fn reconfigure(&mut self, patch: LoggerConfigPatch) {
        self.config.apply(patch);
    }

    /// Whether debug mode is switched on.
    pub fn is_debug_mode(&self) -> bool {
        self.config.debug_mode
    }

    /// Whether a line at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.min_level
    }

    /// Logs a debug line.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Logs a debug line with a structured payload.
    pub fn debug_with(&self, message: &str, data: &Value) {
        self.log(LogLevel::Debug, message, Some(data));
    }

    /// Logs an info line.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Logs an info line with a structured payload.
    pub fn info_with(&self, message: &str, data: &Value) {
        self.log(LogLevel::Info, message, Some(data));
    }

    /// Logs a warning.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Logs a warning with a structured payload.
    pub fn warn_with(&self, message: &str, data: &Value) {
        self.log(LogLevel::Warn, message, Some(data));
    }

    /// Logs an error.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }

    /// Logs an error with a structured payload.
    pub fn error_with(&self, message: &str, data: &Value) {
        self.log(LogLevel::Error, message, Some(data));
    }

    /// Formats and forwards one line if `level` passes the filter.
    pub fn log(&self, level: LogLevel, message: &str, data: Option<&Value>) {
        if !self.enabled(level) {
            return;
        }
        let line = self.format_line(level, message, data, Utc::now());
        log::log!(target: self.target, level.into(), "{line}");
    }

    /// Renders `[timestamp] [LEVEL] message {data}` for the given instant.
    pub fn format_line(
        &self,
        level: LogLevel,
        message: &str,
        data: Option<&Value>,
        now: DateTime<Utc>,
    ) -> String {
        let mut line = String::new();
        if self.config.show_timestamp {
            line.push('[');
            line.push_str(&now.to_rfc3339_opts(SecondsFormat::Millis, true));
            line.push_str("] ");
        }
        line.push('[');
        line.push_str(level.label());
        line.push_str("] ");
        line.push_str(message);
        if let Some(data) = data.filter(|d| !d.is_null()) {
            line.push(' ');
            line.push_str(&data.to_string());
        }
        line
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap()
    }

    #[test]
    fn default_config_filters_debug() {
        let logger = Logger::new(LoggerConfig::default(), "test");
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn debug_mode_does_not_lower_min_level() {
        let config = LoggerConfig::default().merged(LoggerConfigPatch {
            debug_mode: Some(true),
            ..Default::default()
        });
        let logger = Logger::new(config, "test");
        assert!(logger.is_debug_mode());
        assert!(!logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn reconfigure_is_local_to_one_logger() {
        let first = Logger::new(LoggerConfig::default(), "first");
        let mut second = first.for_target("second");
        second.reconfigure(LoggerConfigPatch {
            min_level: Some(LogLevel::Error),
            ..Default::default()
        });
        assert!(first.enabled(LogLevel::Warn));
        assert!(!second.enabled(LogLevel::Warn));
    }

    #[test]
    fn formats_timestamp_level_and_data() {
        let logger = Logger::new(LoggerConfig::default(), "test");
        let line = logger.format_line(
            LogLevel::Info,
            "saved",
            Some(&json!({"filename": "a.md"})),
            fixed_instant(),
        );
        assert_eq!(
            line,
            r#"[2024-05-01T12:34:56.000Z] [INFO] saved {"filename":"a.md"}"#
        );
    }

    #[test]
    fn omits_timestamp_when_disabled() {
        let config = LoggerConfig {
            show_timestamp: false,
            ..LoggerConfig::default()
        };
        let logger = Logger::new(config, "test");
        let line = logger.format_line(LogLevel::Warn, "careful", None, fixed_instant());
        assert_eq!(line, "[WARN] careful");
    }

    #[test]
    fn level_round_trips_through_number() {
        let parsed: LogLevel = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(parsed, LogLevel::Warn);
        assert!(serde_json::from_value::<LogLevel>(json!(7)).is_err());
        assert_eq!(serde_json::to_value(LogLevel::Error).unwrap(), json!(3));
    }
}
