//! Centralized game logger
//!
//! Every line the engine and navigator produce goes through `GameLogger`, so
//! the same run can print to stdout, be captured in memory for tests, or be
//! emitted as JSON lines.

use crate::{Result, RpsError};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - rounds and results (default)
    #[default]
    Normal = 2,
    /// Verbose - stage transitions, timers and controller choices
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// A captured log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "controller_choice", "round_resolved")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Structured payload for event entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Game logger with verbosity filtering and optional capture
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    fn is_printing(&self) -> bool {
        self.output_mode == OutputMode::Stdout
    }

    /// Flush buffered logs to stdout, respecting verbosity and format settings
    pub fn flush_buffer(&mut self) {
        {
            let buffer = self.log_buffer.borrow();
            for entry in buffer.iter().filter(|e| e.level <= self.verbosity) {
                self.write_entry(entry);
            }
        }
        self.clear_logs();
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    fn write_entry(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => {
                if entry.data.is_some() {
                    // Structured events have no text rendering
                    return;
                }
                if entry.level == VerbosityLevel::Minimal {
                    println!("{}", entry.message);
                } else {
                    println!("  {}", entry.message);
                }
            }
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Failed to encode log entry: {e}"),
            },
        }
    }

    fn log(&self, entry: LogEntry) {
        let capture = self.is_capturing();
        let print = self.is_printing() && entry.level <= self.verbosity;

        if print {
            self.write_entry(&entry);
        }
        if capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn message(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        // Early exit if message won't be used
        if level > self.verbosity && !self.is_capturing() {
            return;
        }
        self.log(LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
            data: None,
        });
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.message(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.message(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.message(VerbosityLevel::Verbose, message, None);
    }

    /// Log a controller decision at Verbose level
    #[inline]
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        self.message(
            VerbosityLevel::Verbose,
            &format!("{controller_name} {message}"),
            Some("controller_choice"),
        );
    }

    fn wants_structured(&self, level: VerbosityLevel) -> bool {
        self.is_capturing() || (self.output_format == OutputFormat::Json && level <= self.verbosity)
    }

    fn structured(&self, level: VerbosityLevel, category: &str, data: serde_json::Value) {
        self.log(LogEntry {
            level,
            message: category.to_string(),
            category: Some(category.to_string()),
            data: Some(data),
        });
    }

    /// Emit a structured event at Normal level
    ///
    /// Events only reach stdout in JSON format; text output renders them
    /// separately. They are always captured when capture is on. Encoding
    /// failures are reported on stderr and the event is dropped.
    pub fn event<T: Serialize>(&self, category: &str, data: &T) {
        if !self.wants_structured(VerbosityLevel::Normal) {
            return;
        }
        match serde_json::to_value(data) {
            Ok(value) => self.structured(VerbosityLevel::Normal, category, value),
            Err(e) => eprintln!("Failed to encode {category} event: {e}"),
        }
    }

    /// Emit a structured end-of-game summary at Minimal level
    ///
    /// Unlike [`event`](Self::event) an encoding failure is returned, since
    /// the summary is the only output of a JSON run at minimal verbosity.
    pub fn summary<T: Serialize>(&self, category: &str, data: &T) -> Result<()> {
        if !self.wants_structured(VerbosityLevel::Minimal) {
            return Ok(());
        }
        let value = serde_json::to_value(data).map_err(|e| {
            RpsError::SerializationError(format!("{category} summary: {e}"))
        })?;
        self.structured(VerbosityLevel::Minimal, category, value);
        Ok(())
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_capture_ignores_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.verbose("detail");
        logger.controller_choice("RANDOM", "chose Rock");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].category.as_deref(), Some("controller_choice"));
        assert_eq!(logs[1].message, "RANDOM chose Rock");
    }

    #[test]
    fn test_uncaptured_messages_are_dropped() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.normal("nobody hears this");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_event_payload() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.event("score", &(2u32, 1u32));

        let logs = logger.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].category.as_deref(), Some("score"));
        assert_eq!(logs[0].data, Some(serde_json::json!([2, 1])));
    }

    #[test]
    fn test_summary_survives_minimal_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.set_output_format(OutputFormat::Json);
        logger.enable_capture();

        logger.event("round", &1u32);
        logger.summary("results", &(1u32, 2u32)).unwrap();

        let logs = logger.logs();
        let summary = logs.iter().find(|e| e.category.as_deref() == Some("results")).unwrap();
        assert_eq!(summary.level, VerbosityLevel::Minimal);
        assert!(summary.level <= logger.verbosity());
        assert_eq!(summary.data, Some(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_summary_encoding_failure_is_an_error() {
        use std::collections::HashMap;

        let mut logger = GameLogger::new();
        logger.enable_capture();

        // JSON object keys must be strings
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), 3u8);

        let err = logger.summary("results", &bad).unwrap_err();
        assert!(matches!(err, RpsError::SerializationError(_)));
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_summary_skipped_when_silent() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.set_output_format(OutputFormat::Json);
        assert!(logger.summary("results", &1u32).is_ok());
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_json_entry_shape() {
        let entry = LogEntry {
            level: VerbosityLevel::Normal,
            message: "hello".to_string(),
            category: None,
            data: None,
        };
        let line = serde_json::to_string(&entry).unwrap();
        assert_eq!(line, r#"{"level":"normal","message":"hello"}"#);
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_disable_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        assert!(logger.is_capturing());
        assert_eq!(logger.output_mode(), OutputMode::Memory);

        logger.disable_capture();
        assert!(!logger.is_capturing());
        assert_eq!(logger.output_mode(), OutputMode::Stdout);
    }
}
