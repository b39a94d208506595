//! Process logging initialization for position_scraper.
//!
//! Writes one line per record to stdout, as text or JSON, with the
//! application labels attached to every line.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use log::{LevelFilter, Log, Metadata, Record};
use simplelog::{CombinedLogger, Config, SharedLogger};

/// Line format for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `key=value` text lines.
    Text,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Labels attached to every log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub application_name: String,
    pub application_id: String,
    pub environment: String,
}

/// Initialize the global logger with the given format and labels.
pub fn initialize(format: LogFormat, context: LogContext) {
    let logger = FieldsLogger::new(LevelFilter::Info, format, context);
    let loggers: Vec<Box<dyn SharedLogger>> = vec![Box::new(logger)];
    if let Err(err) = CombinedLogger::init(loggers) {
        eprintln!("Warning: Could not install logger: {err}");
    }
}

pub struct FieldsLogger {
    level: LevelFilter,
    format: LogFormat,
    context: LogContext,
}

impl FieldsLogger {
    pub fn new(level: LevelFilter, format: LogFormat, context: LogContext) -> Self {
        Self {
            level,
            format,
            context,
        }
    }

    fn format_line(&self, record: &Record, time: &str) -> String {
        let level = record.level().as_str().to_ascii_lowercase();
        let message = record.args().to_string();
        match self.format {
            LogFormat::Json => serde_json::json!({
                "time": time,
                "level": level,
                "msg": message,
                "target": record.target(),
                "Application_Name": self.context.application_name,
                "Application_ID": self.context.application_id,
                "Environment": self.context.environment,
            })
            .to_string(),
            LogFormat::Text => format!(
                "time={time:?} level={level} msg={message:?} target={} Application_Name={:?} Application_ID={:?} Environment={:?}",
                record.target(),
                self.context.application_name,
                self.context.application_id,
                self.context.environment,
            ),
        }
    }
}

impl Log for FieldsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = self.format_line(record, &time);
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

impl SharedLogger for FieldsLogger {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}
