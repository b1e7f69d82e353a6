//! Log record structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Name of the severity level this record was emitted at
    pub level: String,
    /// Numeric rank of that level, resolved against the level registry
    pub rank: i32,
    /// Display hint attached to the level, passed through to the backend
    pub style: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Sanitize a message to prevent log injection attacks.
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences so
    /// a message can never fabricate additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: impl Into<String>, rank: i32, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            rank,
            style: None,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }
}
