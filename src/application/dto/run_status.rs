use serde::Serialize;
use std::fmt;

/// Classified outcome of a backend script run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RunStatus {
    /// The script failed; the message is the best available error text
    Error(String),
    /// The script exited cleanly but reported a problem
    Warning(String),
    /// Any non-final status reported by the backend
    Pending(String),
    Finished,
}

impl RunStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, RunStatus::Error(_))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Error(message) => write!(f, "Error: {}", message),
            // Warning text already carries its "Warning:" prefix
            RunStatus::Warning(message) => write!(f, "{}", message),
            RunStatus::Pending(status) => write!(f, "{}", status),
            RunStatus::Finished => write!(f, "Finished"),
        }
    }
}
