use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let wrapper scripts tell a failed script run apart from
/// a broken invocation or an unreachable backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// A backend script run finished with an error status
    ScriptFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (backend error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ScriptFailed => write!(f, "Script Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the recon dashboard.
///
/// Messages carry a hint line so the CLI can print them as-is.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Request to {endpoint} failed\nDetails: {details}\n\n💡 Hint: Check that the backend is running and reachable (see --api-base)")]
    BackendRequest { endpoint: String, details: String },

    #[error("Backend returned HTTP {status} for {endpoint}\nDetails: {details}")]
    BackendStatus {
        endpoint: String,
        status: u16,
        details: String,
    },

    #[error("Invalid JSON in {source_name}\nDetails: {details}\n\n💡 Hint: Result files must contain a single JSON document")]
    InvalidJson {
        source_name: String,
        details: String,
    },

    #[error("JSON nesting exceeds the maximum depth of {limit}\n\n💡 Hint: Raise max_depth in the config file if this document is legitimate")]
    NestingTooDeep { limit: usize },

    #[error("Unknown script: {name}\n\n💡 Hint: Run `recon-dashboard scripts` to list the available scripts")]
    UnknownScript { name: String },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("No API key configured\n\n💡 Hint: Store one with `recon-dashboard key set <KEY>` or pass --api-key")]
    MissingApiKey,

    #[error("No saved results available on the backend\n\n💡 Hint: Run a script first or upload a JSON file")]
    NoResults,

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
