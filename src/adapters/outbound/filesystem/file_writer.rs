use crate::ports::outbound::OutputPresenter;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing reports and exports to a file
///
/// Writing through a symbolic link is refused, and the parent directory
/// must already exist.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn write_error(&self, details: impl Into<String>) -> DashboardError {
        DashboardError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
    }

    fn validate_destination(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self
                    .write_error(format!(
                        "Parent directory does not exist: {}",
                        parent.display()
                    ))
                    .into());
            }
        }

        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(DashboardError::SecurityError {
                    path: self.output_path.clone(),
                    reason: "Output path is a symbolic link".to_string(),
                    hint: "Choose a regular file as the output destination".to_string(),
                }
                .into());
            }
            if metadata.is_dir() {
                return Err(self.write_error("Output path is a directory").into());
            }
        }

        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_destination()?;
        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;
        log::info!("wrote {} byte(s) to {}", content.len(), self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing reports to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| {
                if content.ends_with('\n') {
                    Ok(())
                } else {
                    stdout.write_all(b"\n")
                }
            })
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
