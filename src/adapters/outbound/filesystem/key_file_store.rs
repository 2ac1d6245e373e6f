use crate::ports::outbound::KeyStore;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// KeyFileStore adapter keeping the API key in a single-line file
///
/// Clearing the key removes the file. On Unix the file is created with
/// owner-only permissions, and an existing file is narrowed to them before
/// the key is written.
pub struct KeyFileStore {
    path: PathBuf,
}

impl KeyFileStore {
    const APP_DIR: &'static str = "recon-dashboard";
    const FILE_NAME: &'static str = "api_key";

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$HOME/.config/recon-dashboard/api_key`, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join(Self::APP_DIR)
                .join(Self::FILE_NAME),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, details: impl Into<String>) -> DashboardError {
        DashboardError::FileWriteError {
            path: self.path.clone(),
            details: details.into(),
        }
    }

    #[cfg(unix)]
    fn open_key_file(&self) -> Result<File> {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&self.path)
            .map_err(|e| self.write_error(e.to_string()))?;
        // mode() only applies on creation
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| self.write_error(e.to_string()))?;
        Ok(file)
    }

    #[cfg(not(unix))]
    fn open_key_file(&self) -> Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e.to_string()).into())
    }
}

impl KeyStore for KeyFileStore {
    fn load_key(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| DashboardError::FileReadError {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        let key = content.trim();
        Ok((!key.is_empty()).then(|| key.to_string()))
    }

    fn save_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| self.write_error(e.to_string()))?;
                log::debug!("removed stored API key at {}", self.path.display());
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e.to_string()))?;
        }
        let mut file = self.open_key_file()?;
        writeln!(file, "{}", key).map_err(|e| self.write_error(e.to_string()))?;
        log::debug!("stored API key at {}", self.path.display());
        Ok(())
    }
}
