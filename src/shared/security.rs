use crate::shared::error::DashboardError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a result document read from or uploaded off local disk (100 MB)
pub const MAX_RESULT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file, not a directory or symlink
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file for error messages
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DashboardError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(DashboardError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the real file instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(DashboardError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", path.display()),
        }
        .into());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds `max_size`
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(DashboardError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the result into smaller documents".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a local file after the regular-file and size checks
pub fn read_checked(path: &Path, file_description: &str) -> Result<Vec<u8>> {
    validate_regular_file(path, file_description)?;
    let size = fs::metadata(path)
        .map_err(|e| DashboardError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?
        .len();
    validate_file_size(size, path, MAX_RESULT_FILE_SIZE)?;

    fs::read(path).map_err(|e| {
        DashboardError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
