use crate::ports::outbound::DocumentReader;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading local result documents
///
/// Only regular files are read; symbolic links and files above the size
/// limit are rejected before any bytes are loaded.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for FileSystemReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        read_checked(path, "result file")
    }
}
