use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;
use std::path::Path;

/// DocumentReader port for result documents stored on local disk
pub trait DocumentReader {
    /// Reads the raw bytes of a local file
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Reads and parses a local JSON document
    fn read_document(&self, path: &Path) -> Result<Value> {
        let bytes = self.read_bytes(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            DashboardError::InvalidJson {
                source_name: path.display().to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
