use super::settle_loading;
use crate::ports::outbound::{DocumentReader, ProgressReporter, ResultsBackend, UploadReceipt};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;
use std::path::Path;

/// UploadResultUseCase - sends a local JSON document to the backend
///
/// The file is parsed locally first so a malformed document is rejected
/// before any bytes leave the machine.
pub struct UploadResultUseCase<B, D, P> {
    backend: B,
    reader: D,
    progress: P,
}

impl<B, D, P> UploadResultUseCase<B, D, P>
where
    B: ResultsBackend,
    D: DocumentReader,
    P: ProgressReporter,
{
    pub fn new(backend: B, reader: D, progress: P) -> Self {
        Self {
            backend,
            reader,
            progress,
        }
    }

    pub async fn execute(&self, path: &Path) -> Result<UploadReceipt> {
        let content = self.reader.read_bytes(path)?;
        serde_json::from_slice::<Value>(&content).map_err(|e| DashboardError::InvalidJson {
            source_name: path.display().to_string(),
            details: e.to_string(),
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.json".to_string());

        self.progress
            .report_loading(&format!("Uploading {}...", file_name));
        let receipt = self.backend.upload_json(&file_name, content).await;
        settle_loading(&self.progress, &receipt);
        let receipt = receipt?;

        log::info!("uploaded {} as {}", file_name, receipt.path);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_doubles::{
        MemoryReader, RecordingReporter, StubBackend,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_valid_document() {
        let reader = MemoryReader::default().with_file("data/host.json", json!({"ip": "1.1.1.1"}));
        let uc = UploadResultUseCase::new(StubBackend::default(), reader, RecordingReporter::default());

        let receipt = uc.execute(Path::new("data/host.json")).await.unwrap();
        assert_eq!(receipt.path, "/uploads/host.json");
        assert_eq!(uc.backend.uploads.lock().unwrap()[0].0, "host.json");
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_json() {
        let reader = MemoryReader::default().with_bytes("bad.json", b"{\"ip\": ");
        let uc = UploadResultUseCase::new(StubBackend::default(), reader, RecordingReporter::default());

        let err = uc.execute(Path::new("bad.json")).await.unwrap_err();
        assert!(err.to_string().contains("Invalid JSON in bad.json"));
        assert!(uc.backend.uploads.lock().unwrap().is_empty());
    }
}
