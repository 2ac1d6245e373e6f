use super::document_analyzer::DocumentAnalyzer;
use super::settle_loading;
use crate::application::dto::{ReportView, ResultSource};
use crate::application::read_models::DashboardReadModel;
use crate::ports::outbound::{DocumentReader, ProgressReporter, ResultFile, ResultsBackend};
use crate::shared::error::DashboardError;
use crate::shared::Result;
use serde_json::Value;

/// A result document together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub name: String,
    /// `backend:<path>` or `file:<path>`
    pub source: String,
    /// Server-side path when the document lives on the backend
    pub backend_path: Option<String>,
    pub document: Value,
}

/// ViewResultUseCase - loads a saved or local result and analyzes it
///
/// # Type Parameters
/// * `B` - ResultsBackend implementation
/// * `D` - DocumentReader implementation for local files
/// * `P` - ProgressReporter implementation
pub struct ViewResultUseCase<B, D, P> {
    backend: B,
    reader: D,
    progress: P,
    analyzer: DocumentAnalyzer,
}

impl<B, D, P> ViewResultUseCase<B, D, P>
where
    B: ResultsBackend,
    D: DocumentReader,
    P: ProgressReporter,
{
    pub fn new(backend: B, reader: D, progress: P, analyzer: DocumentAnalyzer) -> Self {
        Self {
            backend,
            reader,
            progress,
            analyzer,
        }
    }

    /// Lists saved results in backend order
    pub async fn list(&self) -> Result<Vec<ResultFile>> {
        self.progress.report_loading("Loading saved results...");
        let results = self.backend.list_results().await;
        settle_loading(&self.progress, &results);
        let results = results?;
        log::debug!("backend lists {} result file(s)", results.len());
        Ok(results)
    }

    /// Loads the raw document for a source
    ///
    /// `Latest` deliberately resolves to the first entry of the listing, not
    /// the last. The backend sorts `/results` newest first, so the tail of the
    /// listing is the oldest result.
    pub async fn load(&self, source: &ResultSource) -> Result<LoadedDocument> {
        match source {
            ResultSource::LocalFile(path) => {
                let document = self.reader.read_document(path)?;
                Ok(LoadedDocument {
                    name: source
                        .display_name()
                        .unwrap_or_else(|| path.display().to_string()),
                    source: format!("file:{}", path.display()),
                    backend_path: None,
                    document,
                })
            }
            ResultSource::Backend(path) => {
                let name = source.display_name().unwrap_or_else(|| path.clone());
                self.fetch(ResultFile::new(name, path.clone())).await
            }
            ResultSource::Latest => {
                let latest = self
                    .list()
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(DashboardError::NoResults)?;
                self.fetch(latest).await
            }
        }
    }

    async fn fetch(&self, file: ResultFile) -> Result<LoadedDocument> {
        self.progress
            .report_loading(&format!("Loading {}...", file.name));
        let document = self.backend.fetch_result(&file.path).await;
        settle_loading(&self.progress, &document);

        Ok(LoadedDocument {
            source: format!("backend:{}", file.path),
            name: file.name,
            backend_path: Some(file.path),
            document: document?,
        })
    }

    /// Loads and analyzes a result into a dashboard read model
    pub async fn execute(
        &self,
        source: &ResultSource,
        view: ReportView,
    ) -> Result<DashboardReadModel> {
        let loaded = self.load(source).await?;
        self.analyzer
            .analyze(&loaded.name, &loaded.source, view, loaded.document)
    }

    /// Runs the backend's own CVE extraction over a saved result
    pub async fn extract_cves_remotely(&self, source: &ResultSource) -> Result<Value> {
        let path = match source {
            ResultSource::Backend(path) => path.clone(),
            ResultSource::Latest => {
                self.list()
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(DashboardError::NoResults)?
                    .path
            }
            ResultSource::LocalFile(path) => {
                return Err(DashboardError::Validation {
                    message: format!(
                        "server-side CVE extraction needs a backend result, not the local file {}",
                        path.display()
                    ),
                }
                .into());
            }
        };

        self.progress.report_loading("Extracting CVEs on the backend...");
        let extracted = self.backend.extract_cves(&path).await;
        settle_loading(&self.progress, &extracted);
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_doubles::{
        MemoryReader, RecordingReporter, StubBackend,
    };
    use serde_json::json;
    use std::path::PathBuf;

    fn use_case(backend: StubBackend) -> ViewResultUseCase<StubBackend, MemoryReader, RecordingReporter> {
        ViewResultUseCase::new(
            backend,
            MemoryReader::default(),
            RecordingReporter::default(),
            DocumentAnalyzer::default(),
        )
    }

    #[tokio::test]
    async fn test_latest_uses_first_listing() {
        let backend = StubBackend::default()
            .with_result("/r/new.json", json!([{"ip": "1.1.1.1"}, {"ip": "2.2.2.2"}]))
            .with_result("/r/old.json", json!([]));
        let model = use_case(backend)
            .execute(&ResultSource::Latest, ReportView::Dashboard)
            .await
            .unwrap();
        assert_eq!(model.name, "new.json");
        assert_eq!(model.source, "backend:/r/new.json");
        assert_eq!(model.item_count, 2);
    }

    #[tokio::test]
    async fn test_latest_without_results() {
        let err = use_case(StubBackend::default())
            .execute(&ResultSource::Latest, ReportView::Dashboard)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No saved results"));
    }

    #[tokio::test]
    async fn test_local_file_source() {
        let reader = MemoryReader::default().with_file("scan.json", json!({"data": [{"port": 22}]}));
        let uc = ViewResultUseCase::new(
            StubBackend::default(),
            reader,
            RecordingReporter::default(),
            DocumentAnalyzer::default(),
        );
        let loaded = uc
            .load(&ResultSource::LocalFile(PathBuf::from("scan.json")))
            .await
            .unwrap();
        assert_eq!(loaded.name, "scan.json");
        assert_eq!(loaded.backend_path, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_loading() {
        let uc = use_case(StubBackend::default());
        let result = uc.load(&ResultSource::Backend("/r/missing.json".into())).await;
        assert!(result.is_err());
        assert_eq!(
            uc.progress.messages(),
            vec!["loading:Loading missing.json...", "finish:"]
        );
    }

    #[tokio::test]
    async fn test_remote_extraction_rejects_local_files() {
        let err = use_case(StubBackend::default())
            .extract_cves_remotely(&ResultSource::LocalFile(PathBuf::from("x.json")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("server-side CVE extraction"));
    }
}
