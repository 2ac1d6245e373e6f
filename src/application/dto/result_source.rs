use std::path::PathBuf;

/// Where the document to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    /// A saved result on the backend, addressed by its server-side path
    Backend(String),
    /// A JSON file on local disk
    LocalFile(PathBuf),
    /// The first entry of the backend's result listing
    Latest,
}

impl ResultSource {
    /// Display name used for report titles and export file names
    pub fn display_name(&self) -> Option<String> {
        match self {
            ResultSource::Backend(path) => path
                .rsplit(['/', '\\'])
                .next()
                .map(str::to_string),
            ResultSource::LocalFile(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            ResultSource::Latest => None,
        }
    }
}
