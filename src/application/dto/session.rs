use crate::shared::error::DashboardError;
use crate::shared::Result;

/// Per-invocation session state handed to use cases
///
/// The API key is loaded once by the entry point; use cases never touch
/// the key store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    api_key: Option<String>,
}

impl Session {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { api_key }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key()
            .ok_or_else(|| DashboardError::MissingApiKey.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_no_key() {
        assert_eq!(Session::new(Some("   ".into())).api_key(), None);
        assert!(Session::new(None).require_api_key().is_err());
    }

    #[test]
    fn test_key_is_trimmed() {
        let session = Session::new(Some(" abc ".into()));
        assert_eq!(session.require_api_key().unwrap(), "abc");
    }
}
