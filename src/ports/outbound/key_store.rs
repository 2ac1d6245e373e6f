use crate::shared::Result;

/// KeyStore port for persisting the user's API key between sessions
///
/// Only the CLI entry point calls these; the application core receives
/// the key through a [`crate::application::dto::Session`].
pub trait KeyStore {
    /// Loads the stored key, if any
    fn load_key(&self) -> Result<Option<String>>;

    /// Stores the key; an empty (or whitespace-only) key clears it
    fn save_key(&self, key: &str) -> Result<()>;
}
