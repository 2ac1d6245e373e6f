use recon_dashboard::prelude::*;
use std::sync::Mutex;

/// In-memory KeyStore
#[derive(Default)]
pub struct MockKeyStore {
    key: Mutex<Option<String>>,
}

impl MockKeyStore {
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

impl KeyStore for MockKeyStore {
    fn load_key(&self) -> Result<Option<String>> {
        Ok(self.key.lock().unwrap().clone())
    }

    fn save_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        *self.key.lock().unwrap() = (!key.is_empty()).then(|| key.to_string());
        Ok(())
    }
}
