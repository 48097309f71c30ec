//! Browser `localStorage`

use carbrand_core::{Error, Result, Storage};

/// `window.localStorage`, looked up on every read
///
/// Holds no handle, so it stays `Send + Sync` and always sees the
/// current contents, including tokens written by other tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| Error::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| Error::Storage(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage disabled".to_string()))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}
