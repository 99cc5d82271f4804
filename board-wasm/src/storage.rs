use board_core::{SessionStore, Storage, StorageError};

#[derive(Debug, Clone, Copy, Default)]
/// `window.sessionStorage`: сессия живёт до закрытия вкладки.
pub(crate) struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window is not available".to_string()))?;
        window
            .session_storage()
            .map_err(|_| StorageError::Unavailable("failed to access sessionStorage".to_string()))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage is not available".to_string()))
    }
}

impl Storage for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable(format!("failed to read {key}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(format!("failed to save {key}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Write(format!("failed to clear {key}")))
    }
}

pub(crate) fn session_store() -> SessionStore<BrowserSessionStorage> {
    SessionStore::new(BrowserSessionStorage)
}
