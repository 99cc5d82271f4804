use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::StorageError;
use crate::models::Session;

/// Ключ, под которым хранится сессия.
pub const SESSION_KEY: &str = "user";

/// Строковое key-value хранилище, переживающее перезагрузку экрана.
///
/// В браузере это `sessionStorage`, в CLI файлы в каталоге сессии.
pub trait Storage {
    /// Читает значение; `Ok(None)`, если ключа нет.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Записывает значение, перезаписывая прежнее.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Удаляет значение; отсутствие ключа не ошибка.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
/// Хранилище в памяти процесса.
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage mutex poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Хранилище сессии вошедшего пользователя.
///
/// Единственный путь чтения и записи сессии: экраны получают store явно
/// и не обращаются к хранилищу напрямую.
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> SessionStore<S> {
    /// Создаёт store с ключом [`SESSION_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, SESSION_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Сохраняет сессию, перезаписывая прежнюю.
    pub fn set(&self, session: &Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(session)?;
        self.storage.set_item(&self.key, &raw)
    }

    /// Возвращает сохранённую сессию.
    ///
    /// Никогда не падает: недоступное хранилище и испорченные данные
    /// читаются как отсутствие сессии.
    pub fn get(&self) -> Option<Session> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %self.key, error = %err, "session storage is not readable");
                return None;
            }
        };
        parse_session(&raw)
    }

    /// Удаляет сохранённую сессию.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

fn parse_session(raw: &str) -> Option<Session> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!(error = %err, "stored session is malformed, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("denied".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("denied".to_string()))
        }
    }

    fn alice() -> Session {
        let mut session = Session::new(1, "alice");
        session.email = Some("alice@example.com".to_string());
        session
    }

    #[test]
    fn get_after_set_returns_equal_session() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(&alice()).expect("set must succeed");
        assert_eq!(store.get(), Some(alice()));
    }

    #[test]
    fn set_overwrites_previous_session() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(&alice()).expect("set must succeed");
        store.set(&Session::new(2, "bob")).expect("set must succeed");
        assert_eq!(store.get().map(|s| s.nickname), Some("bob".to_string()));
    }

    #[test]
    fn get_after_clear_is_absent() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set(&alice()).expect("set must succeed");
        store.clear().expect("clear must succeed");
        assert!(store.get().is_none());
    }

    #[test]
    fn clear_without_session_is_fine() {
        let store = SessionStore::new(MemoryStorage::new());
        store.clear().expect("clear must succeed");
        assert!(store.get().is_none());
    }

    #[test]
    fn malformed_value_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SESSION_KEY, "{not-json}")
            .expect("raw write must succeed");
        let store = SessionStore::new(storage);
        assert!(store.get().is_none());
    }

    #[test]
    fn value_of_wrong_shape_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SESSION_KEY, r#"{"nickname": "no id"}"#)
            .expect("raw write must succeed");
        let store = SessionStore::new(storage);
        assert!(store.get().is_none());
    }

    #[test]
    fn unreadable_storage_reads_as_absent() {
        let store = SessionStore::new(BrokenStorage);
        assert!(store.get().is_none());
        assert!(matches!(store.set(&alice()), Err(StorageError::Write(_))));
    }

    #[test]
    fn stores_with_different_keys_are_independent() {
        let storage = MemoryStorage::new();
        let first = SessionStore::with_key(storage.clone(), "a");
        let second = SessionStore::with_key(storage, "b");
        first.set(&alice()).expect("set must succeed");
        assert!(second.get().is_none());
        assert!(first.get().is_some());
    }
}
