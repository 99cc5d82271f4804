use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use board_core::{Storage, StorageError};

#[derive(Debug, Clone)]
/// Файловое хранилище: один файл `<key>.json` на ключ в каталоге сессии.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Unavailable(format!(
                "failed to read {}: {err}",
                self.path_for(key).display()
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            StorageError::Write(format!("failed to create {}: {err}", self.dir.display()))
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|err| {
            StorageError::Write(format!("failed to write {}: {err}", path.display()))
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write(format!(
                "failed to remove {}: {err}",
                path.display()
            ))),
        }
    }
}
