use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use board_core::{StorageError, TokenStore, parse_token};
use tracing::warn;

#[derive(Debug, Clone)]
/// Хранит bearer-токен в текстовом файле.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Хранилище в файле `path`. Файл создаётся при первом сохранении.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Путь к файлу токена.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_token(&raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read token file");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        fs::write(&self.path, token)
            .map_err(|err| StorageError::Write(format!("{}: {err}", self.path.display())))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write(format!(
                "{}: {err}",
                self.path.display()
            ))),
        }
    }
}
