use std::cell::RefCell;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибки хранилища токена.
pub enum StorageError {
    /// Хранилище недоступно (нет `window`, `localStorage`, файла).
    #[error("token storage is not available: {0}")]
    Unavailable(String),

    /// Не удалось записать или удалить токен.
    #[error("failed to write token: {0}")]
    Write(String),
}

/// Где между запусками живёт bearer-токен.
pub trait TokenStore {
    /// Загружает сохранённый токен.
    fn load(&self) -> Option<String>;

    /// Сохраняет токен.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Удаляет токен.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Нормализует сохранённый токен: пробелы по краям отбрасываются,
/// пустая строка означает отсутствие токена.
pub fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Токен только в памяти, до конца жизни экрана.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = parse_token(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}
