use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки сборки клиента `board-client`.
pub enum BoardClientError {
    /// Не удалось собрать HTTP-клиент (`reqwest`).
    #[error("http client build error: {0}")]
    Build(#[from] reqwest::Error),

    /// Пустой или непригодный базовый URL сервера.
    #[error("invalid base url: {0:?}")]
    InvalidBaseUrl(String),
}

/// Результат операций `board-client`.
pub type BoardClientResult<T> = Result<T, BoardClientError>;
