use serde::Deserialize;
use thiserror::Error;

/// Сообщение для пользователя, когда сервер не ответил.
pub const NETWORK_FAILURE: &str = "Сетевая ошибка: сервер недоступен";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибки обращения к API доски и локальных проверок ввода.
pub enum ApiError {
    /// Запрос не дошёл до сервера или ответ не удалось прочитать.
    #[error("network failure: {0}")]
    Network(String),

    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("http error {status}: {message}")]
    Http {
        /// HTTP-статус ответа.
        status: u16,
        /// Машиночитаемый код ошибки из тела ответа, если сервер его прислал.
        error_code: Option<String>,
        /// Человекочитаемое сообщение (от сервера или общее по статусу).
        message: String,
    },

    /// Локальная проверка ввода не пройдена, запрос не отправлялся.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Ответ сервера не совпал с ожидаемой формой.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `board-core`.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Классифицирует ответ со статусом вне 2xx.
    ///
    /// Тело разбирается как JSON с полями `error_code`/`message`; если разобрать
    /// не удалось или сообщения нет, используется общее сообщение по статусу.
    pub fn from_status(status: u16, body: &str) -> Self {
        let (error_code, message) = match serde_json::from_str::<ErrorBodyDto>(body) {
            Ok(dto) => (dto.error_code, dto.message),
            Err(_) => (None, None),
        };

        let message = message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback_message(status));

        Self::Http {
            status,
            error_code: error_code.filter(|code| !code.trim().is_empty()),
            message,
        }
    }

    /// HTTP-статус, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Код ошибки из тела ответа (`USER_EXISTS`, `DB_ERROR`, ...).
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Текст для показа пользователю.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_FAILURE.to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Validation(message) => message.clone(),
            Self::Decode(_) => "Сервер вернул ответ неожиданного формата".to_string(),
        }
    }
}

pub(crate) fn fallback_message(status: u16) -> String {
    match status {
        400 => "Некорректный запрос".to_string(),
        401 => "Требуется авторизация".to_string(),
        403 => "Недостаточно прав для этой операции".to_string(),
        404 => "Ресурс не найден".to_string(),
        409 => "Конфликт данных (например, пользователь уже существует)".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_reads_error_code_and_message() {
        let err = ApiError::from_status(
            409,
            r#"{"error_code":"USER_EXISTS","message":"already taken"}"#,
        );

        assert_eq!(err.status(), Some(409));
        assert_eq!(err.error_code(), Some("USER_EXISTS"));
        assert_eq!(err.user_message(), "already taken");
    }

    #[test]
    fn from_status_falls_back_for_plain_text_body() {
        let err = ApiError::from_status(401, "invalid password\n");

        assert_eq!(err.error_code(), None);
        assert_eq!(err.user_message(), "Требуется авторизация");
    }

    #[test]
    fn from_status_falls_back_when_message_is_missing() {
        let err = ApiError::from_status(500, r#"{"error_code":"DB_ERROR"}"#);

        assert_eq!(err.error_code(), Some("DB_ERROR"));
        assert_eq!(err.user_message(), "Ошибка сервера");
    }

    #[test]
    fn from_status_uses_generic_message_for_unknown_status() {
        let err = ApiError::from_status(418, "");
        assert_eq!(err.user_message(), "HTTP ошибка 418");
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::Network("connection refused".to_string());

        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), NETWORK_FAILURE);
    }
}
