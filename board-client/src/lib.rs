//! Нативный клиент доски объявлений поверх HTTP.
//!
//! Даёт транспорт на `reqwest` для [`board_core::ApiClient`] и файловое
//! хранилище токена. Логика экранов и контроллеров живёт в `board-core`.
#![warn(missing_docs)]

mod error;
mod http_transport;
mod token_file;

pub use error::{BoardClientError, BoardClientResult};
pub use http_transport::{HttpTransport, Timeouts};
pub use token_file::FileTokenStore;

use board_core::ApiClient;

/// Клиент API доски с HTTP-транспортом.
pub type BoardClient = ApiClient<HttpTransport>;

/// Создаёт клиент до `base_url` с заданными таймаутами.
pub fn connect(base_url: impl Into<String>, timeouts: Timeouts) -> BoardClientResult<BoardClient> {
    let transport = HttpTransport::with_timeouts(base_url, timeouts)?;
    Ok(ApiClient::new(transport))
}
