//! Ядро клиентской части доски (блога): модели, клиент REST API, состояние
//! экрана и контроллеры.
//!
//! Ядро ничего не знает о платформе. Сеть подключается через [`Transport`]
//! (`reqwest` в `board-client`, `gloo-net` в `board-wasm`), экран через
//! [`BoardView`], хранение токена через [`TokenStore`].
#![warn(missing_docs)]

mod board;
mod client;
pub mod controllers;
mod error;
mod form;
mod messages;
mod models;
mod pagination;
mod state;
mod storage;
mod view;

#[cfg(test)]
mod testing;

pub use board::Board;
pub use client::{ApiClient, Method, PAGE_SIZE, RawResponse, Transport, list_path};
pub use controllers::editor::{DeleteOutcome, PostEditorController};
pub use controllers::posts::{ListOutcome, PostListController};
pub use controllers::session::{SessionController, register_failure_message};
pub use error::{ApiError, ApiResult, NETWORK_FAILURE};
pub use form::{FormError, FormMode, PostForm, Submission};
pub use models::{LoginOutcome, PageResult, Post, SessionState};
pub use pagination::{ControlKind, PageControl, Pagination};
pub use state::{BoardState, ListQuery};
pub use storage::{MemoryTokenStore, StorageError, TokenStore, parse_token};
pub use view::{BoardView, EMPTY_TABLE_TEXT, PostRow, PostTable, Route, TABLE_COLUMNS};
