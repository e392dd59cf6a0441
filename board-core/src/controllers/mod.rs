//! Контроллеры экрана доски: сессия, список постов, редактор.

pub mod editor;
pub mod posts;
pub mod session;
