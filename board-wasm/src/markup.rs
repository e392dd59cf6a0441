//! Чистые помощники разметки; собираются и тестируются и вне браузера.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use board_core::{ControlKind, PageControl, SessionState};

/// Базовый URL API; пустая строка означает тот же origin.
pub(crate) const API_BASE_URL: &str = match option_env!("BOARD_API_BASE_URL") {
    Some(value) => value,
    None => "",
};

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return format!("/{}", path.trim_start_matches('/'));
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// CSS-классы элемента пагинации.
pub(crate) fn control_class(control: &PageControl) -> &'static str {
    match (control.kind, control.active, control.disabled) {
        (_, _, true) => "page-item disabled",
        (ControlKind::Page(_), true, _) => "page-item active",
        _ => "page-item",
    }
}

/// Показывать ли области «вошёл» и «гость».
pub(crate) fn session_regions(session: &SessionState) -> (bool, bool) {
    (session.is_logged_in, !session.is_logged_in)
}

pub(crate) fn user_label(user_id: Option<&str>) -> String {
    match user_id {
        Some(user_id) if !user_id.trim().is_empty() => format!("Пользователь: {user_id}"),
        _ => String::new(),
    }
}
