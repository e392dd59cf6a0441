use board_core::{BoardView, Pagination, Post, PostForm, PostTable, Route, SessionState};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::state::UiState;

/// Экран доски поверх сигналов Leptos и диалогов браузера.
pub(crate) struct LeptosView {
    ui: UiState,
}

impl LeptosView {
    pub(crate) fn new(ui: UiState) -> Self {
        Self { ui }
    }
}

impl BoardView for LeptosView {
    fn show_session(&self, session: &SessionState) {
        self.ui.session.set(session.clone());
    }

    fn show_user(&self, user_id: &str) {
        self.ui.user.set(Some(user_id.to_string()));
    }

    fn render_posts(&self, table: &PostTable) {
        self.ui.clear_error();
        self.ui.table.set(table.clone());
    }

    fn render_pagination(&self, pagination: Option<&Pagination>) {
        self.ui.pagination.set(pagination.cloned());
    }

    fn show_post_details(&self, post: &Post) {
        self.ui.details.set(Some(post.clone()));
    }

    fn hide_post_details(&self) {
        self.ui.details.set(None);
    }

    fn render_form(&self, form: &PostForm) {
        self.ui.form.set(form.clone());
    }

    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn report_error(&self, message: &str) {
        web_sys::console::error_1(&JsValue::from_str(message));
        self.ui.set_error(message);
    }

    fn log_failure(&self, message: &str) {
        web_sys::console::warn_1(&JsValue::from_str(message));
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(route.path()) {
                web_sys::console::error_2(&JsValue::from_str("navigation failed"), &err);
            }
        }
    }
}
