use board_core::{Pagination, Post, PostForm, PostTable, SessionState, TABLE_COLUMNS};
use leptos::prelude::*;

/// Сигналы, которые перерисовывает [`crate::view::LeptosView`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct UiState {
    pub(crate) session: RwSignal<SessionState>,
    pub(crate) user: RwSignal<Option<String>>,
    pub(crate) table: RwSignal<PostTable>,
    pub(crate) pagination: RwSignal<Option<Pagination>>,
    pub(crate) details: RwSignal<Option<Post>>,
    pub(crate) form: RwSignal<PostForm>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl UiState {
    pub(crate) fn new() -> Self {
        Self {
            session: RwSignal::new(SessionState::default()),
            user: RwSignal::new(None),
            table: RwSignal::new(PostTable::Empty {
                columns: TABLE_COLUMNS,
            }),
            pagination: RwSignal::new(None),
            details: RwSignal::new(None),
            form: RwSignal::new(PostForm::default()),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }
}
