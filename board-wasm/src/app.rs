use std::future::Future;
use std::rc::Rc;

use board_core::{ApiClient, Board};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::FetchTransport;
use crate::components::post_details::PostDetails;
use crate::components::post_form::PostFormPanel;
use crate::components::posts_panel::{PostsPanel, SearchForm};
use crate::components::session_panel::{AuthForms, SessionBar};
use crate::markup::API_BASE_URL;
use crate::state::UiState;
use crate::storage::LocalStorageTokenStore;
use crate::view::LeptosView;

pub(crate) type WebBoard = Board<FetchTransport, LeptosView>;
pub(crate) type BoardHandle = StoredValue<WebBoard, LocalStorage>;

/// Запускает действие контроллера вне обработчика события.
pub(crate) fn spawn_action<F, Fut>(board: BoardHandle, action: F)
where
    F: FnOnce(WebBoard) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(board) = board.try_get_value() {
        spawn_local(action(board));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let ui = UiState::new();
    let board = Board::new(
        ApiClient::new(FetchTransport::new(API_BASE_URL)),
        LeptosView::new(ui),
        Rc::new(LocalStorageTokenStore),
    );
    let board: BoardHandle = StoredValue::new_local(board);

    spawn_action(board, |board| async move { board.mount().await });

    view! {
        <main class="page">
            <section class="container">
                <h1>"Доска"</h1>

                <SessionBar ui=ui board=board />

                <Show when=move || ui.error.get().is_some()>
                    <div class="error-banner">
                        <strong>"Ошибка: "</strong>
                        {move || ui.error.get().unwrap_or_default()}
                        <button on:click=move |_| ui.clear_error()>"×"</button>
                    </div>
                </Show>

                <AuthForms ui=ui board=board />

                <SearchForm board=board />
                <PostsPanel ui=ui board=board />
                <PostDetails ui=ui />
                <PostFormPanel ui=ui board=board />
            </section>
        </main>
    }
}
