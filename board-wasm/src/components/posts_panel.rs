use board_core::{EMPTY_TABLE_TEXT, PostRow, PostTable};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app::{BoardHandle, spawn_action};
use crate::markup::{control_class, session_regions};
use crate::state::UiState;

#[component]
pub(crate) fn SearchForm(board: BoardHandle) -> impl IntoView {
    let term = RwSignal::new(String::new());

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        let term = term.get().trim().to_string();
        spawn_action(board, |board| async move {
            let _ = board.posts.search(&term).await;
        });
    };

    view! {
        <form class="search" on:submit=on_search>
            <input
                placeholder="Поиск по заголовку"
                prop:value=move || term.get()
                on:input=move |ev| term.set(event_target_value(&ev))
            />
            <button type="submit">"Найти"</button>
        </form>
    }
}

#[component]
pub(crate) fn PostsPanel(ui: UiState, board: BoardHandle) -> impl IntoView {
    let on_new_post = move |_| {
        if let Some(board) = board.try_get_value() {
            let _ = board.editor.new_post();
        }
    };

    view! {
        <h2>"Посты"</h2>
        <Show when=move || ui.session.with(session_regions).0>
            <button on:click=on_new_post>"Новый пост"</button>
        </Show>

        <table class="posts">
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Заголовок"</th>
                    <th>"Автор"</th>
                    <th>"Дата"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || match ui.table.get() {
                    PostTable::Empty { columns } => {
                        view! {
                            <tr>
                                <td colspan=columns.to_string()>{EMPTY_TABLE_TEXT}</td>
                            </tr>
                        }
                            .into_any()
                    }
                    PostTable::Rows(rows) => {
                        rows.into_iter()
                            .map(|row| view! { <PostRowView row=row board=board /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </tbody>
        </table>

        <PaginationStrip ui=ui board=board />
    }
}

#[component]
fn PostRowView(row: PostRow, board: BoardHandle) -> impl IntoView {
    let post_id = row.id;

    let on_details = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        spawn_action(board, move |board| async move {
            let _ = board.editor.fetch_post_details(post_id).await;
        });
    };
    let on_edit = move |_| {
        spawn_action(board, move |board| async move {
            let _ = board.editor.edit_post(post_id).await;
        });
    };
    let on_delete = move |_| {
        spawn_action(board, move |board| async move {
            let _ = board.editor.delete_post(post_id).await;
        });
    };

    view! {
        <tr>
            <td>{post_id}</td>
            <td>
                <a href="#" on:click=on_details>{row.title}</a>
            </td>
            <td>{row.author}</td>
            <td>{row.created_at}</td>
            <td>
                <button on:click=on_edit>"Изменить"</button>
                <button style="margin-left: 0.5rem;" on:click=on_delete>"Удалить"</button>
            </td>
        </tr>
    }
}

#[component]
fn PaginationStrip(ui: UiState, board: BoardHandle) -> impl IntoView {
    view! {
        <ul class="pagination">
            {move || {
                ui.pagination
                    .get()
                    .map(|pagination| {
                        pagination
                            .controls
                            .iter()
                            .map(|control| {
                                let query = pagination.query_for(control);
                                let on_click = move |ev: leptos::ev::MouseEvent| {
                                    ev.prevent_default();
                                    if let Some(query) = query.clone() {
                                        spawn_action(board, |board| async move {
                                            let _ = board
                                                .posts
                                                .open_page(query.page, &query.search)
                                                .await;
                                        });
                                    }
                                };
                                view! {
                                    <li class=control_class(control)>
                                        <a href="#" on:click=on_click>{control.label()}</a>
                                    </li>
                                }
                            })
                            .collect_view()
                    })
            }}
        </ul>
    }
}
