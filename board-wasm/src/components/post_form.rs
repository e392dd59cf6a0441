use board_core::FormMode;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app::{BoardHandle, spawn_action};
use crate::state::UiState;

#[component]
pub(crate) fn PostFormPanel(ui: UiState, board: BoardHandle) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let author = RwSignal::new(String::new());

    Effect::new(move |_| {
        ui.form.with(|form| {
            title.set(form.title().to_string());
            content.set(form.content().to_string());
            author.set(form.author().to_string());
        });
    });

    let is_create = move || ui.form.with(|form| form.mode() == FormMode::Create);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(board_value) = board.try_get_value() else {
            return;
        };

        let author_value = author.get();
        let author_draft = is_create().then_some(author_value.as_str());
        // Форма закрылась, пока пользователь печатал.
        if board_value
            .editor
            .set_draft(&title.get(), &content.get(), author_draft)
            .is_err()
        {
            return;
        }

        spawn_action(board, |board| async move {
            let _ = board.editor.create_or_update_post().await;
        });
    };

    let on_cancel = move |_| {
        if let Some(board) = board.try_get_value() {
            board.editor.cancel();
        }
    };

    view! {
        <Show when=move || ui.form.with(|form| form.is_open())>
            <section class="post-form">
                <h2>{move || ui.form.with(|form| form.heading())}</h2>
                <form on:submit=on_submit>
                    <input
                        placeholder="Заголовок"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Текст"
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    ></textarea>
                    <Show when=is_create>
                        <input
                            placeholder="Автор"
                            prop:value=move || author.get()
                            on:input=move |ev| author.set(event_target_value(&ev))
                        />
                    </Show>
                    <button type="submit">{move || ui.form.with(|form| form.submit_label())}</button>
                    <button type="button" style="margin-left: 0.5rem;" on:click=on_cancel>
                        "Отмена"
                    </button>
                </form>
            </section>
        </Show>
    }
}
