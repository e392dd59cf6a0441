use board_core::BoardView;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app::{BoardHandle, spawn_action};
use crate::markup::{session_regions, user_label};
use crate::state::UiState;

#[component]
pub(crate) fn SessionBar(ui: UiState, board: BoardHandle) -> impl IntoView {
    let logged_in = move || ui.session.with(session_regions).0;

    let on_logout = move |_| {
        spawn_action(board, |board| async move {
            let _ = board.session.logout().await;
        });
    };

    let on_protected = move |_| {
        spawn_action(board, |board| async move {
            if let Ok(value) = board.session.fetch_protected().await {
                board.view().notify(&value.to_string());
            }
        });
    };

    view! {
        <Show
            when=logged_in
            fallback=|| view! { <p class="session guest">"Вы не вошли"</p> }
        >
            <div class="session member">
                <span>{move || user_label(ui.user.get().as_deref())}</span>
                <button on:click=on_protected>"Проверить доступ"</button>
                <button on:click=on_logout>"Выйти"</button>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn AuthForms(ui: UiState, board: BoardHandle) -> impl IntoView {
    let login_userid = RwSignal::new(String::new());
    let login_password = RwSignal::new(String::new());

    let reg_userid = RwSignal::new(String::new());
    let reg_password = RwSignal::new(String::new());
    let reg_confirm = RwSignal::new(String::new());

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        let userid = login_userid.get();
        let password = login_password.get();
        spawn_action(board, |board| async move {
            let _ = board.session.login(&userid, &password).await;
        });
    };

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        let userid = reg_userid.get();
        let password = reg_password.get();
        let confirm = reg_confirm.get();
        spawn_action(board, |board| async move {
            if board
                .session
                .register(&userid, &password, &confirm)
                .await
                .is_ok()
            {
                reg_password.set(String::new());
                reg_confirm.set(String::new());
            }
        });
    };

    view! {
        <Show when=move || ui.session.with(session_regions).1>
            <h2>"Вход"</h2>
            <form on:submit=on_login>
                <input
                    placeholder="ID"
                    prop:value=move || login_userid.get()
                    on:input=move |ev| login_userid.set(event_target_value(&ev))
                />
                <input
                    placeholder="Пароль"
                    type="password"
                    prop:value=move || login_password.get()
                    on:input=move |ev| login_password.set(event_target_value(&ev))
                />
                <button type="submit">"Войти"</button>
            </form>

            <h2 style="margin-top: 1rem;">"Регистрация"</h2>
            <form on:submit=on_register>
                <input
                    placeholder="ID"
                    prop:value=move || reg_userid.get()
                    on:input=move |ev| reg_userid.set(event_target_value(&ev))
                />
                <input
                    placeholder="Пароль"
                    type="password"
                    prop:value=move || reg_password.get()
                    on:input=move |ev| reg_password.set(event_target_value(&ev))
                />
                <input
                    placeholder="Повторите пароль"
                    type="password"
                    prop:value=move || reg_confirm.get()
                    on:input=move |ev| reg_confirm.set(event_target_value(&ev))
                />
                <button type="submit">"Зарегистрироваться"</button>
            </form>

            <hr style="margin: 1rem 0;" />
        </Show>
    }
}
