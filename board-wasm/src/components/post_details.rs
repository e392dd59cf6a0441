use leptos::prelude::*;

use crate::state::UiState;

#[component]
pub(crate) fn PostDetails(ui: UiState) -> impl IntoView {
    view! {
        {move || {
            ui.details
                .get()
                .map(|post| {
                    view! {
                        <article class="post-details">
                            <h2>{post.title.clone()}</h2>
                            <small>
                                {format!("{} · {}", post.author, post.created_at_display())}
                            </small>
                            <p>{post.content.clone()}</p>
                            <button on:click=move |_| ui.details.set(None)>"Закрыть"</button>
                        </article>
                    }
                })
        }}
    }
}
