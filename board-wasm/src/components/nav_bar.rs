use board_core::{BOARD_TITLE, NavState, Route};
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn NavBar(state: AppState) -> impl IntoView {
    let board_href = Route::Board.path().to_string();
    let nav = move || state.session.with(|session| NavState::from_session(session.as_ref()));

    view! {
        <nav class="nav-bar">
            <a
                class="nav-title"
                href=board_href
                on:click=move |ev| {
                    ev.prevent_default();
                    state.navigate(Route::Board);
                }
            >
                {BOARD_TITLE}
            </a>
            <span class="nav-user">{move || nav().label()}</span>
            <Show
                when=move || nav().is_logged_in()
                fallback=move || {
                    view! {
                        <button on:click=move |_| state.navigate(Route::Login)>"로그인"</button>
                    }
                }
            >
                <button on:click=move |_| state.sign_out()>"로그아웃"</button>
            </Show>
        </nav>
    }
}
