use board_core::Route;
use leptos::prelude::*;

use crate::components::board_screen::BoardScreen;
use crate::components::compose_screen::ComposeScreen;
use crate::components::login_screen::LoginScreen;
use crate::components::nav_bar::NavBar;
use crate::state::{AppState, current_route};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.show(current_route());

    // Назад/вперёд в браузере заново входят на экран.
    let _popstate = window_event_listener(leptos::ev::popstate, move |_| {
        state.show(current_route());
    });

    let error_text = move || state.error.get().unwrap_or_default();

    let screen = move || match state.route.get() {
        Route::Login => view! { <LoginScreen state=state /> }.into_any(),
        Route::Board => view! { <BoardScreen state=state /> }.into_any(),
        Route::Compose => view! { <ComposeScreen state=state /> }.into_any(),
        Route::NotFound(path) => view! { <NotFound path=path state=state /> }.into_any(),
    };

    view! {
        <main class="page">
            <Show when=move || state.route.with(Route::has_shell)>
                <NavBar state=state />
            </Show>

            <Show when=move || state.error.with(Option::is_some)>
                <div class="error-banner">{error_text}</div>
            </Show>

            {screen}
        </main>
    }
}

#[component]
fn NotFound(path: String, state: AppState) -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"페이지를 찾을 수 없습니다."</h1>
            <p>{path}</p>
            <button on:click=move |_| state.navigate(Route::Login)>"처음으로"</button>
        </section>
    }
}
