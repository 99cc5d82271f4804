use board_core::{LoginForm, Route};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;
use crate::storage::session_store;

#[component]
pub(crate) fn LoginScreen(state: AppState) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        state.clear_error();

        let form = LoginForm::new(email.get_untracked(), password.get_untracked());
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(err) => {
                state.set_error(err.user_message());
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            let stored = match api::login(&credentials).await {
                Ok(session) => session_store()
                    .set(&session)
                    .map(|()| session)
                    .map_err(Into::into),
                Err(err) => Err(err),
            };
            submitting.set(false);

            match stored {
                Ok(session) => {
                    state.session.set(Some(session));
                    state.navigate(Route::Board);
                }
                // Поля формы не сбрасываются, можно исправить и повторить.
                Err(err) => state.report(&err),
            }
        });
    };

    view! {
        <section class="login">
            <h1>"로그인"</h1>
            <form on:submit=on_submit>
                <input
                    type="email"
                    placeholder="이메일"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="비밀번호"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "로그인 중..." } else { "로그인" }}
                </button>
            </form>
        </section>
    }
}
