use board_core::{
    ComposeDraft, NO_SESSION_MESSAGE, POST_CREATED_MESSAGE, REDIRECT_DELAY, Route,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::forms::{parse_genre_choice, redirect_after_publish};
use crate::state::AppState;

#[component]
pub(crate) fn ComposeScreen(state: AppState) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let genre_id = RwSignal::new(None::<i64>);
    let submitting = RwSignal::new(false);
    let notice = RwSignal::new(None::<&'static str>);

    let has_session = move || state.session.with(Option::is_some);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        state.clear_error();

        let draft = ComposeDraft::new(
            title.get_untracked(),
            content.get_untracked(),
            genre_id.get_untracked(),
        );
        let validated = state.session.with_untracked(|session| {
            state
                .genres
                .with_untracked(|genres| draft.validate(session.as_ref(), genres))
        });
        let new_post = match validated {
            Ok(new_post) => new_post,
            Err(err) => {
                state.set_error(err.user_message());
                return;
            }
        };

        submitting.set(true);
        spawn_local(async move {
            match api::create_post(&new_post).await {
                Ok(_) => {
                    notice.set(Some(POST_CREATED_MESSAGE));
                    set_timeout(
                        move || {
                            if state.route.with_untracked(redirect_after_publish) {
                                state.navigate(Route::Board);
                            }
                        },
                        REDIRECT_DELAY,
                    );
                }
                Err(err) => {
                    state.report(&err);
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <section class="compose">
            <h1>"새 글 작성"</h1>
            <Show when=move || !has_session()>
                <div class="error-banner">{NO_SESSION_MESSAGE}</div>
            </Show>
            {move || notice.get().map(|text| view! { <div class="notice">{text}</div> })}

            <form on:submit=on_submit>
                <input
                    placeholder="제목"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="내용"
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <select
                    prop:value=move || genre_id.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| genre_id.set(parse_genre_choice(&event_target_value(&ev)))
                >
                    <option value="">"장르 선택"</option>
                    <For
                        each=move || state.genres.get()
                        key=|genre| genre.id
                        children=move |genre| {
                            view! { <option value=genre.id.to_string()>{genre.name}</option> }
                        }
                    />
                </select>
                <button
                    type="submit"
                    disabled=move || !has_session() || submitting.get()
                >
                    {move || if submitting.get() { "등록 중..." } else { "등록" }}
                </button>
                <button type="button" on:click=move |_| state.navigate(Route::Board)>
                    "취소"
                </button>
            </form>
        </section>
    }
}
