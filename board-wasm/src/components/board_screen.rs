use board_core::{BoardFooter, Pagination, Route};
use leptos::prelude::*;

use crate::forms::{PostRow, post_meta, post_row_key, post_rows};
use crate::state::AppState;

#[component]
pub(crate) fn BoardScreen(state: AppState) -> impl IntoView {
    let greeting = move || state.session.with(|session| session.as_ref().map(|s| s.greeting()));
    let footer = move || state.feed.with(Pagination::footer);

    view! {
        <section class="board">
            <header class="board-header">
                {move || greeting().map(|text| view! { <p class="greeting">{text}</p> })}
                <button on:click=move |_| state.navigate(Route::Compose)>"새 글 작성"</button>
            </header>

            <ul class="posts">
                <For
                    each=move || state.feed.with(|feed| post_rows(feed.posts()))
                    key=post_row_key
                    children=move |(_, post): PostRow| {
                        let meta = post_meta(&post);
                        view! {
                            <li class="post">
                                <h3>{post.title}</h3>
                                <small>{meta}</small>
                                <p>{post.content}</p>
                            </li>
                        }
                    }
                />
            </ul>

            <footer class="board-footer">
                {move || match footer() {
                    BoardFooter::LoadMore => {
                        view! {
                            <button on:click=move |_| state.load_next()>
                                {BoardFooter::LoadMore.label()}
                            </button>
                        }
                            .into_any()
                    }
                    other => view! { <p>{other.label()}</p> }.into_any(),
                }}
            </footer>
        </section>
    }
}
