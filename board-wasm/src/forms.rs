//! Чистые помощники экранов, не зависящие от DOM.

use board_core::{Post, Route};

/// Строка ленты: позиция в накопленной последовательности и пост.
pub(crate) type PostRow = (usize, Post);

/// Лента не схлопывает повторы id, поэтому ключ строки включает позицию.
pub(crate) fn post_rows(posts: &[Post]) -> Vec<PostRow> {
    posts.iter().cloned().enumerate().collect()
}

pub(crate) fn post_row_key(row: &PostRow) -> (usize, i64) {
    (row.0, row.1.id)
}

/// Переход на доску после публикации, если экран публикации ещё открыт.
pub(crate) fn redirect_after_publish(current: &Route) -> bool {
    *current == Route::Compose
}

/// Значение `<select>` жанра: пустая строка значит «не выбран».
pub(crate) fn parse_genre_choice(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Строка под заголовком поста: автор, жанр, дата.
pub(crate) fn post_meta(post: &Post) -> String {
    let mut parts = vec![post.author_name().to_string()];
    if let Some(genre) = &post.genre {
        parts.push(genre.name.clone());
    }
    if let Some(created_at) = post.created_at {
        parts.push(created_at.format("%Y-%m-%d %H:%M").to_string());
    }
    if let Some(views) = post.views {
        parts.push(format!("조회 {views}"));
    }
    parts.join(" · ")
}
