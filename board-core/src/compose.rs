use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::api::BoardApi;
use crate::error::{BoardError, BoardResult};
use crate::models::{Genre, Post, Session};

/// Пауза между подтверждением публикации и переходом на доску.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Сообщение после успешной публикации.
pub const POST_CREATED_MESSAGE: &str =
    "게시물이 성공적으로 등록되었습니다! 잠시 후 게시판으로 이동합니다.";

/// Блокирующая ошибка экрана, когда сессии нет.
pub const NO_SESSION_MESSAGE: &str = "로그인 정보가 없습니다. 다시 로그인해주세요.";

const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Черновик поста в форме Compose.
pub struct ComposeDraft {
    pub title: String,
    pub content: String,
    /// Выбранный жанр; `None`, пока пользователь ничего не выбрал.
    pub genre_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Проверенный пост, тело `POST /posts`.
///
/// Собрать его можно только через [`ComposeDraft::validate`].
pub struct NewPost {
    title: String,
    content: String,
    user_id: i64,
    genre_id: i64,
}

impl NewPost {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn genre_id(&self) -> i64 {
        self.genre_id
    }
}

impl ComposeDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        genre_id: Option<i64>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            genre_id,
        }
    }

    /// Проверяет черновик на клиенте.
    ///
    /// Порядок проверок: сессия, заголовок, текст, выбор жанра, жанр из
    /// последнего загруженного списка.
    pub fn validate(&self, session: Option<&Session>, genres: &[Genre]) -> BoardResult<NewPost> {
        let Some(session) = session else {
            return Err(BoardError::validation("session", "로그인 정보가 필요합니다."));
        };

        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            let field = if title.is_empty() { "title" } else { "content" };
            return Err(BoardError::validation(
                field,
                "제목과 내용을 모두 입력해주세요.",
            ));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(BoardError::validation(
                "title",
                format!("제목은 {MAX_TITLE_CHARS}자 이하로 입력해주세요."),
            ));
        }

        let Some(genre_id) = self.genre_id else {
            return Err(BoardError::validation("genre_id", "장르를 선택해주세요."));
        };
        if !genres.iter().any(|genre| genre.id == genre_id) {
            return Err(BoardError::validation(
                "genre_id",
                "선택한 장르를 찾을 수 없습니다.",
            ));
        }

        Ok(NewPost {
            title: title.to_string(),
            content: content.to_string(),
            user_id: session.id,
            genre_id,
        })
    }
}

/// Публикация: проверка черновика и `create_post`.
///
/// Если проверка не прошла, запрос не отправляется.
pub async fn submit_post<A>(
    api: &A,
    draft: &ComposeDraft,
    session: Option<&Session>,
    genres: &[Genre],
) -> BoardResult<Post>
where
    A: BoardApi + ?Sized,
{
    let new_post = draft.validate(session, genres)?;
    let post = api.create_post(&new_post).await?;
    debug!(post_id = post.id, genre_id = new_post.genre_id, "post created");
    Ok(post)
}
