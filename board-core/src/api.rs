use async_trait::async_trait;

use crate::compose::NewPost;
use crate::error::BoardResult;
use crate::login::Credentials;
use crate::models::{GenreList, Post, PostPage, Session};

/// REST API доски объявлений.
///
/// Одна попытка на вызов: повторов, backoff и ключей идемпотентности нет,
/// ошибка сразу возвращается вызывающему.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// `POST /login`. Неуспешный статус даёт [`BoardError::Auth`](crate::BoardError::Auth).
    async fn login(&self, credentials: &Credentials) -> BoardResult<Session>;

    /// `GET /posts?skip=<offset>&limit=<limit>`. Пустой список не ошибка.
    async fn list_posts(&self, offset: u32, limit: u32) -> BoardResult<PostPage>;

    /// `GET /genres`.
    async fn list_genres(&self) -> BoardResult<GenreList>;

    /// `POST /posts`. Принимает только провалидированный [`NewPost`].
    async fn create_post(&self, post: &NewPost) -> BoardResult<Post>;
}
