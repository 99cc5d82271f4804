use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const UNKNOWN_AUTHOR: &str = "알 수 없음";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Личность вошедшего пользователя, как её вернул `POST /login`.
///
/// Поля, которые клиент не знает, сохраняются в `extra` без изменений,
/// чтобы сохранённая сессия читалась обратно один в один.
pub struct Session {
    /// Идентификатор пользователя; уходит в `user_id` при создании поста.
    pub id: i64,
    /// Отображаемое имя.
    pub nickname: String,
    /// Email, если бэкенд его вернул.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Остальные поля ответа.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Session {
    pub fn new(id: i64, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            email: None,
            extra: BTreeMap::new(),
        }
    }

    /// Приветствие в шапке доски.
    pub fn greeting(&self) -> String {
        format!("{}님, 환영합니다!", self.nickname)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Автор поста.
pub struct Author {
    /// Отображаемое имя автора.
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Жанр (рубрика) поста.
pub struct Genre {
    /// Идентификатор жанра.
    pub id: i64,
    /// Название жанра.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пост в том виде, в каком его отдаёт бэкенд.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub content: String,
    /// Автор; бэкенд может его не вернуть.
    #[serde(default)]
    pub author: Option<Author>,
    /// Жанр, если задан.
    #[serde(default)]
    pub genre: Option<Genre>,
    /// Время создания (UTC).
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Время последнего изменения (UTC).
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Счётчик просмотров.
    #[serde(default)]
    pub views: Option<u64>,
}

impl Post {
    /// Имя автора для карточки поста.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|author| author.nickname.as_str())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Ответ `GET /posts`.
pub struct PostPage {
    /// Посты страницы в порядке сервера.
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Ответ `GET /genres`.
pub struct GenreList {
    /// Доступные жанры.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

// Бэкенд может отдавать время как с зоной, так и без неё.
// Нечитаемое значение не должно ронять всю страницу постов.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
