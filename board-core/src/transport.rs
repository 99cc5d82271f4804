use serde::Deserialize;

use crate::error::BoardError;

const POST_REJECTED_FALLBACK: &str = "게시물 등록 요청이 거부되었습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Вызов API, от которого зависит классификация ошибки.
pub enum ApiCall {
    Login,
    ListPosts,
    ListGenres,
    CreatePost,
}

impl ApiCall {
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::ListPosts => "list_posts",
            Self::ListGenres => "list_genres",
            Self::CreatePost => "create_post",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Тело ответа бэкенда с ошибкой.
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Разбирает тело ответа; нечитаемое тело даёт пустой `ErrorBody`.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// FastAPI отдаёт `detail` строкой или списком `{loc, msg}` (422).
    pub fn message(self) -> Option<String> {
        let message = match self.detail? {
            serde_json::Value::String(text) => text,
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(text) => Some(text.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect::<Vec<_>>()
                .join("; "),
            serde_json::Value::Null => return None,
            other => other
                .get("msg")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        };

        let message = message.trim().to_string();
        if message.is_empty() {
            return None;
        }
        Some(message)
    }
}

/// Превращает неуспешный HTTP-статус в ошибку клиента.
///
/// - `login`: любой не-2xx даёт ошибку авторизации с `detail` бэкенда;
/// - `create_post`: 4xx даёт ошибку валидации, остальное сетевую;
/// - списки: любой не-2xx даёт сетевую ошибку.
pub fn error_from_status(call: ApiCall, status: u16, detail: Option<String>) -> BoardError {
    match call {
        ApiCall::Login => BoardError::auth(detail),
        ApiCall::CreatePost if (400..500).contains(&status) => BoardError::validation(
            "post",
            detail.unwrap_or_else(|| POST_REJECTED_FALLBACK.to_string()),
        ),
        _ => {
            let detail = detail.map(|d| format!(": {d}")).unwrap_or_default();
            BoardError::network(format!(
                "{} failed with http status {status}{detail}",
                call.name()
            ))
        }
    }
}
