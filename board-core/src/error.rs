use thiserror::Error;

const AUTH_FALLBACK: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
const NETWORK_FALLBACK: &str = "서버와 통신할 수 없습니다. 잠시 후 다시 시도해주세요.";
const STORAGE_FALLBACK: &str = "로그인 정보를 저장할 수 없습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибки клиента доски объявлений.
///
/// Каждая ошибка локальна для экрана, на котором возникла: экран превращает
/// её в сообщение через [`BoardError::user_message`] и оставляет ввод
/// пользователя нетронутым.
pub enum BoardError {
    /// Неверные учётные данные. Содержит `detail` из ответа бэкенда, если он был.
    #[error("auth error: {0}")]
    Auth(String),

    /// Некорректный ввод: пойман на клиенте до запроса или отклонён бэкендом.
    #[error("validation failed for '{field}': {message}")]
    Validation {
        /// Имя поля, не прошедшего проверку.
        field: &'static str,
        /// Сообщение для пользователя.
        message: String,
    },

    /// Сбой транспорта, неуспешный статус или нечитаемый ответ.
    #[error("network error: {0}")]
    Network(String),

    /// Сессию не удалось сохранить или удалить.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for BoardError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Результат операций клиента.
pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Ошибка авторизации; пустое сообщение бэкенда заменяется общим текстом.
    pub fn auth(detail: Option<String>) -> Self {
        let message = detail
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| AUTH_FALLBACK.to_string());
        Self::Auth(message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Текст, который экран показывает пользователю.
    ///
    /// Сетевые ошибки никогда не показываются как есть: подробности уходят
    /// в лог, пользователь видит общее сообщение.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(message) => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::Network(_) => NETWORK_FALLBACK.to_string(),
            Self::Storage(_) => STORAGE_FALLBACK.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[derive(Debug, Error)]
/// Ошибки хранилища сессии.
pub enum StorageError {
    /// Хранилище недоступно (нет `window`, запрещён доступ, нет каталога).
    #[error("storage is not available: {0}")]
    Unavailable(String),

    /// Хранилище отказалось записать или удалить значение.
    #[error("storage write failed: {0}")]
    Write(String),

    /// Сессию не удалось сериализовать.
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}
