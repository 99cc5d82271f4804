use serde::Serialize;
use tracing::debug;
use validator::ValidateEmail;

use crate::api::BoardApi;
use crate::error::{BoardError, BoardResult};
use crate::models::Session;
use crate::session::{SessionStore, Storage};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Содержимое формы входа, как его ввёл пользователь.
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
/// Проверенные учётные данные, тело `POST /login`.
pub struct Credentials {
    email: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Проверяет форму до отправки запроса.
    pub fn validate(&self) -> BoardResult<Credentials> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(BoardError::validation("email", "이메일을 입력해주세요."));
        }
        if !email.validate_email() {
            return Err(BoardError::validation(
                "email",
                "올바른 이메일 형식이 아닙니다.",
            ));
        }
        if self.password.trim().is_empty() {
            return Err(BoardError::validation("password", "비밀번호를 입력해주세요."));
        }

        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Вход: проверка формы, `login`, сохранение сессии.
///
/// При ошибке store не трогается, а форма остаётся у вызывающего как была.
pub async fn sign_in<A, S>(
    api: &A,
    store: &SessionStore<S>,
    form: &LoginForm,
) -> BoardResult<Session>
where
    A: BoardApi + ?Sized,
    S: Storage,
{
    let credentials = form.validate()?;
    let session = api.login(&credentials).await?;

    store.set(&session)?;
    debug!(user_id = session.id, "signed in");
    Ok(session)
}

/// Выход: удаляет сохранённую сессию.
pub fn sign_out<S: Storage>(store: &SessionStore<S>) -> Result<(), crate::StorageError> {
    store.clear()?;
    debug!("signed out");
    Ok(())
}
