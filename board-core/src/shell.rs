use crate::models::Session;

/// Название доски в шапке.
pub const BOARD_TITLE: &str = "Community Board";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Экран, на который ведёт путь.
pub enum Route {
    /// `/`
    Login,
    /// `/App`
    Board,
    /// `/Write`
    Compose,
    /// Любой другой путь.
    NotFound(String),
}

impl Route {
    /// Разбирает путь; завершающий `/` игнорируется.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Login,
            "/App" => Self::Board,
            "/Write" => Self::Compose,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Login => "/",
            Self::Board => "/App",
            Self::Compose => "/Write",
            Self::NotFound(path) => path,
        }
    }

    /// Экран рисуется внутри общей оболочки с навигацией.
    pub fn has_shell(&self) -> bool {
        matches!(self, Self::Board | Self::Compose)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Состояние навигационной панели.
pub enum NavState {
    LoggedIn { nickname: String },
    LoggedOut,
}

impl NavState {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self::LoggedIn {
                nickname: session.nickname.clone(),
            },
            None => Self::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// Подпись рядом с названием доски.
    pub fn label(&self) -> String {
        match self {
            Self::LoggedIn { nickname } => format!("{nickname} 님"),
            Self::LoggedOut => "로그인이 필요합니다".to_string(),
        }
    }
}
