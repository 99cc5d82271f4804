//! Ядро клиента доски объявлений, не зависящее от UI.
//!
//! Содержит модель данных, таксономию ошибок, хранилище сессии, автомат
//! подгрузки ленты и проверки форм. Транспорт подключается через
//! [`BoardApi`]: `board-client` реализует его на `reqwest`, браузерный
//! клиент ходит в API сам и использует только чистые части ядра.
//! Разбор ошибок бэкенда ([`error_from_status`]) общий для обоих.

mod api;
mod compose;
mod error;
mod login;
mod models;
mod pagination;
mod session;
mod shell;
mod transport;

#[cfg(test)]
mod testing;

pub use api::BoardApi;
pub use compose::{
    ComposeDraft, NO_SESSION_MESSAGE, NewPost, POST_CREATED_MESSAGE, REDIRECT_DELAY, submit_post,
};
pub use error::{BoardError, BoardResult, StorageError};
pub use login::{Credentials, LoginForm, sign_in, sign_out};
pub use models::{Author, Genre, GenreList, Post, PostPage, Session};
pub use pagination::{
    BoardFooter, DEFAULT_PAGE_SIZE, FeedPhase, LoadOutcome, PageRequest, Pagination, PostFeed,
};
pub use session::{MemoryStorage, SESSION_KEY, SessionStore, Storage};
pub use shell::{BOARD_TITLE, NavState, Route};
pub use transport::{ApiCall, ErrorBody, error_from_status};
