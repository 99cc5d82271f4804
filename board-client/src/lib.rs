//! HTTP-клиент REST API доски объявлений.
//!
//! [`HttpClient`] реализует [`board_core::BoardApi`] поверх `reqwest`:
//! - `POST /login`
//! - `GET /posts?skip=&limit=`
//! - `GET /genres`
//! - `POST /posts`
//!
//! Ошибки приводятся к [`board_core::BoardError`]: неуспешный вход
//! даёт `Auth`, отказ бэкенда при создании поста даёт `Validation`, прочее
//! становится `Network`.
//! Повторов нет, каждая ошибка сразу возвращается вызывающему.
#![warn(missing_docs)]

mod error;
mod http_client;

pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpClient, normalize_base_url,
};
