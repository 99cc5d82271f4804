use board_core::{ApiCall, BoardError, error_from_status};

pub(crate) fn from_http_status(
    call: ApiCall,
    status: reqwest::StatusCode,
    detail: Option<String>,
) -> BoardError {
    error_from_status(call, status.as_u16(), detail)
}

/// Ошибки транспорта и разбора ответа всегда сетевые.
pub(crate) fn from_reqwest(call: ApiCall, err: reqwest::Error) -> BoardError {
    if err.is_timeout() {
        return BoardError::network(format!("{} timed out: {err}", call.name()));
    }
    if err.is_decode() {
        return BoardError::network(format!("{} returned an unreadable body: {err}", call.name()));
    }
    BoardError::network(format!("{} transport error: {err}", call.name()))
}
