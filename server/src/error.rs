use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use invite::{FormError, guestbook::GuestbookError, remote::RemoteError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("{0}")]
    InvalidForm(#[from] FormError),

    #[error("{0}")]
    InvalidMessage(#[from] GuestbookError),

    #[error("No guest named {0}")]
    UnknownGuest(String),

    #[error("Guest list is unavailable, please try again")]
    Upstream(#[from] RemoteError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::InvalidForm(FormError::AlreadyResponded) => StatusCode::CONFLICT,
            AppError::InvalidForm(_) | AppError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownGuest(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(e) => {
                error!("Sheet call failed: {e}");
                StatusCode::BAD_GATEWAY
            }
        };

        (status, self.to_string()).into_response()
    }
}
