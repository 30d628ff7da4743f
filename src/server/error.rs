use crate::search::GatewayError;
use crate::tracks::IngestError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures scoped to a single request. None of them affect other requests.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("album not found")]
    AlbumNotFound,

    #[error(transparent)]
    Search(#[from] GatewayError),

    #[error(transparent)]
    Tracks(#[from] IngestError),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AlbumNotFound => StatusCode::NOT_FOUND,
            ApiError::Search(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Search(_) | ApiError::Tracks(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        let body = MessageBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
