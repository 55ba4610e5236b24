use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gemassure_core::estimate::EstimateFailure;
use gemassure_pricing::FailureClass;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A failed estimate; the body is already in its public shape.
    #[error("{}", .failure.response.error)]
    Estimate {
        failure: EstimateFailure,
        legacy_status: bool,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotImplemented(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

/// HTTP status for a failed estimate.
pub fn status_for_class(class: FailureClass) -> StatusCode {
    match class {
        FailureClass::Input => StatusCode::BAD_REQUEST,
        FailureClass::Authentication
        | FailureClass::Upstream
        | FailureClass::Transport
        | FailureClass::Malformed => StatusCode::BAD_GATEWAY,
        FailureClass::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FailureClass::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Estimate {
                failure,
                legacy_status,
            } => {
                let status = if legacy_status {
                    StatusCode::BAD_REQUEST
                } else {
                    status_for_class(failure.class)
                };
                (status, Json(failure.response)).into_response()
            }
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
            ApiError::NotImplemented(message) => {
                (StatusCode::NOT_IMPLEMENTED, Json(MessageBody { message })).into_response()
            }
            ApiError::Internal(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
