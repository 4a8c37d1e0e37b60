use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gravelo_core::Error as CoreError;

/// Message returned when no loaded tile covers the requested coordinates.
pub const MESSAGE_REGION_UNSUPPORTED: &str = "Provided coordinates are not supported";

/// Request-level failure, mapped onto an HTTP response.
///
/// Expected conditions (bad input, unsupported region, no route) become
/// 4xx with a plain-text explanation; everything else is logged with
/// context and returned as a generic 500.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    RegionUnsupported,
    NoRoute,
    Internal(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RegionUnsupported => Self::RegionUnsupported,
            CoreError::NoRouteFound => Self::NoRoute,
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {message}")).into_response()
            }
            Self::RegionUnsupported => {
                (StatusCode::BAD_REQUEST, MESSAGE_REGION_UNSUPPORTED.to_owned()).into_response()
            }
            Self::NoRoute => (
                StatusCode::NOT_FOUND,
                "No route found between the given points".to_owned(),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
                    .into_response()
            }
        }
    }
}
