use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Build the JSON error body every Foodgram endpoint returns:
/// `{"kind": "...", "message": "..."}`.
pub fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    (status, axum::Json(body)).into_response()
}

/// Errors raised by shared plumbing rather than by a service's own use cases.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("route not found")]
    RouteNotFound,
    #[error("service unavailable")]
    Unavailable,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::Unavailable => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // TraceLayer already records method/uri/status for every request;
        // only 5xx carry detail worth logging here.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::Unavailable => tracing::warn!(kind = "UNAVAILABLE", "service unavailable"),
            _ => {}
        }
        error_response(self.status(), self.kind(), &self.to_string())
    }
}

/// Router fallback for unknown paths.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
