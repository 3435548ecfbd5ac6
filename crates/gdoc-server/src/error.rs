//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
///
/// Missing pages never reach here: they render the placeholder with a 404.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page rendering failed.
    #[error("Render error: {0}")]
    Site(#[from] gdoc_site::SiteError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = match &self {
            Self::Site(e) => json!({"error": e.to_string()}),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
