//! Page endpoints.
//!
//! Renders documentation pages as complete HTML documents. Requests with no
//! matching source still get a page (the placeholder), served as 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET `/<prefix>/` (version root of the default version).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    render_page("", &state)
}

/// Handle GET `/<prefix>/{path}`.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    render_page(&path, &state)
}

fn render_page(path: &str, state: &AppState) -> Result<Response, ServerError> {
    let page = state.handler.handle(path)?;

    let status = if page.is_found() {
        StatusCode::OK
    } else {
        tracing::debug!(path, "No source for request, serving placeholder");
        StatusCode::NOT_FOUND
    };

    Ok((
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        page.html,
    )
        .into_response())
}
