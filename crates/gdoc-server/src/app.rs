//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{MethodRouter, get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::pages;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Pages are mounted below the handler's URL prefix. `GET /` and the bare
/// prefix redirect to the mount point. With an empty prefix pages are served
/// from the root.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let prefix = state
        .handler
        .config()
        .prefix_uri
        .trim_matches('/')
        .to_owned();

    let router = if prefix.is_empty() {
        Router::new()
            .route("/", get(pages::get_root_page))
            .route("/{*path}", get(pages::get_page))
    } else {
        let mount = gdoc_site::mount_path(&prefix);
        Router::new()
            .route("/", redirect_to(&mount))
            .route(&format!("/{prefix}"), redirect_to(&mount))
            .route(&mount, get(pages::get_root_page))
            .route(&format!("{mount}{{*path}}"), get(pages::get_page))
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(security::referrer_policy_layer()),
        )
        .with_state(state)
}

fn redirect_to(target: &str) -> MethodRouter<Arc<AppState>> {
    let target = target.to_owned();
    get(move || async move { Redirect::temporary(&target) })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use gdoc_site::{Handler, HandlerConfig};
    use gdoc_storage::MockStorage;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_file("versions.yml", "v2: \"Version 2\"\n")
            .with_file("sidebar.yml", "Start:\n  Home: index.html\n")
            .with_file("_source/index.md", "# Home\n\nWelcome.")
            .with_file("v2/_source/guide.md", "# Guide\n\nSecond edition.")
            .with_unreadable("_source/locked.md")
    }

    fn router_with_prefix(prefix: &str) -> Router {
        let config = HandlerConfig {
            prefix_uri: prefix.to_owned(),
            ..HandlerConfig::default()
        };
        let handler = Handler::with_storage(config, Arc::new(storage())).unwrap();
        create_router(Arc::new(AppState { handler }))
    }

    async fn get_uri(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_mount_point() {
        let response = get_uri(router_with_prefix("docs"), "/").await;

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/docs/");
    }

    #[tokio::test]
    async fn test_bare_prefix_redirects() {
        let response = get_uri(router_with_prefix("docs"), "/docs").await;

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/docs/");
    }

    #[tokio::test]
    async fn test_mount_point_serves_default_index() {
        let response = get_uri(router_with_prefix("docs"), "/docs/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = body_text(response).await;
        assert!(body.contains("<p>Welcome.</p>"));
    }

    #[tokio::test]
    async fn test_versioned_page() {
        let response = get_uri(router_with_prefix("docs"), "/docs/v2/guide.md").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Second edition."));
        assert!(body.contains(r#"<span class="current">Version 2</span>"#));
    }

    #[tokio::test]
    async fn test_missing_page_is_404_with_placeholder() {
        let response = get_uri(router_with_prefix("docs"), "/docs/missing.html").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_text(response).await;
        assert!(body.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn test_unreadable_page_is_500() {
        let response = get_uri(router_with_prefix("docs"), "/docs/locked.html").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_outside_prefix_is_not_routed() {
        let response = get_uri(router_with_prefix("docs"), "/other/page.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_prefix_serves_from_root() {
        let router = router_with_prefix("");

        let response = get_uri(router.clone(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_uri(router, "/v2/guide.md").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Second edition."));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let response = get_uri(router_with_prefix("docs"), "/docs/").await;
        let headers = response.headers();

        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert!(headers.contains_key("referrer-policy"));
    }
}
