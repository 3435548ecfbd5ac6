//! Security headers set on every response.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy for rendered pages.
///
/// The stylesheet is inlined in each page, so inline styles are allowed.
/// Scripts are not: the sidebar block is a data island, never executed.
/// Images may come from any HTTPS origin since authors link them freely.
const CSP: &str = "default-src 'self'; \
                   script-src 'self'; \
                   style-src 'self' 'unsafe-inline'; \
                   font-src 'self' data:; \
                   img-src 'self' data: https:; \
                   frame-ancestors 'none'";

fn overriding(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("content-security-policy", CSP)
}

pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("x-content-type-options", "nosniff")
}

pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("x-frame-options", "DENY")
}

/// Pages link to each other by path; other sites only see the origin.
pub(crate) fn referrer_policy_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("referrer-policy", "strict-origin-when-cross-origin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_value() {
        assert!(CSP.contains("style-src 'self' 'unsafe-inline'"));
        assert!(CSP.contains("script-src 'self';"));
        assert!(CSP.contains("frame-ancestors 'none'"));
        assert!(!CSP.contains("ws:"));
    }

    #[test]
    fn test_csp_is_valid_header() {
        assert!(HeaderValue::from_str(CSP).is_ok());
    }
}
