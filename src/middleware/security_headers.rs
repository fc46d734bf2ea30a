//! Response hardening for a JSON-only API whose answers depend on who is asking.
//!
//! Applied at the Router level, so policy denials, fail-closed 403s and
//! 404s carry the same headers as allowed responses. Handlers may override
//! any of them; a header already present is left alone.

use axum::Router;
use axum::http::header::{self, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Per-subject responses (including decisions) must not be stored by shared caches.
const CACHE_CONTROL: &str = "no-store";

/// Nothing served here is a document, so no content sources and no framing.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

const RESPONSE_HEADERS: [(HeaderName, &str); 5] = [
    (header::CACHE_CONTROL, CACHE_CONTROL),
    (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "no-referrer"),
];

pub fn apply(router: Router) -> Router {
    RESPONSE_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ))
        })
}
