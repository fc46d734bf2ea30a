//! Request correlation (`X-Request-ID`).
//!
//! Responsibility:
//! - reuse the caller's `X-Request-ID` when it is present and non-blank
//! - otherwise issue a fresh UUID (random), or a process-unique fallback id
//!   when the OS random source is unavailable
//! - expose the id to downstream code as a `RequestIdentity` extension
//! - echo the same id on every response, including error responses
//!
//! This is the only place that writes the correlation header.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id resolved for the current request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity(String);

impl RequestIdentity {
    /// Header bytes decoded as latin-1, so obs-text ids survive into logs unchanged.
    fn from_header(value: &HeaderValue) -> Self {
        Self(value.as_bytes().iter().copied().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues request ids: UUID v4 from the OS random source, or
/// `{boot millis}-{pid}-{counter}` when that source fails.
#[derive(Debug)]
pub struct RequestIdGenerator {
    boot_millis: i64,
    counter: AtomicU64,
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self {
            boot_millis: chrono::Utc::now().timestamp_millis(),
            counter: AtomicU64::new(1),
        }
    }

    pub fn issue(&self) -> String {
        self.issue_with(getrandom::fill)
    }

    fn issue_with<F, E>(&self, fill: F) -> String
    where
        F: FnOnce(&mut [u8]) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut bytes = [0u8; 16];
        match fill(&mut bytes) {
            Ok(()) => uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "random source unavailable, using fallback request id");
                self.fallback()
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }

    fn fallback(&self) -> String {
        let seq = self.next_seq();
        format!(
            "{:x}-{:x}-{:016x}",
            self.boot_millis,
            std::process::id(),
            seq
        )
    }
}

fn resolve(
    headers: &HeaderMap,
    generator: &RequestIdGenerator,
) -> (RequestIdentity, HeaderValue) {
    let value = match headers.get(REQUEST_ID_HEADER) {
        Some(value) if !value.as_bytes().trim_ascii().is_empty() => value.clone(),
        _ => HeaderValue::from_str(&generator.issue())
            .unwrap_or_else(|_| HeaderValue::from(generator.next_seq())),
    };
    (RequestIdentity::from_header(&value), value)
}

/// `from_fn_with_state` middleware; see `middleware::http::apply`.
pub async fn assign(
    State(generator): State<Arc<RequestIdGenerator>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let (identity, header_value) = resolve(req.headers(), &generator);
    req.extensions_mut().insert(identity);

    let mut res = next.run(req).await;
    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    res
}
