/*
 * Responsibility
 * - the "who is calling" context visible to handlers
 * - the gate builds it, stores it in request extensions, handlers only receive this type
 *
 * Notes
 * - parsing lives in services::auth::context; credential checking lives behind CredentialVerifier
 */
use serde::Serialize;

/// Subject used when no acceptable credential was presented.
pub const ANONYMOUS_SUBJECT: &str = "anonymous";
/// Subject used when the (stub) credential check passes.
pub const AUTHENTICATED_SUBJECT: &str = "user";

/// Per-request authentication context.
///
/// - `subject` is never empty
/// - `scopes` keeps the caller's order and duplicates, never contains empty strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub subject: String,
    pub scopes: Vec<String>,
}

impl AuthCtx {
    pub fn new(subject: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            scopes,
        }
    }

    pub fn anonymous(scopes: Vec<String>) -> Self {
        Self::new(ANONYMOUS_SUBJECT, scopes)
    }

    pub fn is_anonymous(&self) -> bool {
        self.subject == ANONYMOUS_SUBJECT
    }
}
