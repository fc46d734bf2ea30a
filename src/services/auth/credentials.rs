//! Credential verification seam.
//!
//! NOTE: `BearerLengthStub` is a placeholder. It accepts any bearer token of at
//! least `MIN_TOKEN_LEN` characters and performs no signature or claims check.
//! The policy engine is expected to compensate. Replace it with a real
//! verifier by implementing `CredentialVerifier`; the gate does not change.

use crate::api::extractors::AUTHENTICATED_SUBJECT;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const MIN_TOKEN_LEN: usize = 10;

/// Maps a raw `Authorization` header value to a subject.
///
/// Returns `None` when the credential is not acceptable; the caller then
/// treats the request as anonymous. Must not perform I/O and must not panic.
pub trait CredentialVerifier: Send + Sync {
    fn subject_for(&self, authorization: &str) -> Option<String>;
}

/// Length-heuristic stand-in for real token verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerLengthStub;

impl CredentialVerifier for BearerLengthStub {
    fn subject_for(&self, authorization: &str) -> Option<String> {
        let token = authorization.strip_prefix(BEARER_PREFIX)?.trim();
        if token.chars().count() < MIN_TOKEN_LEN {
            return None;
        }
        Some(AUTHENTICATED_SUBJECT.to_string())
    }
}
