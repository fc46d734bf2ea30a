//! Policy client interface used by the gate.
use async_trait::async_trait;
use thiserror::Error;

use crate::api::extractors::AuthCtx;
use crate::services::policy::query::AuthorizationQuery;

/// Why no decision could be obtained.
///
/// Kept separate from `AppError`: none of these ever reach the client, they
/// only end up in the audit record and logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("policy engine unreachable: {0}")]
    Transport(String),
    #[error("policy engine timed out")]
    Timeout,
    #[error("policy engine returned status {0}")]
    Status(u16),
    #[error("policy response is not valid JSON: {0}")]
    Decode(String),
    #[error("policy response has unexpected shape: {0}")]
    UnexpectedShape(&'static str),
}

impl PolicyError {
    /// Stable label for audit records.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::UnexpectedShape(_) => "unexpected_shape",
        }
    }
}

/// Result of one policy query: an actual decision, or none at all.
///
/// `Unavailable` is always mapped to deny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    Decision(bool),
    Unavailable(PolicyError),
}

impl PolicyOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Decision(true))
    }
}

/// Remote allow/deny oracle.
///
/// Implementations must bound their own latency and must never panic; every
/// failure is reported as `PolicyOutcome::Unavailable`.
#[async_trait]
pub trait PolicyClient: Send + Sync {
    async fn evaluate(&self, query: &AuthorizationQuery) -> PolicyOutcome;

    /// Boolean shorthand: `true` only for an explicit allow.
    async fn decide(&self, method: &str, path: &str, ctx: &AuthCtx) -> bool {
        self.evaluate(&AuthorizationQuery::new(method, path, ctx))
            .await
            .is_allowed()
    }
}
