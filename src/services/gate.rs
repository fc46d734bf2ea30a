//! Authorization gate: context extraction -> policy query -> audit -> enforcement.
//!
//! Everything the gate depends on is injected at construction, so tests can
//! swap the policy engine, the audit sink or the credential verifier.
use std::sync::Arc;

use axum::http::HeaderMap;

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::audit::{AuditSink, DecisionRecord};
use crate::services::auth::{self, CredentialVerifier};
use crate::services::policy::{AuthorizationQuery, PolicyClient};

pub struct Gate {
    policy: Arc<dyn PolicyClient>,
    audit: Arc<dyn AuditSink>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl Gate {
    pub fn new(
        policy: Arc<dyn PolicyClient>,
        audit: Arc<dyn AuditSink>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            policy,
            audit,
            credentials,
        }
    }

    /// Never fails; see `services::auth::context`.
    pub fn context(&self, headers: &HeaderMap) -> AuthCtx {
        auth::extract(headers, self.credentials.as_ref())
    }

    /// Asks the policy engine once, audits the outcome, then allows or denies.
    ///
    /// An unavailable policy engine is a deny; the caller cannot tell the two apart.
    pub async fn enforce(
        &self,
        request_id: Option<&str>,
        method: &str,
        path: &str,
        ctx: &AuthCtx,
    ) -> Result<(), AppError> {
        let query = AuthorizationQuery::new(method, path, ctx);
        let outcome = self.policy.evaluate(&query).await;

        self.audit.record(&DecisionRecord::new(request_id, &query, &outcome));

        if outcome.is_allowed() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}
