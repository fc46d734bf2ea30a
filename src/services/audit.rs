//! Decision auditing.
//!
//! One record per authorization decision, emitted before the gate enforces it.
//! Sinks are best-effort: a failing sink must not change the outcome of the
//! request.
use serde::Serialize;

use crate::services::events::log_event;
use crate::services::policy::{AuthorizationQuery, PolicyOutcome};

pub const DECISION_EVENT: &str = "authz.decision";

/// `decision`: the policy engine answered. `error`: it did not (the request was denied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Decision,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub request_id: Option<String>,
    pub method: String,
    pub path: String,
    pub subject: String,
    pub scopes: Vec<String>,
    pub allowed: bool,
    pub status: DecisionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl DecisionRecord {
    pub fn new(request_id: Option<&str>, query: &AuthorizationQuery, outcome: &PolicyOutcome) -> Self {
        let (status, error) = match outcome {
            PolicyOutcome::Decision(_) => (DecisionStatus::Decision, None),
            PolicyOutcome::Unavailable(err) => (DecisionStatus::Error, Some(err.label())),
        };

        Self {
            request_id: request_id.map(str::to_string),
            method: query.method.clone(),
            path: query.path.clone(),
            subject: query.subject.clone(),
            scopes: query.scopes.clone(),
            allowed: outcome.is_allowed(),
            status,
            error,
        }
    }
}

pub trait AuditSink: Send + Sync {
    fn record(&self, record: &DecisionRecord);
}

/// Writes decision records to the process log as `authz.decision` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, record: &DecisionRecord) {
        match serde_json::to_value(record) {
            Ok(fields) => log_event(DECISION_EVENT, fields),
            Err(err) => tracing::warn!(error = %err, "failed to serialize decision record"),
        }
    }
}
