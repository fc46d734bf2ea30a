//! Structured business/audit events: one JSON object per line on the `audit`
//! tracing target (formatted bare by `logging::init`).
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

pub const AUDIT_TARGET: &str = "audit";

/// Emits `{"event": .., "ts": .., ...fields}`.
///
/// Best-effort: nothing here can fail the request.
pub fn log_event(event: &str, fields: Value) {
    let mut line = Map::new();
    line.insert("event".to_string(), Value::from(event));
    line.insert(
        "ts".to_string(),
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    match fields {
        Value::Object(extra) => line.extend(extra),
        Value::Null => {}
        other => {
            line.insert("data".to_string(), other);
        }
    }

    match serde_json::to_string(&Value::Object(line)) {
        Ok(line) => tracing::info!(target: AUDIT_TARGET, "{line}"),
        Err(err) => tracing::warn!(error = %err, event, "failed to serialize log event"),
    }
}
