//! Policy engine wire types.
//!
//! Request:  `{"input": {"method", "path", "subject", "scopes"}}`
//! Response: `{"result": true}` or `{"result": {"allow": true, ...}}`

use serde::Serialize;
use serde_json::Value;

use crate::api::extractors::AuthCtx;
use crate::services::policy::client::PolicyError;

/// The only caller identity sent to the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationQuery {
    pub method: String,
    pub path: String,
    pub subject: String,
    pub scopes: Vec<String>,
}

impl AuthorizationQuery {
    pub fn new(method: &str, path: &str, ctx: &AuthCtx) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            subject: ctx.subject.clone(),
            scopes: ctx.scopes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PolicyRequest<'a> {
    pub input: &'a AuthorizationQuery,
}

/// The two accepted shapes of `result`.
#[derive(Debug)]
enum PolicyResult {
    Flag(bool),
    Document { allow: Value },
}

impl TryFrom<Value> for PolicyResult {
    type Error = PolicyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(allowed) => Ok(Self::Flag(allowed)),
            Value::Object(mut fields) => fields
                .remove("allow")
                .map(|allow| Self::Document { allow })
                .ok_or(PolicyError::UnexpectedShape("result object has no allow field")),
            _ => Err(PolicyError::UnexpectedShape(
                "result is neither a boolean nor an object",
            )),
        }
    }
}

/// Decodes a policy response body into a decision.
///
/// Anything other than a boolean `result` or an object `result` carrying an
/// `allow` field is an error; callers treat every error as deny.
pub fn parse_decision(body: &[u8]) -> Result<bool, PolicyError> {
    let body: Value =
        serde_json::from_slice(body).map_err(|err| PolicyError::Decode(err.to_string()))?;

    let Value::Object(mut fields) = body else {
        return Err(PolicyError::UnexpectedShape("body is not an object"));
    };

    let result = fields
        .remove("result")
        .filter(|v| !v.is_null())
        .ok_or(PolicyError::UnexpectedShape("missing result"))?;

    match PolicyResult::try_from(result)? {
        PolicyResult::Flag(allowed) => Ok(allowed),
        PolicyResult::Document { allow } => Ok(truthy(&allow)),
    }
}

// Same truthiness a dynamically typed policy document would get: null, false,
// 0, "" and empty collections are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
