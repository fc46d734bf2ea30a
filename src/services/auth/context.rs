//! Auth context extraction: request headers -> `AuthCtx`.
//!
//! Pure and infallible. Missing or malformed headers degrade to the anonymous
//! subject and/or an empty scope list, never to an error.

use axum::http::{HeaderMap, header};

use crate::api::extractors::AuthCtx;
use crate::services::auth::credentials::CredentialVerifier;

pub const SCOPES_HEADER: &str = "x-scopes";

pub fn extract(headers: &HeaderMap, verifier: &dyn CredentialVerifier) -> AuthCtx {
    let scopes = parse_scopes(header_str(headers, SCOPES_HEADER));

    match header_str(headers, header::AUTHORIZATION.as_str()).and_then(|v| verifier.subject_for(v))
    {
        Some(subject) if !subject.is_empty() => AuthCtx::new(subject, scopes),
        _ => AuthCtx::anonymous(scopes),
    }
}

/// Comma-separated list: trimmed, empties dropped, order and duplicates kept.
pub fn parse_scopes(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::services::auth::credentials::BearerLengthStub;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn scopes_are_trimmed_and_empties_dropped() {
        assert_eq!(parse_scopes(Some(" read , write ,,")), vec!["read", "write"]);
        assert_eq!(
            parse_scopes(Some("write,read,write")),
            vec!["write", "read", "write"]
        );
    }

    #[test]
    fn empty_scope_inputs_yield_empty_list() {
        assert!(parse_scopes(None).is_empty());
        assert!(parse_scopes(Some("")).is_empty());
        assert!(parse_scopes(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn no_headers_is_anonymous_without_scopes() {
        let ctx = extract(&HeaderMap::new(), &BearerLengthStub);
        assert_eq!(ctx.subject, "anonymous");
        assert!(ctx.scopes.is_empty());
    }

    #[test]
    fn valid_bearer_yields_authenticated_subject() {
        let ctx = extract(
            &headers(&[
                ("authorization", "Bearer 1234567890123"),
                ("x-scopes", "users:read"),
            ]),
            &BearerLengthStub,
        );
        assert_eq!(ctx.subject, "user");
        assert_eq!(ctx.scopes, vec!["users:read"]);
    }

    #[test]
    fn scopes_are_parsed_for_anonymous_callers_too() {
        let ctx = extract(
            &headers(&[("authorization", "Bearer short"), ("x-scopes", " read , write ,,")]),
            &BearerLengthStub,
        );
        assert!(ctx.is_anonymous());
        assert_eq!(ctx.scopes, vec!["read", "write"]);
    }

    #[test]
    fn non_utf8_authorization_is_anonymous() {
        let mut map = HeaderMap::new();
        map.insert(
            "authorization",
            HeaderValue::from_bytes(b"Bearer \xff\xfe1234567890").unwrap(),
        );
        assert!(extract(&map, &BearerLengthStub).is_anonymous());
    }

    struct EmptySubject;

    impl CredentialVerifier for EmptySubject {
        fn subject_for(&self, _authorization: &str) -> Option<String> {
            Some(String::new())
        }
    }

    #[test]
    fn empty_subject_from_verifier_degrades_to_anonymous() {
        let ctx = extract(
            &headers(&[("authorization", "Bearer 1234567890123")]),
            &EmptySubject,
        );
        assert!(ctx.is_anonymous());
    }
}
