/*
 * Responsibility
 * - public interface of the middleware layer
 * - http::apply (request id, tracing, limits), security_headers::apply, authz::apply (policy gate)
 */
pub mod authz;
pub mod http;
pub mod request_id;
pub mod security_headers;
