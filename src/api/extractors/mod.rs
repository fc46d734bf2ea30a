mod auth_ctx;
mod request_id;

pub use auth_ctx::{ANONYMOUS_SUBJECT, AUTHENTICATED_SUBJECT, AuthCtx, AuthCtxExtractor};
