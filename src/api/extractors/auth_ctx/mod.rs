/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the gate's AuthCtx to handlers
 * - keep the axum glue in core, the type in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::{ANONYMOUS_SUBJECT, AUTHENTICATED_SUBJECT, AuthCtx};
