//! Policy gate middleware: AuthCtx extraction -> policy decision -> audit -> allow/deny.
//!
//! On allow, the AuthCtx is stored in request extensions for `AuthCtxExtractor`.
//! On deny (including an unreachable policy engine) the handler never runs
//! and the caller gets a generic 403.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::request_id::RequestIdentity;
use crate::state::AppState;

/// Gate every route of `router`. Uses `route_layer`, so unmatched paths
/// still 404 without a policy query.
///
/// ```ignore
/// let protected = Router::new().route("/user", get(get_user));
/// let protected = middleware::authz::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, authorize))
}

async fn authorize(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Pull everything out of `req` before awaiting; the body is not Sync.
    let request_id = req
        .extensions()
        .get::<RequestIdentity>()
        .map(|id| id.as_str().to_string());
    let method = req.method().clone();
    let ctx = state.gate.context(req.headers());

    state
        .gate
        .enforce(
            request_id.as_deref(),
            method.as_str(),
            original_uri.path(),
            &ctx,
        )
        .await?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
