/*
 * Responsibility
 * - URL structure
 * - which routes sit behind the policy gate (route_layer on the protected group only)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{health::health, login::login, users::get_user};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/user", get(get_user));
    let protected = middleware::authz::apply(protected, state);

    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .merge(protected)
}
