/*
 * Responsibility
 * - POST /login (demo login, not gated)
 * - compares against the APP_PASSWORD secret; a missing secret is a 500, never a policy concern
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::{
    api::dto::login::{LoginRequest, LoginResponse},
    error::AppError,
    middleware::request_id::RequestIdentity,
    services::events::log_event,
    state::AppState,
};

pub const PASSWORD_SECRET: &str = "APP_PASSWORD";
const DEMO_TOKEN: &str = "demo-token-please-replace";

pub async fn login(
    State(state): State<AppState>,
    request_id: RequestIdentity,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) =
        payload.map_err(|_| AppError::bad_request("INVALID_BODY", "invalid login payload"))?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    let Some(expected) = state.secrets.read(PASSWORD_SECRET) else {
        log_event(
            "auth.config.missing_secret",
            json!({ "request_id": request_id.as_str() }),
        );
        return Err(AppError::Internal);
    };

    if bool::from(req.password.as_bytes().ct_eq(expected.as_bytes())) {
        log_event(
            "auth.login.success",
            json!({ "request_id": request_id.as_str(), "username": req.username }),
        );
        return Ok(Json(LoginResponse {
            status: "ok",
            token: Some(DEMO_TOKEN.to_string()),
        }));
    }

    log_event(
        "auth.login.fail",
        json!({ "request_id": request_id.as_str(), "username": req.username }),
    );
    Err(AppError::Unauthorized)
}
