/*
 * Responsibility
 * - GET /user?id=<positive int> (behind the policy gate)
 * - the gate has already allowed the request; AuthCtx comes from extensions
 */
use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
};
use serde_json::json;

use crate::{
    api::{
        dto::users::{UserQuery, UserResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    middleware::request_id::RequestIdentity,
    services::events::log_event,
};

pub async fn get_user(
    request_id: RequestIdentity,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Query(query) = query
        .map_err(|_| AppError::bad_request("INVALID_QUERY", "id must be a positive integer"))?;
    query
        .validate()
        .map_err(|msg| AppError::bad_request("INVALID_QUERY", msg))?;

    log_event(
        "user.read",
        json!({
            "request_id": request_id.as_str(),
            "user_id": query.id,
            "subject": auth.subject,
        }),
    );

    Ok(Json(UserResponse {
        id: query.id,
        name: "Alice".to_string(),
    }))
}
