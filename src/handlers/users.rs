use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::requests::{parse_body, UpdateRoleRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// List every user in registration order
///
/// GET /users
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let users = state.users.list_all().await?;
    Ok((StatusCode::OK, Json(users)).into_response())
}

/// Change one user's role
///
/// POST /update-role  {"id": 3, "newRole": "Admin"}
pub async fn update_role_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: UpdateRoleRequest = parse_body(&body)?;
    let id = request.id.value().ok_or_else(|| {
        warn!(id = ?request.id, "Role update with non-numeric id");
        ApiError::MalformedRequestBody
    })?;

    state.users.update_role(id, &request.new_role).await?;

    Ok((StatusCode::OK, "Updated").into_response())
}
