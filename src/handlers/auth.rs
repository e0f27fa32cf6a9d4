use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::requests::{parse_body, LoginRequest, RegisterRequest};
use crate::utils::client_ip::ClientIp;
use crate::utils::time::registration_timestamp;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Check credentials and return the stored record
///
/// POST /login  {"email": "...", "password": "..."}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: LoginRequest = parse_body(&body)?;

    match state
        .users
        .authenticate(&request.email, &request.password)
        .await?
    {
        Some(user) => {
            info!(user_id = user.id, role = %user.role, "Login succeeded");
            Ok((StatusCode::OK, Json(user)).into_response())
        }
        None => {
            warn!(email = %request.email, "Login failed");
            Err(ApiError::AuthenticationFailed)
        }
    }
}

/// Register a new member
///
/// POST /register  {"name": "...", "email": "...", "password": "...", "goal": "..."}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: RegisterRequest = parse_body(&body)?;

    state
        .users
        .insert(request.into(), registration_timestamp(), ip)
        .await?;

    Ok((StatusCode::OK, "Registered").into_response())
}
