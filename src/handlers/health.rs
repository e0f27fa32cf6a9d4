use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    /// Registered users, absent when the table could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

/// GET /health
///
/// `200 ok` with the user count while the table is readable,
/// `503 degraded` otherwise.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, body) = match state.users.list_all().await {
        Ok(users) => (StatusCode::OK, ("ok", Some(users.len()))),
        Err(e) => {
            warn!(path = %state.users.path().display(), error = %e, "Health check could not read user table");
            (StatusCode::SERVICE_UNAVAILABLE, ("degraded", None))
        }
    };

    (
        status,
        Json(HealthResponse {
            status: body.0.to_string(),
            timestamp: current_timestamp(),
            users: body.1,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::create_test_state;
    use crate::models::user::NewUser;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn check(state: Arc<AppState>) -> (StatusCode, HealthResponse) {
        let response = health_handler(State(state)).await.into_response();
        let (parts, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        (parts.status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_user_count() {
        let (_dir, state) = create_test_state().await;
        state
            .users
            .insert(
                NewUser {
                    name: "Ann".to_string(),
                    email: "ann@example.com".to_string(),
                    password: "pw".to_string(),
                    goal: None,
                },
                String::new(),
                String::new(),
            )
            .await
            .unwrap();

        let (status, health) = check(state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.status, "ok");
        assert_eq!(health.users, Some(1));
        assert!(health.timestamp > 0);
    }

    #[tokio::test]
    async fn test_health_degraded_without_user_table() {
        let (_dir, state) = create_test_state().await;
        std::fs::remove_file(state.users.path()).unwrap();

        let (status, health) = check(state).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(health.status, "degraded");
        assert_eq!(health.users, None);
    }
}
