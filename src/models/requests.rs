use crate::core::error::ApiError;
use crate::models::user::NewUser;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parse a raw JSON request body.
///
/// Any parse failure is a [`ApiError::MalformedRequestBody`].
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected malformed request body");
        ApiError::MalformedRequestBody
    })
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub goal: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            goal: request.goal,
        }
    }
}

/// User id as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserIdInput {
    Number(u64),
    Text(String),
}

impl UserIdInput {
    pub fn value(&self) -> Option<u64> {
        match self {
            UserIdInput::Number(id) => Some(*id),
            UserIdInput::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub id: UserIdInput,
    pub new_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register_optional_fields() {
        let request: RegisterRequest = parse_body(br#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.name, "");
        assert!(request.goal.is_none());
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        let result: Result<LoginRequest, _> = parse_body(b"not json");
        assert!(matches!(result, Err(ApiError::MalformedRequestBody)));

        let result: Result<LoginRequest, _> = parse_body(br#"{"email":"a@b.c"}"#);
        assert!(matches!(result, Err(ApiError::MalformedRequestBody)));
    }

    #[test]
    fn test_update_role_accepts_number_or_string_id() {
        let request: UpdateRoleRequest = parse_body(br#"{"id":12,"newRole":"Admin"}"#).unwrap();
        assert_eq!(request.id.value(), Some(12));
        assert_eq!(request.new_role, "Admin");

        let request: UpdateRoleRequest = parse_body(br#"{"id":"12","newRole":"Coach"}"#).unwrap();
        assert_eq!(request.id.value(), Some(12));

        let request: UpdateRoleRequest = parse_body(br#"{"id":"twelve","newRole":"Coach"}"#).unwrap();
        assert_eq!(request.id.value(), None);
    }
}
