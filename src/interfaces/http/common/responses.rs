//! Error bodies shared by all usuario endpoints

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MSG_INSUFFICIENT_FIELDS: &str = "insufficient fields";
pub const MSG_MALFORMED_ID: &str = "malformed ID";
pub const MSG_ALREADY_REGISTERED: &str = "user already registered";
pub const MSG_NOT_REGISTERED: &str = "user not registered";
pub const MSG_CREATED: &str = "user created successfully";
pub const MSG_UPDATED: &str = "user updated successfully";
pub const MSG_DELETED: &str = "user deleted successfully";

/// Failure body.
///
/// Validation failures carry `error`; store outcomes carry `message`.
/// `success` is omitted only for the schema-validation failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// `{"error": "insufficient fields"}`
    pub fn insufficient_fields() -> Self {
        Self {
            success: None,
            message: None,
            error: Some(MSG_INSUFFICIENT_FIELDS.to_string()),
        }
    }

    /// `{"success": false, "error": "malformed ID"}`
    pub fn malformed_id() -> Self {
        Self {
            success: Some(false),
            message: None,
            error: Some(MSG_MALFORMED_ID.to_string()),
        }
    }

    /// `{"success": false, "message": ...}`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
            error: None,
        }
    }
}

/// Error half of every handler's `Result`.
pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, body: ErrorBody) -> ApiError {
    (status, Json(body))
}
