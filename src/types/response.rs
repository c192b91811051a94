//! Response envelope for write endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::MarksRecorded;

/// Standard API response wrapper (DRY - consistent response format)
#[derive(Debug, Serialize, ToSchema)]
#[aliases(MarksRecordedResponse = ApiResponse<MarksRecorded>)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}
