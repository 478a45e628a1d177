pub mod attendance_dto;
pub mod auth_dto;
pub mod dashboard_dto;

use serde::Serialize;

/// Standard success envelope; errors produce `{"success": false, "message"}`
/// from `error::Error`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
