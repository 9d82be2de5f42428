use crate::utils::error::{ErrorCategory, SynthesisError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for SynthesisError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Status: {})",
                self,
                self.category(),
                status.as_u16()
            );
            if self.category() == ErrorCategory::Configuration
                || matches!(self, SynthesisError::AuthError { .. })
            {
                tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
            }
        } else {
            tracing::warn!("Rejected lookup: {} (Status: {})", self, status.as_u16());
        }

        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}
