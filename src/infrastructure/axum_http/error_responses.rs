use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::value_objects::connections::ConnectionRequirement;
use crate::usecases::errors::MissionError;

/// Wire form of a blocked operation. `code` is the stable field clients
/// branch on; `message` is for humans and may change.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_connection: Option<ConnectionRequirement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<QuotaDetail>,
}

#[derive(Debug, Serialize)]
pub struct QuotaDetail {
    pub limit_name: &'static str,
    pub current: i64,
    pub max: i64,
}

impl IntoResponse for MissionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let (message, required_connection, quota) = match self {
            MissionError::MissingConnection(requirement) => (
                format!(
                    "connect your {} account before activating this mission",
                    requirement.display_name
                ),
                Some(requirement),
                None,
            ),
            MissionError::QuotaExceeded {
                limit_name,
                current,
                max,
            } => (
                format!("{limit_name} quota exceeded"),
                None,
                Some(QuotaDetail {
                    limit_name,
                    current,
                    max,
                }),
            ),
            // Internal details stay in the logs.
            MissionError::Internal(_) => ("internal server error".to_string(), None, None),
            other => (other.to_string(), None, None),
        };

        let body = Json(ErrorResponse {
            code,
            message,
            required_connection,
            quota,
        });

        (status, body).into_response()
    }
}
