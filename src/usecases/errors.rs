use thiserror::Error;

use crate::domain::value_objects::{
    connections::ConnectionRequirement, enums::mission_kinds::MissionKind,
};

/// Blocking outcomes of the mission usecases.
///
/// Idempotent successes (`AlreadyActive`, `NotActive`) are deliberately not
/// here: they live on the outcome enums and callers treat them as success.
#[derive(Debug, Error)]
pub enum MissionError {
    #[error("business account not found")]
    AccountNotFound,

    #[error("mission template not found")]
    TemplateNotFound,

    #[error("business account does not belong to the caller")]
    NotAccountOwner,

    #[error("missing business connection: {}", .0.tag)]
    MissingConnection(ConnectionRequirement),

    #[error("a check-in method must be selected before activation")]
    CheckInMethodRequired,

    #[error("mission kind {kind} is not available on the current plan")]
    KindNotAvailable { kind: MissionKind },

    #[error("{limit_name} quota exceeded: current={current} max={max}")]
    QuotaExceeded {
        limit_name: &'static str,
        current: i64,
        max: i64,
    },

    #[error("invalid activation config: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl MissionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            MissionError::AccountNotFound | MissionError::TemplateNotFound => {
                StatusCode::NOT_FOUND
            }
            MissionError::NotAccountOwner
            | MissionError::MissingConnection(_)
            | MissionError::KindNotAvailable { .. }
            | MissionError::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            MissionError::CheckInMethodRequired | MissionError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            MissionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response payload. The UI
    /// branches on these, never on the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            MissionError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            MissionError::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            MissionError::NotAccountOwner => "NOT_ACCOUNT_OWNER",
            MissionError::MissingConnection(_) => "MISSING_BUSINESS_CONNECTION",
            MissionError::CheckInMethodRequired => "CHECK_IN_METHOD_REQUIRED",
            MissionError::KindNotAvailable { .. } => "MISSION_KIND_NOT_AVAILABLE",
            MissionError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            MissionError::Validation(_) => "VALIDATION_ERROR",
            MissionError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, MissionError>;
