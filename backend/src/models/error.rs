use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::core::{AccessError, TokenError};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(#[source] TokenError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied { allowed, .. } => {
                AppError::InvalidParticipant(invalid_participant_message(&allowed))
            }
            AccessError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidRequest(reason) => AppError::BadRequest(reason.to_string()),
            other => AppError::TokenSigning(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::InvalidParticipant(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_participant", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::TokenSigning(err) => {
                error!("Token generation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_signing_failure",
                    "Failed to generate token".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_server_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            status: status.as_u16(),
        };

        (status, Json(error_response)).into_response()
    }
}

fn invalid_participant_message(allowed: &[String]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|p| format!("'{p}'")).collect();
    match quoted.as_slice() {
        [] => "Invalid participant".to_string(),
        [only] => format!("Invalid participant. Must be {only}"),
        [init @ .., last] => format!("Invalid participant. Must be {} or {}", init.join(", "), last),
    }
}
