//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stencil::DomainError;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::MissingPrompt) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::RateLimited)
            | ApiError::Domain(DomainError::ExternalService(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DomainError::MissingPrompt).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::RateLimited).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(DomainError::external("timeout")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_missing_prompt_message() {
        assert_eq!(
            ApiError::from(DomainError::MissingPrompt).to_string(),
            "Missing prompt"
        );
    }
}
