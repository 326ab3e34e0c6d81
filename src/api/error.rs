use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

/// `DomainError` as an HTTP response: not found is 404, caller mistakes
/// and constraint violations are 400, everything else is 500.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::ConstraintViolation(_) | DomainError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (DomainError::NotFound, StatusCode::NOT_FOUND),
            (
                DomainError::ConstraintViolation("FOREIGN KEY constraint failed".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::InvalidArgument("CNPJ is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::StoreUnavailable("pool timed out".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::SchemaMismatch("habilidade".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), expected);
        }
    }
}
