//! HTTP mapping for directory errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::{AuthError, DirectoryError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
}

pub fn status_for(error: &DirectoryError) -> StatusCode {
    match error {
        DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
        DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        DirectoryError::Conflict(_) => StatusCode::CONFLICT,
        DirectoryError::Permission(AuthError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
        DirectoryError::Permission(_) => StatusCode::FORBIDDEN,
        DirectoryError::Integrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DirectoryError::Storage(_) | DirectoryError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Storage and internal details stay in the logs
        let detail = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(error = %self, "Request rejected");
            self.to_string()
        };

        (
            status,
            Json(ErrorBody {
                error: self.code(),
                detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EntityKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DirectoryError::validation("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DirectoryError::not_found(EntityKind::Organizer, 11)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DirectoryError::conflict("stale")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&AuthError::AuthenticationRequired.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&AuthError::AdminRequired.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DirectoryError::integrity("cross kind")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
