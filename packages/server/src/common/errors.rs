use thiserror::Error;

use super::auth::AuthError;
use super::types::EntityKind;

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Error taxonomy shared by every directory operation.
///
/// Mutating operations are transactional: whichever variant is returned, the
/// store is left exactly as it was before the call.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Malformed or missing input (bad filter values, blank series name, empty id set).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced id is absent, or was already consumed by an earlier merge.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// A concurrent write touched the same rows first.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller lacks the required admin capability.
    #[error("Permission denied: {0}")]
    Permission(#[from] AuthError),

    /// The request would break a structural rule (cross-kind merge, keep among duplicates).
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: EntityKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }

    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Permission(_) => "permission_denied",
            Self::Integrity(_) => "integrity_error",
            Self::Storage(_) | Self::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_id() {
        let err = DirectoryError::not_found(EntityKind::Organizer, 11);
        assert_eq!(err.to_string(), "organizer 11 not found");
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn test_auth_error_converts_to_permission() {
        let err: DirectoryError = AuthError::AdminRequired.into();
        assert_eq!(err.code(), "permission_denied");
    }
}
