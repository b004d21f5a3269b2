//! Auth service error codes
//!
//! Codes travel as upper snake case strings in the `error_code` field
//! of the envelope (e.g. `"INVALID_TOKEN"`). The `status` field carries
//! the matching status word from [`ErrorCode::status`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ==================== Auth ====================
    /// Bearer token missing, unknown or expired
    InvalidToken,
    /// Token is valid but the caller may not perform the operation
    PermissionDenied,

    // ==================== Request ====================
    /// Payload failed validation
    ValidationError,
    /// Request body is not valid JSON for the endpoint
    InvalidRequest,

    // ==================== Resource ====================
    /// User not found
    NotFound,
    /// A referenced role does not exist
    RoleNotFound,
    /// Email already registered
    EmailExists,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::EmailExists => "EMAIL_EXISTS",
        }
    }

    /// Status word carried next to the code
    pub fn status(&self) -> &'static str {
        match self {
            Self::InvalidToken => "UNAUTHORIZED",
            Self::PermissionDenied => "FORBIDDEN",
            Self::ValidationError | Self::InvalidRequest | Self::RoleNotFound => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::EmailExists => "CONFLICT",
        }
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidToken => "Invalid or expired token",
            Self::PermissionDenied => "Permission denied",
            Self::ValidationError => "Validation failed",
            Self::InvalidRequest => "Invalid request",
            Self::NotFound => "User not found",
            Self::RoleNotFound => "Role not found",
            Self::EmailExists => "Email already registered",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidToken,
            ErrorCode::PermissionDenied,
            ErrorCode::ValidationError,
            ErrorCode::InvalidRequest,
            ErrorCode::NotFound,
            ErrorCode::RoleNotFound,
            ErrorCode::EmailExists,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
            assert_eq!(code.to_string(), code.as_str());
        }
    }

    #[test]
    fn test_status_words() {
        assert_eq!(ErrorCode::InvalidToken.status(), "UNAUTHORIZED");
        assert_eq!(ErrorCode::NotFound.status(), "NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.status(), "BAD_REQUEST");
        assert_eq!(ErrorCode::PermissionDenied.status(), "FORBIDDEN");
    }
}
