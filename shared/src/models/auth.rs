//! Token verification models

use super::User;
use serde::{Deserialize, Serialize};

/// Result of the verify-token endpoint
///
/// A result with `valid == false` is never authorized, whatever its
/// roles say.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationResult {
    pub valid: bool,
    pub user: User,
    pub claims: Claims,
    pub token: String,
    /// Only set by deployments that link users to employees
    #[serde(skip_serializing_if = "String::is_empty")]
    pub employee_id: String,
}

/// Decoded token claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claims {
    pub email: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued at, seconds since epoch
    pub iat: i64,
    #[serde(rename = "type")]
    pub token_type: String,
    pub user_id: String,
    pub username: String,
}

/// Data of the current-user endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub username: String,
}
