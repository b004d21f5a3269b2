//! Client request payloads
//!
//! Request bodies sent to the user CRUD endpoints.
//! Shared between auth-provider and auth-provider-mock.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create user request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 1))]
    pub role_ids: Vec<String>,
}

/// Update user request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 1))]
    pub role_ids: Vec<String>,
    pub is_active: bool,
}
