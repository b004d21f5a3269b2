//! Shared types for the auth provider
//!
//! Wire types exchanged with the auth service: the response envelope,
//! user/role/permission models, request payloads and error codes.
//! Used by both `auth-provider` and `auth-provider-mock`.

pub mod client;
pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{CreateUserRequest, UpdateUserRequest};
pub use models::{Claims, CurrentUser, Permission, Role, User, UsersPage, VerificationResult};
pub use response::{ApiResponse, STATUS_OK};
