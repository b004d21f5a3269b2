//! Auth service models
//!
//! Roles and permissions are embedded by value in [`User`]; they have
//! no identity beyond the response they arrived in.

pub mod auth;
pub mod permission;
pub mod role;
pub mod user;

pub use auth::{Claims, CurrentUser, VerificationResult};
pub use permission::Permission;
pub use role::Role;
pub use user::{User, UsersPage};
