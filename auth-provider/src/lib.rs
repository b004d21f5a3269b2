//! Auth Provider - client for the remote auth service
//!
//! Provides typed calls to the auth service REST API (token verification,
//! current user, roles, user CRUD) and a permission check on top of
//! token verification.
//!
//! ```ignore
//! use auth_provider::{AuthApi, ClientConfig};
//!
//! let client = ClientConfig::new("https://auth.internal").build_client()?;
//! let verified = client.authorize(token, "users.read").await?;
//! println!("hello {}", verified.data().user.name);
//! ```

pub mod api;
pub mod authorization;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;

pub use api::AuthApi;
pub use authorization::{authorize, check_permission};
pub use config::ClientConfig;
pub use diagnostics::{
    ApiCallDiagnostics, ApiCallResult, CallResult, CreateUserResponse, CurrentUserResponse,
    DeleteUserResponse, RolesResponse, UpdateUserResponse, UserResponse, UsersResponse,
    VerifyTokenResponse,
};
pub use error::{ClientError, ClientResult, TIMEOUT_MARKER};
pub use http::AuthClient;

// Re-export shared types for convenience
pub use shared::request::UsersQuery;
pub use shared::{
    ApiResponse, Claims, CreateUserRequest, CurrentUser, Permission, Role, UpdateUserRequest,
    User, UsersPage, VerificationResult,
};
