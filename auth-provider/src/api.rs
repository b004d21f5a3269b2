//! Auth service API surface
//!
//! [`AuthApi`] lists one method per endpoint. [`AuthClient`](crate::AuthClient)
//! is the HTTP implementation; the authorization check only depends on the
//! trait, so any implementation can back it.

use crate::diagnostics::{
    CreateUserResponse, CurrentUserResponse, DeleteUserResponse, RolesResponse,
    UpdateUserResponse, UserResponse, UsersResponse, VerifyTokenResponse,
};
use crate::ClientResult;
use async_trait::async_trait;
use shared::request::UsersQuery;
use shared::{CreateUserRequest, UpdateUserRequest};

pub const VERIFY_TOKEN_PATH: &str = "/api/v1/auth/verify-token";
pub const CURRENT_USER_PATH: &str = "/api/v1/auth/me";
pub const ROLES_PATH: &str = "/api/v1/roles";
pub const USERS_PATH: &str = "/api/v1/users";

/// Path of a single user resource
pub fn user_path(id: &str) -> String {
    format!("{USERS_PATH}/{id}")
}

/// Auth service operations
///
/// Every call takes the caller's bearer token; nothing is cached between
/// calls.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// POST /api/v1/auth/verify-token
    async fn verify_token(&self, token: &str) -> ClientResult<VerifyTokenResponse>;

    /// GET /api/v1/auth/me
    async fn get_current_user(&self, token: &str) -> ClientResult<CurrentUserResponse>;

    /// GET /api/v1/roles
    async fn get_roles(&self, token: &str) -> ClientResult<RolesResponse>;

    /// POST /api/v1/users
    async fn create_user(
        &self,
        token: &str,
        request: &CreateUserRequest,
    ) -> ClientResult<CreateUserResponse>;

    /// PUT /api/v1/users/{id}
    async fn update_user(
        &self,
        token: &str,
        id: &str,
        request: &UpdateUserRequest,
    ) -> ClientResult<UpdateUserResponse>;

    /// DELETE /api/v1/users/{id}
    async fn delete_user(&self, token: &str, id: &str) -> ClientResult<DeleteUserResponse>;

    /// GET /api/v1/users?page=&limit=
    async fn get_users(&self, token: &str, query: &UsersQuery) -> ClientResult<UsersResponse>;

    /// GET /api/v1/users/{id}
    async fn get_user(&self, token: &str, id: &str) -> ClientResult<UserResponse>;

    /// Verify `token` and check that its user holds `permission`.
    ///
    /// See [`authorize`](crate::authorization::authorize).
    async fn authorize(&self, token: &str, permission: &str) -> ClientResult<VerifyTokenResponse> {
        crate::authorization::authorize(self, token, permission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_path() {
        assert_eq!(user_path("u-42"), "/api/v1/users/u-42");
    }
}
