//! Permission check on top of token verification
//!
//! Roles are walked in the order the service returns them and the first
//! match wins:
//!
//! 1. `valid == false` → [`ClientError::InvalidToken`]
//! 2. an inactive role → [`ClientError::RoleInactive`], even when a later
//!    role would grant the permission
//! 3. a permission whose slug matches → [`ClientError::PermissionInactive`]
//!    if it is inactive, success otherwise
//! 4. nothing matched → [`ClientError::RoleForbidden`]
//!
//! Rule 2 fails on the first inactive role the walk meets; inactive roles
//! are not skipped.

use crate::{AuthApi, ClientError, ClientResult, VerifyTokenResponse};
use shared::VerificationResult;
use tracing::debug;

/// Verify `token` and check that its user holds `permission` (a slug).
///
/// Verification failures are returned unchanged. On success the whole
/// verification response is handed back.
pub async fn authorize<A>(api: &A, token: &str, permission: &str) -> ClientResult<VerifyTokenResponse>
where
    A: AuthApi + ?Sized,
{
    let verified = api.verify_token(token).await?;
    check_permission(verified.data(), permission)?;
    Ok(verified)
}

/// Evaluate `permission` against an already verified token.
pub fn check_permission(result: &VerificationResult, permission: &str) -> ClientResult<()> {
    if !result.valid {
        debug!(permission, "Authorization denied: token not valid");
        return Err(ClientError::InvalidToken);
    }

    for role in &result.user.roles {
        if !role.is_active {
            debug!(permission, role = %role.name, "Authorization denied: role inactive");
            return Err(ClientError::RoleInactive);
        }

        if let Some(granted) = role.permission(permission) {
            if !granted.is_active {
                debug!(permission, role = %role.name, "Authorization denied: permission inactive");
                return Err(ClientError::PermissionInactive);
            }
            debug!(permission, role = %role.name, user_id = %result.user.id, "Authorization granted");
            return Ok(());
        }
    }

    debug!(permission, user_id = %result.user.id, "Authorization denied: no role grants permission");
    Err(ClientError::RoleForbidden)
}
