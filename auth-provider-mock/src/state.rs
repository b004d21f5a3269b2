use chrono::{Duration, Utc};
use shared::error::ErrorCode;
use shared::request::UsersQuery;
use shared::{
    Claims, CreateUserRequest, CurrentUser, Permission, Role, UpdateUserRequest, User, UsersPage,
    VerificationResult,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Seeded bearer tokens
pub mod tokens {
    /// Admin: active `admin` role
    pub const ADMIN: &str = "admin-token";
    /// Viewer: `viewer` role whose `users.write` is inactive
    pub const VIEWER: &str = "viewer-token";
    /// Legacy: inactive `legacy` role listed before `admin`
    pub const LEGACY: &str = "legacy-token";
    /// Revoked: verifies as `valid: false`
    pub const REVOKED: &str = "revoked-token";
}

/// Seeded user IDs
pub mod users {
    pub const ADMIN: &str = "u-admin";
    pub const VIEWER: &str = "u-viewer";
    pub const LEGACY: &str = "u-legacy";
}

/// Seeded role IDs
pub mod roles {
    pub const ADMIN: &str = "r-admin";
    pub const VIEWER: &str = "r-viewer";
    pub const LEGACY: &str = "r-legacy";
}

const TOKEN_TTL_HOURS: i64 = 12;

struct StoredUser {
    user: User,
    password: String,
    role_ids: Vec<String>,
}

struct TokenEntry {
    user_id: String,
    revoked: bool,
    issued_at: i64,
}

#[derive(Default)]
struct Directory {
    /// Listing order is insertion order
    roles: Vec<Role>,
    users: Vec<StoredUser>,
    tokens: HashMap<String, TokenEntry>,
}

impl Directory {
    fn user(&self, id: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.user.id == id)
    }

    /// User with roles resolved in `role_ids` order
    fn resolve(&self, stored: &StoredUser) -> User {
        let roles = stored
            .role_ids
            .iter()
            .filter_map(|id| self.roles.iter().find(|r| &r.id == id).cloned())
            .collect();
        User {
            roles,
            ..stored.user.clone()
        }
    }

    fn check_roles(&self, role_ids: &[String]) -> Result<(), ErrorCode> {
        if role_ids.iter().all(|id| self.roles.iter().any(|r| &r.id == id)) {
            Ok(())
        } else {
            Err(ErrorCode::RoleNotFound)
        }
    }

    fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.users
            .iter()
            .any(|u| u.user.email.eq_ignore_ascii_case(email) && Some(u.user.id.as_str()) != except_id)
    }
}

/// Shared state of the mock service
pub struct AppState {
    directory: RwLock<Directory>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty directory, no roles, users or tokens
    pub fn new() -> Self {
        Self {
            directory: RwLock::new(Directory::default()),
        }
    }

    /// Directory seeded with the fixtures in [`tokens`], [`users`] and [`roles`]
    pub fn seeded() -> Self {
        let now = Utc::now();
        let issued_at = now.timestamp();

        let admin_role = Role {
            id: roles::ADMIN.to_string(),
            name: "Admin".to_string(),
            description: "Full access".to_string(),
            is_active: true,
            permissions: vec![
                permission("p-users-read", "users", "read", true),
                permission("p-users-write", "users", "write", true),
                permission("p-roles-read", "roles", "read", true),
            ],
        };
        let viewer_role = Role {
            id: roles::VIEWER.to_string(),
            name: "Viewer".to_string(),
            description: "Read-only access".to_string(),
            is_active: true,
            permissions: vec![
                permission("p-users-read", "users", "read", true),
                permission("p-users-write", "users", "write", false),
            ],
        };
        let legacy_role = Role {
            id: roles::LEGACY.to_string(),
            name: "Legacy".to_string(),
            description: "Retired role".to_string(),
            is_active: false,
            permissions: vec![permission("p-users-read", "users", "read", true)],
        };

        let seed_user = |id: &str, email: &str, name: &str, role_ids: &[&str]| StoredUser {
            user: User {
                id: id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                is_active: true,
                roles: vec![],
                last_login_at: Some(now),
                last_login_ip: "127.0.0.1".to_string(),
                created_at: Some(now),
                updated_at: Some(now),
            },
            password: "password123".to_string(),
            role_ids: role_ids.iter().map(|r| r.to_string()).collect(),
        };

        let token = |user_id: &str, revoked: bool| TokenEntry {
            user_id: user_id.to_string(),
            revoked,
            issued_at,
        };

        let directory = Directory {
            roles: vec![admin_role, viewer_role, legacy_role],
            users: vec![
                seed_user(users::ADMIN, "admin@example.com", "Administrator", &[roles::ADMIN]),
                seed_user(users::VIEWER, "viewer@example.com", "Viewer", &[roles::VIEWER]),
                seed_user(
                    users::LEGACY,
                    "legacy@example.com",
                    "Legacy User",
                    &[roles::LEGACY, roles::ADMIN],
                ),
            ],
            tokens: HashMap::from([
                (tokens::ADMIN.to_string(), token(users::ADMIN, false)),
                (tokens::VIEWER.to_string(), token(users::VIEWER, false)),
                (tokens::LEGACY.to_string(), token(users::LEGACY, false)),
                (tokens::REVOKED.to_string(), token(users::ADMIN, true)),
            ]),
        };

        Self {
            directory: RwLock::new(directory),
        }
    }

    /// Add a role at the end of the listing
    pub async fn add_role(&self, role: Role) {
        self.directory.write().await.roles.push(role);
    }

    /// Issue `token` for an existing user
    pub async fn register_token(&self, token: &str, user_id: &str) -> Result<(), ErrorCode> {
        let mut dir = self.directory.write().await;
        if dir.user(user_id).is_none() {
            return Err(ErrorCode::NotFound);
        }
        dir.tokens.insert(
            token.to_string(),
            TokenEntry {
                user_id: user_id.to_string(),
                revoked: false,
                issued_at: Utc::now().timestamp(),
            },
        );
        Ok(())
    }

    /// Mark `token` revoked; returns whether it was known
    pub async fn revoke_token(&self, token: &str) -> bool {
        match self.directory.write().await.tokens.get_mut(token) {
            Some(entry) => {
                entry.revoked = true;
                true
            }
            None => false,
        }
    }

    /// Verify a token. `None` for unknown tokens; revoked tokens verify as
    /// not valid.
    pub async fn verify(&self, token: &str) -> Option<VerificationResult> {
        let dir = self.directory.read().await;
        let entry = dir.tokens.get(token)?;
        let stored = dir.user(&entry.user_id)?;
        let user = dir.resolve(stored);
        let claims = Claims {
            email: user.email.clone(),
            exp: entry.issued_at + Duration::hours(TOKEN_TTL_HOURS).num_seconds(),
            iat: entry.issued_at,
            token_type: "access".to_string(),
            user_id: user.id.clone(),
            username: username(&user.email),
        };
        Some(VerificationResult {
            valid: !entry.revoked && user.is_active,
            user,
            claims,
            token: token.to_string(),
            employee_id: String::new(),
        })
    }

    /// Caller authentication for every endpoint other than verify-token
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, ErrorCode> {
        let dir = self.directory.read().await;
        let entry = dir
            .tokens
            .get(token)
            .filter(|e| !e.revoked)
            .ok_or(ErrorCode::InvalidToken)?;
        let stored = dir.user(&entry.user_id).ok_or(ErrorCode::InvalidToken)?;
        Ok(CurrentUser {
            id: stored.user.id.clone(),
            email: stored.user.email.clone(),
            username: username(&stored.user.email),
        })
    }

    /// Authenticate the caller and require an active role holding an
    /// active `permission`
    pub async fn authorize(&self, token: &str, permission: &str) -> Result<CurrentUser, ErrorCode> {
        let caller = self.authenticate(token).await?;
        let dir = self.directory.read().await;
        let granted = dir.user(&caller.id).is_some_and(|stored| {
            dir.resolve(stored).roles.iter().any(|role| {
                role.is_active && role.permission(permission).is_some_and(|p| p.is_active)
            })
        });
        if granted {
            Ok(caller)
        } else {
            Err(ErrorCode::PermissionDenied)
        }
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.directory.read().await.roles.clone()
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ErrorCode> {
        let mut dir = self.directory.write().await;
        dir.check_roles(&req.role_ids)?;
        if dir.email_taken(&req.email, None) {
            return Err(ErrorCode::EmailExists);
        }

        let now = Utc::now();
        let stored = StoredUser {
            user: User {
                id: Uuid::new_v4().to_string(),
                email: req.email,
                name: req.name,
                is_active: true,
                roles: vec![],
                last_login_at: None,
                last_login_ip: String::new(),
                created_at: Some(now),
                updated_at: Some(now),
            },
            password: req.password,
            role_ids: req.role_ids,
        };
        let user = dir.resolve(&stored);
        dir.users.push(stored);
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, req: UpdateUserRequest) -> Result<User, ErrorCode> {
        let mut dir = self.directory.write().await;
        if dir.user(id).is_none() {
            return Err(ErrorCode::NotFound);
        }
        dir.check_roles(&req.role_ids)?;
        if dir.email_taken(&req.email, Some(id)) {
            return Err(ErrorCode::EmailExists);
        }

        let stored = dir
            .users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(ErrorCode::NotFound)?;
        stored.user.email = req.email;
        stored.user.name = req.name;
        stored.user.is_active = req.is_active;
        stored.user.updated_at = Some(Utc::now());
        stored.password = req.password;
        stored.role_ids = req.role_ids;

        let dir = &*dir;
        dir.user(id).map(|s| dir.resolve(s)).ok_or(ErrorCode::NotFound)
    }

    /// Delete a user and every token issued for it
    pub async fn delete_user(&self, id: &str) -> Result<(), ErrorCode> {
        let mut dir = self.directory.write().await;
        let before = dir.users.len();
        dir.users.retain(|u| u.user.id != id);
        if dir.users.len() == before {
            return Err(ErrorCode::NotFound);
        }
        dir.tokens.retain(|_, entry| entry.user_id != id);
        Ok(())
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ErrorCode> {
        let dir = self.directory.read().await;
        dir.user(id).map(|s| dir.resolve(s)).ok_or(ErrorCode::NotFound)
    }

    pub async fn list_users(&self, query: &UsersQuery) -> UsersPage {
        let dir = self.directory.read().await;
        let limit = query.clamped_limit();
        let users = dir
            .users
            .iter()
            .skip(query.offset())
            .take(limit as usize)
            .map(|s| dir.resolve(s))
            .collect();
        UsersPage::new(users, query.page.max(1), limit, dir.users.len() as u64)
    }

    /// Check a stored password (seeded users use `password123`)
    pub async fn check_password(&self, user_id: &str, password: &str) -> bool {
        self.directory
            .read()
            .await
            .user(user_id)
            .is_some_and(|u| u.password == password)
    }
}

fn permission(id: &str, module: &str, action: &str, is_active: bool) -> Permission {
    Permission {
        id: id.to_string(),
        name: format!("{action} {module}"),
        slug: format!("{module}.{action}"),
        description: String::new(),
        module: module.to_string(),
        action: action.to_string(),
        is_active,
    }
}

fn username(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}
