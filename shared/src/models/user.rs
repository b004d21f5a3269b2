//! User Model

use super::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
///
/// Returned by verify-token (with roles) and by the user CRUD endpoints
/// (where `roles` is usually absent and decodes empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    /// Ordered as returned by the service; evaluation order depends on it
    pub roles: Vec<Role>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the user listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl UsersPage {
    /// Build a page, deriving `total_pages` from `total` and `limit`
    pub fn new(users: Vec<User>, page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            users,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
