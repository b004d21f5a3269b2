//! Role Model

use super::Permission;
use serde::{Deserialize, Serialize};

/// Role entity (RBAC 角色)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    /// Ordered as returned by the service
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Find the first permission with the given slug
    pub fn permission(&self, slug: &str) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.slug == slug)
    }
}
