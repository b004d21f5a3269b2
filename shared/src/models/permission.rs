//! Permission Model

use serde::{Deserialize, Serialize};

/// Permission entity
///
/// `slug` is the stable identifier used for authorization matching
/// (e.g. `"users.read"`); `name` is for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub module: String,
    pub action: String,
    pub is_active: bool,
}
