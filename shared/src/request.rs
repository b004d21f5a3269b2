//! Request types for the shared crate
//!
//! Query parameters sent to listing endpoints

use serde::{Deserialize, Serialize};

/// Pagination query for the user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl UsersQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Get the offset into the full listing
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.clamped_limit() as usize
    }

    /// Get the limit (clamped to 1..=100)
    pub fn clamped_limit(&self) -> u32 {
        self.limit.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q: UsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q, UsersQuery::default());
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_offset_and_clamp() {
        assert_eq!(UsersQuery::new(3, 10).offset(), 20);
        assert_eq!(UsersQuery::new(0, 10).offset(), 0);
        assert_eq!(UsersQuery::new(1, 500).clamped_limit(), 100);
        assert_eq!(UsersQuery::new(2, 0).offset(), 1);
    }
}
