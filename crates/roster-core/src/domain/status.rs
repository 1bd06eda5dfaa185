//! User status value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a user record.
///
/// Deletion is soft: a deleted record stays in storage with this status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Visible to reads and holds its email.
    #[default]
    Active,
    /// Soft-deleted.
    Deleted,
}

impl UserStatus {
    /// Checks if the record is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    /// Parses the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_active() {
        assert_eq!(UserStatus::default(), UserStatus::Active);
        assert!(UserStatus::Active.is_active());
        assert!(!UserStatus::Deleted.is_active());
    }

    #[test]
    fn test_status_parse_matches_display() {
        for status in [UserStatus::Active, UserStatus::Deleted] {
            assert_eq!(UserStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(UserStatus::parse("suspended"), None);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&UserStatus::Deleted).unwrap();
        assert_eq!(json, "\"deleted\"");
    }
}
