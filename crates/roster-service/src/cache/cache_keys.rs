//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Key holding the list of all active users.
pub const ALL_USERS: &str = "users:all";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("user:{}", id)
}

/// Keys a write to user `id` has to invalidate.
#[must_use]
pub fn user_write_set(id: UserId) -> [String; 2] {
    [user_by_id(id), ALL_USERS.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_by_id_key() {
        assert_eq!(user_by_id(UserId(42)), "user:42");
    }

    #[test]
    fn test_all_users_key() {
        assert_eq!(ALL_USERS, "users:all");
    }

    #[test]
    fn test_user_write_set() {
        assert_eq!(user_write_set(UserId(3)), ["user:3".to_string(), "users:all".to_string()]);
    }
}
