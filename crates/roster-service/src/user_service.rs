//! User service trait definition.

use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId, UserPatch};

/// User service trait.
///
/// Reads go through the cache, writes go to the store and invalidate the
/// cache entries they affect.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, new_user: NewUser) -> RosterResult<User>;

    /// Gets an active user by ID.
    async fn get_user(&self, id: UserId) -> RosterResult<User>;

    /// Lists all active users, ordered by ID.
    async fn list_users(&self) -> RosterResult<Vec<User>>;

    /// Applies a partial update.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> RosterResult<User>;

    /// Soft-deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;

    /// Checks that the underlying store is reachable.
    async fn health_check(&self) -> RosterResult<()>;
}
