//! Store trait definitions.

use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId, UserPatch};

/// Durable record storage for users.
///
/// Soft-deleted records count as absent for every read and write.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new active user and assigns its id.
    ///
    /// Fails with `DuplicateEmail` if an active user already holds the email.
    async fn create(&self, new_user: NewUser) -> RosterResult<User>;

    /// Finds an active user by id, or `NotFound`.
    async fn get_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Lists all active users ordered by id ascending.
    async fn list(&self) -> RosterResult<Vec<User>>;

    /// Applies the provided fields of `patch` and refreshes `updated_at`.
    async fn update(&self, id: UserId, patch: UserPatch) -> RosterResult<User>;

    /// Soft-deletes an active user, or `NotFound`.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> RosterResult<()>;

    /// Creates the schema if it does not exist.
    async fn run_migrations(&self) -> RosterResult<()>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
