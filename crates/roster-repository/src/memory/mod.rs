//! Process-local user store.

use crate::traits::UserStore;
use async_trait::async_trait;
use roster_core::{now, Email, NewUser, RosterError, RosterResult, User, UserId, UserPatch};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
struct State {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

/// In-memory user store.
///
/// Holds deleted rows like the SQL stores do. Every operation takes the
/// lock once, so writes are atomic per record.
#[derive(Debug)]
pub struct InMemoryUserStore {
    state: Mutex<State>,
}

impl InMemoryUserStore {
    /// Creates an empty store; the first id handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> RosterResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| RosterError::internal("In-memory store lock poisoned"))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn email_taken(&self, email: &Email, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.is_active() && &u.email == email && Some(u.id) != except)
    }

    fn active_mut(&mut self, id: UserId) -> RosterResult<&mut User> {
        self.users
            .get_mut(&id)
            .filter(|u| u.is_active())
            .ok_or_else(|| RosterError::not_found("User", id))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> RosterResult<User> {
        debug!("Creating user: {}", new_user.email);
        let mut state = self.lock()?;

        if state.email_taken(&new_user.email, None) {
            return Err(RosterError::duplicate_email(new_user.email.as_str()));
        }

        let id = UserId(state.next_id);
        state.next_id += 1;
        let user = User::from_new(id, new_user, now());
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Finding user by id: {}", id);
        let state = self.lock()?;
        state
            .users
            .get(&id)
            .filter(|u| u.is_active())
            .cloned()
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    async fn list(&self) -> RosterResult<Vec<User>> {
        debug!("Listing active users");
        let state = self.lock()?;
        Ok(state.users.values().filter(|u| u.is_active()).cloned().collect())
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> RosterResult<User> {
        debug!("Updating user: {}", id);
        let mut state = self.lock()?;

        state.active_mut(id)?;
        if let Some(email) = &patch.email {
            if state.email_taken(email, Some(id)) {
                return Err(RosterError::duplicate_email(email.as_str()));
            }
        }

        let user = state.active_mut(id)?;
        user.apply(patch, now());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Soft deleting user: {}", id);
        let mut state = self.lock()?;
        state.active_mut(id)?.mark_deleted(now());
        Ok(())
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.lock().map(|_| ())
    }

    async fn run_migrations(&self) -> RosterResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::UserStatus;

    fn new_user(name: &str, email: &str, age: u8) -> NewUser {
        NewUser::new(name, Email::new(email).unwrap(), age).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let ann = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();
        let bob = store.create(new_user("Bob", "bob@x.com", 40)).await.unwrap();

        assert_eq!(ann.id, UserId(1));
        assert_eq!(bob.id, UserId(2));
        assert_eq!(ann.status, UserStatus::Active);
        assert_eq!(ann.created_at, ann.updated_at);
    }

    #[tokio::test]
    async fn test_get_returns_created_user() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();
        let found = store.get_by_id(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = InMemoryUserStore::new();
        let err = store.get_by_id(UserId(99)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();

        let err = store
            .create(new_user("Other", "ANN@x.com", 22))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEmail(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_reusable_after_delete() {
        let store = InMemoryUserStore::new();
        let ann = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();
        store.delete(ann.id).await.unwrap();

        let again = store.create(new_user("Ann", "ann@x.com", 31)).await.unwrap();
        assert_ne!(again.id, ann.id);
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let store = InMemoryUserStore::new();
        let ann = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();

        let updated = store.update(ann.id, UserPatch::name("X")).await.unwrap();
        assert_eq!(updated.name, "X");
        assert_eq!(updated.email, ann.email);
        assert_eq!(updated.age, 30);
        assert!(updated.updated_at > ann.updated_at);
        assert_eq!(store.get_by_id(ann.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();
        let bob = store.create(new_user("Bob", "bob@x.com", 40)).await.unwrap();

        let patch = UserPatch {
            email: Some(Email::new("ann@x.com").unwrap()),
            ..UserPatch::default()
        };
        let err = store.update(bob.id, patch).await.unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEmail(_)));
        assert_eq!(store.get_by_id(bob.id).await.unwrap().email.as_str(), "bob@x.com");
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let store = InMemoryUserStore::new();
        let ann = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();

        let patch = UserPatch {
            email: Some(ann.email.clone()),
            ..UserPatch::default()
        };
        assert!(store.update(ann.id, patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_hides_user() {
        let store = InMemoryUserStore::new();
        let ann = store.create(new_user("Ann", "ann@x.com", 30)).await.unwrap();
        let bob = store.create(new_user("Bob", "bob@x.com", 40)).await.unwrap();

        store.delete(ann.id).await.unwrap();

        assert!(store.get_by_id(ann.id).await.unwrap_err().is_not_found());
        let ids: Vec<_> = store.list().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![bob.id]);
        assert!(store.delete(ann.id).await.unwrap_err().is_not_found());
        assert!(store
            .update(ann.id, UserPatch::name("Z"))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = InMemoryUserStore::new();
        for i in 0..5u8 {
            store
                .create(new_user("U", &format!("u{i}@x.com"), 20 + i))
                .await
                .unwrap();
        }
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
