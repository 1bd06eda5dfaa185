//! Integration tests for `PostgresUserStore`.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::{new_user, TestDatabase};
use roster_core::{RosterError, UserId, UserPatch};
use roster_repository::UserStore;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_get_and_list() {
    let db = TestDatabase::new().await;
    let store = db.store();

    let ann = store.create(new_user("Ann", "ann@example.com", 30)).await.unwrap();
    let bob = store.create(new_user("Bob", "bob@example.com", 40)).await.unwrap();

    assert_eq!(store.get_by_id(ann.id).await.unwrap(), ann);
    let ids: Vec<UserId> = store.list().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![ann.id, bob.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_rejected() {
    let db = TestDatabase::new().await;
    let store = db.store();

    store.create(new_user("Ann", "ann@example.com", 30)).await.unwrap();
    let err = store
        .create(new_user("Other", "ann@example.com", 31))
        .await
        .unwrap_err();

    assert!(matches!(err, RosterError::DuplicateEmail(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_soft_delete() {
    let db = TestDatabase::new().await;
    let store = db.store();

    let ann = store.create(new_user("Ann", "ann@example.com", 30)).await.unwrap();
    let updated = store.update(ann.id, UserPatch::name("X")).await.unwrap();
    assert_eq!(updated.name, "X");
    assert!(updated.updated_at > ann.updated_at);
    assert_eq!(store.get_by_id(ann.id).await.unwrap(), updated);

    store.delete(ann.id).await.unwrap();
    assert!(store.get_by_id(ann.id).await.unwrap_err().is_not_found());
    assert!(store.delete(ann.id).await.unwrap_err().is_not_found());
    assert!(store.list().await.unwrap().is_empty());
}
