//! SQLite user store.

use crate::row::{into_users, map_write_error, UserRow, USER_COLUMNS};
use crate::schema::SQLITE_SCHEMA;
use crate::traits::UserStore;
use async_trait::async_trait;
use roster_core::{now, NewUser, RosterError, RosterResult, User, UserId, UserPatch};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// SQLite-backed user store.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Creates a store over an open pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_active(&self, id: UserId) -> RosterResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND status = 'active'"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, new_user: NewUser) -> RosterResult<User> {
        debug!("Creating user: {}", new_user.email);

        let created_at = now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, email, age, status, created_at, updated_at)
            VALUES (?, ?, ?, 'active', ?, ?)
            RETURNING id
            ",
        )
        .bind(&new_user.name)
        .bind(new_user.email.as_str())
        .bind(i32::from(new_user.age))
        .bind(created_at)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &new_user.email))?;

        Ok(User::from_new(UserId(id), new_user, created_at))
    }

    async fn get_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Finding user by id: {}", id);
        self.find_active(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    async fn list(&self) -> RosterResult<Vec<User>> {
        debug!("Listing active users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE status = 'active' ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_users(rows)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> RosterResult<User> {
        debug!("Updating user: {}", id);

        // Take the write lock up front so concurrent updates queue on the
        // busy timeout instead of failing a read-to-write lock upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND status = 'active'"
        ))
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        let mut user = match row {
            Some(row) => User::try_from(row)?,
            None => return Err(RosterError::not_found("User", id)),
        };
        user.apply(patch, now());

        sqlx::query("UPDATE users SET name = ?, email = ?, age = ?, updated_at = ? WHERE id = ?")
            .bind(&user.name)
            .bind(user.email.as_str())
            .bind(i32::from(user.age))
            .bind(user.updated_at)
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        tx.commit().await?;
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Soft deleting user: {}", id);

        let deleted_at = now();
        let result = sqlx::query(
            r"
            UPDATE users
            SET status = 'deleted', deleted_at = ?, updated_at = ?
            WHERE id = ? AND status = 'active'
            ",
        )
        .bind(deleted_at)
        .bind(deleted_at)
        .bind(id.into_inner())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RosterError::not_found("User", id));
        }
        Ok(())
    }

    async fn health_check(&self) -> RosterResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RosterError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> RosterResult<()> {
        info!("Creating SQLite schema if missing...");
        for statement in SQLITE_SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RosterError::Database(format!("Migration failed: {}", e)))?;
        }
        info!("SQLite schema ready");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

impl std::fmt::Debug for SqliteUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteUserStore")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
