//! PostgreSQL user store.

use crate::row::{into_users, map_write_error, UserRow, USER_COLUMNS};
use crate::schema::POSTGRES_SCHEMA;
use crate::traits::UserStore;
use async_trait::async_trait;
use roster_core::{now, NewUser, RosterError, RosterResult, User, UserId, UserPatch};
use sqlx::PgPool;
use tracing::{debug, info};

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Creates a store over an open pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_active(&self, id: UserId) -> RosterResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND status = 'active'"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, new_user: NewUser) -> RosterResult<User> {
        debug!("Creating user: {}", new_user.email);

        let created_at = now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, email, age, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'active', $4, $4)
            RETURNING id
            ",
        )
        .bind(&new_user.name)
        .bind(new_user.email.as_str())
        .bind(i32::from(new_user.age))
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

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND status = 'active' FOR UPDATE"
        ))
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        let mut user = match row {
            Some(row) => User::try_from(row)?,
            None => return Err(RosterError::not_found("User", id)),
        };
        user.apply(patch, now());

        sqlx::query(
            "UPDATE users SET name = $1, email = $2, age = $3, updated_at = $4 WHERE id = $5",
        )
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
            SET status = 'deleted', deleted_at = $1, updated_at = $1
            WHERE id = $2 AND status = 'active'
            ",
        )
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
        // Concurrent CREATE ... IF NOT EXISTS can still race on the catalog;
        // a single-instance bootstrap is assumed.
        info!("Creating PostgreSQL schema if missing...");
        for statement in POSTGRES_SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RosterError::Database(format!("Migration failed: {}", e)))?;
        }
        info!("PostgreSQL schema ready");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

impl std::fmt::Debug for PostgresUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresUserStore")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
