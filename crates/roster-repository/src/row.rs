//! Row mapping shared by the SQL stores.

use chrono::{DateTime, Utc};
use roster_core::{Email, RosterError, User, UserId, UserStatus};
use sqlx::FromRow;

pub(crate) const USER_COLUMNS: &str =
    "id, name, email, age, status, created_at, updated_at, deleted_at";

/// Database row representation of a user.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: i64,
    name: String,
    email: String,
    age: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let status = UserStatus::parse(&row.status)
            .ok_or_else(|| RosterError::Database(format!("Unknown user status: {}", row.status)))?;
        let age = u8::try_from(row.age)
            .map_err(|_| RosterError::Database(format!("Age out of range: {}", row.age)))?;

        Ok(User {
            id: UserId(row.id),
            name: row.name,
            email: Email::new_unchecked(row.email),
            age,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

pub(crate) fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, RosterError> {
    rows.into_iter().map(User::try_from).collect()
}

/// Maps a write error, turning unique violations into `DuplicateEmail`.
pub(crate) fn map_write_error(err: sqlx::Error, email: &Email) -> RosterError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RosterError::duplicate_email(email.as_str())
        }
        _ => RosterError::from(err),
    }
}
