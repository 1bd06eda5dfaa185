//! User entity.

use super::{Email, UserStatus};
use crate::{RosterError, RosterResult, UserId};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Youngest accepted age.
pub const MIN_AGE: u8 = 1;

/// Oldest accepted age.
pub const MAX_AGE: u8 = 120;

/// Current time at the precision every store can round-trip (microseconds).
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` value for a record last touched at `previous`.
///
/// Always strictly greater than `previous`, even when the clock has not
/// advanced past it.
#[must_use]
pub fn next_update_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous.trunc_subsecs(6) + Duration::microseconds(1);
    now.trunc_subsecs(6).max(floor)
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Display name, never blank.
    pub name: String,

    /// Email address, unique among active users.
    pub email: Email,

    /// Age in years.
    pub age: u8,

    /// Soft-delete discriminant.
    pub status: UserStatus,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Set together with `status == Deleted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Materializes a freshly inserted record.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
            status: UserStatus::Active,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        }
    }

    /// Checks if the user is active (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Applies the provided fields of a patch and refreshes `updated_at`.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        self.updated_at = next_update_timestamp(self.updated_at, now);
    }

    /// Soft-deletes the record.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        let at = next_update_timestamp(self.updated_at, now);
        self.status = UserStatus::Deleted;
        self.deleted_at = Some(at);
        self.updated_at = at;
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub age: u8,
}

impl NewUser {
    /// Builds a new user input, rejecting a blank name or an out-of-range age.
    pub fn new(name: impl Into<String>, email: Email, age: u8) -> RosterResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_age(age)?;
        Ok(Self { name, email, age })
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub age: Option<u8>,
}

impl UserPatch {
    /// Builds a patch, validating only the provided fields.
    pub fn new(name: Option<String>, email: Option<Email>, age: Option<u8>) -> RosterResult<Self> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        if let Some(age) = age {
            validate_age(age)?;
        }
        Ok(Self { name, email, age })
    }

    /// Patch that only renames.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

fn validate_name(name: &str) -> RosterResult<()> {
    if name.trim().is_empty() {
        return Err(RosterError::validation("name: Name is required"));
    }
    Ok(())
}

fn validate_age(age: u8) -> RosterResult<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RosterError::validation(format!(
            "age: Age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(())
}
