//! User-related DTOs.

use chrono::{DateTime, Utc};
use roster_core::rules::not_blank;
use roster_core::{Email, NewUser, RosterError, User, UserId, UserPatch, ValidateExt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i64,
}

/// Request to update a user. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank", message = "Name cannot be blank"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<i64>,
}

fn parse_email(email: String) -> Result<Email, RosterError> {
    Email::new(email).map_err(|e| RosterError::validation(format!("email: {}", e)))
}

fn parse_age(age: i64) -> Result<u8, RosterError> {
    u8::try_from(age)
        .map_err(|_| RosterError::validation("age: Age must be between 1 and 120"))
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = RosterError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        request.validate_request()?;
        NewUser::new(request.name, parse_email(request.email)?, parse_age(request.age)?)
    }
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = RosterError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        request.validate_request()?;
        UserPatch::new(
            request.name,
            request.email.map(parse_email).transpose()?,
            request.age.map(parse_age).transpose()?,
        )
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.into(),
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
