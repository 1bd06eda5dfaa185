//! Domain model: the user entity and its value objects.

pub mod email;
pub mod status;
pub mod user;

pub use email::{Email, EmailError};
pub use status::UserStatus;
pub use user::{next_update_timestamp, now, NewUser, User, UserPatch, MAX_AGE, MIN_AGE};
