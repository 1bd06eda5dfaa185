//! # Roster Repository
//!
//! Durable storage for user records behind the [`UserStore`] trait.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserStore>
//! SqliteUserStore | PostgresUserStore | InMemoryUserStore
//!   ↓
//! SQLite | PostgreSQL | process memory
//! ```
//!
//! All backends share the same contract: soft delete, email uniqueness
//! among active users, id-ascending listing and strictly increasing
//! `updated_at`.

pub mod memory;
pub mod pool;
pub mod postgres;
mod row;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use memory::InMemoryUserStore;
pub use pool::*;
pub use postgres::PostgresUserStore;
pub use sqlite::SqliteUserStore;
pub use traits::*;
