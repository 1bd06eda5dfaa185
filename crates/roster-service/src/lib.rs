//! # Roster Service
//!
//! Business logic for Roster: the user service and the cache layer
//! it reads through.
//!
//! Reads are cached on miss; writes remove the affected entries instead of
//! rewriting them. Cache trouble never fails a request, store errors always
//! do.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
