//! Domain model for the user directory.
//!
//! # Responsibility
//! - Define the canonical `User`, `Address` and `Post` records.
//! - Own wire-level field naming used by the transport layer.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - A user owns exactly one address and zero-or-more posts.

pub mod post;
pub mod user;
