//! Post domain record.
//!
//! # Responsibility
//! - Define the `Post` record owned by one user.
//! - Provide the wall-clock timestamp source for creation times.
//!
//! # Invariants
//! - `user_id` always names an existing user at creation time.
//! - `created_at` is epoch milliseconds, set once at creation and never
//!   updated; posts are mutable only by deletion.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a post record.
pub type PostId = Uuid;

/// A post authored by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    /// Creation timestamp in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Post {
    /// Creates a post with a fresh identifier and the current wall-clock
    /// creation timestamp.
    pub fn new(user_id: UserId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            body: body.into(),
            created_at: current_epoch_ms(),
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clamps to zero for clocks set before the epoch instead of panicking.
pub fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
