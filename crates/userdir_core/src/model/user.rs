//! User and address domain records.
//!
//! # Responsibility
//! - Define the `User` aggregate and its one-to-one `Address`.
//! - Keep serialized field names aligned with the public API contract.
//!
//! # Invariants
//! - `Address.user_id` always names the owning user and is unique per user.
//! - `User.email` is unique across the whole collection (enforced by the
//!   storage schema, surfaced as a conflict error on violation).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user record.
pub type UserId = Uuid;

/// Stable identifier for an address record.
pub type AddressId = Uuid;

/// Postal address owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    /// Owning user. Unique across all addresses.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
}

impl Address {
    /// Creates an address for the given owner with a fresh identifier.
    pub fn for_user(
        user_id: UserId,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// User record with its optionally attached address.
///
/// `address` is `None` on read paths that skip the join; it is always
/// present in seeded data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl User {
    /// Creates a user with a fresh identifier and no attached address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            address: None,
        }
    }
}
