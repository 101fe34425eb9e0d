//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide paginated, insertion-ordered read APIs over `users`.
//! - Attach the one-to-one address row when callers request it.
//! - Own the bulk users+addresses insert used by the seeder.
//!
//! # Invariants
//! - Listing order is insertion order (`rowid ASC`) so pagination windows
//!   are stable across requests.
//! - `create_users_with_addresses` runs inside the caller's transaction;
//!   it never commits on its own.

use crate::model::user::{Address, User, UserId};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "u.id, u.first_name, u.last_name, u.email";
const ADDRESS_COLUMNS: &str = "a.id AS address_id, a.user_id AS address_user_id, \
     a.street, a.city, a.state, a.zip_code";

/// Repository interface for user read and bulk-seed operations.
pub trait UserRepository {
    /// Returns the total number of users.
    fn count_users(&self) -> RepoResult<u64>;
    /// Lists users in insertion order with offset/limit applied.
    fn list_users(&self, offset: u64, limit: u32, include_address: bool)
        -> RepoResult<Vec<User>>;
    /// Loads one user by id.
    fn get_user(&self, id: UserId, include_address: bool) -> RepoResult<Option<User>>;
    /// Cheap existence probe used to validate post ownership references.
    fn user_exists(&self, id: UserId) -> RepoResult<bool>;
    /// Bulk-inserts users and their addresses (seed path only).
    fn create_users_with_addresses(
        &self,
        users: &[User],
        addresses: &[Address],
    ) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "users")?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn count_users(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn list_users(
        &self,
        offset: u64,
        limit: u32,
        include_address: bool,
    ) -> RepoResult<Vec<User>> {
        let sql = if include_address {
            format!(
                "SELECT {USER_COLUMNS}, {ADDRESS_COLUMNS}
                 FROM users u
                 LEFT JOIN addresses a ON a.user_id = u.id
                 ORDER BY u.rowid ASC
                 LIMIT ?1 OFFSET ?2;"
            )
        } else {
            format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 ORDER BY u.rowid ASC
                 LIMIT ?1 OFFSET ?2;"
            )
        };

        // Offsets beyond i64 cannot address any row; clamp instead of
        // wrapping into a negative bind value.
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![i64::from(limit), offset])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row, include_address)?);
        }

        Ok(users)
    }

    fn get_user(&self, id: UserId, include_address: bool) -> RepoResult<Option<User>> {
        let sql = if include_address {
            format!(
                "SELECT {USER_COLUMNS}, {ADDRESS_COLUMNS}
                 FROM users u
                 LEFT JOIN addresses a ON a.user_id = u.id
                 WHERE u.id = ?1;"
            )
        } else {
            format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 WHERE u.id = ?1;"
            )
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row, include_address)?));
        }

        Ok(None)
    }

    fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(0);
        Ok(exists == 1)
    }

    fn create_users_with_addresses(
        &self,
        users: &[User],
        addresses: &[Address],
    ) -> RepoResult<()> {
        let mut insert_user = self.conn.prepare(
            "INSERT INTO users (id, first_name, last_name, email)
             VALUES (?1, ?2, ?3, ?4);",
        )?;
        for user in users {
            insert_user.execute(params![
                user.id.to_string(),
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.email.as_str(),
            ])?;
        }

        let mut insert_address = self.conn.prepare(
            "INSERT INTO addresses (id, user_id, street, city, state, zip_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        )?;
        for address in addresses {
            insert_address.execute(params![
                address.id.to_string(),
                address.user_id.to_string(),
                address.street.as_str(),
                address.city.as_str(),
                address.state.as_str(),
                address.zip_code.as_str(),
            ])?;
        }

        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>, include_address: bool) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "users.id")?;

    let address = if include_address {
        match row.get::<_, Option<String>>("address_id")? {
            Some(address_id_text) => {
                let owner_text: String = row.get("address_user_id")?;
                Some(Address {
                    id: parse_uuid(&address_id_text, "addresses.id")?,
                    user_id: parse_uuid(&owner_text, "addresses.user_id")?,
                    street: row.get("street")?,
                    city: row.get("city")?,
                    state: row.get("state")?,
                    zip_code: row.get("zip_code")?,
                })
            }
            None => None,
        }
    } else {
        None
    };

    Ok(User {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        address,
    })
}
