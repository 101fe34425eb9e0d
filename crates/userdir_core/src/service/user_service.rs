//! User query service.
//!
//! # Responsibility
//! - Answer paginated "list users" requests with addresses attached.
//! - Provide single-user lookup and collection count.
//!
//! # Invariants
//! - Pagination metadata always reflects the full collection count taken
//!   before the page fetch.
//! - Identifier strings that do not parse as UUIDs behave exactly like
//!   identifiers of absent users.

use crate::model::user::User;
use crate::pagination::{paginate, PageRequest, PageWindow};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for user queries.
#[derive(Debug)]
pub enum UserServiceError {
    /// Requested user does not exist (or the id is not a valid UUID).
    UserNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UserNotFound(_) => None,
        }
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::UserNotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

/// One page of users plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub pagination: PageWindow,
}

/// User query facade over a repository implementation.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists one page of users with addresses eagerly attached.
    ///
    /// A page beyond the end of the collection yields an empty `users`
    /// slice; the metadata still reflects the literal requested page.
    pub fn list_users(&self, request: &PageRequest) -> Result<UserPage, UserServiceError> {
        let total_items = self.repo.count_users()?;
        let pagination = paginate(total_items, request);
        let users = self
            .repo
            .list_users(pagination.offset, pagination.page_size, true)?;

        Ok(UserPage { users, pagination })
    }

    /// Loads one user (with address) by its identifier string.
    pub fn get_user(&self, id: &str) -> Result<User, UserServiceError> {
        let user_id = Uuid::parse_str(id)
            .map_err(|_| UserServiceError::UserNotFound(id.to_string()))?;

        self.repo
            .get_user(user_id, true)?
            .ok_or_else(|| UserServiceError::UserNotFound(id.to_string()))
    }

    /// Returns the total number of users.
    pub fn count_users(&self) -> Result<u64, UserServiceError> {
        Ok(self.repo.count_users()?)
    }
}
