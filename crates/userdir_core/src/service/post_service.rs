//! Post use-case service.
//!
//! # Responsibility
//! - Create posts with validation and an explicit owner-existence check.
//! - Delete posts and list a user's posts.
//!
//! # Invariants
//! - Validation failures never touch the store.
//! - The owner-existence check runs before the insert, so a missing user
//!   surfaces as a clean not-found instead of a foreign-key failure.
//! - Listing posts for an unknown user yields an empty sequence, the same
//!   as for a user without posts.

use crate::model::post::Post;
use crate::repo::post_repo::PostRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for post use-cases.
#[derive(Debug)]
pub enum PostServiceError {
    /// A required field is missing or empty.
    Validation(&'static str),
    /// Referenced owner does not exist (or the id is not a valid UUID).
    UserNotFound(String),
    /// Target post does not exist (or the id is not a valid UUID).
    PostNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for PostServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(field) => write!(f, "missing required field: {field}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PostServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PostServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::PostNotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

/// Post service facade over user and post repositories.
///
/// Holds the user repository only for the owner-existence referential
/// check on creation.
pub struct PostService<U: UserRepository, P: PostRepository> {
    users: U,
    posts: P,
}

impl<U: UserRepository, P: PostRepository> PostService<U, P> {
    /// Creates a service using the provided repository implementations.
    pub fn new(users: U, posts: P) -> Self {
        Self { users, posts }
    }

    /// Lists all posts owned by the given user, oldest first.
    ///
    /// An unknown (or unparseable) user id yields an empty vec rather
    /// than an error, matching the read contract for absent owners.
    pub fn list_posts_for_user(&self, user_id: &str) -> Result<Vec<Post>, PostServiceError> {
        let Ok(user_id) = Uuid::parse_str(user_id) else {
            return Ok(Vec::new());
        };

        Ok(self.posts.list_posts_by_user(user_id)?)
    }

    /// Validates input, checks the owner exists, then persists one post.
    pub fn create_post(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Post, PostServiceError> {
        if user_id.is_empty() {
            return Err(PostServiceError::Validation("userId"));
        }
        if title.is_empty() {
            return Err(PostServiceError::Validation("title"));
        }
        if body.is_empty() {
            return Err(PostServiceError::Validation("body"));
        }

        let owner_id = Uuid::parse_str(user_id)
            .map_err(|_| PostServiceError::UserNotFound(user_id.to_string()))?;
        if !self.users.user_exists(owner_id)? {
            return Err(PostServiceError::UserNotFound(user_id.to_string()));
        }

        let post = Post::new(owner_id, title, body);
        self.posts.create_post(&post)?;

        info!(
            "event=post_create module=service status=ok post_id={} user_id={owner_id}",
            post.id
        );
        Ok(post)
    }

    /// Deletes one post by its identifier string.
    pub fn delete_post(&self, id: &str) -> Result<(), PostServiceError> {
        let post_id =
            Uuid::parse_str(id).map_err(|_| PostServiceError::PostNotFound(id.to_string()))?;

        self.posts.delete_post(post_id)?;

        info!("event=post_delete module=service status=ok post_id={post_id}");
        Ok(())
    }
}
