//! Core domain logic for the userdir backend.
//! This crate is the single source of truth for pagination, seeding and
//! referential-integrity invariants; HTTP transport lives elsewhere.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{AppEnv, Config, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::post::{Post, PostId};
pub use model::user::{Address, AddressId, User, UserId};
pub use pagination::{paginate, PageRequest, PageWindow};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_if_empty, SeedError, SeedOutcome};
pub use service::post_service::{PostService, PostServiceError};
pub use service::user_service::{UserPage, UserService, UserServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
