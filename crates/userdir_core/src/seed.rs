//! One-time bootstrap seeding of an empty store.
//!
//! # Responsibility
//! - Populate an empty database with a consistent synthetic dataset:
//!   50 users, one address per user, 4 posts per user.
//! - Skip entirely when users already exist (idempotent).
//!
//! # Invariants
//! - The whole seed write runs in one transaction; a mid-seed failure
//!   rolls back completely and leaves the store empty.
//! - Seeded emails are unique; every address names exactly one seeded
//!   user; every post names a seeded user.

use crate::model::post::Post;
use crate::model::user::{Address, User};
use crate::repo::post_repo::{PostRepository, SqlitePostRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoError;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Number of users written by a fresh seed run.
pub const SEED_USER_COUNT: usize = 50;
/// Number of posts written per seeded user.
pub const SEED_POSTS_PER_USER: usize = 4;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Clara", "Dexter", "Elena", "Felix", "Greta", "Hugo", "Iris", "Jonas",
    "Klara", "Leon", "Mara", "Nils", "Olive", "Paulo", "Quinn", "Rosa", "Samir", "Tilda",
];
const LAST_NAMES: &[&str] = &[
    "Acker", "Bishop", "Castillo", "Dvorak", "Engel", "Fialho", "Graner", "Holt", "Ibarra",
    "Jensen", "Keller", "Lindqvist", "Moreau", "Novak", "Okafor", "Petit", "Quiros", "Reyes",
    "Sanda", "Toledo",
];
const STREETS: &[&str] = &[
    "Maple Avenue", "Oak Street", "Cedar Lane", "Birch Road", "Willow Court", "Elm Drive",
    "Juniper Way", "Laurel Place", "Poplar Boulevard", "Spruce Terrace",
];
const CITIES: &[(&str, &str)] = &[
    ("Portland", "OR"),
    ("Austin", "TX"),
    ("Madison", "WI"),
    ("Asheville", "NC"),
    ("Boulder", "CO"),
    ("Savannah", "GA"),
    ("Ithaca", "NY"),
    ("Tacoma", "WA"),
];
const POST_TITLES: &[&str] = &[
    "Notes from the weekend",
    "A short field report",
    "Things I learned this week",
    "On keeping a tidy workshop",
];
const POST_BODIES: &[&str] = &[
    "A longer write-up of observations collected over the last few days, \
     kept here so the thread of thought is not lost.",
    "Some scattered remarks, mostly for future reference. Nothing here is \
     final; everything is subject to revision.",
    "The usual mix of half-finished ideas and open questions. Written \
     quickly, filed under miscellaneous.",
    "A summary of what worked, what did not, and the parts that still \
     need another pass before they are worth sharing.",
];

/// Result of one `seed_if_empty` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Store already had users; nothing was written.
    AlreadySeeded { user_count: u64 },
    /// Fresh dataset was written.
    Seeded { user_count: u64, post_count: u64 },
}

/// Error from a seeding run. Callers must treat this as fatal to startup.
#[derive(Debug)]
pub enum SeedError {
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "seeding failed: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Seeds the store exactly once.
///
/// Re-running against a populated store is a no-op, so startup can call
/// this unconditionally.
///
/// # Side effects
/// - Emits `seed` logging events with duration and status.
pub fn seed_if_empty(conn: &mut Connection) -> Result<SeedOutcome, SeedError> {
    let started_at = Instant::now();
    info!("event=seed module=seed status=start");

    let existing = {
        let users = SqliteUserRepository::try_new(conn)?;
        users.count_users()?
    };
    if existing > 0 {
        info!("event=seed module=seed status=skip user_count={existing}");
        return Ok(SeedOutcome::AlreadySeeded {
            user_count: existing,
        });
    }

    let (users, addresses, posts) = build_dataset();

    let tx = conn.transaction()?;
    let write_result = (|| -> Result<(), SeedError> {
        // Users and addresses must land before posts so every post
        // references an already-present owner.
        let user_repo = SqliteUserRepository::try_new(&tx)?;
        user_repo.create_users_with_addresses(&users, &addresses)?;

        let post_repo = SqlitePostRepository::try_new(&tx)?;
        post_repo.create_posts(&posts)?;
        Ok(())
    })();

    if let Err(err) = write_result {
        error!(
            "event=seed module=seed status=error duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        );
        // Rollback happens on drop of the uncommitted transaction.
        return Err(err);
    }
    tx.commit()?;

    info!(
        "event=seed module=seed status=ok user_count={} post_count={} duration_ms={}",
        users.len(),
        posts.len(),
        started_at.elapsed().as_millis()
    );

    Ok(SeedOutcome::Seeded {
        user_count: users.len() as u64,
        post_count: posts.len() as u64,
    })
}

fn build_dataset() -> (Vec<User>, Vec<Address>, Vec<Post>) {
    let mut users = Vec::with_capacity(SEED_USER_COUNT);
    let mut addresses = Vec::with_capacity(SEED_USER_COUNT);
    let mut posts = Vec::with_capacity(SEED_USER_COUNT * SEED_POSTS_PER_USER);

    for index in 0..SEED_USER_COUNT {
        let first = FIRST_NAMES[index % FIRST_NAMES.len()];
        let last = LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()];
        // Index suffix keeps emails unique even when name pairs repeat.
        let email = format!(
            "{}.{}.{index}@userdir.example",
            first.to_ascii_lowercase(),
            last.to_ascii_lowercase()
        );
        let user = User::new(first, last, email);

        let (city, state) = CITIES[index % CITIES.len()];
        addresses.push(Address::for_user(
            user.id,
            format!("{} {}", 100 + index * 7, STREETS[index % STREETS.len()]),
            city,
            state,
            format!("{:05}", 10000 + index * 53),
        ));

        for post_index in 0..SEED_POSTS_PER_USER {
            posts.push(Post::new(
                user.id,
                POST_TITLES[post_index % POST_TITLES.len()],
                POST_BODIES[post_index % POST_BODIES.len()],
            ));
        }

        users.push(user);
    }

    (users, addresses, posts)
}
