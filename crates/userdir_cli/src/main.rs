//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load configuration, open the store, run the idempotent seed, and
//!   print entity counts.
//! - Keep output deterministic for quick local sanity checks.

use userdir_core::db::open_db;
use userdir_core::repo::post_repo::PostRepository;
use userdir_core::repo::user_repo::UserRepository;
use userdir_core::{
    init_logging, seed_if_empty, Config, SeedOutcome, SqlitePostRepository, SqliteUserRepository,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("userdir_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = Config::from_env().map_err(|err| err.to_string())?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(
            config.app_env.default_log_level(),
            &log_dir.to_string_lossy(),
        )?;
    }

    let mut conn = open_db(&config.db_path).map_err(|err| err.to_string())?;

    match seed_if_empty(&mut conn).map_err(|err| err.to_string())? {
        SeedOutcome::Seeded { user_count, .. } => {
            println!("userdir seeded user_count={user_count}");
        }
        SeedOutcome::AlreadySeeded { user_count } => {
            println!("userdir already seeded user_count={user_count}");
        }
    }

    let users = SqliteUserRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let posts = SqlitePostRepository::try_new(&conn).map_err(|err| err.to_string())?;
    println!(
        "userdir version={} users={} posts={}",
        userdir_core::core_version(),
        users.count_users().map_err(|err| err.to_string())?,
        posts.count_posts().map_err(|err| err.to_string())?,
    );

    Ok(())
}
