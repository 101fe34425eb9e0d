use rusqlite::Connection;
use std::collections::HashSet;
use userdir_core::db::open_db_in_memory;
use userdir_core::seed::{SEED_POSTS_PER_USER, SEED_USER_COUNT};
use userdir_core::{seed_if_empty, SeedOutcome};

#[test]
fn seeding_an_empty_store_writes_the_full_dataset() {
    let mut conn = open_db_in_memory().unwrap();

    let outcome = seed_if_empty(&mut conn).unwrap();
    assert_eq!(
        outcome,
        SeedOutcome::Seeded {
            user_count: SEED_USER_COUNT as u64,
            post_count: (SEED_USER_COUNT * SEED_POSTS_PER_USER) as u64,
        }
    );

    assert_eq!(table_count(&conn, "users"), SEED_USER_COUNT as i64);
    assert_eq!(table_count(&conn, "addresses"), SEED_USER_COUNT as i64);
    assert_eq!(
        table_count(&conn, "posts"),
        (SEED_USER_COUNT * SEED_POSTS_PER_USER) as i64
    );
}

#[test]
fn seeding_twice_does_not_duplicate_data() {
    let mut conn = open_db_in_memory().unwrap();

    seed_if_empty(&mut conn).unwrap();
    let second = seed_if_empty(&mut conn).unwrap();

    assert_eq!(
        second,
        SeedOutcome::AlreadySeeded {
            user_count: SEED_USER_COUNT as u64
        }
    );
    assert_eq!(table_count(&conn, "users"), SEED_USER_COUNT as i64);
}

#[test]
fn every_seeded_address_belongs_to_exactly_one_seeded_user() {
    let mut conn = open_db_in_memory().unwrap();
    seed_if_empty(&mut conn).unwrap();

    let user_ids = column_values(&conn, "SELECT id FROM users;");
    let owner_ids = column_values(&conn, "SELECT user_id FROM addresses;");

    let unique_owners: HashSet<_> = owner_ids.iter().collect();
    assert_eq!(unique_owners.len(), owner_ids.len(), "duplicate address owner");

    let user_id_set: HashSet<_> = user_ids.iter().collect();
    assert_eq!(unique_owners, user_id_set);
}

#[test]
fn every_seeded_user_has_exactly_four_posts() {
    let mut conn = open_db_in_memory().unwrap();
    seed_if_empty(&mut conn).unwrap();

    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM posts GROUP BY user_id;")
        .unwrap();
    let counts: Vec<i64> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect();

    assert_eq!(counts.len(), SEED_USER_COUNT);
    assert!(counts.iter().all(|&count| count == SEED_POSTS_PER_USER as i64));
}

#[test]
fn seeded_emails_are_unique() {
    let mut conn = open_db_in_memory().unwrap();
    seed_if_empty(&mut conn).unwrap();

    let emails = column_values(&conn, "SELECT email FROM users;");
    let unique: HashSet<_> = emails.iter().collect();
    assert_eq!(unique.len(), emails.len());
}

fn table_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn column_values(conn: &Connection, sql: &str) -> Vec<String> {
    let mut stmt = conn.prepare(sql).unwrap();
    stmt.query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}
