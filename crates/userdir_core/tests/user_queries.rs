use rusqlite::Connection;
use userdir_core::db::open_db_in_memory;
use userdir_core::{
    Address, PageRequest, SqliteUserRepository, User, UserRepository, UserService,
    UserServiceError,
};

fn insert_users(conn: &Connection, count: usize) -> Vec<User> {
    let users: Vec<User> = (0..count)
        .map(|index| User::new(format!("First{index}"), format!("Last{index}"), format!("user{index}@example.com")))
        .collect();
    let addresses: Vec<Address> = users
        .iter()
        .enumerate()
        .map(|(index, user)| {
            Address::for_user(
                user.id,
                format!("{} Test Street", 100 + index),
                "Springfield",
                "IL",
                "62704",
            )
        })
        .collect();

    let repo = SqliteUserRepository::try_new(conn).unwrap();
    repo.create_users_with_addresses(&users, &addresses).unwrap();
    users
}

#[test]
fn page_three_of_twenty_five_users_matches_expected_window() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 25);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let page = service
        .list_users(&PageRequest {
            page: Some(3),
            size: Some(10),
        })
        .unwrap();

    assert_eq!(page.pagination.offset, 20);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total_items, 25);
    assert!(!page.pagination.has_next);
    assert!(page.pagination.has_prev);
    assert_eq!(page.users.len(), 5);
}

#[test]
fn listed_users_carry_their_addresses_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let inserted = insert_users(&conn, 3);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let page = service.list_users(&PageRequest::default()).unwrap();

    assert_eq!(page.users.len(), 3);
    for (listed, expected) in page.users.iter().zip(&inserted) {
        assert_eq!(listed.id, expected.id);
        assert_eq!(listed.email, expected.email);
        let address = listed.address.as_ref().expect("address attached");
        assert_eq!(address.user_id, expected.id);
    }
}

#[test]
fn page_beyond_the_end_is_empty_with_literal_metadata() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 25);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let page = service
        .list_users(&PageRequest {
            page: Some(9),
            size: Some(10),
        })
        .unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.pagination.current_page, 9);
    assert!(!page.pagination.has_next);
    assert!(page.pagination.has_prev);
}

#[test]
fn offset_beyond_i64_range_yields_an_empty_page() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 3);

    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let users = repo.list_users(u64::MAX, 10, false).unwrap();

    assert!(users.is_empty());
}

#[test]
fn invalid_page_request_falls_back_to_first_page_of_ten() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 25);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let page = service
        .list_users(&PageRequest::from_raw(Some("bogus"), Some("-2")))
        .unwrap();

    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.page_size, 10);
    assert_eq!(page.users.len(), 10);
}

#[test]
fn get_user_returns_user_with_address() {
    let conn = open_db_in_memory().unwrap();
    let inserted = insert_users(&conn, 2);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user = service.get_user(&inserted[1].id.to_string()).unwrap();

    assert_eq!(user.id, inserted[1].id);
    assert_eq!(user.address.as_ref().unwrap().user_id, inserted[1].id);
}

#[test]
fn get_user_with_unknown_or_malformed_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 1);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    match service.get_user("missing-id") {
        Err(UserServiceError::UserNotFound(id)) => assert_eq!(id, "missing-id"),
        other => panic!("unexpected result: {other:?}"),
    }

    let absent = uuid::Uuid::new_v4().to_string();
    assert!(matches!(
        service.get_user(&absent),
        Err(UserServiceError::UserNotFound(_))
    ));
}

#[test]
fn count_users_reflects_inserted_rows() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 7);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    assert_eq!(service.count_users().unwrap(), 7);
}

#[test]
fn user_serializes_with_wire_field_names() {
    let conn = open_db_in_memory().unwrap();
    insert_users(&conn, 1);

    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let page = service.list_users(&PageRequest::default()).unwrap();
    let value = serde_json::to_value(&page.users[0]).unwrap();

    assert!(value.get("firstname").is_some());
    assert!(value.get("lastname").is_some());
    assert!(value["address"].get("zipCode").is_some());
    assert!(value["address"].get("userId").is_some());
}
