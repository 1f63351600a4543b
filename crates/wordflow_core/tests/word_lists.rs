use rusqlite::{params, Connection};
use uuid::Uuid;
use wordflow_core::db::migrations::latest_version;
use wordflow_core::db::open_db_in_memory;
use wordflow_core::{
    ConflictKind, CreateWordListRequest, RepoError, SqliteWordListRepository,
    SqliteWordRepository, ValidationError, WordList, WordListRepository, WordListService,
    WordService,
};

fn service(
    conn: &Connection,
) -> WordListService<SqliteWordListRepository<'_>, SqliteWordRepository<'_>> {
    WordListService::new(
        SqliteWordListRepository::try_new(conn).unwrap(),
        SqliteWordRepository::try_new(conn).unwrap(),
    )
}

fn list_with_fixed_id(id: &str, slug: &str) -> WordList {
    let mut list = WordList::new(slug, slug);
    list.id = Uuid::parse_str(id).unwrap();
    list
}

#[test]
fn create_derives_slug_and_get_by_slug_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = CreateWordListRequest {
        theme: Some("blue".to_string()),
        order: Some(3),
        ..CreateWordListRequest::named("  Morning Words ")
    };
    let created = service.create_list(&request).unwrap();
    assert_eq!(created.name, "Morning Words");
    assert_eq!(created.slug, "morning-words");

    let loaded = service.get_list_by_slug("morning-words").unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.theme.as_deref(), Some("blue"));
    assert_eq!(loaded.order, 3);
}

#[test]
fn non_latin_names_get_fallback_slug() {
    let conn = open_db_in_memory().unwrap();
    let created = service(&conn)
        .create_list(&CreateWordListRequest::named("基本ワードリスト"))
        .unwrap();
    assert!(created.slug.starts_with("list-"));
    assert_eq!(created.slug.len(), "list-".len() + 8);
}

#[test]
fn duplicate_slug_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_list(&CreateWordListRequest::named("Daily"))
        .unwrap();

    let err = service
        .create_list(&CreateWordListRequest::named("daily"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ConflictKind::DuplicateSlug)));
}

#[test]
fn invalid_names_and_slugs_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let blank = service.create_list(&CreateWordListRequest::named("   "));
    assert!(matches!(
        blank,
        Err(RepoError::Validation(ValidationError::EmptyListName))
    ));

    let long = service.create_list(&CreateWordListRequest::named("x".repeat(101)));
    assert!(matches!(
        long,
        Err(RepoError::Validation(ValidationError::ListNameTooLong { chars: 101 }))
    ));

    let bad_slug = service.create_list(&CreateWordListRequest {
        slug: Some("Not Valid".to_string()),
        ..CreateWordListRequest::named("ok")
    });
    assert!(matches!(
        bad_slug,
        Err(RepoError::Validation(ValidationError::InvalidSlug(_)))
    ));
}

#[test]
fn rename_keeps_slug_and_missing_list_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service
        .create_list(&CreateWordListRequest::named("Before"))
        .unwrap();

    let renamed = service.rename_list(created.id, " After ").unwrap();
    assert_eq!(renamed.name, "After");
    assert_eq!(renamed.slug, "before");

    let err = service.rename_list(Uuid::new_v4(), "x").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn delete_cascades_to_words() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let list = service
        .create_list(&CreateWordListRequest::named("Gone"))
        .unwrap();
    conn.execute(
        "INSERT INTO words (id, list_id, text, weight, created_at, updated_at)
         VALUES (?1, ?2, 'w', 1, 0, 0);",
        params![Uuid::new_v4().to_string(), list.id.to_string()],
    )
    .unwrap();

    service.delete_list(list.id).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM words;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(matches!(
        service.delete_list(list.id),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn latest_list_is_most_recently_created() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordListRepository::try_new(&conn).unwrap();
    assert!(repo.get_latest_list().unwrap().is_none());

    let mut older = WordList::new("older", "older");
    older.created_at = 1_000;
    let mut newer = WordList::new("newer", "newer");
    newer.created_at = 2_000;
    repo.create_list(&newer).unwrap();
    repo.create_list(&older).unwrap();

    assert_eq!(repo.get_latest_list().unwrap().unwrap().id, newer.id);
}

#[test]
fn latest_list_with_words_loads_newest_list_and_its_words() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    assert!(service.get_latest_list_with_words().unwrap().is_none());

    let older = service
        .create_list(&CreateWordListRequest::named("older"))
        .unwrap();
    let newer = service
        .create_list(&CreateWordListRequest::named("newer"))
        .unwrap();
    conn.execute(
        "UPDATE word_lists SET created_at = CASE id WHEN ?1 THEN 1000 ELSE 2000 END;",
        params![older.id.to_string()],
    )
    .unwrap();
    let words = WordService::new(SqliteWordRepository::try_new(&conn).unwrap());
    words.create_word(newer.id, "海", Some(3)).unwrap();
    words.create_word(older.id, "山", None).unwrap();

    let latest = service.get_latest_list_with_words().unwrap().unwrap();
    assert_eq!(latest.list.id, newer.id);
    let texts: Vec<_> = latest.words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["海"]);
}

#[test]
fn cursor_pagination_walks_every_list_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordListRepository::try_new(&conn).unwrap();

    let a = list_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let b = list_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let c = list_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    let d = list_with_fixed_id("00000000-0000-4000-8000-000000000004", "d");
    for list in [&c, &a, &d, &b] {
        repo.create_list(list).unwrap();
    }
    conn.execute("UPDATE word_lists SET created_at = 5000;", [])
        .unwrap();
    conn.execute(
        "UPDATE word_lists SET created_at = 9000 WHERE slug = 'd';",
        [],
    )
    .unwrap();

    let service = service(&conn);
    let first = service.list_page(Some(2), None).unwrap();
    let first_ids: Vec<_> = first.items.iter().map(|list| list.id).collect();
    assert_eq!(first_ids, vec![d.id, a.id]);
    assert_eq!(first.next_cursor, Some(a.id));

    let second = service.list_page(Some(2), first.next_cursor).unwrap();
    let second_ids: Vec<_> = second.items.iter().map(|list| list.id).collect();
    assert_eq!(second_ids, vec![b.id, c.id]);
    assert_eq!(second.next_cursor, None);
}

#[test]
fn unknown_cursor_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = service(&conn)
        .list_page(None, Some(Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn list_with_words_by_slug_orders_heaviest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let list = service
        .create_list(&CreateWordListRequest::named("weights"))
        .unwrap();
    for (text, weight) in [("light", 1), ("heavy", 900), ("middle", 400)] {
        conn.execute(
            "INSERT INTO words (id, list_id, text, weight, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 0, 0);",
            params![Uuid::new_v4().to_string(), list.id.to_string(), text, weight],
        )
        .unwrap();
    }

    let loaded = service
        .get_list_with_words_by_slug("weights")
        .unwrap()
        .unwrap();
    let texts: Vec<_> = loaded.words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["heavy", "middle", "light"]);
    assert!(service
        .get_list_with_words_by_slug("missing")
        .unwrap()
        .is_none());
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    match SqliteWordListRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();
    assert!(matches!(
        SqliteWordListRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("word_lists"))
    ));
}
