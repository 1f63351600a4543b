use wordflow_core::db::open_db_in_memory;
use wordflow_core::{
    seed_demo_data, SeedSummary, SqliteWordListRepository, SqliteWordRepository, WordListService,
};

#[test]
fn seeding_twice_replaces_previous_data() {
    let mut conn = open_db_in_memory().unwrap();

    let first = seed_demo_data(&mut conn).unwrap();
    assert_eq!(first, SeedSummary { lists: 2, words: 5 });
    let second = seed_demo_data(&mut conn).unwrap();
    assert_eq!(second, first);

    let service = WordListService::new(
        SqliteWordListRepository::try_new(&conn).unwrap(),
        SqliteWordRepository::try_new(&conn).unwrap(),
    );
    let feelings = service
        .get_list_with_words_by_slug("feelings")
        .unwrap()
        .unwrap();
    assert_eq!(feelings.list.theme.as_deref(), Some("pink"));
    assert_eq!(feelings.list.order, 2);
    assert_eq!(feelings.words.len(), 3);
    assert_eq!(feelings.words[0].text, "怒り");

    let page = service.list_page(None, None).unwrap();
    assert_eq!(page.items.len(), 2);
}
