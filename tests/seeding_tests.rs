/// Fixture seeding tests
///
/// Run with: cargo test --test seeding_tests
use entitydb::model::{ChatBoard, Project, SiteConfig};
use entitydb::{Entity, Store};

#[tokio::test]
async fn test_ensure_seed_populates_an_empty_index() {
    let store = Store::in_memory();
    let boards = store.collection::<ChatBoard>();

    boards.ensure_seed().await.unwrap();

    let page = boards.list(None, Some(10)).await.unwrap();
    let ids: Vec<&str> = page.items.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["general", "guestbook"]);
}

#[tokio::test]
async fn test_ensure_seed_twice_does_not_double_the_fixtures() {
    let store = Store::in_memory();
    let boards = store.collection::<ChatBoard>();

    boards.ensure_seed().await.unwrap();
    boards.ensure_seed().await.unwrap();

    assert_eq!(boards.count().await.unwrap(), ChatBoard::seed_data().len());
}

#[tokio::test]
async fn test_ensure_seed_skips_a_non_empty_index() {
    let store = Store::in_memory();
    let boards = store.collection::<ChatBoard>();
    boards
        .create(ChatBoard {
            id: "mine".to_string(),
            name: "Mine".to_string(),
            ..ChatBoard::default()
        })
        .await
        .unwrap();

    boards.ensure_seed().await.unwrap();

    // Real data was present, so no fixtures were applied.
    assert_eq!(boards.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_seeding_preserves_user_edits_on_later_calls() {
    let store = Store::in_memory();
    let configs = store.collection::<SiteConfig>();

    configs.ensure_seed().await.unwrap();
    configs
        .mutate("main", |c| c.site_title = "Edited".to_string())
        .await
        .unwrap();

    configs.ensure_seed().await.unwrap();

    assert_eq!(configs.get("main").await.unwrap().site_title, "Edited");
}

#[tokio::test]
async fn test_concurrent_cold_start_seeding_applies_fixtures_once() {
    let store = Store::in_memory();

    // Both callers may observe the empty index; the losers' creates fail
    // closed on the already-present keys and are ignored.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.collection::<Project>().ensure_seed().await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let projects = store.collection::<Project>();
    assert_eq!(projects.count().await.unwrap(), Project::seed_data().len());
}

#[tokio::test]
async fn test_kinds_without_fixtures_seed_to_nothing() {
    let store = Store::in_memory();
    let posts = store.collection::<entitydb::model::BlogPost>();

    posts.ensure_seed().await.unwrap();

    assert_eq!(posts.count().await.unwrap(), 0);
}
