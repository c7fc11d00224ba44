/// Durable file-backed store tests
///
/// Run with: cargo test --test file_backend_tests
use entitydb::model::{BlogPost, SiteConfig};
use entitydb::{Store, StoreConfig, StoreError};

fn disk_store(dir: &std::path::Path) -> Store {
    Store::open(StoreConfig::new().data_dir(dir)).unwrap()
}

#[tokio::test]
async fn test_records_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = disk_store(dir.path());
        let posts = store.collection::<BlogPost>();
        posts
            .create(BlogPost::draft("hello-world", "Hello"))
            .await
            .unwrap();
        posts
            .mutate("hello-world", |p| p.published = true)
            .await
            .unwrap();
    }

    // A fresh store over the same directory is "the process after restart".
    let store = disk_store(dir.path());
    let posts = store.collection::<BlogPost>();

    let post = posts.get("hello-world").await.unwrap();
    assert!(post.published);

    let page = posts.list(None, Some(10)).await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_deletes_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = disk_store(dir.path());
        let posts = store.collection::<BlogPost>();
        posts.create(BlogPost::draft("a", "A")).await.unwrap();
        posts.create(BlogPost::draft("b", "B")).await.unwrap();
        assert!(posts.delete("a").await.unwrap());
    }

    let store = disk_store(dir.path());
    let posts = store.collection::<BlogPost>();

    let err = posts.get("a").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_awkward_keys_map_to_safe_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let store = disk_store(dir.path());
    let posts = store.collection::<BlogPost>();

    for slug in ["path/with/slashes", "dots.and spaces", "ünïcode-slug"] {
        posts.create(BlogPost::draft(slug, "t")).await.unwrap();
    }

    for slug in ["path/with/slashes", "dots.and spaces", "ünïcode-slug"] {
        assert_eq!(posts.get(slug).await.unwrap().slug, slug);
    }

    // Everything written stayed inside the data directory.
    let reopened = disk_store(dir.path());
    assert_eq!(
        reopened.collection::<BlogPost>().count().await.unwrap(),
        3
    );
}

#[tokio::test]
async fn test_seeding_happens_once_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = disk_store(dir.path());
        let configs = store.collection::<SiteConfig>();
        configs.ensure_seed().await.unwrap();
        configs
            .mutate("main", |c| c.site_title = "Renamed".to_string())
            .await
            .unwrap();
    }

    let store = disk_store(dir.path());
    let configs = store.collection::<SiteConfig>();
    configs.ensure_seed().await.unwrap();

    // The index was already populated, so the restart did not reapply the
    // fixture over the edit.
    assert_eq!(configs.get("main").await.unwrap().site_title, "Renamed");
}
