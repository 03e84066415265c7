use std::fs;

use blogroll::commands::{self, init, new, show};
use blogroll::Blogroll;
use tempfile::TempDir;

#[tokio::test]
async fn test_init_then_list_sample_post() {
    let dir = TempDir::new().unwrap();
    init::init_site(dir.path()).unwrap();

    assert!(dir.path().join("_config.yml").exists());
    assert!(dir.path().join("source/posts/hello-world.md").exists());

    let app = Blogroll::new(dir.path()).unwrap();
    assert_eq!(app.config.page_size, 10);
    assert!(app.config.remote.repos.is_empty());

    let posts = commands::load_posts(&app, 0).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello World");
    assert_eq!(posts[0].slug, "hello-world");
    assert_eq!(posts[0].tags, vec!["welcome"]);
}

#[test]
fn test_init_refuses_existing_site() {
    let dir = TempDir::new().unwrap();
    init::init_site(dir.path()).unwrap();
    assert!(init::init_site(dir.path()).is_err());
}

#[tokio::test]
async fn test_new_post_goes_first_in_manifest() {
    let dir = TempDir::new().unwrap();
    init::init_site(dir.path()).unwrap();
    let app = Blogroll::new(dir.path()).unwrap();

    let path = new::create_post(
        &app,
        "Rust: Ownership & Borrowing",
        Some("Sara"),
        &["rust".to_string()],
    )
    .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "rust-ownership-borrowing.md"
    );

    let manifest: Vec<String> =
        serde_json::from_str(&fs::read_to_string(&app.manifest_path).unwrap()).unwrap();
    assert_eq!(manifest, vec!["rust-ownership-borrowing.md", "hello-world.md"]);

    let posts = commands::load_posts(&app, 0).await.unwrap();
    let created = blogroll::search::find_by_slug(&posts, "rust-ownership-borrowing").unwrap();
    assert_eq!(created.title, "Rust: Ownership & Borrowing");
    assert_eq!(created.author, "Sara");
    assert_eq!(created.tags, vec!["rust"]);

    assert!(new::create_post(&app, "Rust: Ownership & Borrowing", None, &[]).is_err());
}

#[test]
fn test_views_persist_across_opens() {
    let dir = TempDir::new().unwrap();
    let app = Blogroll::with_config(dir.path().to_path_buf(), Default::default());

    let counter = app.view_counter().unwrap();
    assert_eq!(counter.get_views("hello"), 0);
    assert_eq!(counter.record_view("hello").unwrap(), 1);
    assert_eq!(counter.record_view("hello").unwrap(), 2);

    let reopened = app.view_counter().unwrap();
    assert_eq!(reopened.get_views("hello"), 2);
    assert_eq!(reopened.get_views("other"), 0);
}

#[tokio::test]
async fn test_show_counts_a_view_per_open() {
    let dir = TempDir::new().unwrap();
    init::init_site(dir.path()).unwrap();
    let app = Blogroll::new(dir.path()).unwrap();

    let (post, views) = show::open_post(&app, "hello-world", 0).await.unwrap();
    assert_eq!(post.title, "Hello World");
    assert_eq!(views, 1);

    let (_, views) = show::open_post(&app, "hello-world", 0).await.unwrap();
    assert_eq!(views, 2);
    assert_eq!(app.view_counter().unwrap().get_views("hello-world"), 2);

    assert!(show::open_post(&app, "missing", 0).await.is_err());
    assert_eq!(app.view_counter().unwrap().get_views("missing"), 0);
}
