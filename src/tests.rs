//! Integration tests for the portfolio shell.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{Config, StorageBackend};
use crate::db::{init_database, BlobStore, MemoryBlobStore, SqliteBlobStore};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

fn test_config(temp_dir: &TempDir, storage: StorageBackend, latency: Duration) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        storage,
        db_path: temp_dir.path().join("test.sqlite"),
        latency,
        site_url: "https://portfolio.test".to_string(),
        contact_email: "hello@portfolio.test".to_string(),
    }
}

impl TestFixture {
    async fn new() -> Self {
        Self::with(StorageBackend::Memory, Duration::ZERO, None).await
    }

    async fn with(storage: StorageBackend, latency: Duration, temp_dir: Option<TempDir>) -> Self {
        let temp_dir = temp_dir.unwrap_or_else(|| TempDir::new().expect("Failed to create temp dir"));
        let config = test_config(&temp_dir, storage, latency);

        let blobs: Arc<dyn BlobStore> = match storage {
            StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
            StorageBackend::Sqlite => {
                let pool = init_database(&config.db_path).await.expect("Failed to init DB");
                Arc::new(SqliteBlobStore::new(pool))
            }
        };

        let app = create_router(AppState::new(config, blobs));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn key(&self, key: &str) -> Value {
        let (status, body) = self.post("/api/palette/keys", json!({ "key": key })).await;
        assert_eq!(status, 200);
        body["data"].clone()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_initial_view_is_home() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/view").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["view"], "HOME");
    assert!(body["data"]["selectedPost"].is_null());
}

#[tokio::test]
async fn test_open_post_and_go_home() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.post("/api/view/posts/2", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "BLOG_POST");
    assert_eq!(body["data"]["selectedPost"]["id"], "2");

    let (_, body) = fixture.get("/api/view/screen").await;
    assert_eq!(body["data"]["screen"], "BLOG_POST");
    assert_eq!(body["data"]["page"]["kind"], "article");

    let (status, body) = fixture.post("/api/view/home", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "HOME");
    assert!(body["data"]["selectedPost"].is_null());
}

#[tokio::test]
async fn test_open_unknown_post_leaves_view_unchanged() {
    let fixture = TestFixture::new().await;
    fixture.post("/api/view/projects", json!({})).await;

    let (status, body) = fixture.post("/api/view/posts/404", json!({})).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, body) = fixture.get("/api/view").await;
    assert_eq!(body["data"]["view"], "ALL_PROJECTS");
}

#[tokio::test]
async fn test_archives_clear_selected_post() {
    let fixture = TestFixture::new().await;
    fixture.post("/api/view/posts/1", json!({})).await;

    let (_, body) = fixture.post("/api/view/blogs", json!({})).await;
    assert_eq!(body["data"]["view"], "ALL_BLOGS");
    assert!(body["data"]["selectedPost"].is_null());
}

#[tokio::test]
async fn test_change_view() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.put("/api/view", json!({ "view": "ALL_PROJECTS" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["view"], "ALL_PROJECTS");

    let (status, body) = fixture.put("/api/view", json!({ "view": "BLOG_POST" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    fixture.post("/api/view/posts/4", json!({})).await;
    let (_, body) = fixture.put("/api/view", json!({ "view": "HOME" })).await;
    assert_eq!(body["data"]["view"], "HOME");
    assert!(body["data"]["selectedPost"].is_null());
}

#[tokio::test]
async fn test_content_endpoints() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get("/api/posts").await;
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert!(posts[0].get("content").is_none());
    assert!(posts[0]["readTime"].is_string());

    let (status, body) = fixture.get("/api/posts/4").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["post"]["id"], "4");
    assert_eq!(body["data"]["blocks"][0]["kind"], "heading");

    let (status, _) = fixture.get("/api/posts/3").await;
    assert_eq!(status, 404);

    let (_, body) = fixture.get("/api/projects").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    let (_, body) = fixture.get("/api/projects?featured=true").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_guestbook_seed_and_sign() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/guestbook").await;
    assert_eq!(status, 200);
    let seed = body["data"].as_array().unwrap().clone();
    assert_eq!(seed.len(), 2);
    assert_eq!(seed[0]["name"], "Charles");
    assert_eq!(seed[1]["name"], "Sarah");

    let (status, body) = fixture
        .post("/api/guestbook", json!({ "name": "Jane", "message": "hi" }))
        .await;
    assert_eq!(status, 200);
    let created = body["data"].clone();
    assert_eq!(created["name"], "Jane");
    let sig = created["signature"].as_str().unwrap();
    assert!(sig == "#b8bb26" || sig == "#cc241d");

    let (_, body) = fixture.get("/api/guestbook").await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], created);
    assert!(entries[0]["id"].as_u64().unwrap() > seed[0]["id"].as_u64().unwrap());

    let (_, body) = fixture.get("/api/guestbook/feed").await;
    assert_eq!(body["data"]["load"], "SUCCESS");
    assert_eq!(body["data"]["submission"], "SUCCESS");
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_guestbook_order_newest_first() {
    let fixture = TestFixture::new().await;
    fixture.get("/api/guestbook").await;

    for name in ["A", "B", "C"] {
        let (status, _) = fixture
            .post("/api/guestbook", json!({ "name": name, "message": "hello" }))
            .await;
        assert_eq!(status, 200);
    }

    let (_, body) = fixture.get("/api/guestbook").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "B", "A", "Charles", "Sarah"]);
}

#[tokio::test]
async fn test_guestbook_rejects_blank_fields() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/guestbook", json!({ "name": "  ", "message": "hi" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = fixture.post("/api/guestbook", json!({ "name": "Jane" })).await;
    assert_eq!(status, 400);

    let (_, body) = fixture.get("/api/guestbook").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_optimistic_entry_visible_during_latency() {
    let fixture = TestFixture::with(StorageBackend::Memory, Duration::from_millis(400), None).await;

    let client = fixture.client.clone();
    let url = fixture.url("/api/guestbook");
    let submit = tokio::spawn(async move {
        client
            .post(url)
            .json(&json!({ "name": "Quick", "message": "first" }))
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    });

    tokio::time::sleep(Duration::from_millis(150)).await;
    let (_, body) = fixture.get("/api/guestbook/feed").await;
    assert_eq!(body["data"]["submission"], "LOADING");
    assert_eq!(body["data"]["entries"][0]["name"], "Quick");
    assert_eq!(body["data"]["entries"][0]["signature"], "#ffffff");

    assert_eq!(submit.await.unwrap(), 200);
    let (_, body) = fixture.get("/api/guestbook/feed").await;
    assert_eq!(body["data"]["submission"], "SUCCESS");
    assert_ne!(body["data"]["entries"][0]["signature"], "#ffffff");
}

#[tokio::test]
async fn test_sqlite_guestbook_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.sqlite");
    let config = test_config(&temp_dir, StorageBackend::Sqlite, Duration::ZERO);

    let fixture = TestFixture::with(StorageBackend::Sqlite, Duration::ZERO, Some(temp_dir)).await;
    let (status, _) = fixture
        .post("/api/guestbook", json!({ "name": "Persisted", "message": "still here" }))
        .await;
    assert_eq!(status, 200);

    // A fresh session over the same database file sees the entry.
    let pool = init_database(&db_path).await.unwrap();
    let session = AppState::new(config, Arc::new(SqliteBlobStore::new(pool)));
    let entries = session.guestbook.fetch_entries().await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Persisted", "Charles", "Sarah"]);
}

#[tokio::test]
async fn test_palette_navigation() {
    let fixture = TestFixture::new().await;

    let data = fixture.key("enter").await;
    assert_eq!(data["palette"]["open"], false);
    assert!(data.get("action").is_none());

    let data = fixture.key("toggle").await;
    assert_eq!(data["palette"]["open"], true);
    assert_eq!(data["palette"]["commands"].as_array().unwrap().len(), 10);

    let data = fixture.key("arrowUp").await;
    assert_eq!(data["palette"]["selectedIndex"], 9);
    let data = fixture.key("arrowDown").await;
    assert_eq!(data["palette"]["selectedIndex"], 0);

    let (_, body) = fixture
        .put("/api/palette/query", json!({ "query": "project archive" }))
        .await;
    assert_eq!(body["data"]["commands"].as_array().unwrap().len(), 1);

    let data = fixture.key("enter").await;
    assert_eq!(data["action"]["type"], "changeView");
    assert_eq!(data["view"], "ALL_PROJECTS");
    assert_eq!(data["palette"]["open"], false);

    let (_, body) = fixture.get("/api/view").await;
    assert_eq!(body["data"]["view"], "ALL_PROJECTS");
}

#[tokio::test]
async fn test_palette_escape_and_copy_email() {
    let fixture = TestFixture::new().await;

    fixture.key("toggle").await;
    let data = fixture.key("escape").await;
    assert_eq!(data["palette"]["open"], false);

    fixture.key("toggle").await;
    fixture.put("/api/palette/query", json!({ "query": "copy" })).await;
    let data = fixture.key("enter").await;
    assert_eq!(data["action"]["type"], "copyText");
    assert_eq!(data["clipboard"]["status"], "copied");

    let (_, body) = fixture.get("/api/clipboard").await;
    assert_eq!(body["data"], "hello@portfolio.test");
}

#[tokio::test]
async fn test_share_post_copies_link() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.post("/api/posts/1/share", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["status"], "copied");

    let (_, body) = fixture.get("/api/clipboard").await;
    assert_eq!(body["data"], "https://portfolio.test/posts/1");

    let (status, _) = fixture.post("/api/posts/99/share", json!({})).await;
    assert_eq!(status, 404);
}
