//! Unit tests for the RPC handler: every JSON-RPC method dispatched by `handle_method`.
//!
//! These tests exercise each method through the same code path used by the
//! `livemarks-rpc` binary, against an in-memory SQLite database.

use serde_json::json;
use tempfile::TempDir;

use livemarks::app::App;
use livemarks::rpc_handler::handle_method;
use livemarks::services::settings_engine::SettingsEngine;

/// Create a fresh, started App whose settings file lives in a temp directory.
async fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = tmp.path().join("settings.json").to_string_lossy().to_string();
    let mut app = App::in_memory(SettingsEngine::new(Some(config))).expect("Failed to init App");
    app.startup().await.expect("startup failed");
    (app, tmp)
}

async fn signed_in() -> (App, TempDir) {
    let (mut app, tmp) = setup().await;
    handle_method(
        &mut app,
        "auth.sign_in",
        &json!({"user_id": "user-1", "email": "ada@example.com"}),
    )
    .await
    .unwrap();
    (app, tmp)
}

// ─── Ping ───

#[tokio::test]
async fn test_ping() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "nonexistent.method", &json!({})).await;
    assert_eq!(res.unwrap_err(), "unknown method: nonexistent.method");
}

// ─── Auth ───

#[tokio::test]
async fn test_sign_in_and_whoami() {
    let (mut app, _tmp) = setup().await;
    assert_eq!(
        handle_method(&mut app, "auth.whoami", &json!({})).await.unwrap(),
        serde_json::Value::Null
    );

    let res = handle_method(
        &mut app,
        "auth.sign_in",
        &json!({"user_id": "user-1", "email": "ada@example.com", "display_name": "Ada"}),
    )
    .await
    .unwrap();
    assert_eq!(res, json!({"user_id": "user-1", "label": "Ada", "count": 0}));

    let me = handle_method(&mut app, "auth.whoami", &json!({})).await.unwrap();
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["label"], "Ada");
}

#[tokio::test]
async fn test_sign_in_requires_user_id() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "auth.sign_in", &json!({"email": "a@b.c"})).await;
    assert_eq!(res.unwrap_err(), "missing user_id");

    let res = handle_method(&mut app, "auth.sign_in", &json!({"user_id": " ", "email": "a@b.c"})).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn test_sign_out_empties_list() {
    let (mut app, _tmp) = signed_in().await;
    handle_method(&mut app, "bookmark.add", &json!({"url": "docs.rs", "title": "Docs"}))
        .await
        .unwrap();

    let res = handle_method(&mut app, "auth.sign_out", &json!({})).await.unwrap();
    assert_eq!(res, json!({"ok": true, "was_signed_in": true}));

    let list = handle_method(&mut app, "bookmark.list", &json!({})).await.unwrap();
    assert_eq!(list["total"], 0);
    assert_eq!(list["loading"], false);
}

// ─── Bookmarks ───

#[tokio::test]
async fn test_bookmark_add_and_list() {
    let (mut app, _tmp) = signed_in().await;

    let res = handle_method(
        &mut app,
        "bookmark.add",
        &json!({"url": "www.example.com/page", "title": "Example"}),
    )
    .await
    .unwrap();
    assert!(res.get("id").is_some());
    assert_eq!(res["url"], "https://www.example.com/page");
    assert_eq!(res["domain"], "example.com");

    let list = handle_method(&mut app, "bookmark.list", &json!({})).await.unwrap();
    let arr = list["items"].as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["title"], "Example");
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_bookmark_add_invalid_url() {
    let (mut app, _tmp) = signed_in().await;
    let res = handle_method(&mut app, "bookmark.add", &json!({"url": "not a url", "title": "Bad"})).await;
    assert_eq!(
        res.unwrap_err(),
        "Please enter a valid URL (e.g., https://example.com)."
    );
}

#[tokio::test]
async fn test_bookmark_add_signed_out() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "bookmark.add", &json!({"url": "docs.rs", "title": "Docs"})).await;
    assert_eq!(res.unwrap_err(), "You must be logged in to add bookmarks.");
}

#[tokio::test]
async fn test_bookmark_add_missing_params() {
    let (mut app, _tmp) = signed_in().await;
    assert_eq!(
        handle_method(&mut app, "bookmark.add", &json!({"url": "https://x.com"})).await.unwrap_err(),
        "missing title"
    );
    assert_eq!(
        handle_method(&mut app, "bookmark.add", &json!({"title": "X"})).await.unwrap_err(),
        "missing url"
    );
}

#[tokio::test]
async fn test_bookmark_delete_is_idempotent() {
    let (mut app, _tmp) = signed_in().await;
    let added = handle_method(&mut app, "bookmark.add", &json!({"url": "docs.rs", "title": "Docs"}))
        .await
        .unwrap();
    let id = added["id"].as_str().unwrap().to_string();

    let res = handle_method(&mut app, "bookmark.delete", &json!({"id": id})).await.unwrap();
    assert_eq!(res, json!({"id": id, "outcome": "deleted"}));
    let again = handle_method(&mut app, "bookmark.delete", &json!({"id": id})).await.unwrap();
    assert_eq!(again["outcome"], "deleted");

    let list = handle_method(&mut app, "bookmark.list", &json!({})).await.unwrap();
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_bookmark_delete_of_other_users_id_keeps_it() {
    let (mut app, _tmp) = setup().await;
    handle_method(&mut app, "auth.sign_in", &json!({"user_id": "alice", "email": "alice@example.com"}))
        .await
        .unwrap();
    let added = handle_method(&mut app, "bookmark.add", &json!({"url": "docs.rs", "title": "Docs"}))
        .await
        .unwrap();
    let id = added["id"].as_str().unwrap().to_string();
    handle_method(&mut app, "auth.sign_out", &json!({})).await.unwrap();

    handle_method(&mut app, "auth.sign_in", &json!({"user_id": "mallory", "email": "mallory@example.com"}))
        .await
        .unwrap();
    handle_method(&mut app, "bookmark.delete", &json!({"id": id})).await.unwrap();
    handle_method(&mut app, "auth.sign_out", &json!({})).await.unwrap();

    let back = handle_method(&mut app, "auth.sign_in", &json!({"user_id": "alice", "email": "alice@example.com"}))
        .await
        .unwrap();
    assert_eq!(back["count"], 1);
    let list = handle_method(&mut app, "bookmark.list", &json!({})).await.unwrap();
    assert_eq!(list["items"][0]["id"], id.as_str());
}

#[tokio::test]
async fn test_bookmark_delete_signed_out() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "bookmark.delete", &json!({"id": "x"})).await;
    assert_eq!(res.unwrap_err(), "You must be logged in to delete bookmarks.");
}

#[tokio::test]
async fn test_bookmark_search_and_clear() {
    let (mut app, _tmp) = signed_in().await;
    for (title, url) in [("Rust", "rust-lang.org"), ("Python", "python.org"), ("Docs", "docs.rs")] {
        handle_method(&mut app, "bookmark.add", &json!({"url": url, "title": title}))
            .await
            .unwrap();
    }

    let found = handle_method(&mut app, "bookmark.search", &json!({"query": "RUST"})).await.unwrap();
    assert_eq!(found["query"], "RUST");
    assert_eq!(found["total"], 3);
    let titles: Vec<&str> = found["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust"]);

    let cleared = handle_method(&mut app, "bookmark.clear_search", &json!({})).await.unwrap();
    assert_eq!(cleared["query"], "");
    assert_eq!(cleared["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_bookmark_load_returns_newest_first() {
    let (mut app, _tmp) = signed_in().await;
    for (title, url) in [("First", "a.dev"), ("Second", "b.dev")] {
        handle_method(&mut app, "bookmark.add", &json!({"url": url, "title": title}))
            .await
            .unwrap();
    }

    let list = handle_method(&mut app, "bookmark.load", &json!({})).await.unwrap();
    let titles: Vec<&str> = list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_get_and_set() {
    let (mut app, _tmp) = setup().await;

    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["ui"]["success_flash_ms"], 2000);

    handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "ui.success_flash_ms", "value": 750}),
    )
    .await
    .unwrap();
    let settings = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["ui"]["success_flash_ms"], 750);
}

#[tokio::test]
async fn test_settings_set_rejects_bad_key() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "settings.set", &json!({"key": "ui.nope", "value": 1})).await;
    assert!(res.unwrap_err().starts_with("Invalid settings key"));

    let res = handle_method(&mut app, "settings.set", &json!({"key": "ui.success_flash_ms"})).await;
    assert_eq!(res.unwrap_err(), "missing value");
}
