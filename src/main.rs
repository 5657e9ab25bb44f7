//! Livemarks console demo.
//!
//! Runs two dashboard sessions of one user against a shared in-memory
//! backend and shows changes in one reaching the other through the feed.

use std::sync::Arc;
use std::time::Duration;

use livemarks::app::App;
use livemarks::backend::ChangeFeed;
use livemarks::services::settings_engine::SettingsEngine;
use livemarks::services::url_validation::display_domain;
use livemarks::types::bookmark::{BookmarkRecord, ChangeEvent, Identity};
use tracing_subscriber::EnvFilter;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

/// Gives spawned feed tasks a chance to drain their queues.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!();
    println!("  Livemarks v{} — Demo Mode", env!("CARGO_PKG_VERSION"));
    println!();

    let config = std::env::temp_dir().join("livemarks-demo-settings.json");
    let mut app = App::in_memory(SettingsEngine::new(Some(config.to_string_lossy().to_string())))?;

    section("Session");
    app.sign_in(Identity::new("user-1", "ada@example.com")).await;
    app.startup().await?;
    println!("  Signed in as {}, live: {}", app.auth.identity().map(|i| i.email).unwrap_or_default(), app.is_live());

    section("Add bookmarks");
    for (title, url) in [("Rust", "rust-lang.org"), ("Docs", "https://docs.rs"), ("Crates", "crates.io")] {
        app.form.set_title(title);
        app.form.set_url(url);
        let record = app.form.submit(&app.reconciler).await?;
        println!("  + {} -> {}", record.title, record.url);
    }
    settle().await;
    println!("  List holds {} record(s) (feed echoes de-duplicated)", app.reconciler.len());

    app.form.set_title("Broken");
    app.form.set_url("not a url");
    if app.form.submit(&app.reconciler).await.is_err() {
        println!("  Rejected: {}", app.form.error_message().unwrap_or_default());
    }

    section("Second tab");
    let tab = app.open_session();
    tab.load().await;
    let tab_sync = tab.go_live(app.feed.clone() as Arc<dyn ChangeFeed>, app.store.scope()).await?;
    println!("  Tab loaded {} record(s)", tab.len());

    let added = tab.add_bookmark("Tokio", "tokio.rs").await?;
    settle().await;
    println!("  Tab added '{}'; first tab now shows {} record(s)", added.title, app.reconciler.len());

    let first = app.reconciler.snapshot().first().cloned();
    if let Some(record) = first {
        app.reconciler.delete_bookmark(&record.id).await?;
        settle().await;
        println!("  First tab deleted '{}'; tab now shows {} record(s)", record.title, tab.len());
    }

    section("Isolation");
    let foreign = BookmarkRecord {
        id: "foreign-1".to_string(),
        url: "https://elsewhere.example".to_string(),
        title: "Not yours".to_string(),
        owner_id: "user-2".to_string(),
        created_at: 0,
    };
    let applied = app.reconciler.apply_remote_event(ChangeEvent::inserted(foreign)).await;
    println!("  Foreign insert applied: {}", applied);

    section("Search");
    app.reconciler.set_query("RS");
    for record in app.reconciler.visible() {
        println!("  • {} ({})", record.title, display_domain(&record.url));
    }
    app.reconciler.clear_query();

    tab_sync.stop();
    app.shutdown();
    println!();
    println!("  Active feed subscriptions after shutdown: {}", app.feed.active_subscriptions());
    Ok(())
}
