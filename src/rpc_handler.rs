//! RPC method handler for the Livemarks JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the session state held by
//! [`App`].

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::reconciler::DeleteOutcome;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::url_validation::display_domain;
use crate::types::bookmark::{BookmarkRecord, Identity};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn record_json(record: &BookmarkRecord) -> Value {
    json!({
        "id": record.id,
        "url": record.url,
        "title": record.title,
        "domain": display_domain(&record.url),
        "created_at": record.created_at,
    })
}

fn list_json(app: &App, records: &[BookmarkRecord]) -> Value {
    let items: Vec<Value> = records.iter().map(record_json).collect();
    json!({
        "loading": app.reconciler.is_loading(),
        "total": app.reconciler.len(),
        "query": app.reconciler.query(),
        "items": items,
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with a user-facing message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Auth ───
        "auth.sign_in" => {
            let user_id = str_param(params, "user_id")?;
            let email = str_param(params, "email")?;
            if user_id.trim().is_empty() {
                return Err("user_id cannot be empty".to_string());
            }
            let mut identity = Identity::new(user_id, email);
            identity.display_name = params
                .get("display_name")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let label = identity.label().to_string();
            app.sign_in(identity).await;
            Ok(json!({"user_id": user_id, "label": label, "count": app.reconciler.len()}))
        }
        "auth.sign_out" => {
            let previous = app.sign_out().await;
            Ok(json!({"ok": true, "was_signed_in": previous.is_some()}))
        }
        "auth.whoami" => match app.auth.identity() {
            Some(identity) => Ok(json!({
                "user_id": identity.user_id,
                "email": identity.email,
                "label": identity.label(),
            })),
            None => Ok(Value::Null),
        },

        // ─── Bookmarks ───
        "bookmark.load" => {
            app.reconciler.load().await;
            let records = app.reconciler.visible();
            Ok(list_json(app, &records))
        }
        "bookmark.add" => {
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            app.form.set_title(title);
            app.form.set_url(url);
            let record = app
                .form
                .submit(&app.reconciler)
                .await
                .map_err(|e| e.to_string())?;
            Ok(record_json(&record))
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            let outcome = app
                .reconciler
                .delete_bookmark(id)
                .await
                .map_err(|e| e.to_string())?;
            let outcome = match outcome {
                DeleteOutcome::Deleted => "deleted",
                DeleteOutcome::AlreadyInFlight => "already_in_flight",
            };
            Ok(json!({"id": id, "outcome": outcome}))
        }
        "bookmark.list" => {
            let records = app.reconciler.visible();
            Ok(list_json(app, &records))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            app.reconciler.set_query(query);
            let records = app.reconciler.visible();
            Ok(list_json(app, &records))
        }
        "bookmark.clear_search" => {
            app.reconciler.clear_query();
            let records = app.reconciler.visible();
            Ok(list_json(app, &records))
        }

        // ─── Settings ───
        "settings.get" => {
            serde_json::to_value(app.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
