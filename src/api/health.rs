use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::types::PkceToken;

/// Liveness probe. `login` is `pending` until the callback stored a token.
pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Json<Value> {
    let logged_in = shared_state
        .lock()
        .await
        .as_ref()
        .is_some_and(|p| p.token.is_some());

    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "login": if logged_in { "complete" } else { "pending" }
    }))
}
