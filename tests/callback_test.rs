use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Extension, Json, Router, extract::Query, routing::post};
use festlist::api;
use festlist::config::Config;
use festlist::types::PkceToken;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex, time::timeout};

const TOKEN_DELAY: Duration = Duration::from_millis(500);

// Token endpoint that answers slowly, like a sluggish accounts service
async fn slow_token() -> Json<Value> {
    tokio::time::sleep(TOKEN_DELAY).await;
    Json(json!({
        "access_token": "access-123",
        "refresh_token": "refresh-456",
        "scope": "playlist-modify-public",
        "expires_in": 3600
    }))
}

async fn spawn_token_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/api/token", post(slow_token));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/token", addr)
}

fn create_test_config(token_url: String) -> Config {
    Config::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client".to_string()),
        "SPOTIFY_API_AUTH_CLIENT_SECRET" => Some("secret".to_string()),
        "SPOTIFY_USER_ID" => Some("user".to_string()),
        "SPOTIFY_API_TOKEN_URL" => Some(token_url.clone()),
        _ => None,
    })
    .unwrap()
}

fn code_params() -> HashMap<String, String> {
    HashMap::from([("code".to_string(), "auth-code".to_string())])
}

#[tokio::test]
async fn test_callback_leaves_state_unlocked_during_exchange() {
    let config = Arc::new(create_test_config(spawn_token_server().await));
    let state = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier: "verifier".to_string(),
        token: None,
    })));

    let handle = tokio::spawn(api::callback(
        Query(code_params()),
        Extension(config),
        Extension(Arc::clone(&state)),
    ));

    // Exchange is still waiting on the token endpoint here
    tokio::time::sleep(Duration::from_millis(100)).await;
    {
        let guard = timeout(Duration::from_millis(200), state.lock())
            .await
            .expect("state stays lockable while the code is exchanged");
        assert!(guard.as_ref().unwrap().token.is_none());
    }

    let html = handle.await.unwrap();
    assert!(html.0.contains("Authentication successful"));

    let guard = state.lock().await;
    let token = guard.as_ref().unwrap().token.as_ref().unwrap();
    assert_eq!(token.access_token, "access-123");
    assert_eq!(token.refresh_token, "refresh-456");
    assert_eq!(token.expires_in, 3600);
}

#[tokio::test]
async fn test_callback_without_login_in_progress() {
    let config = Arc::new(create_test_config("http://127.0.0.1:9/api/token".to_string()));
    let state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));

    let html = api::callback(Query(code_params()), Extension(config), Extension(state)).await;

    assert!(html.0.contains("Missing PKCE code verifier"));
}

#[tokio::test]
async fn test_callback_without_code() {
    let config = Arc::new(create_test_config("http://127.0.0.1:9/api/token".to_string()));
    let state = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier: "verifier".to_string(),
        token: None,
    })));

    let html = api::callback(
        Query(HashMap::new()),
        Extension(config),
        Extension(Arc::clone(&state)),
    )
    .await;

    assert!(html.0.contains("Missing authorization code"));
    assert!(state.lock().await.as_ref().unwrap().token.is_none());
}
