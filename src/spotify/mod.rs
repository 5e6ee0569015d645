//! # Spotify Integration Module
//!
//! HTTP plumbing between festlist and the Spotify Web API. Every function
//! takes the [`Config`](crate::config::Config) it needs plus an access token;
//! nothing here reads the environment.
//!
//! ## Architecture
//!
//! ```text
//! CLI workflow (cli::generate)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (PKCE user login, client credentials)
//!     ├── Artist Operations (search, related artists)
//!     ├── Track Operations (top tracks, audio features)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! send_with_retry (429 / 502 handling)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Rate Limiting
//!
//! Requests are replayed by [`send_with_retry`]:
//! - **429 Too Many Requests**: waits the number of seconds in the
//!   `Retry-After` header (10 when absent or unreadable)
//! - **502 Bad Gateway**: waits 10 seconds
//! - Gives up after [`MAX_RETRIES`] retries with
//!   [`SpotifyError::RetriesExhausted`]
//!
//! Waiting is a `tokio::time::sleep`, so the runtime keeps driving other
//! tasks (spinners, the callback server) in the meantime.
//!
//! ## API Coverage
//!
//! - `GET /search?type=artist` - best match per artist name
//! - `GET /artists/{id}/top-tracks` - up to 10 tracks per artist
//! - `GET /artists/{id}/related-artists` - recommendations
//! - `GET /audio-features?ids=` - danceability, energy, tempo, speechiness
//! - `POST /users/{user_id}/playlists` - create playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks (100 per call)
//! - `POST /api/token` - code exchange, refresh, client credentials

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};
use tokio::time::sleep;

use crate::{error::SpotifyError, warning};

pub const MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 10;
const BAD_GATEWAY_BACKOFF_SECS: u64 = 10;

/// Reads the `Retry-After` header as whole seconds.
pub fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Sends `request`, retrying on rate limits and bad gateways.
///
/// Any other non-success status is returned as [`SpotifyError::Http`].
pub async fn send_with_retry(request: RequestBuilder) -> Result<Response, SpotifyError> {
    let mut retries = 0;

    loop {
        let attempt = request
            .try_clone()
            .ok_or(SpotifyError::UnclonableRequest)?;
        let response = attempt.send().await?;

        let wait = match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                let secs = retry_after_secs(response.headers());
                warning!("Rate limit reached. Waiting for {} seconds.", secs);
                secs
            }
            StatusCode::BAD_GATEWAY => BAD_GATEWAY_BACKOFF_SECS,
            _ => return Ok(response.error_for_status()?),
        };

        if retries >= MAX_RETRIES {
            return Err(SpotifyError::RetriesExhausted {
                url: response.url().to_string(),
                attempts: retries + 1,
            });
        }

        retries += 1;
        sleep(Duration::from_secs(wait)).await;
    }
}
