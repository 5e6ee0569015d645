//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that completes the
//! Spotify login.
//!
//! - [`callback`] - OAuth 2.0 PKCE redirect target; exchanges the
//!   authorization code for a token
//! - [`health`] - liveness probe with crate version and login progress
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use festlist::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .layer(Extension(config))
//!     .layer(Extension(shared_state));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
