//! Festival Playlist Generator Library
//!
//! This library turns a music festival lineup (or a hand-written list of
//! artist names) into a Spotify playlist and an HTML dashboard describing it.
//! The heart of the crate is the [`curation`] engine, a set of pure
//! transformations over the fetched track rows: duplicate removal,
//! remix/edit collapsing and popularity-proportional retention.
//!
//! # Modules
//!
//! - `analytics` - Playlist summaries, feature trends and the HTML dashboard
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - `.env` loading and the explicit [`config::Config`] object
//! - `curation` - Track deduplication and retention rules
//! - `error` - Error types of the external collaborators
//! - `lineup` - Festival lineup scraping
//! - `management` - Token cache and flat-file export
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use festlist::{config, curation, spotify};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let token = spotify::auth::client_credentials_token(&config).await?;
//!     let artists = spotify::artists::search_artists(&config, &token, &names).await?;
//!     // fetch_top_tracks(...), then:
//!     let outcome = curation::curate(tracks, curation::CurationOptions::default());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod curation;
pub mod error;
pub mod lineup;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching Spotify for {} artists", names.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal conditions: the process terminates with exit code 1
/// right after the message is printed.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For recoverable issues the user should notice, such as a search result
/// whose name differs from the query.
///
/// # Example
///
/// ```
/// warning!("Searching for {} yielded result {}.", query, found);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
