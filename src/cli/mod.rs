//! # CLI Module
//!
//! Command implementations behind the `festlist` binary. Each command loads
//! what it needs, talks to the collaborators and prints the result; fatal
//! failures end the process through [`crate::error!`].
//!
//! - [`auth`] - Spotify login with PKCE, token cached locally
//! - [`show_lineup`] - prints the scraped lineup of a festival page
//! - [`search_artists`] - prints the Spotify match for each given name
//! - [`generate`] - the full playlist workflow, see [`GenerateOptions`]
//!
//! ```text
//! festlist auth
//! festlist lineup https://www.songkick.com/festivals/1471/id/40754508-edc-orlando-2023
//! festlist generate --festival-url <URL> --select Zedd --artist "Porter Robinson"
//! ```

mod artists;
mod auth;
mod generate;
mod lineup;

pub use artists::search_artists;
pub use auth::auth;
pub use generate::{GenerateOptions, PlaylistSource, choose_source, generate, selected_names};
pub use lineup::show_lineup;

use std::path::PathBuf;

use crate::{config::Config, error, management::TokenManager, spotify};

/// Builds the [`Config`] from the loaded environment or exits.
pub fn load_config(output_dir: Option<PathBuf>) -> Config {
    match Config::from_env() {
        Ok(config) => config.with_output_dir(output_dir),
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

/// App-only token for catalogue lookups; no user login involved.
pub(crate) async fn app_token(config: &Config) -> String {
    match spotify::auth::client_credentials_token(config).await {
        Ok(token) => token,
        Err(e) => error!("Cannot get Spotify access token. Err: {}", e),
    }
}

/// Cached user token, refreshed if needed. Required for playlist creation.
pub(crate) async fn user_token(config: &Config) -> String {
    let mut token_mgr = match TokenManager::load(config).await {
        Ok(m) => m,
        Err(e) => error!(
            "No cached Spotify login. Please run `festlist auth`. Err: {}",
            e
        ),
    };

    match token_mgr.get_valid_token().await {
        Ok(token) => token,
        Err(e) => error!(
            "Cannot refresh Spotify login. Please run `festlist auth`. Err: {}",
            e
        ),
    }
}
