//! Configuration management for the festival playlist generator.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory. They are read exactly once
//! into a [`Config`] value which is then handed to every collaborator that
//! needs credentials, endpoints or output paths; nothing below the CLI layer
//! reads the process environment on its own.
//!
//! Precedence:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const APP_DIR: &str = "festlist";

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-modify-public";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_MARKET: &str = "US";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

/// Loads environment variables from `<local data dir>/festlist/.env`.
///
/// The directory is created if needed so users know where to put the file.
/// A missing `.env` is not an error: every variable can also be exported
/// directly in the shell.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/festlist/.env`
/// - macOS: `~/Library/Application Support/festlist/.env`
/// - Windows: `%LOCALAPPDATA%/festlist/.env`
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything festlist stores locally (token cache, default output).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Explicit application configuration.
///
/// Built once at start-up and passed by reference into the Spotify client,
/// the token manager, the callback server and the output writers.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub user_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
    pub server_address: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first required variable
    /// that is not set: `SPOTIFY_API_AUTH_CLIENT_ID`,
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET` or `SPOTIFY_USER_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let data_dir = data_dir();
        let output_dir = lookup("FESTLIST_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("created_playlists"));

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            user_id: required("SPOTIFY_USER_ID")?,
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            market: optional("SPOTIFY_MARKET", DEFAULT_MARKET),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            data_dir,
            output_dir,
        })
    }

    /// Replaces the output directory, e.g. from `--output-dir`.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    /// Location of the cached OAuth token.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("cache").join("token.json")
    }
}
