//! Error types for the collaborators around the curation engine.
//!
//! The curation engine itself is infallible over typed input; everything that
//! touches the network, the file system or the environment reports one of the
//! errors below.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no Spotify artist found for '{0}'")]
    NoSearchResult(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("gave up after {attempts} attempts: {url}")]
    RetriesExhausted { url: String, attempts: u32 },
    #[error("request body cannot be replayed for a retry")]
    UnclonableRequest,
}

#[derive(Debug, Error)]
pub enum LineupError {
    #[error("cannot fetch lineup page: {0}")]
    Http(#[from] reqwest::Error),
    #[error("page has no festival lineup (expected <ul class=\"festival\">)")]
    MissingLineup,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
