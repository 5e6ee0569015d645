mod auth;
mod export;

pub use auth::TokenManager;
pub use export::{ARTISTS_FILE_NAME, PlaylistExport, SONGS_FILE_NAME};
