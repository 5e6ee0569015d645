use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::ExportError,
    types::{ArtistRecord, TrackRecord},
    utils,
};

pub const SONGS_FILE_NAME: &str = "Playlist_Songs.json";
pub const ARTISTS_FILE_NAME: &str = "Playlist_Artists.json";

/// Writes the final row-sets of one run into its playlist output folder.
pub struct PlaylistExport {
    dir: PathBuf,
}

impl PlaylistExport {
    pub fn new(output_dir: &Path, playlist_name: &str, created_on: NaiveDate) -> Self {
        Self {
            dir: utils::playlist_output_dir(output_dir, playlist_name, created_on),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save_songs(&self, tracks: &[TrackRecord]) -> Result<PathBuf, ExportError> {
        self.write(SONGS_FILE_NAME, tracks).await
    }

    pub async fn save_artists(&self, artists: &[ArtistRecord]) -> Result<PathBuf, ExportError> {
        self.write(ARTISTS_FILE_NAME, artists).await
    }

    pub async fn load_songs(&self) -> Result<Vec<TrackRecord>, ExportError> {
        let content = async_fs::read_to_string(self.dir.join(SONGS_FILE_NAME)).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        rows: &T,
    ) -> Result<PathBuf, ExportError> {
        async_fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(file_name);
        let json = serde_json::to_string_pretty(rows)?;
        async_fs::write(&path, json).await?;
        Ok(path)
    }
}
