//! # Curation Engine
//!
//! Pure, synchronous transformations over the track rows fetched for a
//! playlist. Nothing in here performs I/O or prints; every function takes its
//! rows by value and returns a new row-set together with what it dropped.
//!
//! ## Pipeline
//!
//! ```text
//! fetched rows
//!     -> remove_duplicates            (always)
//!     -> remove_remixes_and_edits     (unless remixes are wanted)
//!     -> filter_by_artist_popularity  (when popularity filtering is on)
//!     -> playlist sink / analytics
//! ```
//!
//! [`assemble_playlist_artists`] runs earlier, on the artist set that seeds
//! the track fetch.

mod artists;
mod duplicates;
mod popularity;
mod remixes;

pub use artists::assemble_playlist_artists;
pub use duplicates::remove_duplicates;
pub use popularity::{
    MIN_RETAINED_COUNT, MIN_RETENTION_PERCENTAGE, filter_by_artist_popularity, retained_count,
    retention_percentage,
};
pub use remixes::{remove_remixes_and_edits, split_base_name};

use crate::types::TrackRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurationOptions {
    pub include_remixes: bool,
    pub artist_popularity_filtering: bool,
}

impl Default for CurationOptions {
    fn default() -> Self {
        Self {
            include_remixes: false,
            artist_popularity_filtering: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurationOutcome {
    pub tracks: Vec<TrackRecord>,
    pub duplicates_removed: Vec<String>,
    pub remixes_removed: Vec<String>,
    /// Rows dropped by the popularity filter.
    pub filtered_out: usize,
}

/// Runs the full pipeline over `tracks` according to `options`.
pub fn curate(tracks: Vec<TrackRecord>, options: CurationOptions) -> CurationOutcome {
    let (mut tracks, duplicates_removed) = remove_duplicates(tracks);

    let mut remixes_removed = Vec::new();
    if !options.include_remixes {
        let (collapsed, removed) = remove_remixes_and_edits(tracks);
        tracks = collapsed;
        remixes_removed = removed;
    }

    let mut filtered_out = 0;
    if options.artist_popularity_filtering {
        let before = tracks.len();
        tracks = filter_by_artist_popularity(tracks);
        filtered_out = before - tracks.len();
    }

    CurationOutcome {
        tracks,
        duplicates_removed,
        remixes_removed,
        filtered_out,
    }
}
