use std::collections::HashSet;

use crate::types::TrackRecord;

/// Drops every row whose `track_id` was already seen earlier in `tracks`.
///
/// Retained rows keep their relative order. The second value lists the
/// `song_title` of each dropped row in the order encountered, so
/// `tracks.len() == kept.len() + removed.len()`.
pub fn remove_duplicates(tracks: Vec<TrackRecord>) -> (Vec<TrackRecord>, Vec<String>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(tracks.len());
    let mut kept = Vec::with_capacity(tracks.len());
    let mut removed = Vec::new();

    for track in tracks {
        if seen.insert(track.track_id.clone()) {
            kept.push(track);
        } else {
            removed.push(track.song_title);
        }
    }

    (kept, removed)
}
