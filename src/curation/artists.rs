use std::collections::HashSet;

use crate::types::ArtistRecord;

/// Combines the selected lineup artists with the manually added ones.
///
/// Lineup rows are kept only when their name is in `selected_names` (exact
/// match). They come first, followed by `manual_artists`; a name seen twice
/// keeps its first row.
pub fn assemble_playlist_artists(
    lineup_artists: Vec<ArtistRecord>,
    manual_artists: Vec<ArtistRecord>,
    selected_names: &[String],
) -> Vec<ArtistRecord> {
    let selected: HashSet<&str> = selected_names.iter().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();

    lineup_artists
        .into_iter()
        .filter(|a| selected.contains(a.artist_name.as_str()))
        .chain(manual_artists)
        .filter(|a| seen.insert(a.artist_name.clone()))
        .collect()
}
