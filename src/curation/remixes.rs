use std::collections::HashSet;

use crate::types::TrackRecord;

const VERSION_SEPARATOR: &str = " - ";

/// Splits a song title into its base name and optional version qualifier.
///
/// The split happens at the first `" - "` that has at least one character on
/// each side; anything else leaves the whole title as the base name.
///
/// `"Where You Are - Kaskade Remix"` -> `("Where You Are", Some("Kaskade Remix"))`
pub fn split_base_name(title: &str) -> (&str, Option<&str>) {
    // Candidates may overlap, e.g. " - - X" splits at the second separator
    title
        .char_indices()
        .skip(1)
        .map(|(idx, _)| idx)
        .find(|idx| {
            title[*idx..].starts_with(VERSION_SEPARATOR)
                && idx + VERSION_SEPARATOR.len() < title.len()
        })
        .map(|idx| {
            (
                &title[..idx],
                Some(&title[idx + VERSION_SEPARATOR.len()..]),
            )
        })
        .unwrap_or((title, None))
}

/// Keeps a single, most popular row per base name.
///
/// Rows are ranked by `song_popularity` (descending, ties keep input order)
/// and the first row of every base name wins. Grouping looks at the base name
/// only, so two artists sharing a base title collapse into one row.
///
/// Returns the survivors ordered by `artist_name` (stable, so rows of one
/// artist stay in popularity order) and the titles of the dropped rows in
/// input order.
pub fn remove_remixes_and_edits(tracks: Vec<TrackRecord>) -> (Vec<TrackRecord>, Vec<String>) {
    let mut ranked: Vec<usize> = (0..tracks.len()).collect();
    ranked.sort_by(|a, b| tracks[*b].song_popularity.cmp(&tracks[*a].song_popularity));

    let mut keep = vec![false; tracks.len()];
    let mut seen_bases: HashSet<&str> = HashSet::new();
    for idx in &ranked {
        let (base, _) = split_base_name(&tracks[*idx].song_title);
        if seen_bases.insert(base) {
            keep[*idx] = true;
        }
    }

    let removed: Vec<String> = tracks
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(t, _)| t.song_title.clone())
        .collect();

    let mut slots: Vec<Option<TrackRecord>> = tracks.into_iter().map(Some).collect();
    let mut kept: Vec<TrackRecord> = ranked
        .into_iter()
        .filter(|idx| keep[*idx])
        .filter_map(|idx| slots[idx].take())
        .collect();
    kept.sort_by(|a, b| a.artist_name.cmp(&b.artist_name));

    (kept, removed)
}
