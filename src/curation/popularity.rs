use std::collections::BTreeMap;

use crate::types::TrackRecord;

/// Lowest share of tracks an artist keeps, in percent.
pub const MIN_RETENTION_PERCENTAGE: u32 = 30;

/// Lowest number of tracks an artist keeps, when that many are available.
pub const MIN_RETAINED_COUNT: usize = 2;

/// `100 - (max_artist_popularity - artist_popularity)`, never below 30.
pub fn retention_percentage(max_artist_popularity: u8, artist_popularity: u8) -> u32 {
    let gap = u32::from(max_artist_popularity.saturating_sub(artist_popularity));
    100u32.saturating_sub(gap).max(MIN_RETENTION_PERCENTAGE)
}

/// `floor(retention_percentage / 100 * max_artist_count)`, never below 2.
pub fn retained_count(retention_percentage: u32, max_artist_count: usize) -> usize {
    let count = retention_percentage as usize * max_artist_count / 100;
    count.max(MIN_RETAINED_COUNT)
}

/// Trims every artist's rows in proportion to the artist's popularity.
///
/// The most popular artist in the set keeps as many rows as the largest
/// artist group has; every popularity point below that costs one percent,
/// down to the 30 % / 2 row floors. An artist keeps the first rows of its
/// group in input order and never more rows than it has.
///
/// Output is grouped by artist (alphabetical), input order inside a group.
pub fn filter_by_artist_popularity(tracks: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let mut by_artist: BTreeMap<String, Vec<TrackRecord>> = BTreeMap::new();
    for track in tracks {
        by_artist
            .entry(track.artist_name.clone())
            .or_default()
            .push(track);
    }

    let max_artist_count = by_artist.values().map(Vec::len).max().unwrap_or(0);
    let max_artist_popularity = by_artist
        .values()
        .flatten()
        .map(|t| t.artist_popularity)
        .max()
        .unwrap_or(0);

    by_artist
        .into_values()
        .flat_map(|group| {
            let popularity = group.first().map_or(0, |t| t.artist_popularity);
            let pct = retention_percentage(max_artist_popularity, popularity);
            let keep = retained_count(pct, max_artist_count);
            group.into_iter().take(keep)
        })
        .collect()
}
