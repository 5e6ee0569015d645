//! # Playlist Analytics
//!
//! Read-only summaries of a curated playlist, used for the terminal report
//! and the HTML dashboard. Nothing here feeds back into curation.
//!
//! - [`PlaylistSummary`] - song count, runtime, top genres, recommendations
//! - [`artist_summaries`] - one row per artist with runtime and feature averages
//! - [`feature_trends`] - audio features most songs agree on
//! - [`recommend_artists`] - related artists shared by many playlist artists

pub mod dashboard;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::{
    types::{ArtistSummaryRow, AudioFeature, TrackRecord},
    utils,
};

pub const TOP_GENRE_COUNT: usize = 5;
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;

/// Share of songs (percent) that must sit inside a feature band for the
/// feature to count as a trend.
pub const TREND_THRESHOLD_PERCENT: u32 = 79;

/// Width of the tempo band in BPM; most genres span 20-30 BPM.
const TEMPO_BAND_WIDTH: f64 = 30.0;
const UNIT_BAND_WIDTH: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSummary {
    pub playlist_name: String,
    pub created_on: NaiveDate,
    pub song_count: usize,
    pub total_duration_ms: u64,
    pub top_genres: Vec<String>,
    pub recommended_artists: Vec<String>,
    pub playlist_url: Option<String>,
}

impl PlaylistSummary {
    pub fn from_tracks(
        playlist_name: &str,
        created_on: NaiveDate,
        tracks: &[TrackRecord],
        recommended_artists: Vec<String>,
    ) -> Self {
        Self {
            playlist_name: playlist_name.to_string(),
            created_on,
            song_count: tracks.len(),
            total_duration_ms: tracks.iter().map(|t| t.song_duration_ms).sum(),
            top_genres: top_genres(tracks, TOP_GENRE_COUNT),
            recommended_artists,
            playlist_url: None,
        }
    }

    pub fn with_playlist_id(mut self, playlist_id: &str) -> Self {
        self.playlist_url = Some(format!("https://open.spotify.com/playlist/{}", playlist_id));
        self
    }

    /// `"94 songs, 5 hr 22 min"`, or `"12 songs, 48 min 3 sec"` under an hour.
    pub fn songs_and_runtime(&self) -> String {
        let secs = self.total_duration_ms / 1000;
        if secs >= 3600 {
            format!(
                "{} songs, {} hr {} min",
                self.song_count,
                secs / 3600,
                secs % 3600 / 60
            )
        } else {
            format!("{} songs, {} min {} sec", self.song_count, secs / 60, secs % 60)
        }
    }

    pub fn top_genres_message(&self) -> String {
        self.top_genres.join(", ")
    }

    pub fn recommended_artists_message(&self) -> String {
        self.recommended_artists.join(", ")
    }
}

/// Counts `items` and returns the `n` most frequent, ties in first-seen order.
fn most_common<I>(items: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        let count = counts.entry(item.clone()).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    // stable: equal counts keep first-seen order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(n);
    order
}

/// Most frequent genres, counting every artist once regardless of how many
/// of their songs are in the playlist.
pub fn top_genres(tracks: &[TrackRecord], n: usize) -> Vec<String> {
    let mut seen_artists = HashSet::new();
    let genres = tracks
        .iter()
        .filter(|t| seen_artists.insert(t.artist_name.as_str()))
        .flat_map(|t| t.artist_genres.iter().cloned());
    most_common(genres, n)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn average_feature(tracks: &[&TrackRecord], feature: AudioFeature) -> String {
    let decimals = if feature.is_unit_interval() { 2 } else { 0 };
    mean(tracks.iter().filter_map(|t| feature.value(&t.audio_features)))
        .map(|m| utils::format_rounded(m, decimals))
        .unwrap_or_else(|| "-".to_string())
}

/// One summary row per artist, alphabetical by artist name.
///
/// Averages skip songs that lack the feature; an artist with no data for a
/// feature shows `-`.
pub fn artist_summaries(tracks: &[TrackRecord]) -> Vec<ArtistSummaryRow> {
    let mut by_artist: Vec<(&str, Vec<&TrackRecord>)> = Vec::new();
    for track in tracks {
        match by_artist.iter_mut().find(|(name, _)| *name == track.artist_name) {
            Some((_, rows)) => rows.push(track),
            None => by_artist.push((track.artist_name.as_str(), vec![track])),
        }
    }
    by_artist.sort_by(|a, b| a.0.cmp(b.0));

    by_artist
        .into_iter()
        .map(|(artist, rows)| {
            let first = rows[0];
            ArtistSummaryRow {
                artist: artist.to_string(),
                total_songs: rows.len(),
                total_runtime: utils::format_minutes_seconds(
                    rows.iter().map(|t| t.song_duration_ms).sum(),
                ),
                artist_popularity: first.artist_popularity,
                artist_genres: first.artist_genres.join(", "),
                average_tempo: average_feature(&rows, AudioFeature::Tempo),
                average_danceability: average_feature(&rows, AudioFeature::Danceability),
                average_energy: average_feature(&rows, AudioFeature::Energy),
                average_speechiness: average_feature(&rows, AudioFeature::Speechiness),
            }
        })
        .collect()
}

/// Band around the mean of one audio feature and how many songs fall in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBand {
    pub feature: AudioFeature,
    pub lower: f64,
    pub upper: f64,
    pub percent_within: u32,
}

impl FeatureBand {
    pub fn is_trend(&self) -> bool {
        self.percent_within >= TREND_THRESHOLD_PERCENT
    }

    /// `"82% of songs within 0.66 - 0.96 Energy range"`.
    pub fn message(&self) -> String {
        let range = if self.feature.is_unit_interval() {
            format!(
                "{} - {}",
                utils::format_rounded(self.lower, 2),
                utils::format_rounded(self.upper, 2)
            )
        } else {
            format!("{} - {} BPM", self.lower.round(), self.upper.round())
        };
        format!(
            "{}% of songs within {} {} range",
            self.percent_within, range, self.feature
        )
    }
}

/// Computes the band for `feature`, or `None` when no song has a value.
///
/// The percentage is taken over all songs, so songs without the feature
/// count as outside the band.
pub fn feature_band(tracks: &[TrackRecord], feature: AudioFeature) -> Option<FeatureBand> {
    let values: Vec<f64> = tracks
        .iter()
        .filter_map(|t| feature.value(&t.audio_features))
        .collect();
    let mean = mean(values.iter().copied())?;

    let width = if feature.is_unit_interval() {
        UNIT_BAND_WIDTH
    } else {
        TEMPO_BAND_WIDTH
    };
    let lower = (mean - width / 2.0).max(0.0);
    let mut upper = mean + width / 2.0;
    if feature.is_unit_interval() {
        upper = upper.min(1.0);
    }

    let within = values.iter().filter(|v| **v >= lower && **v <= upper).count();
    let percent_within = (within as f64 / tracks.len() as f64 * 100.0).round() as u32;

    Some(FeatureBand {
        feature,
        lower,
        upper,
        percent_within,
    })
}

/// Bands of all four features that qualify as trends.
pub fn feature_trends(tracks: &[TrackRecord]) -> Vec<FeatureBand> {
    AudioFeature::ALL
        .iter()
        .filter_map(|f| feature_band(tracks, *f))
        .filter(FeatureBand::is_trend)
        .collect()
}

/// `"Energy, Speechiness have strong trends"`.
pub fn trend_headline(trends: &[FeatureBand]) -> String {
    let subject = match trends.len() {
        0 => "No song features".to_string(),
        n if n == AudioFeature::ALL.len() => "All song features".to_string(),
        _ => trends
            .iter()
            .map(|t| t.feature.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    };
    format!("{} have strong trends", subject)
}

/// Picks the `n` names that appear most often across the related-artist
/// lists, leaving out artists already in the playlist.
pub fn recommend_artists(
    related: &[Vec<String>],
    playlist_artists: &[String],
    n: usize,
) -> Vec<String> {
    let present: HashSet<&str> = playlist_artists.iter().map(String::as_str).collect();
    let candidates = related
        .iter()
        .flatten()
        .filter(|name| !present.contains(name.as_str()))
        .cloned();
    most_common(candidates, n)
}
