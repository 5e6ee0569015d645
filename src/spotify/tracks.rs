use std::{collections::HashMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Config,
    error::SpotifyError,
    spotify::send_with_retry,
    types::{
        ArtistRecord, AudioFeatures, AudioFeaturesObject, AudioFeaturesResponse, SpotifyTrack,
        TopTracksResponse, TrackRecord,
    },
    warning,
};

/// How many top tracks to take from every artist, between 1 and 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracksPerArtist(u8);

impl TracksPerArtist {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl Default for TracksPerArtist {
    fn default() -> Self {
        Self(5)
    }
}

/// Builds one row per `(artist, track)`, carrying the artist's metadata.
///
/// Tracks without an entry in `features` get all-missing audio features.
pub fn track_records(
    artist: &ArtistRecord,
    tracks: Vec<SpotifyTrack>,
    features: &HashMap<String, AudioFeatures>,
) -> Vec<TrackRecord> {
    tracks
        .into_iter()
        .map(|track| TrackRecord {
            audio_features: features.get(&track.id).copied().unwrap_or_default(),
            song_title: track.name,
            artist_name: artist.artist_name.clone(),
            song_popularity: track.popularity,
            song_duration_ms: track.duration_ms,
            artist_genres: artist.artist_genres.clone(),
            artist_popularity: artist.artist_popularity,
            artist_id: artist.artist_id.clone(),
            track_id: track.id,
            artist_image_url: artist.artist_image_url.clone(),
        })
        .collect()
}

impl From<AudioFeaturesObject> for AudioFeatures {
    fn from(f: AudioFeaturesObject) -> Self {
        AudioFeatures {
            danceability: f.danceability,
            energy: f.energy,
            tempo: f.tempo,
            speechiness: f.speechiness,
        }
    }
}

pub async fn get_top_tracks(
    config: &Config,
    token: &str,
    artist_id: &str,
) -> Result<Vec<SpotifyTrack>, SpotifyError> {
    let request = Client::new()
        .get(format!(
            "{uri}/artists/{id}/top-tracks",
            uri = config.api_url,
            id = artist_id
        ))
        .query(&[("market", config.market.as_str())])
        .bearer_auth(token);

    let res = send_with_retry(request)
        .await?
        .json::<TopTracksResponse>()
        .await?;
    Ok(res.tracks)
}

/// Audio features for up to 100 tracks, keyed by track id.
///
/// Tracks the service has no analysis for are absent from the map.
pub async fn get_audio_features(
    config: &Config,
    token: &str,
    track_ids: &[&str],
) -> Result<HashMap<String, AudioFeatures>, SpotifyError> {
    if track_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let request = Client::new()
        .get(format!("{}/audio-features", config.api_url))
        .query(&[("ids", track_ids.join(","))])
        .bearer_auth(token);

    let res = send_with_retry(request)
        .await?
        .json::<AudioFeaturesResponse>()
        .await?;

    Ok(res
        .audio_features
        .into_iter()
        .flatten()
        .map(|f| (f.id.clone(), AudioFeatures::from(f)))
        .collect())
}

/// Fetches the top tracks of every artist, `per_artist` at most each.
///
/// When audio features cannot be fetched for an artist, its rows are kept
/// with missing features and a warning is printed.
pub async fn fetch_top_tracks(
    config: &Config,
    token: &str,
    artists: &[ArtistRecord],
    per_artist: TracksPerArtist,
) -> Result<Vec<TrackRecord>, SpotifyError> {
    let pb = ProgressBar::new(artists.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{pos}/{len}]")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Fetching top tracks...");

    let mut rows = Vec::with_capacity(artists.len() * per_artist.get());
    for artist in artists {
        let mut tracks = match get_top_tracks(config, token, &artist.artist_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };
        tracks.truncate(per_artist.get());

        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        let features = match get_audio_features(config, token, &ids).await {
            Ok(features) => features,
            Err(e) => {
                pb.suspend(|| {
                    warning!(
                        "No audio features for {}, continuing without. Err: {}",
                        artist.artist_name,
                        e
                    )
                });
                HashMap::new()
            }
        };

        rows.extend(track_records(artist, tracks, &features));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(rows)
}
