use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Numeric descriptors of a recording. Any of them may be missing when the
/// service has no analysis for the track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub tempo: Option<f64>,
    pub speechiness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFeature {
    Tempo,
    Danceability,
    Energy,
    Speechiness,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 4] = [
        AudioFeature::Tempo,
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Speechiness,
    ];

    pub fn value(&self, features: &AudioFeatures) -> Option<f64> {
        match self {
            AudioFeature::Tempo => features.tempo,
            AudioFeature::Danceability => features.danceability,
            AudioFeature::Energy => features.energy,
            AudioFeature::Speechiness => features.speechiness,
        }
    }

    /// True for the descriptors bounded to `0..=1`.
    pub fn is_unit_interval(&self) -> bool {
        !matches!(self, AudioFeature::Tempo)
    }
}

impl std::fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AudioFeature::Tempo => "Tempo",
            AudioFeature::Danceability => "Danceability",
            AudioFeature::Energy => "Energy",
            AudioFeature::Speechiness => "Speechiness",
        };
        f.write_str(s)
    }
}

/// One song performed by one artist, as handed to the curation engine.
///
/// `track_id` identifies the exact recording. `artist_popularity` is the same
/// on every row of one artist within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub song_title: String,
    pub artist_name: String,
    pub song_popularity: u8,
    pub song_duration_ms: u64,
    pub audio_features: AudioFeatures,
    pub artist_genres: Vec<String>,
    pub artist_popularity: u8,
    pub artist_id: String,
    pub track_id: String,
    pub artist_image_url: Option<String>,
}

impl TrackRecord {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.track_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub artist_name: String,
    pub artist_genres: Vec<String>,
    pub artist_popularity: u8,
    pub artist_id: String,
    pub artist_image_url: Option<String>,
}

/// A search hit together with the name that was searched for.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistMatch {
    pub query: String,
    pub artist: ArtistRecord,
}

#[derive(Tabled)]
pub struct LineupTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub artist: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub popularity: u8,
    pub genres: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub artist: String,
    pub song: String,
    pub popularity: u8,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct ArtistSummaryRow {
    #[tabled(rename = "Artist")]
    pub artist: String,
    #[tabled(rename = "Total Songs")]
    pub total_songs: usize,
    #[tabled(rename = "Total Runtime")]
    pub total_runtime: String,
    #[tabled(rename = "Artist Popularity (0-100)")]
    pub artist_popularity: u8,
    #[tabled(rename = "Artist Genres")]
    pub artist_genres: String,
    #[tabled(rename = "Average Tempo (BPM)")]
    pub average_tempo: String,
    #[tabled(rename = "Average Danceability (0-1)")]
    pub average_danceability: String,
    #[tabled(rename = "Average Energy (0-1)")]
    pub average_energy: String,
    #[tabled(rename = "Average Speechiness (0-1)")]
    pub average_speechiness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    pub items: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u8,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub popularity: u8,
    pub duration_ms: u64,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesObject {
    pub id: String,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub tempo: Option<f64>,
    pub speechiness: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
