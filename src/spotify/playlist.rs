use reqwest::Client;

use crate::{
    config::Config,
    error::SpotifyError,
    spotify::send_with_retry,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, TrackRecord,
    },
};

/// Spotify accepts at most this many items per add-tracks call.
pub const PLAYLIST_BATCH_SIZE: usize = 100;

const PLAYLIST_DESCRIPTION: &str = "Created with festlist.";

/// Creates a public playlist for the configured user.
pub async fn create(
    config: &Config,
    token: &str,
    name: &str,
) -> Result<CreatePlaylistResponse, SpotifyError> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: PLAYLIST_DESCRIPTION.to_string(),
        public: true,
        collaborative: false,
    };

    let request = Client::new()
        .post(format!(
            "{uri}/users/{user_id}/playlists",
            uri = config.api_url,
            user_id = config.user_id
        ))
        .bearer_auth(token)
        .json(&body);

    let res = send_with_retry(request)
        .await?
        .json::<CreatePlaylistResponse>()
        .await?;
    Ok(res)
}

/// Splits track URIs into add-tracks request bodies of at most 100 each.
pub fn batch_track_uris(tracks: &[TrackRecord]) -> Vec<AddTrackToPlaylistRequest> {
    tracks
        .chunks(PLAYLIST_BATCH_SIZE)
        .map(|chunk| AddTrackToPlaylistRequest {
            uris: chunk.iter().map(TrackRecord::uri).collect(),
        })
        .collect()
}

/// Appends all `tracks` to the playlist, in order.
///
/// Returns the snapshot id of the last batch, if any batch was sent.
pub async fn add_tracks(
    config: &Config,
    token: &str,
    playlist_id: &str,
    tracks: &[TrackRecord],
) -> Result<Option<String>, SpotifyError> {
    let client = Client::new();
    let mut snapshot = None;

    for batch in batch_track_uris(tracks) {
        let request = client
            .post(format!(
                "{uri}/playlists/{id}/tracks",
                uri = config.api_url,
                id = playlist_id
            ))
            .bearer_auth(token)
            .json(&batch);

        let res = send_with_retry(request)
            .await?
            .json::<AddTrackToPlaylistResponse>()
            .await?;
        snapshot = Some(res.snapshot_id);
    }

    Ok(snapshot)
}

/// Creates the playlist and fills it with `tracks`.
pub async fn create_with_tracks(
    config: &Config,
    token: &str,
    name: &str,
    tracks: &[TrackRecord],
) -> Result<CreatePlaylistResponse, SpotifyError> {
    let playlist = create(config, token, name).await?;
    add_tracks(config, token, &playlist.id, tracks).await?;
    Ok(playlist)
}
