use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Config,
    error::SpotifyError,
    spotify::send_with_retry,
    types::{
        ArtistMatch, ArtistRecord, RelatedArtistsResponse, SearchArtistsResponse, SpotifyArtist,
    },
    warning,
};

/// Genre acronyms restored after title-casing. Not exhaustive.
const GENRE_ACRONYMS: [(&str, &str); 7] = [
    ("Edm", "EDM"),
    ("Dnb", "DnB"),
    ("Uk", "UK"),
    ("Pov", "POV"),
    ("Mbp", "MBP"),
    ("Atl", "ATL"),
    ("Nyc", "NYC"),
];

/// Title-cases a Spotify genre and restores known acronyms standing as a
/// whole word.
///
/// `"edm"` -> `"EDM"`, `"uk garage"` -> `"UK Garage"`,
/// `"pov: indie"` -> `"POV: Indie"`, `"atlanta hip hop"` stays
/// `"Atlanta Hip Hop"`.
pub fn capitalize_genre(genre: &str) -> String {
    crate::utils::title_case(genre)
        .split(' ')
        .map(|word| {
            let end = word
                .find(|c: char| !c.is_alphanumeric())
                .unwrap_or(word.len());
            let (head, tail) = word.split_at(end);
            match GENRE_ACRONYMS.iter().find(|(from, _)| *from == head) {
                Some((_, to)) => format!("{}{}", to, tail),
                None => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Converts a search hit into an [`ArtistRecord`].
///
/// Spotify lists images largest first; the last one is the thumbnail.
pub fn artist_record(artist: SpotifyArtist) -> ArtistRecord {
    ArtistRecord {
        artist_genres: artist.genres.iter().map(|g| capitalize_genre(g)).collect(),
        artist_popularity: artist.popularity,
        artist_image_url: artist.images.last().map(|i| i.url.clone()),
        artist_id: artist.id,
        artist_name: artist.name,
    }
}

/// Searches Spotify for the best match of a single artist name.
///
/// # Errors
///
/// [`SpotifyError::NoSearchResult`] when the search returns no artist.
pub async fn search_artist(
    config: &Config,
    token: &str,
    name: &str,
) -> Result<ArtistRecord, SpotifyError> {
    let request = Client::new()
        .get(format!("{}/search", config.api_url))
        .query(&[("q", name), ("type", "artist"), ("limit", "1")])
        .bearer_auth(token);

    let res = send_with_retry(request)
        .await?
        .json::<SearchArtistsResponse>()
        .await?;

    let artist = res
        .artists
        .items
        .into_iter()
        .next()
        .ok_or_else(|| SpotifyError::NoSearchResult(name.to_string()))?;

    Ok(artist_record(artist))
}

/// True when the best hit carries a different name than the query,
/// e.g. `Tiesto` -> `Tiësto`. Case is ignored.
pub fn is_name_mismatch(query: &str, found: &str) -> bool {
    query.to_uppercase() != found.to_uppercase()
}

/// Searches every name in `names`, one best match each, in input order.
///
/// Names without any match are skipped with a warning; other failures abort.
/// A hit under a different name is kept and reported.
pub async fn search_artists(
    config: &Config,
    token: &str,
    names: &[String],
) -> Result<Vec<ArtistMatch>, SpotifyError> {
    let pb = ProgressBar::new(names.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{pos}/{len}]")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Searching artists on Spotify...");

    let mut artists = Vec::with_capacity(names.len());
    for name in names {
        match search_artist(config, token, name).await {
            Ok(artist) => {
                if is_name_mismatch(name, &artist.artist_name) {
                    pb.suspend(|| {
                        warning!(
                            "Searching for {} yielded result {}.",
                            name,
                            artist.artist_name
                        )
                    });
                }
                artists.push(ArtistMatch {
                    query: name.clone(),
                    artist,
                });
            }
            Err(SpotifyError::NoSearchResult(n)) => {
                pb.suspend(|| warning!("No Spotify artist found for {}. Skipping.", n));
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(artists)
}

/// Names of the artists Spotify considers related to `artist_id`.
pub async fn related_artist_names(
    config: &Config,
    token: &str,
    artist_id: &str,
) -> Result<Vec<String>, SpotifyError> {
    let request = Client::new()
        .get(format!(
            "{uri}/artists/{id}/related-artists",
            uri = config.api_url,
            id = artist_id
        ))
        .bearer_auth(token);

    let res = send_with_retry(request)
        .await?
        .json::<RelatedArtistsResponse>()
        .await?;

    Ok(res.artists.into_iter().map(|a| a.name).collect())
}
