use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    analytics::{self, PlaylistSummary, dashboard},
    cli::{app_token, user_token},
    config::Config,
    curation::{self, CurationOptions, CurationOutcome},
    error, info, lineup,
    management::PlaylistExport,
    spotify::{self, tracks::TracksPerArtist},
    success,
    types::{ArtistMatch, ArtistRecord, CreatePlaylistResponse, TrackRecord, TrackTableRow},
    utils, warning,
};

/// Everything `festlist generate` was asked to do.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub festival_url: Option<String>,
    /// Lineup names to keep. Empty keeps the whole lineup.
    pub selected: Vec<String>,
    pub manual_artists: Vec<String>,
    pub playlist_name: Option<String>,
    pub tracks_per_artist: TracksPerArtist,
    pub curation: CurationOptions,
    pub create_playlist: bool,
    pub dashboard: bool,
    pub export_songs: bool,
    pub export_artists: bool,
    pub open: bool,
}

/// Where the playlist artists come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    Festival {
        url: String,
        selected: Vec<String>,
        manual: Vec<String>,
    },
    Manual {
        names: Vec<String>,
    },
}

/// Picks the artist source; `None` when there is neither a festival nor a
/// manual artist to work from.
pub fn choose_source(
    festival_url: Option<String>,
    selected: Vec<String>,
    manual: Vec<String>,
) -> Option<PlaylistSource> {
    match festival_url {
        Some(url) => Some(PlaylistSource::Festival {
            url,
            selected,
            manual,
        }),
        None if !manual.is_empty() => Some(PlaylistSource::Manual { names: manual }),
        None => None,
    }
}

/// Spotify names of the lineup artists the user picked.
///
/// A pick matches a search hit by the scraped lineup name or by the name
/// Spotify returned, so `Tiesto` also selects `Tiësto`. An empty `selection`
/// picks every hit.
pub fn selected_names(matches: &[ArtistMatch], selection: &[String]) -> Vec<String> {
    if selection.is_empty() {
        return matches.iter().map(|m| m.artist.artist_name.clone()).collect();
    }

    let wanted: HashSet<&str> = selection.iter().map(String::as_str).collect();
    matches
        .iter()
        .filter(|m| {
            wanted.contains(m.query.as_str()) || wanted.contains(m.artist.artist_name.as_str())
        })
        .map(|m| m.artist.artist_name.clone())
        .collect()
}

fn into_records(matches: Vec<ArtistMatch>) -> Vec<ArtistRecord> {
    matches.into_iter().map(|m| m.artist).collect()
}

/// Resolves the source into the artist set that seeds the track fetch.
///
/// Returns the festival name alongside, when there is one.
async fn resolve_artists(
    config: &Config,
    token: &str,
    source: PlaylistSource,
) -> (Option<String>, Vec<ArtistRecord>) {
    match source {
        PlaylistSource::Festival {
            url,
            selected,
            manual,
        } => {
            let (festival_name, lineup_names) = match lineup::fetch_lineup(&url).await {
                Ok(lineup) => lineup,
                Err(e) => error!("Cannot load lineup from {}. Err: {}", url, e),
            };
            info!(
                "Found {} artists in the {} lineup",
                lineup_names.len(),
                festival_name
            );

            for name in selected.iter().filter(|s| !lineup_names.contains(s)) {
                warning!("{} is not part of the lineup. Ignoring.", name);
            }

            let lineup_matches = search(config, token, &lineup_names).await;
            let picked = selected_names(&lineup_matches, &selected);
            let manual_matches = search(config, token, &manual).await;

            let artists = curation::assemble_playlist_artists(
                into_records(lineup_matches),
                into_records(manual_matches),
                &picked,
            );
            (Some(festival_name), artists)
        }
        PlaylistSource::Manual { names } => {
            let manual_matches = search(config, token, &names).await;
            let artists =
                curation::assemble_playlist_artists(Vec::new(), into_records(manual_matches), &[]);
            (None, artists)
        }
    }
}

async fn search(config: &Config, token: &str, names: &[String]) -> Vec<ArtistMatch> {
    if names.is_empty() {
        return Vec::new();
    }
    match spotify::artists::search_artists(config, token, names).await {
        Ok(matches) => matches,
        Err(e) => error!("Cannot search artists. Err: {}", e),
    }
}

async fn fetch_tracks(
    config: &Config,
    token: &str,
    artists: &[ArtistRecord],
    per_artist: TracksPerArtist,
) -> Vec<TrackRecord> {
    match spotify::tracks::fetch_top_tracks(config, token, artists, per_artist).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot fetch top tracks. Err: {}", e),
    }
}

fn report_curation(fetched: usize, outcome: &CurationOutcome) {
    if !outcome.duplicates_removed.is_empty() {
        info!(
            "Removed {} duplicate songs: {}",
            outcome.duplicates_removed.len(),
            outcome.duplicates_removed.join(", ")
        );
    }
    if !outcome.remixes_removed.is_empty() {
        info!(
            "Removed {} remixes and edits: {}",
            outcome.remixes_removed.len(),
            outcome.remixes_removed.join(", ")
        );
    }
    if outcome.filtered_out > 0 {
        info!(
            "Dropped {} songs of less popular artists",
            outcome.filtered_out
        );
    }
    success!(
        "Curated {} of {} fetched songs",
        outcome.tracks.len(),
        fetched
    );
}

fn print_tracks(tracks: &[TrackRecord]) {
    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .map(|t| TrackTableRow {
            artist: t.artist_name.clone(),
            song: t.song_title.clone(),
            popularity: t.song_popularity,
        })
        .collect();
    println!("{}", Table::new(rows));
}

async fn create_playlist(
    config: &Config,
    name: &str,
    tracks: &[TrackRecord],
) -> CreatePlaylistResponse {
    let token = user_token(config).await;
    match spotify::playlist::create_with_tracks(config, &token, name, tracks).await {
        Ok(playlist) => {
            success!(
                "Playlist '{}' created with {} songs",
                playlist.name,
                tracks.len()
            );
            playlist
        }
        Err(e) => error!("Cannot create playlist {}. Err: {}", name, e),
    }
}

/// Related artists of every playlist artist. Failed lookups are skipped.
async fn related_artists(
    config: &Config,
    token: &str,
    artists: &[ArtistRecord],
) -> Vec<Vec<String>> {
    let pb = ProgressBar::new(artists.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{pos}/{len}]")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Looking up related artists...");

    let mut related = Vec::with_capacity(artists.len());
    for artist in artists {
        match spotify::artists::related_artist_names(config, token, &artist.artist_id).await {
            Ok(names) => related.push(names),
            Err(e) => pb.suspend(|| {
                warning!(
                    "No related artists for {}. Err: {}",
                    artist.artist_name,
                    e
                )
            }),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    related
}

async fn write_dashboard(
    config: &Config,
    token: &str,
    summary: PlaylistSummary,
    artists: &[ArtistRecord],
    tracks: &[TrackRecord],
    dir: &Path,
) -> PathBuf {
    let related = related_artists(config, token, artists).await;
    let playlist_artists: Vec<String> = artists.iter().map(|a| a.artist_name.clone()).collect();
    let summary = PlaylistSummary {
        recommended_artists: analytics::recommend_artists(
            &related,
            &playlist_artists,
            analytics::DEFAULT_RECOMMENDATION_COUNT,
        ),
        ..summary
    };
    if !summary.recommended_artists.is_empty() {
        info!(
            "You might also like: {}",
            summary.recommended_artists_message()
        );
    }

    let trends = analytics::feature_trends(tracks);
    let html = dashboard::render(&summary, &analytics::artist_summaries(tracks), &trends);

    match dashboard::write(dir, &html).await {
        Ok(path) => {
            success!("Dashboard written to {}", path.display());
            path
        }
        Err(e) => error!("Cannot write dashboard. Err: {}", e),
    }
}

fn print_summary(summary: &PlaylistSummary, tracks: &[TrackRecord]) {
    info!("{}", summary.songs_and_runtime());
    if !summary.top_genres.is_empty() {
        info!("Top genres: {}", summary.top_genres_message());
    }
    info!("{}", analytics::trend_headline(&analytics::feature_trends(tracks)));
}

async fn export(
    export: &PlaylistExport,
    tracks: &[TrackRecord],
    artists: Option<&[ArtistRecord]>,
) {
    match export.save_songs(tracks).await {
        Ok(path) => success!("Songs exported to {}", path.display()),
        Err(e) => error!("Cannot export songs. Err: {}", e),
    }

    if let Some(artists) = artists {
        match export.save_artists(artists).await {
            Ok(path) => success!("Artists exported to {}", path.display()),
            Err(e) => error!("Cannot export artists. Err: {}", e),
        }
    }
}

fn open_in_browser(target: &str) {
    if let Err(e) = webbrowser::open(target) {
        warning!("Cannot open {} in browser. Err: {}", target, e);
    }
}

/// Builds a playlist from a festival lineup and/or manually named artists.
///
/// Steps run strictly in order: choose source, resolve artists, fetch
/// tracks, curate, create the playlist, write the dashboard, export.
pub async fn generate(config: Config, opts: GenerateOptions) {
    let source = match choose_source(
        opts.festival_url.clone(),
        opts.selected.clone(),
        opts.manual_artists.clone(),
    ) {
        Some(source) => source,
        None => error!("Nothing to do. Pass --festival-url and/or at least one --artist."),
    };

    let token = app_token(&config).await;

    let (festival_name, artists) = resolve_artists(&config, &token, source).await;
    if artists.is_empty() {
        error!("No artists left to build a playlist from.");
    }
    info!("Building playlist from {} artists", artists.len());

    let playlist_name = opts
        .playlist_name
        .clone()
        .unwrap_or_else(|| utils::default_playlist_name(festival_name.as_deref()));

    let fetched = fetch_tracks(&config, &token, &artists, opts.tracks_per_artist).await;
    let fetched_count = fetched.len();
    let outcome = curation::curate(fetched, opts.curation);
    report_curation(fetched_count, &outcome);
    let tracks = outcome.tracks;

    if tracks.is_empty() {
        warning!("No songs survived curation. Nothing to publish.");
        return;
    }
    print_tracks(&tracks);

    let playlist = if opts.create_playlist {
        Some(create_playlist(&config, &playlist_name, &tracks).await)
    } else {
        None
    };

    let created_on: NaiveDate = Local::now().date_naive();
    let mut summary =
        PlaylistSummary::from_tracks(&playlist_name, created_on, &tracks, Vec::new());
    if let Some(playlist) = &playlist {
        summary = summary.with_playlist_id(&playlist.id);
    }
    print_summary(&summary, &tracks);

    let output = PlaylistExport::new(&config.output_dir, &playlist_name, created_on);

    let dashboard_path = if opts.dashboard {
        let path = write_dashboard(
            &config,
            &token,
            summary.clone(),
            &artists,
            &tracks,
            output.dir(),
        )
        .await;
        Some(path)
    } else {
        None
    };

    if opts.export_songs {
        let artists = opts.export_artists.then_some(artists.as_slice());
        export(&output, &tracks, artists).await;
    }

    if opts.open {
        match (&dashboard_path, &summary.playlist_url) {
            (Some(path), _) => open_in_browser(&path.to_string_lossy()),
            (None, Some(url)) => open_in_browser(url),
            (None, None) => warning!("Nothing to open."),
        }
    }
}
