use tabled::Table;

use crate::{
    cli::app_token, config::Config, error, info, spotify, types::ArtistTableRow, warning,
};

/// Looks up every name on Spotify and prints the matched artists.
pub async fn search_artists(config: Config, names: Vec<String>) {
    let token = app_token(&config).await;

    let matches = match spotify::artists::search_artists(&config, &token, &names).await {
        Ok(m) => m,
        Err(e) => error!("Cannot search artists. Err: {}", e),
    };

    if matches.is_empty() {
        warning!("No artists found.");
        return;
    }

    let rows: Vec<ArtistTableRow> = matches
        .into_iter()
        .map(|m| ArtistTableRow {
            name: m.artist.artist_name,
            popularity: m.artist.artist_popularity,
            genres: m
                .artist
                .artist_genres
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    info!("Found {} of {} artists", rows.len(), names.len());
    println!("{}", Table::new(rows));
}
