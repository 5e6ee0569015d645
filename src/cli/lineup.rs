use tabled::Table;

use crate::{error, info, lineup, types::LineupTableRow};

pub async fn show_lineup(url: String) {
    let (festival_name, artists) = match lineup::fetch_lineup(&url).await {
        Ok(lineup) => lineup,
        Err(e) => error!("Cannot load lineup. Err: {}", e),
    };

    info!("{} artists in the {} lineup", artists.len(), festival_name);

    let rows: Vec<LineupTableRow> = artists
        .into_iter()
        .enumerate()
        .map(|(i, artist)| LineupTableRow {
            position: i + 1,
            artist,
        })
        .collect();
    println!("{}", Table::new(rows));
}
