use std::path::{Path, PathBuf};

use tabled::Tabled;

use crate::{
    analytics::{FeatureBand, PlaylistSummary, trend_headline},
    error::ExportError,
    types::ArtistSummaryRow,
};

pub const DASHBOARD_FILE_NAME: &str = "summary_dashboard.html";

const TEMPLATE: &str = include_str!("../../templates/dashboard.html");

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the artist summary as an HTML table, headers taken from the
/// row's `Tabled` names.
pub fn artist_table_html(rows: &[ArtistSummaryRow]) -> String {
    let header: String = ArtistSummaryRow::headers()
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .fields()
                .iter()
                .map(|f| format!("<td>{}</td>", escape_html(f)))
                .collect();
            format!("<tr>{}</tr>\n", cells)
        })
        .collect();

    format!(
        "<table class=\"table\">\n<thead><tr>{}</tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        header, body
    )
}

fn trend_lines_html(trends: &[FeatureBand]) -> String {
    trends
        .iter()
        .map(|t| format!("<div class=\"line2\">{}</div>", escape_html(&t.message())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn playlist_link_html(summary: &PlaylistSummary) -> String {
    match &summary.playlist_url {
        Some(url) => format!(
            "<a href=\"{url}\" target=\"_blank\">Open in Spotify</a>",
            url = escape_html(url)
        ),
        None => String::new(),
    }
}

/// Replaces every `{{key}}` in `template` with its value in one pass.
///
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder stays as it is. Unknown placeholders are kept.
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Fills the dashboard template with the summary, trends and artist table.
pub fn render(
    summary: &PlaylistSummary,
    artist_rows: &[ArtistSummaryRow],
    trends: &[FeatureBand],
) -> String {
    let recommended = if summary.recommended_artists.is_empty() {
        "No recommendations available".to_string()
    } else {
        summary.recommended_artists_message()
    };

    fill_template(
        TEMPLATE,
        &[
            ("playlist_name", escape_html(&summary.playlist_name)),
            (
                "playlist_created_on",
                summary.created_on.format("%m-%d-%Y").to_string(),
            ),
            ("playlist_link", playlist_link_html(summary)),
            (
                "num_dur_songs_msg",
                escape_html(&summary.songs_and_runtime()),
            ),
            ("top_genres_msg", escape_html(&summary.top_genres_message())),
            ("recommended_artists_msg", escape_html(&recommended)),
            ("trend_headline", escape_html(&trend_headline(trends))),
            ("trend_lines", trend_lines_html(trends)),
            ("artist_summary_table", artist_table_html(artist_rows)),
        ],
    )
}

/// Writes the rendered dashboard into `dir`, creating it if needed.
pub async fn write(dir: &Path, html: &str) -> Result<PathBuf, ExportError> {
    async_fs::create_dir_all(dir).await?;
    let path = dir.join(DASHBOARD_FILE_NAME);
    async_fs::write(&path, html).await?;
    Ok(path)
}
