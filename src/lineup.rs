//! Festival lineup scraping.
//!
//! Lineups are read from a festival page on songkick.com, where every
//! performing artist is an anchor inside `<ul class="festival">`. The
//! festival's display name is derived from the page URL, e.g.
//! `.../id/40754508-edc-orlando-2023` -> `Edc Orlando 2023`.

use reqwest::{Client, header::USER_AGENT};
use scraper::{Html, Selector};

use crate::{error::LineupError, utils};

/// Used when the URL does not follow the `.../id/<number>-<slug>` pattern.
pub const FALLBACK_FESTIVAL_NAME: &str = "your music festival";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:52.0) Gecko/20100101 Firefox/52.0";

/// Fetches a festival page and returns its display name and sorted lineup.
///
/// # Errors
///
/// - [`LineupError::Http`] when the page cannot be downloaded
/// - [`LineupError::MissingLineup`] when the page has no lineup list
pub async fn fetch_lineup(url: &str) -> Result<(String, Vec<String>), LineupError> {
    let html = Client::new()
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let artists = parse_lineup(&html)?;
    Ok((festival_name_from_url(url), artists))
}

/// Extracts the sorted artist names from a festival page.
pub fn parse_lineup(html: &str) -> Result<Vec<String>, LineupError> {
    let document = Html::parse_document(html);
    // Both selectors are literals
    let list_selector = Selector::parse("ul.festival").expect("valid selector");
    let link_selector = Selector::parse("a").expect("valid selector");

    let list = document
        .select(&list_selector)
        .next()
        .ok_or(LineupError::MissingLineup)?;

    let mut artists: Vec<String> = list
        .select(&link_selector)
        .filter_map(|a| a.text().next())
        .map(|text| text.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    artists.sort();
    Ok(artists)
}

/// Derives a readable festival name from a songkick festival URL.
pub fn festival_name_from_url(url: &str) -> String {
    url.split_once("id/")
        .and_then(|(_, rest)| rest.split_once('-'))
        .map(|(_, slug)| utils::title_case(&slug.replace('-', " ")))
        .unwrap_or_else(|| FALLBACK_FESTIVAL_NAME.to_string())
}
