use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest: `"edc orlando 2023"` -> `"Edc Orlando 2023"`, `"pov: indie"` ->
/// `"Pov: Indie"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

pub fn default_playlist_name(festival_name: Option<&str>) -> String {
    match festival_name {
        Some(name) => format!("Festival Playlist - {}", name),
        None => "Custom Playlist".to_string(),
    }
}

/// Folder holding every output of one playlist run:
/// `<output_dir>/<NameWithoutSpaces>Summary_Created<YYYY-MM-DD>/`.
pub fn playlist_output_dir(
    output_dir: &Path,
    playlist_name: &str,
    created_on: NaiveDate,
) -> PathBuf {
    output_dir.join(format!(
        "{name}Summary_Created{date}",
        name = playlist_name.replace(' ', ""),
        date = created_on.format("%Y-%m-%d")
    ))
}

/// `"M min S sec"` for a duration in milliseconds.
pub fn format_minutes_seconds(duration_ms: u64) -> String {
    format!(
        "{} min {} sec",
        duration_ms / 60_000,
        duration_ms % 60_000 / 1000
    )
}

/// Rounds to `decimals` places and drops trailing zeros: `0.50` -> `"0.5"`,
/// `1.0` -> `"1"`.
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    if formatted.contains('.') {
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            return "0".to_string();
        }
        trimmed.to_string()
    } else {
        formatted
    }
}
