use std::{collections::HashMap, path::PathBuf};

use festlist::config::Config;
use festlist::error::ConfigError;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "client-id"),
    ("SPOTIFY_API_AUTH_CLIENT_SECRET", "client-secret"),
    ("SPOTIFY_USER_ID", "festival-fan"),
];

#[test]
fn test_config_defaults() {
    let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

    assert_eq!(config.client_id, "client-id");
    assert_eq!(config.user_id, "festival-fan");
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(config.market, "US");
    assert!(config.output_dir.starts_with(&config.data_dir));
    assert!(config.token_path().ends_with("cache/token.json"));
}

#[test]
fn test_config_missing_required() {
    let result = Config::from_lookup(lookup_from(&REQUIRED[1..]));

    assert!(matches!(
        result,
        Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));
}

#[test]
fn test_config_blank_counts_as_missing() {
    let mut vars = REQUIRED.to_vec();
    vars[2] = ("SPOTIFY_USER_ID", "   ");

    let result = Config::from_lookup(lookup_from(&vars));

    assert!(matches!(result, Err(ConfigError::Missing("SPOTIFY_USER_ID"))));
}

#[test]
fn test_config_overrides() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("SPOTIFY_API_URL", "http://localhost:9000/v1/"));
    vars.push(("SPOTIFY_MARKET", "DE"));
    vars.push(("FESTLIST_OUTPUT_DIR", "/tmp/playlists"));

    let config = Config::from_lookup(lookup_from(&vars)).unwrap();

    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.market, "DE");
    assert_eq!(config.output_dir, PathBuf::from("/tmp/playlists"));
}

#[test]
fn test_config_with_output_dir() {
    let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
    let default_dir = config.output_dir.clone();

    let unchanged = config.clone().with_output_dir(None);
    assert_eq!(unchanged.output_dir, default_dir);

    let changed = config.with_output_dir(Some(PathBuf::from("./out")));
    assert_eq!(changed.output_dir, PathBuf::from("./out"));
}
