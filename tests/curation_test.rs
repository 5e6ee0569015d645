use std::collections::HashSet;

use festlist::curation::*;
use festlist::types::{ArtistRecord, AudioFeatures, TrackRecord};

// Helper function to create a test track
fn create_test_track(
    artist: &str,
    title: &str,
    track_id: &str,
    song_popularity: u8,
    artist_popularity: u8,
) -> TrackRecord {
    TrackRecord {
        song_title: title.to_string(),
        artist_name: artist.to_string(),
        song_popularity,
        song_duration_ms: 200_000,
        audio_features: AudioFeatures::default(),
        artist_genres: vec!["EDM".to_string()],
        artist_popularity,
        artist_id: format!("{}_id", artist.to_lowercase()),
        track_id: track_id.to_string(),
        artist_image_url: None,
    }
}

// Helper function to create a test artist
fn create_test_artist(name: &str, id: &str) -> ArtistRecord {
    ArtistRecord {
        artist_name: name.to_string(),
        artist_genres: vec![],
        artist_popularity: 70,
        artist_id: id.to_string(),
        artist_image_url: None,
    }
}

fn titles(tracks: &[TrackRecord]) -> Vec<&str> {
    tracks.iter().map(|t| t.song_title.as_str()).collect()
}

fn tracks_of(tracks: &[TrackRecord], artist: &str) -> Vec<TrackRecord> {
    tracks
        .iter()
        .filter(|t| t.artist_name == artist)
        .cloned()
        .collect()
}

fn sample_with_duplicates() -> Vec<TrackRecord> {
    vec![
        create_test_track("Zedd", "Clarity", "t1", 80, 75),
        create_test_track("Alesso", "Heroes", "t2", 70, 70),
        create_test_track("Zedd", "Clarity (feat. Foxes)", "t1", 80, 75),
        create_test_track("Zedd", "Stay", "t3", 60, 75),
        create_test_track("Alesso", "Heroes again", "t2", 70, 70),
    ]
}

#[test]
fn test_remove_duplicates_keeps_first_occurrence() {
    let (kept, removed) = remove_duplicates(sample_with_duplicates());

    assert_eq!(titles(&kept), vec!["Clarity", "Heroes", "Stay"]);
    assert_eq!(removed, vec!["Clarity (feat. Foxes)", "Heroes again"]);
}

#[test]
fn test_remove_duplicates_conserves_count() {
    let input = sample_with_duplicates();
    let input_len = input.len();

    let (kept, removed) = remove_duplicates(input);
    assert_eq!(input_len, kept.len() + removed.len());
}

#[test]
fn test_remove_duplicates_output_has_unique_ids() {
    let (kept, _) = remove_duplicates(sample_with_duplicates());

    let ids: HashSet<&str> = kept.iter().map(|t| t.track_id.as_str()).collect();
    assert_eq!(ids.len(), kept.len());
}

#[test]
fn test_remove_duplicates_is_idempotent() {
    let (once, _) = remove_duplicates(sample_with_duplicates());
    let (twice, removed) = remove_duplicates(once.clone());

    assert_eq!(once, twice);
    assert!(removed.is_empty());
}

#[test]
fn test_remove_duplicates_degenerate_inputs() {
    let (kept, removed) = remove_duplicates(vec![]);
    assert!(kept.is_empty());
    assert!(removed.is_empty());

    let same = create_test_track("Zedd", "Clarity", "t1", 80, 75);
    let (kept, removed) = remove_duplicates(vec![same.clone(), same.clone(), same]);
    assert_eq!(kept.len(), 1);
    assert_eq!(removed, vec!["Clarity", "Clarity"]);
}

#[test]
fn test_split_base_name() {
    assert_eq!(
        split_base_name("Where You Are - Kaskade Remix"),
        ("Where You Are", Some("Kaskade Remix"))
    );
    assert_eq!(split_base_name("Clarity"), ("Clarity", None));

    // Only the first separator splits
    assert_eq!(
        split_base_name("Titanium - David Guetta - Radio Edit"),
        ("Titanium", Some("David Guetta - Radio Edit"))
    );

    // Hyphen without surrounding spaces is part of the title
    assert_eq!(split_base_name("Hip-Hop"), ("Hip-Hop", None));
}

#[test]
fn test_split_base_name_needs_both_sides() {
    assert_eq!(split_base_name(" - Remix"), (" - Remix", None));
    assert_eq!(split_base_name("Song - "), ("Song - ", None));
    assert_eq!(split_base_name(""), ("", None));
}

#[test]
fn test_split_base_name_overlapping_separators() {
    // A leading separator does not hide the one overlapping it
    assert_eq!(split_base_name(" - - X"), (" -", Some("X")));
    assert_eq!(split_base_name("A - - B"), ("A", Some("- B")));
    assert_eq!(split_base_name("Ö - Mix"), ("Ö", Some("Mix")));
}

#[test]
fn test_remove_remixes_keeps_more_popular_original() {
    let input = vec![
        create_test_track("Artist", "Song A", "t1", 80, 70),
        create_test_track("Artist", "Song A - Remix", "t2", 60, 70),
    ];

    let (kept, removed) = remove_remixes_and_edits(input);

    assert_eq!(titles(&kept), vec!["Song A"]);
    assert_eq!(removed, vec!["Song A - Remix"]);
}

#[test]
fn test_remove_remixes_keeps_more_popular_remix() {
    let input = vec![
        create_test_track("Artist", "Song A", "t1", 40, 70),
        create_test_track("Artist", "Song A - Radio Edit", "t2", 90, 70),
        create_test_track("Artist", "Song A - Extended Mix", "t3", 20, 70),
    ];

    let (kept, removed) = remove_remixes_and_edits(input);

    assert_eq!(titles(&kept), vec!["Song A - Radio Edit"]);
    // Reported in input order
    assert_eq!(removed, vec!["Song A", "Song A - Extended Mix"]);
}

#[test]
fn test_remove_remixes_equal_popularity_keeps_first() {
    let input = vec![
        create_test_track("Artist", "Song A - Remix", "t1", 50, 70),
        create_test_track("Artist", "Song A", "t2", 50, 70),
    ];

    let (kept, removed) = remove_remixes_and_edits(input);

    assert_eq!(titles(&kept), vec!["Song A - Remix"]);
    assert_eq!(removed, vec!["Song A"]);
}

#[test]
fn test_remove_remixes_groups_across_artists() {
    let input = vec![
        create_test_track("Zedd", "Intro", "t1", 40, 75),
        create_test_track("Alesso", "Intro", "t2", 70, 70),
    ];

    let (kept, removed) = remove_remixes_and_edits(input);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].artist_name, "Alesso");
    assert_eq!(removed, vec!["Intro"]);
}

#[test]
fn test_remove_remixes_sorts_by_artist() {
    let input = vec![
        create_test_track("Zedd", "Stay", "t1", 60, 75),
        create_test_track("Alesso", "Heroes", "t2", 50, 70),
        create_test_track("Zedd", "Clarity", "t3", 80, 75),
    ];

    let (kept, removed) = remove_remixes_and_edits(input);

    let artists: Vec<&str> = kept.iter().map(|t| t.artist_name.as_str()).collect();
    assert_eq!(artists, vec!["Alesso", "Zedd", "Zedd"]);
    // Rows of one artist stay in popularity order
    assert_eq!(titles(&kept), vec!["Heroes", "Clarity", "Stay"]);
    assert!(removed.is_empty());
}

#[test]
fn test_remove_remixes_one_row_per_base_name() {
    let input = vec![
        create_test_track("Zedd", "Clarity", "t1", 80, 75),
        create_test_track("Zedd", "Clarity - Tiesto Remix", "t2", 70, 75),
        create_test_track("Zedd", "Clarity - Acoustic", "t3", 65, 75),
        create_test_track("Zedd", "Stay", "t4", 60, 75),
        create_test_track("Zedd", "Stay - Radio Edit", "t5", 61, 75),
        create_test_track("Alesso", "Heroes", "t6", 50, 70),
    ];
    let input_len = input.len();

    let (kept, removed) = remove_remixes_and_edits(input);

    assert!(kept.len() <= input_len);
    assert_eq!(kept.len() + removed.len(), input_len);

    let bases: HashSet<&str> = kept
        .iter()
        .map(|t| split_base_name(&t.song_title).0)
        .collect();
    assert_eq!(bases.len(), kept.len());
    assert_eq!(
        titles(&kept),
        vec!["Heroes", "Clarity", "Stay - Radio Edit"]
    );
}

#[test]
fn test_remove_remixes_empty_input() {
    let (kept, removed) = remove_remixes_and_edits(vec![]);
    assert!(kept.is_empty());
    assert!(removed.is_empty());
}

#[test]
fn test_retention_arithmetic() {
    assert_eq!(retention_percentage(80, 50), 70);
    assert_eq!(retained_count(70, 10), 7);

    assert_eq!(retention_percentage(80, 80), 100);
    assert_eq!(retained_count(100, 10), 10);
}

#[test]
fn test_retention_floors() {
    // Gap of 90 would leave 10 %
    assert_eq!(retention_percentage(95, 5), MIN_RETENTION_PERCENTAGE);

    // 30 % of 3 rounds down to 0
    assert_eq!(retained_count(30, 3), MIN_RETAINED_COUNT);
    assert_eq!(retained_count(100, 1), MIN_RETAINED_COUNT);
}

#[test]
fn test_filter_by_artist_popularity_trims_less_popular_artist() {
    let mut input = Vec::new();
    for i in 0..10 {
        input.push(create_test_track("Zedd", &format!("Z{}", i), &format!("z{}", i), 50, 80));
        input.push(create_test_track("Alesso", &format!("A{}", i), &format!("a{}", i), 50, 50));
    }

    let output = filter_by_artist_popularity(input);

    let zedd = tracks_of(&output, "Zedd");
    let alesso = tracks_of(&output, "Alesso");
    assert_eq!(zedd.len(), 10);
    assert_eq!(alesso.len(), 7);
    assert_eq!(
        titles(&alesso),
        vec!["A0", "A1", "A2", "A3", "A4", "A5", "A6"]
    );

    // Grouped alphabetically by artist
    assert_eq!(output[0].artist_name, "Alesso");
    assert_eq!(output[7].artist_name, "Zedd");
}

#[test]
fn test_filter_by_artist_popularity_never_fabricates_rows() {
    let mut input: Vec<TrackRecord> = (0..10)
        .map(|i| create_test_track("Zedd", &format!("Z{}", i), &format!("z{}", i), 50, 80))
        .collect();
    input.push(create_test_track("Opener", "Only Song", "o1", 10, 5));

    let output = filter_by_artist_popularity(input);

    let opener = tracks_of(&output, "Opener");
    assert_eq!(opener.len(), 1);
    assert_eq!(opener[0].song_title, "Only Song");
}

#[test]
fn test_filter_by_artist_popularity_keeps_minimum_two() {
    let mut input: Vec<TrackRecord> = (0..5)
        .map(|i| create_test_track("Zedd", &format!("Z{}", i), &format!("z{}", i), 50, 90))
        .collect();
    for i in 0..5 {
        input.push(create_test_track("Opener", &format!("O{}", i), &format!("o{}", i), 50, 10));
    }

    let output = filter_by_artist_popularity(input);

    // 30 % of 5 rounds down to 1, raised to 2
    assert_eq!(titles(&tracks_of(&output, "Opener")), vec!["O0", "O1"]);
    assert_eq!(tracks_of(&output, "Zedd").len(), 5);
}

#[test]
fn test_filter_by_artist_popularity_empty_input() {
    assert!(filter_by_artist_popularity(vec![]).is_empty());
}

#[test]
fn test_assemble_playlist_artists_removes_cross_source_duplicates() {
    let lineup = vec![
        create_test_artist("Alesso", "alesso_lineup"),
        create_test_artist("Tiësto", "tiesto_lineup"),
        create_test_artist("Zedd", "zedd_lineup"),
    ];
    let manual = vec![
        create_test_artist("Zedd", "zedd_manual"),
        create_test_artist("Porter Robinson", "porter_manual"),
    ];
    let selected = vec!["Zedd".to_string(), "Alesso".to_string()];

    let artists = assemble_playlist_artists(lineup, manual, &selected);

    let names: Vec<&str> = artists.iter().map(|a| a.artist_name.as_str()).collect();
    assert_eq!(names, vec!["Alesso", "Zedd", "Porter Robinson"]);
    assert_eq!(names.iter().filter(|n| **n == "Zedd").count(), 1);

    // Lineup row wins over the manual one
    assert_eq!(artists[1].artist_id, "zedd_lineup");
}

#[test]
fn test_assemble_playlist_artists_without_selection() {
    let lineup = vec![create_test_artist("Alesso", "a1")];
    let manual = vec![
        create_test_artist("Zedd", "z1"),
        create_test_artist("Zedd", "z2"),
    ];

    let artists = assemble_playlist_artists(lineup, manual, &[]);

    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].artist_id, "z1");
}

#[test]
fn test_curate_passes_clean_rows_through() {
    let input = vec![
        create_test_track("Zedd", "Clarity", "t1", 70, 75),
        create_test_track("Alesso", "Heroes", "t2", 80, 75),
        create_test_track("Zedd", "Stay", "t3", 60, 75),
    ];

    let outcome = curate(input.clone(), CurationOptions::default());

    assert!(outcome.duplicates_removed.is_empty());
    assert!(outcome.remixes_removed.is_empty());
    assert_eq!(outcome.filtered_out, 0);
    assert_eq!(titles(&outcome.tracks), vec!["Heroes", "Clarity", "Stay"]);

    let mut expected = input;
    expected.sort_by(|a, b| a.track_id.cmp(&b.track_id));
    let mut actual = outcome.tracks;
    actual.sort_by(|a, b| a.track_id.cmp(&b.track_id));
    assert_eq!(actual, expected);
}

#[test]
fn test_curate_reports_every_stage() {
    let mut input = vec![
        create_test_track("Zedd", "Clarity", "t1", 80, 80),
        create_test_track("Zedd", "Clarity", "t1", 80, 80),
        create_test_track("Zedd", "Clarity - Remix", "t2", 50, 80),
        create_test_track("Zedd", "Stay", "t3", 70, 80),
        create_test_track("Zedd", "Spectrum", "t4", 60, 80),
        create_test_track("Zedd", "Beautiful Now", "t5", 55, 80),
    ];
    for i in 0..4 {
        input.push(create_test_track("Opener", &format!("O{}", i), &format!("o{}", i), 50, 10));
    }

    let outcome = curate(input, CurationOptions::default());

    assert_eq!(outcome.duplicates_removed, vec!["Clarity"]);
    assert_eq!(outcome.remixes_removed, vec!["Clarity - Remix"]);
    // Opener keeps 2 of 4 (30 % of 4 raised to 2)
    assert_eq!(outcome.filtered_out, 2);
    assert_eq!(outcome.tracks.len(), 6);
}

#[test]
fn test_curate_respects_options() {
    let input = vec![
        create_test_track("Zedd", "Clarity", "t1", 80, 80),
        create_test_track("Zedd", "Clarity - Remix", "t2", 50, 80),
        create_test_track("Opener", "O1", "o1", 50, 10),
        create_test_track("Opener", "O2", "o2", 50, 10),
        create_test_track("Opener", "O3", "o3", 50, 10),
    ];

    let outcome = curate(
        input,
        CurationOptions {
            include_remixes: true,
            artist_popularity_filtering: false,
        },
    );

    assert!(outcome.remixes_removed.is_empty());
    assert_eq!(outcome.filtered_out, 0);
    assert_eq!(outcome.tracks.len(), 5);
    // Without remix collapsing the input order is untouched
    assert_eq!(outcome.tracks[1].song_title, "Clarity - Remix");
}
