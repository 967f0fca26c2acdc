use tidalsync::types::SourceTrack;
use tidalsync::utils::*;

// Helper function to create a source record
fn record(playlist: &str, title: &str, artist: &str) -> SourceTrack {
    SourceTrack {
        playlist: playlist.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_dedupe_tracks_keeps_first_occurrence() {
    let mut records = vec![
        record("Road Trip", "Yellow", "Coldplay"),
        record("Gym", "Ghost Song", ""),
        record("Chill", "Yellow", "Someone Else"), // same track name, different song
        record("Road Trip", "Clocks", "Coldplay"),
    ];

    dedupe_tracks(&mut records);

    // Should have 3 unique track names
    assert_eq!(records.len(), 3);

    // First-seen order is preserved, later duplicates dropped
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Yellow", "Ghost Song", "Clocks"]);

    // The surviving "Yellow" is the first one, regardless of source
    assert_eq!(records[0].artist, "Coldplay");
}

#[test]
fn test_dedupe_tracks_is_case_sensitive() {
    // Deduplication keys on the exact track name
    let mut records = vec![
        record("A", "Yellow", "Coldplay"),
        record("A", "yellow", "Coldplay"),
    ];

    dedupe_tracks(&mut records);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_build_search_query() {
    // Track plus artist when the artist is known
    assert_eq!(build_search_query("Yellow", "Coldplay"), "Yellow Coldplay");

    // Bare track name when the artist is empty
    assert_eq!(build_search_query("Ghost Song", ""), "Ghost Song");
}
