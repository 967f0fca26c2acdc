use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::SourceTrack;

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

/// Drops every record whose track name was already seen, keeping the first
/// occurrence in iteration order. The key is the exact track name, so two
/// different songs sharing a name collapse into one record.
pub fn dedupe_tracks(records: &mut Vec<SourceTrack>) {
    let mut seen_titles = HashSet::new();
    records.retain(|record| seen_titles.insert(record.title.clone()));
}

/// Builds the free-text catalog search query for a record: "title artist"
/// when an artist is known, the bare title otherwise.
pub fn build_search_query(title: &str, artist: &str) -> String {
    if artist.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, artist)
    }
}
