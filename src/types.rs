use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute expiry timestamp in epoch seconds.
    pub expiry_time: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One row of a library CSV export. Both TIDAL and Spotify exports carry
/// these headers; the artist column is missing from some exports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceTrack {
    #[serde(rename = "Playlist name")]
    pub playlist: String,
    #[serde(rename = "Track name")]
    pub title: String,
    #[serde(rename = "Artist name", default)]
    pub artist: String,
}

/// A record that could not be placed, as written to the report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedTrack {
    #[serde(rename = "Playlist Name")]
    pub playlist: String,
    #[serde(rename = "Track Name")]
    pub title: String,
    #[serde(rename = "Artist Name")]
    pub artist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
    pub user_id: u64,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub number_of_tracks: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub total_number_of_items: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: Option<TrackArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTracksResponse {
    pub items: Vec<Track>,
    pub total_number_of_items: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchTracks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracks {
    pub items: Vec<Track>,
}
