//! Configuration management for the TIDAL CSV import CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including TIDAL API credentials, endpoint
//! URLs, server settings, and the fixed default file names of a sync run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (the public TIDAL endpoints)

use dotenv;
use std::{env, path::PathBuf};

/// Default path of the persisted OAuth token, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "tidal_token.json";

/// Default path of the TIDAL library export.
pub const DEFAULT_TIDAL_LIBRARY: &str = "My TIDAL Library.csv";

/// Default path of the Spotify library export.
pub const DEFAULT_SPOTIFY_LIBRARY: &str = "My Spotify Library.csv";

/// Default path of the unmatched-records report.
pub const DEFAULT_NOT_FOUND_FILE: &str = "not_found_tracks.csv";

/// Description attached to every playlist this tool creates.
pub const PLAYLIST_DESCRIPTION: &str = "Playlist created from CSV file";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `tidalsync/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// A missing `.env` file is not an error: every setting except the client ID
/// has a usable default, and the client ID may also be provided directly via
/// the process environment.
///
/// # Errors
///
/// This function will return an error if the parent directory cannot be
/// created or an existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tidalsync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads the `SERVER_ADDRESS` environment variable, falling back to
/// `127.0.0.1:8585`. Must agree with the host and port of the registered
/// redirect URI.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8585".to_string())
}

/// Returns the TIDAL API client ID for authentication.
///
/// Retrieves the `TIDAL_CLIENT_ID` environment variable which contains the
/// client ID obtained when registering the application on the TIDAL
/// developer platform.
///
/// # Panics
///
/// Panics if the `TIDAL_CLIENT_ID` environment variable is not set.
pub fn tidal_client_id() -> String {
    env::var("TIDAL_CLIENT_ID").expect("TIDAL_CLIENT_ID must be set")
}

/// Returns the TIDAL OAuth redirect URI.
///
/// Reads the `TIDAL_REDIRECT_URI` environment variable, falling back to
/// `http://127.0.0.1:8585/callback`. This must match the redirect URI
/// registered in the TIDAL application settings.
pub fn tidal_redirect_uri() -> String {
    env::var("TIDAL_REDIRECT_URI").unwrap_or_else(|_| "http://127.0.0.1:8585/callback".to_string())
}

/// Returns the OAuth scope requested during authorization.
///
/// Reads the `TIDAL_AUTH_SCOPE` environment variable, falling back to
/// `r_usr w_usr` (read and modify the user's library and playlists).
pub fn tidal_scope() -> String {
    env::var("TIDAL_AUTH_SCOPE").unwrap_or_else(|_| "r_usr w_usr".to_string())
}

/// Returns the TIDAL OAuth authorization URL.
///
/// Reads the `TIDAL_AUTH_URL` environment variable, falling back to the
/// public `https://login.tidal.com/authorize` endpoint. This is where users
/// are redirected to grant permissions to the application.
pub fn tidal_auth_url() -> String {
    env::var("TIDAL_AUTH_URL").unwrap_or_else(|_| "https://login.tidal.com/authorize".to_string())
}

/// Returns the TIDAL Web API base URL.
///
/// Reads the `TIDAL_API_URL` environment variable, falling back to the
/// public `https://api.tidal.com/v1` endpoint. This is used for all API
/// operations after authentication. Overriding it allows tests to point the
/// client at a local server.
pub fn tidal_api_url() -> String {
    env::var("TIDAL_API_URL").unwrap_or_else(|_| "https://api.tidal.com/v1".to_string())
}

/// Returns the TIDAL OAuth token exchange URL.
///
/// Reads the `TIDAL_TOKEN_URL` environment variable, falling back to the
/// public `https://auth.tidal.com/v1/oauth2/token` endpoint. Used both for
/// exchanging authorization codes and for refreshing expired tokens.
pub fn tidal_token_url() -> String {
    env::var("TIDAL_TOKEN_URL")
        .unwrap_or_else(|_| "https://auth.tidal.com/v1/oauth2/token".to_string())
}
