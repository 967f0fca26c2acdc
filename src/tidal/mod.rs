//! # TIDAL Integration Module
//!
//! This module provides the interface to the TIDAL Web API used by the
//! import run: authentication, playlist management, and catalog search. It
//! abstracts away HTTP requests and OAuth flows, providing a clean Rust
//! interface for the higher-level engine and CLI layers.
//!
//! ## Core Modules
//!
//! [`auth`] implements the OAuth 2.0 PKCE (Proof Key for Code Exchange)
//! flow: the full interactive login from browser launch to token storage, a
//! local callback server for receiving the authorization code, the token
//! refresh grant, and the session validity check used to restore a stored
//! token without user interaction.
//!
//! [`playlists`] covers the playlist endpoints: listing the user's
//! playlists, creating a playlist, listing a playlist's tracks, and adding
//! a track. Listing endpoints page at 50 items and are drained sequentially.
//!
//! [`search`] performs free-text catalog search and returns the `tracks`
//! result category.
//!
//! ## API Coverage
//!
//! - `GET /sessions` - session validity check and user/country lookup
//! - `GET /users/{user_id}/playlists` - the user's playlists
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `GET /playlists/{uuid}/tracks` - playlist membership
//! - `POST /playlists/{uuid}/tracks` - add tracks
//! - `GET /search` - free-text catalog search
//! - `POST /v1/oauth2/token` - code exchange and token refresh
//!
//! ## Error Handling
//!
//! There is deliberately no retry or backoff logic: the import is a
//! single-pass, best-effort run and every remote failure propagates to the
//! caller. Functions return `reqwest::Error` for HTTP operations and
//! `String` for authentication and token management errors, matching the
//! rest of the application.

pub mod auth;
pub mod playlists;
pub mod search;
