//! # API Module
//!
//! HTTP endpoints for the temporary local server that runs during the
//! OAuth authentication flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles OAuth callback requests from TIDAL's
//!   authorization server. Completes the PKCE flow by exchanging the
//!   authorization code for an access token and storing it in the shared
//!   PKCE state for the waiting authenticator.
//! - [`health`] - Returns application status and version information.
//!
//! The module is built on [Axum](https://docs.rs/axum); each endpoint is an
//! async function wired into the router in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
