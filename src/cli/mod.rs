//! # CLI Module
//!
//! User-facing command implementations for the TIDAL CSV import tool.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the interactive OAuth 2.0 PKCE flow and persists the
//!   obtained token for later runs.
//! - [`sync`] - The full import run: authenticate (stored token first,
//!   interactive login as fallback), load and merge both library exports,
//!   resolve or create the target playlists, add missing tracks, and write
//!   the unmatched report when anything could not be placed.
//!
//! Each command delegates to the engine, library, and TIDAL API modules and
//! owns the user interaction: status lines, warnings, and fatal errors.
//! `sync` treats a failed authentication as a printed failure that skips the
//! import, while a missing or malformed input file terminates the process.

mod auth;
mod sync;

pub use auth::auth;
pub use sync::sync;
