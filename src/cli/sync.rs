use std::path::Path;

use crate::{
    engine::{self, TidalRemote},
    error, info, library, success,
    tidal::auth::{BrowserLogin, authenticate},
    warning,
};

/// Runs a full import: authenticate, load both library exports, reconcile
/// every record against the account, and write the unmatched report.
pub async fn sync(tidal_csv: &Path, spotify_csv: &Path, not_found: &Path, token_file: &Path) {
    let Some(session) = authenticate(&BrowserLogin, token_file).await else {
        warning!("Authentication failed.");
        return;
    };

    let records = match library::load_library(tidal_csv, spotify_csv) {
        Ok(records) => records,
        Err(e) => error!("Failed to load library: {}", e),
    };
    info!("Loaded {} unique tracks.", records.len());

    let mut remote = TidalRemote::new(session);
    let report = match engine::run_import(&mut remote, &records).await {
        Ok(report) => report,
        Err(e) => error!("Import aborted: {}", e),
    };

    let unmatched = report.unmatched();
    if unmatched.is_empty() {
        success!("All songs added successfully!");
    } else {
        if let Err(e) = library::write_unmatched(not_found, &unmatched) {
            error!("Failed to write report: {}", e);
        }
        info!(
            "Saved {} missing tracks to '{}'. Added {} tracks.",
            unmatched.len(),
            not_found.display(),
            report.added_count()
        );
    }
}
