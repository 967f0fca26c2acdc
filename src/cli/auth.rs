use std::{path::Path, sync::Arc};

use tokio::sync::Mutex;

use crate::{tidal, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>, token_path: &Path) {
    tidal::auth::auth(shared_state, token_path).await;
}
