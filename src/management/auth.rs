use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{tidal, types::Token};

/// Owns the persisted OAuth token. The store path is injected so tests can
/// run against a scratch file; a real run uses `config::DEFAULT_TOKEN_FILE`
/// in the working directory.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    /// Reads the token back from disk. A missing, empty or unparsable file
    /// is an error; callers treat it as a cache miss rather than a failure.
    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        if content.trim().is_empty() {
            return Err(format!("token file {} is empty", path.display()));
        }
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Removes the stored token file, clearing an unusable cache.
    pub async fn clear(path: &Path) -> Result<(), String> {
        async_fs::remove_file(path).await.map_err(|e| e.to_string())
    }

    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = tidal::auth::refresh_token(&self.token.refresh_token).await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + 60 >= self.token.expiry_time
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
