use std::{path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, SessionInfo, Token},
    utils, warning,
};

/// An authenticated TIDAL session: the token store plus the user identity
/// needed for playlist operations.
pub struct TidalSession {
    pub token: TokenManager,
    pub user_id: u64,
    pub country_code: String,
}

/// The interactive part of authentication, pluggable so the reconciliation
/// logic can be exercised without a browser. The production implementation
/// is [`BrowserLogin`].
#[allow(async_fn_in_trait)]
pub trait LoginFlow {
    async fn login(&self) -> Result<Token, String>;
}

/// OAuth 2.0 PKCE login through the user's browser and a temporary local
/// callback server. Blocks until the user completes the flow or the wait
/// times out.
pub struct BrowserLogin;

impl LoginFlow for BrowserLogin {
    async fn login(&self) -> Result<Token, String> {
        let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
        run_pkce_flow(shared_state)
            .await
            .ok_or_else(|| "authentication failed or timed out".to_string())
    }
}

/// Establishes an authenticated session.
///
/// Tries the stored token first: if the file loads and a login check against
/// the API confirms validity, that session is returned without any user
/// interaction. A corrupt file or a rejected token clears the stored file
/// and falls through to the interactive flow, whose result is persisted for
/// the next run.
///
/// Returns `None` when the interactive login itself fails; callers print a
/// failure message and skip the import phase.
pub async fn authenticate<F: LoginFlow>(flow: &F, token_path: &Path) -> Option<TidalSession> {
    match TokenManager::load(token_path).await {
        Ok(mut manager) => {
            let access_token = manager.get_valid_token().await;
            match check_login(&access_token).await {
                Ok(info) => {
                    success!("Logged in with saved token.");
                    return Some(TidalSession {
                        token: manager,
                        user_id: info.user_id,
                        country_code: info.country_code,
                    });
                }
                Err(e) => {
                    warning!("Stored token rejected: {}. Re-authenticating...", e);
                    let _ = TokenManager::clear(token_path).await;
                }
            }
        }
        Err(e) => {
            if token_path.exists() {
                warning!("Token file is corrupted: {}. Re-authenticating...", e);
                let _ = TokenManager::clear(token_path).await;
            }
        }
    }

    match flow.login().await {
        Ok(token) => {
            let manager = TokenManager::new(token.clone(), token_path);
            if let Err(e) = manager.persist().await {
                warning!("Failed to save token to cache: {}", e);
            }
            match check_login(&token.access_token).await {
                Ok(info) => Some(TidalSession {
                    token: manager,
                    user_id: info.user_id,
                    country_code: info.country_code,
                }),
                Err(e) => {
                    warning!("Login check failed: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            warning!("Interactive login failed: {}", e);
            None
        }
    }
}

/// Runs the interactive flow for the `auth` subcommand and persists the
/// obtained token.
///
/// 1. Generates the PKCE code verifier and challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the user's browser
/// 4. Waits for the OAuth callback to deliver a token
/// 5. Persists the token for future runs
///
/// Browser launch failures produce a warning with manual URL instructions;
/// a timed-out or failed flow terminates the program with an error message.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>, token_path: &Path) {
    let token = run_pkce_flow(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t, token_path);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

async fn run_pkce_flow(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{tidal_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        tidal_auth_url = &config::tidal_auth_url(),
        client_id = &config::tidal_client_id(),
        redirect_uri = &config::tidal_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::tidal_scope()
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    wait_for_token(shared_state).await
}

/// Polls the shared state for a completed authentication token with a
/// 60-second timeout, running concurrently with the callback handler that
/// populates the token after the OAuth exchange.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Confirms that an access token is still accepted by the API and returns
/// the session's user id and country code.
pub async fn check_login(token: &str) -> Result<SessionInfo, reqwest::Error> {
    let client = Client::new();
    let response = client
        .get(format!("{}/sessions", &config::tidal_api_url()))
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    response.json::<SessionInfo>().await
}

/// Refreshes an expired access token using the refresh token grant.
///
/// The refresh token may rotate; when the response omits one, the passed-in
/// refresh token is carried over. The absolute expiry timestamp is computed
/// from the returned `expires_in`.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&config::tidal_token_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::tidal_client_id()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

    Ok(token_from_response(&json, Some(refresh_token)))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received from the callback for an access token. The code verifier proves
/// that the same client that initiated the flow is completing it.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = &config::tidal_client_id();
    let redirect_uri = &config::tidal_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::tidal_token_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

    Ok(token_from_response(&json, None))
}

fn token_from_response(json: &Value, fallback_refresh: Option<&str>) -> Token {
    let refresh = match json["refresh_token"].as_str() {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => fallback_refresh.unwrap_or_default().to_string(),
    };

    Token {
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: refresh,
        expiry_time: Utc::now().timestamp() as u64 + json["expires_in"].as_u64().unwrap_or(3600),
    }
}
