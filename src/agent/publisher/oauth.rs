// SYNOID Shorts OAuth
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Installed-app OAuth for the upload scope. A stored token is reused while
// valid, refreshed once expired, and the browser consent flow only runs
// when neither is possible. Every new token is written back to disk.

use super::PublishError;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};
use url::Url;

pub const UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_SKEW_SECS: u64 = 60;

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Deserialize)]
struct SecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    pub fn load(path: &Path) -> Result<Self, PublishError> {
        let json = fs::read_to_string(path).map_err(|source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|reason| PublishError::Secrets {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: SecretsFile = serde_json::from_str(json).map_err(|e| e.to_string())?;
        file.installed
            .or(file.web)
            .ok_or_else(|| "expected an \"installed\" or \"web\" client".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    pub expires_at: u64,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredToken {
    pub fn load(path: &Path) -> Option<Self> {
        let json = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("[AUTH] Ignoring unreadable token file {:?}: {}", path, e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PublishError> {
        let io_err = |source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PublishError::Protocol(format!("token serialization: {}", e)))?;
        fs::write(path, json).map_err(io_err)?;
        info!("[AUTH] 💾 Token saved: {:?}", path);
        Ok(())
    }

    pub fn is_valid_at(&self, now: u64) -> bool {
        !self.access_token.is_empty() && self.expires_at > now + EXPIRY_SKEW_SECS
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    fn into_stored(self, previous_refresh: Option<String>, now: u64) -> StoredToken {
        let scopes = self
            .scope
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|| vec![UPLOAD_SCOPE.to_string()]);
        StoredToken {
            access_token: self.access_token,
            // Refresh grants usually omit the refresh token; keep the old one.
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: now + self.expires_in.unwrap_or(3600),
            scopes,
        }
    }
}

pub struct Authenticator {
    client: reqwest::Client,
    secrets: ClientSecrets,
    token_path: PathBuf,
}

impl Authenticator {
    pub fn new(secrets: ClientSecrets, token_path: &Path) -> Self {
        Self {
            client: reqwest::Client::new(),
            secrets,
            token_path: token_path.to_path_buf(),
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// A usable access token, refreshing or running consent as needed.
    pub async fn access_token(&self) -> Result<String, PublishError> {
        let token = match StoredToken::load(&self.token_path) {
            Some(token) if token.is_valid_at(unix_now()) => {
                info!("[AUTH] Reusing stored token from {:?}", self.token_path);
                return Ok(token.access_token);
            }
            Some(token) if token.can_refresh() => {
                info!("[AUTH] 🔄 Stored token expired, refreshing...");
                self.refresh(&token).await?
            }
            _ => {
                info!("[AUTH] No usable token, starting browser consent...");
                self.consent_flow().await?
            }
        };
        token.save(&self.token_path)?;
        Ok(token.access_token)
    }

    pub async fn refresh(&self, token: &StoredToken) -> Result<StoredToken, PublishError> {
        let refresh_token = token.refresh_token.clone().unwrap_or_default();
        let resp = self
            .client
            .post(&self.secrets.token_uri)
            .form(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        let parsed = read_token_response(resp).await?;
        Ok(parsed.into_stored(Some(refresh_token), unix_now()))
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<StoredToken, PublishError> {
        let resp = self
            .client
            .post(&self.secrets.token_uri)
            .form(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;
        let parsed = read_token_response(resp).await?;
        Ok(parsed.into_stored(None, unix_now()))
    }

    /// Loopback consent: print the URL, wait for the browser redirect on a
    /// local port, then exchange the code.
    pub async fn consent_flow(&self) -> Result<StoredToken, PublishError> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| PublishError::Auth(format!("cannot open loopback listener: {}", e)))?;
        let port = listener
            .local_addr()
            .map_err(|e| PublishError::Auth(format!("loopback listener has no address: {}", e)))?
            .port();
        let redirect_uri = format!("http://127.0.0.1:{}", port);
        let url = consent_url(&self.secrets, &redirect_uri)?;

        info!("[AUTH] 🔑 Open this URL in your browser to authorize uploads:\n{}", url);

        let code = wait_for_code(listener).await?;
        self.exchange_code(&code, &redirect_uri).await
    }
}

type CodeSlot = Arc<Mutex<Option<oneshot::Sender<Result<String, PublishError>>>>>;

/// Serve the loopback redirect until a request carries `code` or `error`.
/// Preconnects, favicon fetches and bare `/` hits are answered and ignored.
pub async fn wait_for_code(listener: TcpListener) -> Result<String, PublishError> {
    let (code_tx, code_rx) = oneshot::channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let slot: CodeSlot = Arc::new(Mutex::new(Some(code_tx)));

    let app = Router::new()
        .route("/", get(receive_redirect))
        .with_state(slot);

    tokio::spawn(async move {
        let shutdown = async {
            stop_rx.await.ok();
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            warn!("[AUTH] Consent listener stopped: {}", e);
        }
    });

    let outcome = code_rx.await.map_err(|_| {
        PublishError::Auth("consent listener closed before a code arrived".to_string())
    });
    let _ = stop_tx.send(());
    outcome?
}

async fn receive_redirect(
    State(slot): State<CodeSlot>,
    Query(params): Query<HashMap<String, String>>,
) -> &'static str {
    let Some(outcome) = code_from_query(&params) else {
        return "Waiting for authorization...";
    };
    let page = if outcome.is_ok() {
        "Authorization complete. You can close this window."
    } else {
        "Authorization failed. Check the terminal."
    };
    if let Some(tx) = slot.lock().ok().and_then(|mut s| s.take()) {
        let _ = tx.send(outcome);
    }
    page
}

pub fn consent_url(secrets: &ClientSecrets, redirect_uri: &str) -> Result<Url, PublishError> {
    Url::parse_with_params(
        &secrets.auth_uri,
        &[
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", UPLOAD_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| PublishError::Auth(format!("invalid auth_uri: {}", e)))
}

/// `Some(Ok(code))` for a granted redirect, `Some(Err(_))` for a denied
/// one, `None` when the request carries neither.
pub fn code_from_query(params: &HashMap<String, String>) -> Option<Result<String, PublishError>> {
    if let Some(error) = params.get("error") {
        return Some(Err(PublishError::Auth(format!("consent denied: {}", error))));
    }
    params
        .get("code")
        .filter(|c| !c.is_empty())
        .map(|c| Ok(c.clone()))
}

async fn read_token_response(resp: reqwest::Response) -> Result<TokenResponse, PublishError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(PublishError::Auth(format!("token endpoint returned {}: {}", status, body)));
    }
    resp.json()
        .await
        .map_err(|e| PublishError::Protocol(format!("token response: {}", e)))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
