//! GoTrue client: sign in, sign up, sign out and session persistence.
//!
//! The session returned by the service is kept in memory behind a lock so the
//! task store can read the access token, mirrored to an encrypted
//! [`SessionCache`] so the next run starts signed in, and announced on a
//! `watch` channel so the task controller can follow identity changes.
//!
//! ## Endpoints
//!
//! - `POST {url}/auth/v1/token?grant_type=password` — sign in
//! - `POST {url}/auth/v1/token?grant_type=refresh_token` — refresh
//! - `POST {url}/auth/v1/signup` — create account
//! - `POST {url}/auth/v1/logout` — revoke the session

use super::{check_response, ApiError, AuthProvider};
use crate::libs::config::SupabaseConfig;
use crate::libs::session_cache::{SessionCache, SESSION_FILE};
use chrono::Utc;
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

const AUTH_PATH: &str = "auth/v1";

/// Seconds before the recorded expiry at which a session counts as expired.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: User,
}

impl AuthSession {
    /// Fills `expires_at` from `expires_in` when the service only sent the latter.
    fn stamped(mut self, issued_at: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| issued_at + secs);
        }
        self
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now)
    }
}

/// Result of creating an account.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the user is signed in.
    SignedIn(User),
    /// The service sent a confirmation email; no session yet.
    ConfirmationRequired(User),
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Sign-up answers with a session or with the bare user, depending on
/// whether email confirmation is required.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(AuthSession),
    User(User),
}

pub struct SupabaseAuth {
    client: Client,
    config: SupabaseConfig,
    cache: SessionCache,
    session: RwLock<Option<AuthSession>>,
    sender: watch::Sender<Option<User>>,
}

impl SupabaseAuth {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self::with_cache(config, SessionCache::new(SESSION_FILE))
    }

    pub fn with_cache(config: &SupabaseConfig, cache: SessionCache) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            client: Client::new(),
            config: config.clone(),
            cache,
            session: RwLock::new(None),
            sender,
        }
    }

    /// Bearer token of the current session.
    pub fn access_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|session| session.access_token.clone())
    }

    /// Loads the session saved by a previous run, refreshing it if it expired.
    ///
    /// A session that cannot be refreshed is discarded and the error returned;
    /// the caller continues signed out.
    pub async fn restore(&self) -> Result<Option<User>, ApiError> {
        let cached = match self.cache.load::<AuthSession>() {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!("discarding unreadable session cache: {}", e);
                if let Err(e) = self.cache.clear() {
                    tracing::warn!("failed to remove session cache: {}", e);
                }
                None
            }
        };
        let Some(session) = cached else {
            return Ok(None);
        };

        if !session.is_expired(Utc::now().timestamp()) {
            let user = session.user.clone();
            self.set_session(session, false);
            return Ok(Some(user));
        }

        tracing::debug!("saved session expired, refreshing");
        match self.refresh(&session.refresh_token).await {
            Ok(session) => {
                let user = session.user.clone();
                self.set_session(session, true);
                Ok(Some(user))
            }
            Err(e) => {
                self.clear_session();
                Err(e)
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.config.anon_key)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        let response = check_response(response).await?;
        Ok(response.json::<AuthSession>().await?.stamped(Utc::now().timestamp()))
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.config.base_url(), AUTH_PATH, endpoint)
    }

    fn set_session(&self, session: AuthSession, persist: bool) {
        let user = session.user.clone();
        if persist {
            if let Err(e) = self.cache.save(&session) {
                tracing::warn!("failed to persist session: {}", e);
            }
        }
        *self.session.write() = Some(session);
        self.sender.send_replace(Some(user));
    }

    fn clear_session(&self) {
        *self.session.write() = None;
        if let Err(e) = self.cache.clear() {
            tracing::warn!("failed to remove session cache: {}", e);
        }
        self.sender.send_replace(None);
    }
}

impl AuthProvider for SupabaseAuth {
    fn current_user(&self) -> Option<User> {
        self.session.read().as_ref().map(|session| session.user.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let response = check_response(response).await?;
        let session = response.json::<AuthSession>().await?.stamped(Utc::now().timestamp());

        let user = session.user.clone();
        tracing::info!(user_id = %user.id, "signed in");
        self.set_session(session, true);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let response = check_response(response).await?;
        let body = response.text().await?;

        match serde_json::from_str::<SignUpResponse>(&body)? {
            SignUpResponse::Session(session) => {
                let session = session.stamped(Utc::now().timestamp());
                let user = session.user.clone();
                tracing::info!(user_id = %user.id, "account created and signed in");
                self.set_session(session, true);
                Ok(SignUpOutcome::SignedIn(user))
            }
            SignUpResponse::User(user) => {
                tracing::info!(user_id = %user.id, "account created, awaiting email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired(user))
            }
        }
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        let Some(token) = self.access_token() else {
            self.clear_session();
            return Ok(());
        };

        let result = self
            .client
            .post(self.url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await;
        self.clear_session();

        check_response(result?).await?;
        tracing::info!("signed out");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.sender.subscribe()
    }
}
