//! Identity provider integration
//!
//! Authentication is delegated to a hosted auth service. Signing in
//! exchanges credentials for a JWT access token; the token's `sub` claim is
//! the stable auth id that user profile rows reference. The rest of the
//! application only ever sees a [`Principal`].

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::utils::errors::{FestHubError, Result};

/// The authenticated identity returned by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable auth id; `users.auth_id` references this
    pub id: Uuid,
}

/// External identity provider interface
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an authenticated principal
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal>;
    /// The currently signed-in principal, if any
    async fn current_principal(&self) -> Option<Principal>;
    /// Drop the current session
    async fn sign_out(&self);
}

/// Access token claims issued by the auth service
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Token grant response from the auth service
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
}

/// Identity provider client for a hosted auth service
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    anon_key: String,
    decoding_key: DecodingKey,
    validation: Validation,
    session: RwLock<Option<Session>>,
}

impl HttpIdentityProvider {
    /// Create a new HttpIdentityProvider instance
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FestHub/1.0")
            .build()?;

        let mut validation = Validation::new(Algorithm::HS256);
        // The auth service sets aud to "authenticated"; we only care about
        // subject and expiry here.
        validation.validate_aud = false;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            anon_key: config.anon_key.clone(),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            session: RwLock::new(None),
        })
    }

    /// Validate an access token and extract its principal
    pub fn principal_from_token(&self, access_token: &str) -> Result<Principal> {
        let token = decode::<Claims>(access_token, &self.decoding_key, &self.validation)?;
        let id = token.claims.sub.parse::<Uuid>().map_err(|_| {
            FestHubError::Authentication("access token subject is not a valid id".to_string())
        })?;
        Ok(Principal { id })
    }

    /// Restore a session from a previously issued access token
    pub async fn restore_session(&self, access_token: &str) -> Result<Principal> {
        let principal = self.principal_from_token(access_token)?;
        *self.session.write().await = Some(Session { principal });
        debug!(auth_id = %principal.id, "Session restored from token");
        Ok(principal)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        debug!(email = %email, "Signing in against auth service");

        let url = format!("{}auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(email = %email, status = %response.status(), "Sign-in rejected");
            return Err(FestHubError::Authentication(format!(
                "sign-in failed with status {}",
                response.status()
            )));
        }

        let grant: TokenResponse = response.json().await?;
        let principal = self.principal_from_token(&grant.access_token)?;

        *self.session.write().await = Some(Session { principal });
        info!(auth_id = %principal.id, "Signed in");
        Ok(principal)
    }

    async fn current_principal(&self) -> Option<Principal> {
        self.session.read().await.as_ref().map(|s| s.principal)
    }

    async fn sign_out(&self) {
        let mut session = self.session.write().await;
        if let Some(old) = session.take() {
            info!(auth_id = %old.principal.id, "Signed out");
        }
    }
}
