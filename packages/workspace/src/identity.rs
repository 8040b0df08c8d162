//! # Identity Adapter
//!
//! Account creation, sign-in and sign-out are delegated to an external
//! [`IdentityProvider`]. [`IdentityService`] checks credentials locally
//! before anything reaches the provider and publishes the resulting
//! [`AuthState`] to every subscriber.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,

    #[error("Sign-in was cancelled")]
    Cancelled,

    #[error("{0}")]
    Provider(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }
        if !self.email.contains('@') {
            return Err(IdentityError::InvalidEmail(self.email.clone()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }
        Ok(())
    }
}

/// Signed-in user as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::SignedIn(identity) => Some(identity),
            AuthState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }
}

/// External identity capability
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, IdentityError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityError>;

    /// Popup-style sign-in with a third-party account
    async fn sign_in_with_federated_provider(&self) -> Result<Identity, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}

pub struct IdentityService {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<AuthState>,
}

impl IdentityService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self { provider, state }
    }

    /// Subscribe to auth state changes; the receiver starts at the current state
    pub fn on_auth_state_change(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub async fn sign_up(&self, credentials: Credentials) -> Result<Identity, IdentityError> {
        credentials.validate()?;
        let identity = self.provider.sign_up(&credentials).await?;
        tracing::info!(uid = %identity.uid, "account created");
        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<Identity, IdentityError> {
        credentials.validate()?;
        let identity = self.provider.sign_in(&credentials).await?;
        tracing::info!(uid = %identity.uid, "signed in");
        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_in_with_federated_provider(&self) -> Result<Identity, IdentityError> {
        let identity = self.provider.sign_in_with_federated_provider().await?;
        tracing::info!(uid = %identity.uid, "signed in with federated provider");
        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.provider.sign_out().await?;
        tracing::info!("signed out");
        self.publish(AuthState::SignedOut);
        Ok(())
    }

    fn publish(&self, state: AuthState) {
        // send_replace succeeds even with no subscribers
        self.state.send_replace(state);
    }
}
