//! Auth provider port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stressdungeon_domain::PlayerId;

use super::error::AuthError;

/// How the player proved who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Password,
    OAuth,
}

/// An authenticated player as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub player_id: PlayerId,
    pub email: Option<String>,
    pub provider: AuthProvider,
    pub signed_in_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity, AuthError>;

    async fn register_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity, AuthError>;

    /// Exchange a third-party identity token for a player identity.
    async fn sign_in_with_oauth(&self, id_token: &str) -> Result<AuthIdentity, AuthError>;
}
