//! Authentication use cases.
//!
//! Every successful flow ends with a `PlayerSession` whose encounter exists in
//! the store: registration writes a fresh one, sign-in creates it only if it
//! is missing.

use std::fmt;
use std::sync::Arc;

use stressdungeon_domain::BossEncounter;
use validator::Validate;

use super::encounter::{EncounterError, EncounterHandle};
use crate::infrastructure::ports::{AuthError, AuthIdentity, AuthPort, DocumentStorePort};

/// Email and password as typed by the player.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    fn check(&self) -> Result<(), AuthFlowError> {
        self.validate().map_err(|errors| {
            let mut messages: Vec<(String, String)> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    let field = field.to_string();
                    errors.iter().map(move |error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field));
                        (field.clone(), message)
                    })
                })
                .collect();
            messages.sort();
            AuthFlowError::Validation(
                messages
                    .into_iter()
                    .map(|(_, message)| message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("Invalid credentials: {0}")]
    Validation(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Encounter(#[from] EncounterError),
}

impl AuthFlowError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Auth(AuthError::InvalidCredential) => "Incorrect email or password.".to_string(),
            Self::Auth(AuthError::AccountExists(_)) => {
                "An account with this email already exists. Log in instead.".to_string()
            }
            Self::Auth(AuthError::InvalidToken) => {
                "Sign-in with your provider failed. Please try again.".to_string()
            }
            Self::Auth(AuthError::Network(_)) => {
                "Could not reach the sign-in service. Check your connection.".to_string()
            }
            Self::Encounter(e) => e.user_message(),
        }
    }
}

/// An authenticated player with access to their encounter.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub identity: AuthIdentity,
    pub encounter: EncounterHandle,
    /// Encounter state when the session was opened
    pub initial_state: BossEncounter,
}

pub struct Authenticate {
    auth: Arc<dyn AuthPort>,
    store: Arc<dyn DocumentStorePort>,
}

impl Authenticate {
    pub fn new(auth: Arc<dyn AuthPort>, store: Arc<dyn DocumentStorePort>) -> Self {
        Self { auth, store }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<PlayerSession, AuthFlowError> {
        credentials.check()?;
        let identity = self
            .auth
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Password sign-in failed"))?;
        self.open_session(identity).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<PlayerSession, AuthFlowError> {
        credentials.check()?;
        let identity = self
            .auth
            .register_with_password(&credentials.email, &credentials.password)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Registration failed"))?;

        let encounter = EncounterHandle::new(identity.player_id, self.store.clone());
        let initial_state = encounter.reset_to_full().await?;
        tracing::info!(player_id = %identity.player_id, "Player registered");
        Ok(PlayerSession {
            identity,
            encounter,
            initial_state,
        })
    }

    pub async fn sign_in_with_oauth(&self, id_token: &str) -> Result<PlayerSession, AuthFlowError> {
        if id_token.trim().is_empty() {
            return Err(AuthFlowError::Validation(
                "Missing identity token from the sign-in provider".to_string(),
            ));
        }
        let identity = self
            .auth
            .sign_in_with_oauth(id_token)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "OAuth sign-in failed"))?;
        self.open_session(identity).await
    }

    async fn open_session(&self, identity: AuthIdentity) -> Result<PlayerSession, AuthFlowError> {
        let encounter = EncounterHandle::new(identity.player_id, self.store.clone());
        let initial_state = encounter.ensure_initialized().await?;
        tracing::info!(
            player_id = %identity.player_id,
            provider = ?identity.provider,
            health = initial_state.health().value(),
            "Player signed in"
        );
        Ok(PlayerSession {
            identity,
            encounter,
            initial_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::memory_auth::InMemoryAuth;
    use crate::infrastructure::memory_store::InMemoryDocumentStore;
    use crate::infrastructure::ports::{AuthProvider, MockAuthPort, MockDocumentStorePort};
    use chrono::{TimeZone, Utc};
    use stressdungeon_domain::{AttemptId, BossHealth, DamageEvent, PlayerId};

    fn authenticate() -> Authenticate {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 4, 2, 8, 0, 0).unwrap()));
        Authenticate::new(
            Arc::new(InMemoryAuth::new(clock)),
            Arc::new(InMemoryDocumentStore::new()),
        )
    }

    fn identity(player_id: PlayerId) -> AuthIdentity {
        AuthIdentity {
            player_id,
            email: Some("mage@example.com".into()),
            provider: AuthProvider::Password,
            signed_in_at: Utc.with_ymd_and_hms(2025, 4, 2, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn register_creates_full_health_encounter() {
        let flow = authenticate();
        let session = flow
            .register(&Credentials::new("mage@example.com", "fireball"))
            .await
            .unwrap();
        assert_eq!(session.initial_state.health(), BossHealth::full());
        assert_eq!(
            session.encounter.current().await.unwrap().health(),
            BossHealth::full()
        );
    }

    #[tokio::test]
    async fn sign_in_keeps_existing_progress() {
        let flow = authenticate();
        let credentials = Credentials::new("mage@example.com", "fireball");
        let registered = flow.register(&credentials).await.unwrap();
        let event = DamageEvent::new(registered.identity.player_id, AttemptId::new(), 25).unwrap();
        registered.encounter.apply_damage(&event).await.unwrap();

        let session = flow.sign_in(&credentials).await.unwrap();
        assert_eq!(session.identity.player_id, registered.identity.player_id);
        assert_eq!(session.initial_state.health().value(), 75);
    }

    #[tokio::test]
    async fn invalid_credentials_never_reach_the_provider() {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_in_with_password().never();
        auth.expect_register_with_password().never();
        let flow = Authenticate::new(Arc::new(auth), Arc::new(MockDocumentStorePort::new()));

        let err = flow
            .sign_in(&Credentials::new("not-an-email", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Enter a valid email address");

        let err = flow
            .register(&Credentials::new("knight@example.com", "abc"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn both_fields_invalid_reports_both() {
        let flow = authenticate();
        let err = flow
            .register(&Credentials::new("", "abc"))
            .await
            .unwrap_err();
        match err {
            AuthFlowError::Validation(message) => {
                assert!(message.contains("email"));
                assert!(message.contains("6 characters"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_password_maps_to_friendly_message() {
        let flow = authenticate();
        flow.register(&Credentials::new("a@example.com", "secret1"))
            .await
            .unwrap();
        let err = flow
            .sign_in(&Credentials::new("a@example.com", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthFlowError::Auth(AuthError::InvalidCredential)));
        assert_eq!(err.user_message(), "Incorrect email or password.");
    }

    #[tokio::test]
    async fn sign_in_creates_missing_encounter() {
        let player_id = PlayerId::new();
        let mut auth = MockAuthPort::new();
        auth.expect_sign_in_with_password()
            .times(1)
            .returning(move |_, _| Ok(identity(player_id)));
        let store = Arc::new(InMemoryDocumentStore::new());
        let flow = Authenticate::new(Arc::new(auth), store.clone());

        let session = flow
            .sign_in(&Credentials::new("mage@example.com", "fireball"))
            .await
            .unwrap();
        assert_eq!(session.initial_state.health(), BossHealth::full());
        assert!(session.encounter.current().await.is_ok());
    }

    #[tokio::test]
    async fn oauth_session_is_stable_across_sign_ins() {
        let flow = authenticate();
        let first = flow.sign_in_with_oauth("google-id-token").await.unwrap();
        let second = flow.sign_in_with_oauth("google-id-token").await.unwrap();
        assert_eq!(first.identity.player_id, second.identity.player_id);
        assert_eq!(second.identity.provider, AuthProvider::OAuth);

        assert!(matches!(
            flow.sign_in_with_oauth("").await,
            Err(AuthFlowError::Validation(_))
        ));
    }

    #[test]
    fn debug_output_hides_password() {
        let credentials = Credentials::new("a@example.com", "hunter22");
        assert!(!format!("{:?}", credentials).contains("hunter22"));
    }
}
