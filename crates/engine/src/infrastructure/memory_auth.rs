//! In-memory auth provider.
//!
//! Stands in for the hosted identity service in the runner and in flow tests.
//! Passwords are kept as salted SHA-256 digests; OAuth identity tokens map to
//! a stable player the first time they are seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use stressdungeon_domain::PlayerId;

use crate::infrastructure::ports::{AuthError, AuthIdentity, AuthPort, AuthProvider, ClockPort};

struct Account {
    player_id: PlayerId,
    salt: String,
    password_digest: String,
}

pub struct InMemoryAuth {
    accounts: DashMap<String, Account>,
    oauth_subjects: DashMap<String, PlayerId>,
    clock: Arc<dyn ClockPort>,
    offline: AtomicBool,
}

impl InMemoryAuth {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            accounts: DashMap::new(),
            oauth_subjects: DashMap::new(),
            clock,
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the provider being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("auth provider unavailable".into()));
        }
        Ok(())
    }

    fn identity(&self, player_id: PlayerId, email: Option<String>, provider: AuthProvider) -> AuthIdentity {
        AuthIdentity {
            player_id,
            email,
            provider,
            signed_in_at: self.clock.now(),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn digest(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AuthPort for InMemoryAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity, AuthError> {
        self.check_online()?;
        let key = normalize_email(email);
        let account = self.accounts.get(&key).ok_or(AuthError::InvalidCredential)?;
        if digest(&account.salt, password) != account.password_digest {
            return Err(AuthError::InvalidCredential);
        }
        Ok(self.identity(account.player_id, Some(key.clone()), AuthProvider::Password))
    }

    async fn register_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity, AuthError> {
        self.check_online()?;
        let key = normalize_email(email);
        match self.accounts.entry(key.clone()) {
            Entry::Occupied(_) => Err(AuthError::AccountExists(key)),
            Entry::Vacant(vacant) => {
                let player_id = PlayerId::new();
                let salt = player_id.to_string();
                let password_digest = digest(&salt, password);
                vacant.insert(Account {
                    player_id,
                    salt,
                    password_digest,
                });
                tracing::debug!(player_id = %player_id, "Registered password account");
                Ok(self.identity(player_id, Some(key), AuthProvider::Password))
            }
        }
    }

    async fn sign_in_with_oauth(&self, id_token: &str) -> Result<AuthIdentity, AuthError> {
        self.check_online()?;
        let token = id_token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        let subject = digest("oauth", token);
        let player_id = *self
            .oauth_subjects
            .entry(subject)
            .or_insert_with(PlayerId::new);
        Ok(self.identity(player_id, None, AuthProvider::OAuth))
    }
}
