//! Tests for token issuance, verification and revocation

mod issuer_tests;
mod verifier_tests;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use tf_shared::config::{AuthConfig, JwtConfig, RevocationConfig};

use crate::domain::entities::token::VerifiedToken;
use crate::errors::TokenError;
use crate::repositories::InMemoryRevocationStore;
use crate::services::clock::FixedClock;
use crate::services::token::{TokenIssuer, TokenObserver, TokenRevoker, TokenVerifier};

pub(super) const SECRET: &str = "test-secret-please-rotate";
pub(super) const START: i64 = 1_700_000_000;
pub(super) const DAY: i64 = 86_400;

/// Issuer, verifier and revoker wired to one in-memory store and clock
pub(super) struct Harness {
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryRevocationStore>,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
    pub revoker: TokenRevoker,
    pub events: Arc<RecordingObserver>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(auth_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let clock = Arc::new(FixedClock::new(START));
        let store = Arc::new(InMemoryRevocationStore::with_clock(clock.clone()));
        let events = Arc::new(RecordingObserver::default());

        let issuer = TokenIssuer::new(&config.jwt, clock.clone())
            .unwrap()
            .with_observer(events.clone());
        let verifier = TokenVerifier::new(&config, store.clone(), clock.clone())
            .with_observer(events.clone());
        let revoker = TokenRevoker::new(&config.revocation, store.clone(), clock.clone())
            .with_observer(events.clone());

        Self {
            clock,
            store,
            issuer,
            verifier,
            revoker,
            events,
        }
    }

    pub async fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verifier
            .verify_header(Some(&format!("Bearer {}", token)))
            .await
    }
}

pub(super) fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig::new(SECRET),
        revocation: RevocationConfig::default(),
    }
}

/// Signs an arbitrary payload, bypassing the issuer
pub(super) fn forge(algorithm: Algorithm, secret: &str, payload: serde_json::Value) -> String {
    encode(
        &Header::new(algorithm),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub(super) fn principal() -> Uuid {
    Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Event {
    Issued(Uuid),
    Admitted(Uuid),
    Rejected(TokenError),
    Revoked(Option<Duration>),
}

#[derive(Default)]
pub(super) struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl TokenObserver for RecordingObserver {
    fn token_issued(&self, principal_id: Uuid, _role: &str, _expires_at: i64) {
        self.events.lock().unwrap().push(Event::Issued(principal_id));
    }

    fn token_admitted(&self, verified: &VerifiedToken) {
        self.events.lock().unwrap().push(Event::Admitted(verified.user_id));
    }

    fn token_rejected(&self, error: &TokenError) {
        self.events.lock().unwrap().push(Event::Rejected(error.clone()));
    }

    fn token_revoked(&self, ttl: Option<Duration>) {
        self.events.lock().unwrap().push(Event::Revoked(ttl));
    }
}
