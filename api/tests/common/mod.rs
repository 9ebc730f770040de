//! Shared fixtures: the full app wired to in-memory stores and a fixed clock

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    web, App, Error,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;

use tf_api::{app::create_app, middleware::SecurityHeaders, routes::AppState};
use tf_core::{
    repositories::{InMemoryRevocationStore, InMemoryUserRepository},
    services::{AuthService, AuthServiceConfig, FixedClock, TokenIssuer, TokenRevoker, TokenVerifier},
};
use tf_shared::config::{AuthConfig, JwtConfig, RevocationConfig};

pub const SECRET: &str = "integration-secret";
pub const START: i64 = 1_700_000_000;
pub const HOUR: i64 = 3_600;

pub struct TestContext {
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryRevocationStore>,
    pub users: Arc<InMemoryUserRepository>,
    pub verifier: Arc<TokenVerifier>,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt: JwtConfig::new(SECRET),
            revocation: RevocationConfig::default(),
        };

        let clock = Arc::new(FixedClock::new(START));
        let store = Arc::new(InMemoryRevocationStore::with_clock(clock.clone()));
        let users = Arc::new(InMemoryUserRepository::new());

        let issuer = Arc::new(TokenIssuer::new(&config.jwt, clock.clone()).unwrap());
        let verifier = Arc::new(TokenVerifier::new(&config, store.clone(), clock.clone()));
        let revoker = Arc::new(TokenRevoker::new(
            &config.revocation,
            store.clone(),
            clock.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            store.clone(),
            issuer,
            revoker,
            AuthServiceConfig::default().fast_hashing(),
        ));

        Self {
            clock,
            store,
            users,
            verifier,
            state: web::Data::new(AppState { auth_service }),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(
            self.state.clone(),
            self.verifier.clone(),
            SecurityHeaders::default(),
        )
    }
}

/// Sign an arbitrary payload with the shared secret, bypassing the issuer
pub fn forge(payload: Value) -> String {
    forge_with(Algorithm::HS256, SECRET, payload)
}

pub fn forge_with(algorithm: Algorithm, secret: &str, payload: Value) -> String {
    encode(
        &Header::new(algorithm),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
