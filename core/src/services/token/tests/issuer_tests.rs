//! Unit tests for token issuance

use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use tf_shared::config::JwtConfig;

use crate::domain::entities::token::TokenClaims;
use crate::errors::TokenError;
use crate::repositories::RevocationStore;
use crate::services::clock::FixedClock;
use crate::services::token::TokenIssuer;

use super::{principal, Event, Harness, DAY, SECRET, START};

#[test]
fn test_missing_secret_is_fatal() {
    let clock = Arc::new(FixedClock::new(START));

    let result = TokenIssuer::new(&JwtConfig::default(), clock.clone());
    assert!(matches!(result, Err(TokenError::SigningError { .. })));

    let result = TokenIssuer::new(&JwtConfig::new(""), clock);
    assert!(matches!(result, Err(TokenError::SigningError { .. })));
}

#[test]
fn test_issued_claims() {
    let harness = Harness::new();
    let token = harness.issuer.issue(principal(), "admin").unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS256);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    let claims = decode::<TokenClaims>(
        &token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &validation,
    )
    .unwrap()
    .claims;

    assert_eq!(claims.sub, "11111111-1111-1111-1111-111111111111");
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.iat, Some(START));
    assert_eq!(claims.exp, START + DAY);
    assert_eq!(harness.issuer.expiry_seconds(), DAY as u64);
}

#[tokio::test]
async fn test_issue_touches_no_store() {
    let harness = Harness::new();
    harness.issuer.issue(Uuid::new_v4(), "user").unwrap();

    assert!(harness.store.is_empty().await);
    assert!(harness.store.ping().await.is_ok());
}

#[test]
fn test_configured_lifetime() {
    let clock = Arc::new(FixedClock::new(START));
    let issuer = TokenIssuer::new(&JwtConfig::new(SECRET).with_expiry_hours(1), clock).unwrap();

    assert_eq!(issuer.expiry_seconds(), 3600);
}

#[test]
fn test_issue_is_observed() {
    let harness = Harness::new();
    harness.issuer.issue(principal(), "user").unwrap();

    assert_eq!(harness.events.events(), vec![Event::Issued(principal())]);
}
