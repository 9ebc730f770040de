//! Unit tests for token verification

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{crypto, Algorithm, EncodingKey};
use serde_json::json;
use tokio::time::Instant;
use uuid::Uuid;

use tf_shared::config::{AuthConfig, JwtConfig};

use crate::errors::{StoreError, TokenError};
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::clock::FixedClock;
use crate::services::token::{extract_bearer, TokenIssuer, TokenVerifier};

use super::{auth_config, forge, principal, Event, Harness, DAY, SECRET, START};

#[tokio::test]
async fn test_issue_then_verify_round_trip() {
    let harness = Harness::new();

    for role in ["user", "admin", "reviewer"] {
        let id = Uuid::new_v4();
        let token = harness.issuer.issue(id, role).unwrap();

        let verified = harness.verify(&token).await.unwrap();
        assert_eq!(verified.user_id, id);
        assert_eq!(verified.role, role);
        assert_eq!(verified.token, token);
        assert_eq!(verified.expires_at, START + DAY);
    }
}

#[tokio::test]
async fn test_expiry_boundary() {
    let harness = Harness::new();
    let token = harness.issuer.issue(principal(), "user").unwrap();

    harness.clock.set(START + DAY - 1);
    assert!(harness.verify(&token).await.is_ok());

    harness.clock.set(START + DAY);
    assert!(harness.verify(&token).await.is_ok());

    harness.clock.set(START + DAY + 1);
    assert_eq!(harness.verify(&token).await.unwrap_err(), TokenError::Expired);
}

#[tokio::test]
async fn test_verify_twenty_five_hours_later_is_expired() {
    let harness = Harness::new();
    let token = harness.issuer.issue(principal(), "user").unwrap();

    harness.clock.advance(25 * 3600);
    assert_eq!(harness.verify(&token).await.unwrap_err(), TokenError::Expired);
}

#[tokio::test]
async fn test_wrong_secret_is_invalid() {
    let harness = Harness::new();
    let token = forge(
        Algorithm::HS256,
        "some-other-secret",
        json!({"sub": principal().to_string(), "role": "user", "exp": START + 60}),
    );

    assert!(matches!(
        harness.verify(&token).await,
        Err(TokenError::InvalidToken { .. })
    ));
}

#[tokio::test]
async fn test_hmac_family_is_admitted() {
    let harness = Harness::new();
    let payload = json!({"sub": principal().to_string(), "role": "user", "exp": START + 60});

    for algorithm in [Algorithm::HS384, Algorithm::HS512] {
        let token = forge(algorithm, SECRET, payload.clone());
        let verified = harness.verify(&token).await.unwrap();
        assert_eq!(verified.user_id, principal(), "{algorithm:?}");
        assert_eq!(verified.role, "user");
    }
}

#[tokio::test]
async fn test_asymmetric_header_is_invalid() {
    let harness = Harness::new();
    let key = EncodingKey::from_secret(SECRET.as_bytes());
    // {"sub":"1111...","role":"admin","exp":9999999999}
    let payload = "eyJzdWIiOiIxMTExMTExMS0xMTExLTExMTEtMTExMS0xMTExMTExMTExMTEiLCJyb2xlIjoiYWRtaW4iLCJleHAiOjk5OTk5OTk5OTl9";

    // {"alg":"RS256","typ":"JWT"} and {"alg":"ES256","typ":"JWT"}, HMAC-signed with the shared secret
    for header in ["eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9", "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9"] {
        let message = format!("{}.{}", header, payload);
        let signature = crypto::sign(message.as_bytes(), &key, Algorithm::HS256).unwrap();
        let token = format!("{}.{}", message, signature);

        assert!(
            matches!(harness.verify(&token).await, Err(TokenError::InvalidToken { .. })),
            "header {header} must be rejected"
        );
    }
}

#[tokio::test]
async fn test_unsigned_token_is_invalid() {
    let harness = Harness::new();
    // {"alg":"none","typ":"JWT"} . {"sub":"1111...","role":"admin","exp":9999999999} .
    let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                 eyJzdWIiOiIxMTExMTExMS0xMTExLTExMTEtMTExMS0xMTExMTExMTExMTEiLCJyb2xlIjoiYWRtaW4iLCJleHAiOjk5OTk5OTk5OTl9.";

    assert!(matches!(
        harness.verify(token).await,
        Err(TokenError::InvalidToken { .. })
    ));
}

#[tokio::test]
async fn test_garbage_is_invalid() {
    let harness = Harness::new();

    for token in ["not-a-jwt", "a.b.c", "...."] {
        assert!(matches!(
            harness.verify(token).await,
            Err(TokenError::InvalidToken { .. })
        ));
    }
}

#[tokio::test]
async fn test_missing_credential() {
    let harness = Harness::new();
    let deadline = Instant::now() + Duration::from_secs(1);

    for header in [None, Some(""), Some("Bearer"), Some("Bearer "), Some("Bearer    ")] {
        assert_eq!(
            harness.verifier.verify(header, deadline).await.unwrap_err(),
            TokenError::MissingCredential,
            "header {header:?}"
        );
    }
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer(Some("Bearer abc")).unwrap(), "abc");
    assert_eq!(extract_bearer(Some("Bearer   abc  ")).unwrap(), "abc");
    assert_eq!(extract_bearer(Some("abc")).unwrap(), "abc");
    assert!(extract_bearer(Some("  ")).is_err());
}

#[tokio::test]
async fn test_missing_role_or_exp_is_malformed() {
    let harness = Harness::new();
    let sub = principal().to_string();

    let payloads = [
        json!({"sub": sub, "exp": START + 60}),
        json!({"sub": sub, "role": "user"}),
        json!({"sub": sub, "role": ["user"], "exp": START + 60}),
        json!({"role": "user", "exp": START + 60}),
    ];

    for payload in payloads {
        let token = forge(Algorithm::HS256, SECRET, payload.clone());
        assert!(
            matches!(harness.verify(&token).await, Err(TokenError::MalformedClaims { .. })),
            "payload {payload}"
        );
    }
}

#[tokio::test]
async fn test_opaque_subject_is_malformed() {
    let harness = Harness::new();

    for sub in ["alice", "42", ""] {
        let token = forge(
            Algorithm::HS256,
            SECRET,
            json!({"sub": sub, "role": "user", "exp": START + 60}),
        );
        assert!(
            matches!(harness.verify(&token).await, Err(TokenError::MalformedClaims { .. })),
            "sub {sub:?}"
        );
    }
}

#[tokio::test]
async fn test_legacy_user_id_claim_is_accepted() {
    let harness = Harness::new();
    let token = forge(
        Algorithm::HS256,
        SECRET,
        json!({"user_id": principal().to_string(), "role": "user", "exp": (START + 60) as f64}),
    );

    let verified = harness.verify(&token).await.unwrap();
    assert_eq!(verified.user_id, principal());
}

#[tokio::test]
async fn test_revocation_is_checked_before_signature() {
    let harness = Harness::new();
    harness.revoker.revoke("not-a-jwt").await.unwrap();

    assert_eq!(
        harness.verify("not-a-jwt").await.unwrap_err(),
        TokenError::Revoked
    );
}

#[tokio::test]
async fn test_store_outage_fails_closed() {
    let harness = Harness::new();
    let token = harness.issuer.issue(principal(), "user").unwrap();
    harness.store.set_unavailable(true);

    assert!(matches!(
        harness.verify(&token).await,
        Err(TokenError::StoreUnavailable { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_slow_store_hits_deadline() {
    let config = auth_config();
    let clock = Arc::new(FixedClock::new(START));
    let store: Arc<dyn RevocationStore> = Arc::new(
        InMemoryRevocationStore::with_clock(clock.clone()).with_latency(Duration::from_secs(5)),
    );
    let issuer = TokenIssuer::new(&config.jwt, clock.clone()).unwrap();
    let verifier = TokenVerifier::new(&config, store, clock);

    let token = issuer.issue(principal(), "user").unwrap();
    let header = format!("Bearer {}", token);

    let result = verifier
        .verify(Some(&header), Instant::now() + Duration::from_millis(50))
        .await;
    assert_eq!(result.unwrap_err(), TokenError::from(StoreError::Timeout));

    let result = verifier
        .verify(Some(&header), Instant::now() + Duration::from_secs(10))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_verifier_without_secret_fails_lazily() {
    let clock = Arc::new(FixedClock::new(START));
    let store = Arc::new(InMemoryRevocationStore::with_clock(clock.clone()));
    let config = AuthConfig {
        jwt: JwtConfig::default(),
        ..auth_config()
    };
    let verifier = TokenVerifier::new(&config, store.clone(), clock.clone());

    let token = forge(
        Algorithm::HS256,
        SECRET,
        json!({"sub": principal().to_string(), "role": "user", "exp": START + 60}),
    );
    let header = format!("Bearer {}", token);

    assert!(matches!(
        verifier.verify_header(Some(&header)).await,
        Err(TokenError::SigningError { .. })
    ));

    // The denylist still answers first
    store
        .set(&format!("blacklist:{}", token), "revoked", None)
        .await
        .unwrap();
    assert_eq!(
        verifier.verify_header(Some(&header)).await.unwrap_err(),
        TokenError::Revoked
    );
}

#[tokio::test]
async fn test_outcomes_are_observed() {
    let harness = Harness::new();
    let token = harness.issuer.issue(principal(), "user").unwrap();

    harness.verify(&token).await.unwrap();
    harness.verify("garbage").await.unwrap_err();

    let events = harness.events.events();
    assert_eq!(events[0], Event::Issued(principal()));
    assert_eq!(events[1], Event::Admitted(principal()));
    assert!(matches!(events[2], Event::Rejected(TokenError::InvalidToken { .. })));
}
