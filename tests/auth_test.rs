//! Bearer token validation with the HS256 shared secret. Tokens are minted
//! locally; no server or database is involved.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use totrip_backend::auth::TokenVerifier;
use totrip_backend::auth::jwt::{AppMetadata, Claims, UserMetadata, validate_token};

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn claims_for(sub: &str, email: &str, full_name: &str) -> Claims {
    let now = Utc::now().timestamp() as usize;
    Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            name: None,
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            picture: None,
            email: Some(email.to_string()),
            email_verified: Some(true),
        }),
        app_metadata: Some(AppMetadata {
            provider: Some("google".to_string()),
        }),
    }
}

fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

fn bare_claims(exp: usize) -> Claims {
    Claims {
        sub: Uuid::new_v4().to_string(),
        exp,
        iat: None,
        iss: None,
        email: Some("bare@example.com".to_string()),
        role: None,
        user_metadata: None,
        app_metadata: None,
    }
}

#[test]
fn valid_token_exposes_identity() {
    let user_id = Uuid::new_v4();
    let token = sign(
        &claims_for(&user_id.to_string(), "alice@example.com", "Alice Smith"),
        TEST_SECRET,
    );

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/avatar.png");
    assert_eq!(claims.auth_provider(), "google");
}

#[test]
fn expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;
    let token = sign(&bare_claims(now - 300), TEST_SECRET);

    let err = validate_token(&token, TEST_SECRET).unwrap_err();
    assert!(err.contains("ExpiredSignature"), "{err}");
}

#[test]
fn wrong_secret_is_rejected() {
    let token = sign(
        &claims_for(&Uuid::new_v4().to_string(), "bob@example.com", "Bob Jones"),
        TEST_SECRET,
    );

    let err = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx").unwrap_err();
    assert!(err.contains("InvalidSignature"), "{err}");
}

#[test]
fn garbage_token_is_rejected() {
    assert!(validate_token("not.a.valid.jwt", TEST_SECRET).is_err());
}

#[test]
fn claims_without_metadata_fall_back() {
    let claims = bare_claims(Utc::now().timestamp() as usize + 3600);

    assert_eq!(claims.user_email().unwrap(), "bare@example.com");
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
    assert_eq!(claims.auth_provider(), "email");
}

#[test]
fn non_uuid_subject_is_an_error() {
    let mut claims = bare_claims(0);
    claims.sub = "not-a-uuid".to_string();
    assert!(claims.user_id().is_err());
}

#[tokio::test]
async fn shared_secret_verifier_checks_tokens() {
    let verifier = TokenVerifier::SharedSecret(TEST_SECRET.to_string());
    let user_id = Uuid::new_v4();
    let token = sign(
        &claims_for(&user_id.to_string(), "carol@example.com", "Carol"),
        TEST_SECRET,
    );

    let claims = verifier.verify(&token).await.expect("valid token");
    assert_eq!(claims.user_id().unwrap(), user_id);

    let forged = sign(&claims_for(&user_id.to_string(), "carol@example.com", "Carol"), "other-secret");
    assert!(verifier.verify(&forged).await.is_err());
}
