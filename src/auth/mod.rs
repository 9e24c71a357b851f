pub mod authorization;
pub mod jwks;
pub mod jwt;
pub mod middleware;

use crate::config::AuthSettings;

/// Verifies bearer tokens either against the identity provider's JWKS or
/// with a shared HS256 secret.
#[derive(Clone)]
pub enum TokenVerifier {
    Jwks(jwks::JwksCache),
    SharedSecret(String),
}

impl TokenVerifier {
    pub fn from_settings(settings: &AuthSettings) -> Self {
        match settings {
            AuthSettings::Jwks {
                project_ref,
                anon_key,
            } => TokenVerifier::Jwks(jwks::JwksCache::new(project_ref, anon_key)),
            AuthSettings::SharedSecret(secret) => TokenVerifier::SharedSecret(secret.clone()),
        }
    }

    pub async fn verify(&self, token: &str) -> Result<jwt::Claims, String> {
        match self {
            TokenVerifier::Jwks(cache) => cache.validate_token(token).await.map(|td| td.claims),
            TokenVerifier::SharedSecret(secret) => jwt::validate_token(token, secret),
        }
    }
}
