use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const JWKS_URL_TEMPLATE: &str = "https://{}.supabase.co/auth/v1/.well-known/jwks.json";
const KEY_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// The subset of a JWK needed to build a decoding key.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: Option<String>,
    kty: String,
    alg: Option<String>,
    x: Option<String>,
    y: Option<String>,
    n: Option<String>,
    e: Option<String>,
}

impl Jwk {
    fn algorithm(&self) -> Algorithm {
        match self.alg.as_deref() {
            Some("ES384") => Algorithm::ES384,
            Some("RS256") => Algorithm::RS256,
            _ if self.kty == "RSA" => Algorithm::RS256,
            _ => Algorithm::ES256,
        }
    }

    fn decoding_key(&self) -> Result<DecodingKey, String> {
        let key = match self.kty.as_str() {
            "EC" => DecodingKey::from_ec_components(
                self.x.as_deref().ok_or("Missing 'x' in JWK")?,
                self.y.as_deref().ok_or("Missing 'y' in JWK")?,
            ),
            "RSA" => DecodingKey::from_rsa_components(
                self.n.as_deref().ok_or("Missing 'n' in JWK")?,
                self.e.as_deref().ok_or("Missing 'e' in JWK")?,
            ),
            other => return Err(format!("Unsupported key type {other}")),
        };
        key.map_err(|e| format!("Failed to create decoding key: {e}"))
    }
}

/// Signing keys of the identity provider, fetched on first use of each `kid`
/// and kept for an hour.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, Jwk>>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl JwksCache {
    pub fn new(project_ref: &str, anon_key: &str) -> Self {
        Self {
            cache: Arc::new(Cache::builder().time_to_live(KEY_TTL).max_capacity(10).build()),
            jwks_url: JWKS_URL_TEMPLATE.replace("{}", project_ref),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, String> {
        debug!(url = %self.jwks_url, "fetching JWKS");

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to fetch JWKS: HTTP {status}"));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| format!("Failed to parse JWKS JSON: {e}"))
    }

    /// Key for `kid`. A miss refreshes the whole set so rotated keys are
    /// picked up without a restart.
    async fn key(&self, kid: &str) -> Result<Jwk, String> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let set = self.fetch_jwks().await?;
        let mut found = None;
        for key in set.keys {
            let Some(key_id) = key.kid.clone() else {
                continue;
            };
            if key_id == kid {
                found = Some(key.clone());
            }
            self.cache.insert(key_id, key).await;
        }
        found.ok_or_else(|| format!("Key with kid={kid} not found in JWKS"))
    }

    pub async fn validate_token(&self, token: &str) -> Result<TokenData<super::jwt::Claims>, String> {
        let header = decode_header(token).map_err(|e| format!("Failed to decode header: {e}"))?;
        let kid = header.kid.ok_or("No 'kid' in token header")?;

        let jwk = self.key(&kid).await?;
        let mut validation = Validation::new(jwk.algorithm());
        validation.validate_aud = false;

        decode::<super::jwt::Claims>(token, &jwk.decoding_key()?, &validation)
            .map_err(|e| format!("Token validation failed: {e}"))
    }
}
