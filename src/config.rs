use std::env;
use std::time::Duration;

/// How bearer tokens are verified.
#[derive(Debug, Clone)]
pub enum AuthSettings {
    /// Supabase project JWKS (ES256/ES384).
    Jwks { project_ref: String, anon_key: String },
    /// HS256 shared secret, for local development.
    SharedSecret(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub redis_url: Option<String>,
    pub auth: AuthSettings,
    pub run_migrations: bool,
    pub guide_cache_ttl: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("{raw:?} is not a port number"),
            })?,
            Err(_) => 8080,
        };

        let auth = match (optional("SUPABASE_URL"), optional("JWT_SECRET")) {
            (Some(url), _) => AuthSettings::Jwks {
                project_ref: project_ref(&url)?,
                anon_key: required("SUPABASE_ANON_KEY")?,
            },
            (None, Some(secret)) => AuthSettings::SharedSecret(secret),
            (None, None) => return Err(ConfigError::Missing("SUPABASE_URL or JWT_SECRET")),
        };

        Ok(Self {
            database_url,
            port,
            redis_url: optional("REDIS_URL"),
            auth,
            run_migrations: optional("RUN_MIGRATIONS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            guide_cache_ttl: parse_duration_secs("GUIDE_CACHE_TTL", 300),
        })
    }
}

/// `https://PROJECT.supabase.co` -> `PROJECT`.
pub fn project_ref(supabase_url: &str) -> Result<String, ConfigError> {
    supabase_url
        .trim_end_matches('/')
        .strip_prefix("https://")
        .and_then(|s| s.strip_suffix(".supabase.co"))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::Invalid {
            name: "SUPABASE_URL",
            reason: "expected https://PROJECT.supabase.co".to_string(),
        })
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
