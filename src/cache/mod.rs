use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// JSON values in Redis.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

fn serde_error(what: &'static str, e: serde_json::Error) -> RedisError {
    RedisError::from((redis::ErrorKind::TypeError, what, e.to_string()))
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        value
            .map(|v| serde_json::from_str(&v).map_err(|e| serde_error("Deserialization error", e)))
            .transpose()
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> redis::RedisResult<()> {
        let serialized =
            serde_json::to_string(value).map_err(|e| serde_error("Serialization error", e))?;

        redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut self.connection.clone())
            .await
    }

    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }
}

pub mod keys {
    /// Public detail payload of the guide with this slug.
    pub fn guide_detail(slug: &str) -> String {
        format!("guide:detail:{slug}")
    }
}

/// Read-through cache for guide detail pages. Without Redis every call is a
/// miss; Redis failures are logged and treated as misses.
#[derive(Clone)]
pub struct GuideCache {
    redis: Option<RedisCache>,
    ttl: Duration,
}

impl GuideCache {
    pub fn new(redis: Option<RedisCache>, ttl: Duration) -> Self {
        Self { redis, ttl }
    }

    pub fn disabled() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub async fn get<T: DeserializeOwned>(&self, slug: &str) -> Option<T> {
        let redis = self.redis.as_ref()?;
        match redis.get(&keys::guide_detail(slug)).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, slug, "guide cache read failed");
                None
            }
        }
    }

    pub async fn put<T: Serialize>(&self, slug: &str, value: &T) {
        let Some(redis) = &self.redis else {
            return;
        };
        if let Err(e) = redis.set(&keys::guide_detail(slug), value, self.ttl).await {
            tracing::warn!(error = %e, slug, "guide cache write failed");
        }
    }

    /// Drop the cached detail after anything it shows has changed.
    pub async fn invalidate(&self, slug: &str) {
        let Some(redis) = &self.redis else {
            return;
        };
        if let Err(e) = redis.delete(&keys::guide_detail(slug)).await {
            tracing::warn!(error = %e, slug, "guide cache invalidation failed");
        }
    }
}
