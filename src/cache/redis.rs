//! Redis-backed order cache.
//!
//! Uses `redis::aio::ConnectionManager` for async multiplexed connections
//! with automatic reconnection. Each order is stored as its full JSON
//! serialization under `order:<id>` with the fixed [`ORDER_CACHE_TTL`].

use std::sync::OnceLock;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{OrderCache, ORDER_CACHE_TTL};
use crate::config::CacheConfig;
use crate::error::{ConsumerError, Result};
use crate::lifecycle::Component;
use crate::models::Order;

pub struct RedisOrderCache {
    config: CacheConfig,
    connection: OnceLock<ConnectionManager>,
}

impl RedisOrderCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            connection: OnceLock::new(),
        }
    }

    fn connection(&self) -> Result<ConnectionManager> {
        self.connection
            .get()
            .cloned()
            .ok_or(ConsumerError::NotInitialized("redis cache"))
    }
}

#[async_trait]
impl OrderCache for RedisOrderCache {
    async fn save_order(&self, order: &Order) -> Result<()> {
        let payload = serde_json::to_string(order).map_err(|e| {
            ConsumerError::Cache(format!("failed to serialize order {}: {e}", order.id))
        })?;

        let key = order.cache_key();
        let mut conn = self.connection()?;
        redis::cmd("SETEX")
            .arg(&key)
            .arg(ORDER_CACHE_TTL.as_secs())
            .arg(payload)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| ConsumerError::Cache(format!("redis SETEX failed for {key}: {e}")))?;

        debug!(key = %key, ttl_seconds = ORDER_CACHE_TTL.as_secs(), "order cached");
        Ok(())
    }
}

#[async_trait]
impl Component for RedisOrderCache {
    fn name(&self) -> &'static str {
        "redis-cache"
    }

    async fn init(&self) -> Result<()> {
        let client = redis::Client::open(self.config.connection_url()).map_err(|e| {
            ConsumerError::Lifecycle(format!("failed to create redis client: {e}"))
        })?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| ConsumerError::Lifecycle(format!("failed to connect to redis: {e}")))?;

        self.connection
            .set(connection)
            .map_err(|_| ConsumerError::Lifecycle("redis cache already initialized".into()))?;

        info!(addr = %self.config.addr, "connected to redis");
        Ok(())
    }

    async fn run(&self, _shutdown: CancellationToken) {}

    async fn stop(&self) -> Result<()> {
        // ConnectionManager has no explicit close; connections drop with the
        // process.
        debug!("redis cache stopped");
        Ok(())
    }
}
