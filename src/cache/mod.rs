//! # Cache Collaborator
//!
//! Save-by-key contract over the fast-lookup cache, plus the Redis
//! implementation. Entries carry a fixed expiry; a cache failure is never
//! fatal to the overall pipeline - the durable copy is the source of truth.

pub mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Order;

/// Fixed lifetime of every cached order entry.
pub const ORDER_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Save contract exposed to the processing pipeline.
#[async_trait]
pub trait OrderCache: Send + Sync {
    async fn save_order(&self, order: &Order) -> Result<()>;
}

pub use redis::RedisOrderCache;
