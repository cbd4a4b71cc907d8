//! The order entity as carried on the wire and persisted to both stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingested order event.
///
/// `id` is the idempotency key: it uniquely determines the durable-store row
/// and the cache entry. Instances are transient - decoded from one message,
/// processed once, then discarded. There is no in-memory retention or retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_name: String,
    /// Expected to be non-negative; not enforced at decode time.
    pub quantity: i32,
    pub price: f64,
    pub total_price: f64,
    /// ISO-8601 on the wire.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Key under which this order is mirrored into the cache.
    pub fn cache_key(&self) -> String {
        format!("order:{}", self.id)
    }
}
