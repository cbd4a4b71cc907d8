//! # Processing Pipeline
//!
//! The unit of business logic: apply the two required side effects for a
//! newly ingested order, in a fixed sequence, with no rollback.
//!
//! The durable save runs first; if it fails the cache step is never
//! attempted and the error is returned immediately. If the durable save
//! succeeds and the cache save fails, the durable copy remains intact - the
//! only observable effect is a cache miss. Store durability is prioritized
//! over cache freshness; there is deliberately no compensating transaction
//! between the two saves.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::cache::OrderCache;
use crate::error::Result;
use crate::lifecycle::Component;
use crate::models::Order;
use crate::store::OrderStore;

/// Contract the ingestion loop invokes per decoded order.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn process_order(&self, order: &Order) -> Result<()>;
}

/// Two-phase persistence: durable store, then cache.
pub struct OrderPipeline {
    store: Arc<dyn OrderStore>,
    cache: Arc<dyn OrderCache>,
}

impl OrderPipeline {
    pub fn new(store: Arc<dyn OrderStore>, cache: Arc<dyn OrderCache>) -> Self {
        Self { store, cache }
    }
}

#[async_trait]
impl OrderProcessor for OrderPipeline {
    async fn process_order(&self, order: &Order) -> Result<()> {
        self.store.save_order(order).await?;
        self.cache.save_order(order).await?;
        Ok(())
    }
}

// The pipeline owns no connections of its own; it participates in the
// lifecycle only so it is registered alongside its collaborators.
#[async_trait]
impl Component for OrderPipeline {
    fn name(&self) -> &'static str {
        "order-pipeline"
    }

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn run(&self, _shutdown: CancellationToken) {}

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}
