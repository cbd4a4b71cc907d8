//! # Durable-Store Collaborator
//!
//! Narrow save-by-key contract over the durable store, plus the PostgreSQL
//! implementation. The pipeline only ever sees the [`OrderStore`] trait.

pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Order;

/// Save contract exposed to the processing pipeline.
///
/// `id` is the primary key; re-inserting an existing id surfaces as a store
/// error (no upsert semantics are imposed here).
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn save_order(&self, order: &Order) -> Result<()>;
}

pub use postgres::PgOrderStore;
