//! PostgreSQL-backed order store.
//!
//! Connection lifecycle is managed through the [`Component`] trait: the pool
//! is created on `init` (with a liveness ping) and closed on `stop`. The
//! pipeline reaches this type only through [`OrderStore`].

use std::sync::OnceLock;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{ConsumerError, Result};
use crate::lifecycle::Component;
use crate::models::Order;
use crate::store::OrderStore;

const INSERT_ORDER: &str = "\
INSERT INTO orders (id, user_id, product_name, quantity, price, total_price, created_at) \
VALUES ($1, $2, $3, $4, $5, $6, $7)";

/// Durable store over a lazily-connected `PgPool`.
pub struct PgOrderStore {
    config: StoreConfig,
    pool: OnceLock<PgPool>,
}

impl PgOrderStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            pool: OnceLock::new(),
        }
    }

    fn pool(&self) -> Result<&PgPool> {
        self.pool
            .get()
            .ok_or(ConsumerError::NotInitialized("postgres store"))
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        sqlx::query(INSERT_ORDER)
            .bind(order.id)
            .bind(order.user_id)
            .bind(&order.product_name)
            .bind(order.quantity)
            .bind(order.price)
            .bind(order.total_price)
            .bind(order.created_at)
            .execute(self.pool()?)
            .await
            .map_err(|e| {
                ConsumerError::Store(format!("failed to insert order {}: {e}", order.id))
            })?;

        info!(order_id = order.id, "order saved to postgres");
        Ok(())
    }
}

#[async_trait]
impl Component for PgOrderStore {
    fn name(&self) -> &'static str {
        "postgres-store"
    }

    async fn init(&self) -> Result<()> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&self.config.connection_url())
            .await
            .map_err(|e| {
                ConsumerError::Lifecycle(format!("failed to connect to postgres: {e}"))
            })?;

        // Liveness ping before declaring the component up.
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| ConsumerError::Lifecycle(format!("postgres ping failed: {e}")))?;

        self.pool
            .set(pool)
            .map_err(|_| ConsumerError::Lifecycle("postgres store already initialized".into()))?;

        info!(
            host = %self.config.host,
            database = %self.config.database,
            "connected to postgres"
        );
        Ok(())
    }

    async fn run(&self, _shutdown: CancellationToken) {}

    async fn stop(&self) -> Result<()> {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            debug!("postgres pool closed");
        }
        Ok(())
    }
}
