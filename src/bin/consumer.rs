//! Order consumer binary.
//!
//! Loads configuration from the environment (with optional `.env`), wires the
//! collaborators into the component manager, and runs until interrupted.

use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use order_consumer::cache::RedisOrderCache;
use order_consumer::consumer::KafkaConsumer;
use order_consumer::store::PgOrderStore;
use order_consumer::{logging, ComponentManager, ConsumerConfig, LoggingConfig, OrderPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; containerized deployments configure through
    // the environment directly.
    let _ = dotenvy::dotenv();

    logging::init(&LoggingConfig::from_env());

    let config = match ConsumerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to read environment configuration");
            std::process::exit(1);
        }
    };

    let store = Arc::new(PgOrderStore::new(config.store.clone()));
    let cache = Arc::new(RedisOrderCache::new(config.cache.clone()));
    let pipeline = Arc::new(OrderPipeline::new(store.clone(), cache.clone()));
    let consumer = Arc::new(KafkaConsumer::new(config.broker.clone(), pipeline.clone()));

    let mut manager = ComponentManager::new();
    manager.add_component(store);
    manager.add_component(consumer);
    manager.add_component(cache);
    manager.add_component(pipeline);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("interrupt received");
                shutdown.cancel();
            }
        });
    }

    info!("🚀 starting order consumer");
    if let Err(e) = manager.run(shutdown).await {
        error!(error = %e, "order consumer failed");
        std::process::exit(1);
    }

    info!("order consumer stopped");
    Ok(())
}
