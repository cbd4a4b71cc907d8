//! # Ingestion Loop
//!
//! Continuously pulls the next event from one logical stream and drives the
//! processing pipeline. The loop is written against the [`EventStream`]
//! abstraction so its semantics are testable without a broker; the Kafka
//! implementation lives in [`kafka`].
//!
//! ## Delivery contract
//!
//! `EventStream::next_event` advances the stream's cursor as part of the read
//! itself. Once a payload is returned to the loop the message is consumed,
//! whatever happens next - a decode or processing failure is logged and the
//! message is permanently skipped. The observed guarantee downstream is
//! therefore at-most-once.

pub mod kafka;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::models::Order;
use crate::pipeline::OrderProcessor;

pub use kafka::{KafkaConsumer, KafkaEventStream};

/// One logical partitioned-log stream.
///
/// `next_event` blocks until the next message body is available or the
/// transport errors. Implementations must advance their cursor synchronously
/// with the read: a returned body will never be redelivered.
#[async_trait]
pub trait EventStream: Send + Sync {
    async fn next_event(&self) -> Result<Vec<u8>>;
}

/// Run the ingestion loop until `shutdown` is cancelled.
///
/// Per iteration: read (cancellable), decode, process. Transport errors are
/// retried immediately with no backoff or cap - a deliberate simplicity
/// choice that busy-loops under a sustained outage. Decode and processing
/// failures are logged and the message is dropped. Cancellation stops new
/// reads; an in-flight processing step, once started, completes.
pub async fn read_loop(
    stream: Arc<dyn EventStream>,
    processor: Arc<dyn OrderProcessor>,
    shutdown: CancellationToken,
) {
    info!("ingestion loop started");
    loop {
        let payload = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!("ingestion loop cancelled, stopping");
                return;
            }
            next = stream.next_event() => match next {
                Ok(payload) => payload,
                Err(e) => {
                    error!(error = %e, "event read failed, retrying");
                    continue;
                }
            },
        };

        let order: Order = match serde_json::from_slice(&payload) {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "failed to decode order event, dropping message");
                continue;
            }
        };

        debug!(order_id = order.id, "received order event");

        if let Err(e) = processor.process_order(&order).await {
            error!(order_id = order.id, error = %e, "failed to process order");
        }
    }
}
