//! Kafka-backed event stream and its lifecycle component.
//!
//! The consumer runs with `enable.auto.commit` and `enable.auto.offset.store`
//! both on, so the offset is stored the moment a message is delivered to the
//! application. That makes the cursor advance synchronous with the read, as
//! [`EventStream`] requires, and fixes the delivery guarantee at
//! at-most-once.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::BrokerConfig;
use crate::consumer::{read_loop, EventStream};
use crate::error::{ConsumerError, Result};
use crate::lifecycle::Component;
use crate::pipeline::OrderProcessor;

/// One subscribed Kafka topic exposed as an [`EventStream`].
pub struct KafkaEventStream {
    consumer: StreamConsumer,
}

impl KafkaEventStream {
    /// Build the consumer and subscribe to the configured topic.
    pub fn connect(config: &BrokerConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", config.bootstrap_servers())
            .set("group.id", config.group_id.as_str())
            .set("enable.auto.commit", "true")
            .set("enable.auto.offset.store", "true")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| {
                ConsumerError::Lifecycle(format!("failed to create kafka consumer: {e}"))
            })?;

        consumer.subscribe(&[config.topic.as_str()]).map_err(|e| {
            ConsumerError::Lifecycle(format!(
                "failed to subscribe to topic {}: {e}",
                config.topic
            ))
        })?;

        Ok(Self { consumer })
    }

    fn unsubscribe(&self) {
        self.consumer.unsubscribe();
    }
}

#[async_trait]
impl EventStream for KafkaEventStream {
    async fn next_event(&self) -> Result<Vec<u8>> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| ConsumerError::Transport(format!("kafka read failed: {e}")))?;

        match message.payload() {
            Some(payload) => Ok(payload.to_vec()),
            None => Err(ConsumerError::Decode("message has no payload".to_string())),
        }
    }
}

/// Lifecycle component that owns the Kafka stream and the ingestion task.
pub struct KafkaConsumer {
    config: BrokerConfig,
    processor: Arc<dyn OrderProcessor>,
    stream: OnceLock<Arc<KafkaEventStream>>,
}

impl KafkaConsumer {
    pub fn new(config: BrokerConfig, processor: Arc<dyn OrderProcessor>) -> Self {
        Self {
            config,
            processor,
            stream: OnceLock::new(),
        }
    }
}

#[async_trait]
impl Component for KafkaConsumer {
    fn name(&self) -> &'static str {
        "kafka-consumer"
    }

    async fn init(&self) -> Result<()> {
        let stream = KafkaEventStream::connect(&self.config)?;
        self.stream
            .set(Arc::new(stream))
            .map_err(|_| ConsumerError::Lifecycle("kafka consumer already initialized".into()))?;

        info!(
            topic = %self.config.topic,
            group_id = %self.config.group_id,
            "kafka consumer initialized"
        );
        Ok(())
    }

    async fn run(&self, shutdown: CancellationToken) {
        let Some(stream) = self.stream.get() else {
            // The manager always initializes before running; this only
            // trips when the component is driven by hand.
            warn!("kafka consumer run called before init, skipping");
            return;
        };

        let stream: Arc<dyn EventStream> = stream.clone();
        let processor = self.processor.clone();
        tokio::spawn(read_loop(stream, processor, shutdown));
    }

    async fn stop(&self) -> Result<()> {
        if let Some(stream) = self.stream.get() {
            stream.unsubscribe();
            info!(topic = %self.config.topic, "kafka consumer unsubscribed");
        }
        Ok(())
    }
}
