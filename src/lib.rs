#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Order Consumer
//!
//! Background consumer service that ingests order events from Kafka, persists
//! each order to PostgreSQL, and mirrors it into Redis with a fixed expiry.
//!
//! ## Architecture
//!
//! The crate is organized around a small set of lifecycle-managed components:
//!
//! - [`lifecycle`] - `Component` capability trait and the `ComponentManager`
//!   that drives ordered startup and reverse-order shutdown
//! - [`consumer`] - the ingestion loop and the Kafka-backed event stream
//! - [`pipeline`] - the two-phase persistence sequence (store, then cache)
//! - [`store`] - durable-store collaborator backed by PostgreSQL
//! - [`cache`] - cache collaborator backed by Redis
//! - [`models`] - the `Order` domain entity
//! - [`config`] - explicit, validated configuration loaded at process start
//! - [`error`] - structured error handling
//! - [`logging`] - tracing initialization
//!
//! ## Delivery Semantics
//!
//! The Kafka cursor advances as soon as a message is delivered to the loop,
//! so the effective guarantee observed downstream is **at-most-once**: a
//! message that fails to decode or process is logged and permanently skipped,
//! never redelivered. Processing is strictly sequential per stream - order N
//! is fully processed, success or failure, before order N+1 is read.

pub mod cache;
pub mod config;
pub mod consumer;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod store;

pub use config::{BrokerConfig, CacheConfig, ConsumerConfig, LoggingConfig, StoreConfig};
pub use error::{ConsumerError, Result};
pub use lifecycle::{Component, ComponentManager};
pub use models::Order;
pub use pipeline::{OrderPipeline, OrderProcessor};
