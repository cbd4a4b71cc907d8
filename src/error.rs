//! # Structured Error Handling
//!
//! Error-kind enumeration shared across the crate. Call sites branch on the
//! variant rather than matching strings, and every layer that wraps an error
//! adds its own call-site context to the message.

use thiserror::Error;

/// Crate-wide error type.
///
/// Each variant is one failure class with its own handling policy:
/// configuration and lifecycle errors are fatal at startup, transport and
/// decode errors are retried or dropped by the ingestion loop, and store or
/// cache errors are logged without stopping the loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsumerError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("component not initialized: {0}")]
    NotInitialized(&'static str),
}

pub type Result<T> = std::result::Result<T, ConsumerError>;
