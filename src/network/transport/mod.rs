//! Message bus abstraction.
//!
//! The relay only needs three things from a bus: a stream of messages per
//! inbound channel, a way to publish bytes to a channel, and a final flush.
//! Production uses NATS, tests use the in-memory bus.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::pin::Pin;
use tokio_stream::Stream;

pub mod memory;
pub mod nats;

pub use memory::MemoryTransport;
pub use nats::NatsTransport;

/// A message delivered on an inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel the message arrived on
    pub channel: String,
    /// Raw frame bytes
    pub payload: Bytes,
}

/// Stream of messages for one subscription. Ends when the subscription
/// is closed by the transport.
pub type Subscription = Pin<Box<dyn Stream<Item = InboundMessage> + Send>>;

/// Publish/subscribe transport shared by every in-flight frame.
///
/// Implementations must allow `publish` to be called concurrently from
/// many tasks.
#[async_trait]
pub trait ChannelTransport: Send + Sync + 'static {
    /// Starts receiving messages published to `channel`.
    async fn subscribe(&self, channel: &str) -> Result<Subscription>;

    /// Publishes `payload` to `channel` unchanged.
    async fn publish(&self, channel: &str, payload: Bytes) -> Result<()>;

    /// Sends every publish still buffered by the client.
    ///
    /// Called once at shutdown, after all subscriptions have been dropped.
    async fn flush(&self) -> Result<()>;
}
