use crate::error::{RelayError, Result};
use crate::network::transport::{ChannelTransport, InboundMessage, Subscription};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

type Subscribers = HashMap<String, Vec<mpsc::UnboundedSender<InboundMessage>>>;

/// In-process `ChannelTransport`.
///
/// Publishes are delivered to any subscriber of the target channel and
/// also recorded, so a test can inspect exactly what left the relay.
/// Like a real bus, a message sent to a channel with no subscribers is
/// silently lost.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    subscribers: Mutex<Subscribers>,
    published: Mutex<Vec<InboundMessage>>,
    reject_publishes: AtomicBool,
    flushed: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `payload` to every subscriber of `channel`, as if another
    /// client had published it. Returns how many subscribers received it.
    pub fn inject(&self, channel: &str, payload: impl Into<Bytes>) -> Result<usize> {
        let message = InboundMessage {
            channel: channel.to_string(),
            payload: payload.into(),
        };
        self.deliver(message)
    }

    /// Everything published through this transport, in publish order.
    pub fn published(&self) -> Vec<InboundMessage> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of live subscriptions on `channel`.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }

    /// Makes every following publish fail until switched back.
    pub fn reject_publishes(&self, reject: bool) {
        self.reject_publishes.store(reject, Ordering::SeqCst);
    }

    /// Ends every open subscription.
    pub fn close(&self) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Whether `flush` has been called.
    pub fn is_flushed(&self) -> bool {
        self.flushed.load(Ordering::SeqCst)
    }

    fn deliver(&self, message: InboundMessage) -> Result<usize> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| RelayError::lock_poisoned("subscribers"))?;

        let Some(senders) = subscribers.get_mut(&message.channel) else {
            return Ok(0);
        };

        senders.retain(|sender| sender.send(message.clone()).is_ok());
        Ok(senders.len())
    }
}

#[async_trait]
impl ChannelTransport for MemoryTransport {
    async fn subscribe(&self, channel: &str) -> Result<Subscription> {
        let (sender, receiver) = mpsc::unbounded_channel();

        self.subscribers
            .lock()
            .map_err(|_| RelayError::lock_poisoned("subscribers"))?
            .entry(channel.to_string())
            .or_default()
            .push(sender);

        Ok(Box::pin(UnboundedReceiverStream::new(receiver)))
    }

    async fn publish(&self, channel: &str, payload: Bytes) -> Result<()> {
        if self.reject_publishes.load(Ordering::SeqCst) {
            return Err(RelayError::transport(channel, "publish rejected"));
        }

        let message = InboundMessage {
            channel: channel.to_string(),
            payload,
        };

        self.published
            .lock()
            .map_err(|_| RelayError::lock_poisoned("published frames"))?
            .push(message.clone());

        self.deliver(message)?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.flushed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
