use crate::error::{RelayError, Result};
use crate::network::transport::{ChannelTransport, InboundMessage, Subscription};
use crate::settings::transport::TransportOptions;
use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, info};
use tokio_stream::StreamExt;

/// `ChannelTransport` backed by a NATS connection.
///
/// The underlying client is cheap to share and safe to publish on from
/// many tasks at once.
#[derive(Debug, Clone)]
pub struct NatsTransport {
    client: async_nats::Client,
    servers: String,
}

impl NatsTransport {
    /// Connects to the server named in `options`.
    pub async fn connect(options: &TransportOptions) -> Result<Self> {
        info!("Connecting to message bus at {}", options.servers);

        let client = async_nats::connect(options.servers.as_str())
            .await
            .map_err(|e| RelayError::Connect {
                servers: options.servers.clone(),
                reason: e.to_string(),
            })?;

        info!("Connected to message bus at {}", options.servers);

        Ok(Self {
            client,
            servers: options.servers.clone(),
        })
    }
}

#[async_trait]
impl ChannelTransport for NatsTransport {
    async fn subscribe(&self, channel: &str) -> Result<Subscription> {
        let subscriber = self
            .client
            .subscribe(channel.to_string())
            .await
            .map_err(|e| RelayError::subscribe(channel, e))?;

        debug!("Subscribed to '{}'", channel);

        let messages = subscriber.map(|message| InboundMessage {
            channel: message.subject.to_string(),
            payload: message.payload,
        });

        Ok(Box::pin(messages))
    }

    async fn publish(&self, channel: &str, payload: Bytes) -> Result<()> {
        self.client
            .publish(channel.to_string(), payload)
            .await
            .map_err(|e| RelayError::transport(channel, e))
    }

    async fn flush(&self) -> Result<()> {
        debug!("Flushing pending publishes to {}", self.servers);
        self.client
            .flush()
            .await
            .map_err(|e| RelayError::transport("flush", e))
    }
}
