use crate::error::Result;
use crate::network::core::{Frame, ZoneTag};
use crate::network::processing::pipeline::{Outcome, RelayPipeline};
use crate::network::transport::{ChannelTransport, InboundMessage, Subscription};
use crate::settings::RelaySettings;
use log::{debug, error, info};
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio_stream::{StreamExt, StreamMap};

/// Drives the relay: subscribes to both inbound channels and runs every
/// received frame through the pipeline on its own task.
///
/// Frames never wait on each other. A frame sleeping out its delay does
/// not hold up the subscription readers, and the order in which frames
/// are published is not guaranteed to match the order they arrived in.
pub struct RelayProcessor<T: ChannelTransport> {
    transport: Arc<T>,
    pipeline: Arc<RelayPipeline>,
}

impl<T: ChannelTransport> RelayProcessor<T> {
    pub fn new(transport: Arc<T>, settings: &RelaySettings) -> Self {
        Self {
            transport,
            pipeline: Arc::new(RelayPipeline::new(settings)),
        }
    }

    /// Relays frames until `shutdown` resolves or every subscription ends.
    ///
    /// On the way out the subscriptions are dropped, frames already in
    /// flight complete (including their delay), and then the transport is
    /// flushed.
    ///
    /// Only a failure to subscribe is returned; per-frame failures are
    /// logged.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut inbound = self.subscribe_all().await?;
        let mut in_flight = JoinSet::new();

        tokio::pin!(shutdown);

        info!("Relay started, waiting for packets");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting packets");
                    break;
                }
                next = inbound.next() => match next {
                    Some((_, message)) => {
                        in_flight.spawn(relay_frame(
                            Arc::clone(&self.transport),
                            Arc::clone(&self.pipeline),
                            message,
                        ));
                    }
                    None => {
                        info!("All inbound subscriptions closed");
                        break;
                    }
                },
                Some(finished) = in_flight.join_next(), if !in_flight.is_empty() => {
                    report_task(finished);
                }
            }
        }

        drop(inbound);

        if !in_flight.is_empty() {
            debug!("Waiting for {} packets in flight", in_flight.len());
        }
        while let Some(finished) = in_flight.join_next().await {
            report_task(finished);
        }

        match self.transport.flush().await {
            Ok(()) => debug!("Transport flushed"),
            Err(e) => error!("Failed to flush transport: {}", e),
        }

        info!("Relay stopped");
        Ok(())
    }

    async fn subscribe_all(&self) -> Result<StreamMap<ZoneTag, Subscription>> {
        let mut inbound = StreamMap::new();

        for zone in ZoneTag::ALL {
            let channel = zone.inbound_channel();
            let subscription = self.transport.subscribe(channel).await?;
            info!("Listening for {} zone packets on '{}'", zone, channel);
            inbound.insert(zone, subscription);
        }

        Ok(inbound)
    }
}

/// Processes one inbound message and publishes the result, if any.
async fn relay_frame<T: ChannelTransport>(
    transport: Arc<T>,
    pipeline: Arc<RelayPipeline>,
    message: InboundMessage,
) {
    let frame = Frame::from(message);

    match pipeline.process(frame).await {
        Outcome::Publish { channel, payload } => {
            let size = payload.len();
            match transport.publish(channel, payload).await {
                Ok(()) => debug!("Published {} bytes to '{}'", size, channel),
                Err(e) => error!("Failed to publish packet: {}", e),
            }
        }
        Outcome::Drop { error } => {
            debug!("Dropped packet that failed {} decoding", error.layer());
        }
    }
}

fn report_task(finished: std::result::Result<(), JoinError>) {
    if let Err(e) = finished {
        error!("Packet task failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::dissect::test_frames::{ipv4_udp_frame, ipv6_tcp_frame};
    use crate::network::transport::MemoryTransport;
    use crate::settings::RelaySettingsBuilder;
    use std::time::Duration;

    async fn wait_for_subscribers(transport: &MemoryTransport) {
        while ZoneTag::ALL
            .iter()
            .any(|zone| transport.subscriber_count(zone.inbound_channel()) == 0)
        {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    fn processor(transport: &Arc<MemoryTransport>) -> RelayProcessor<MemoryTransport> {
        let settings = RelaySettingsBuilder::new().delay(20).build();
        RelayProcessor::new(Arc::clone(transport), &settings)
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_from_both_zones_are_relayed() {
        let transport = Arc::new(MemoryTransport::new());
        let relay = processor(&transport);
        let handle = tokio::spawn(async move { relay.run(std::future::pending()).await });

        wait_for_subscribers(&transport).await;
        let secure = ipv4_udp_frame(b"from secure");
        let insecure = ipv6_tcp_frame(b"from insecure");
        transport.inject("inpktsec", secure.clone()).unwrap();
        transport.inject("inpktinsec", insecure.clone()).unwrap();
        transport.close();

        handle.await.unwrap().unwrap();

        let mut published = transport.published();
        published.sort_by(|a, b| a.channel.cmp(&b.channel));
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].channel, "outpktinsec");
        assert_eq!(published[0].payload[..], secure[..]);
        assert_eq!(published[1].channel, "outpktsec");
        assert_eq!(published[1].payload[..], insecure[..]);
        assert!(transport.is_flushed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_for_in_flight_frames() {
        let transport = Arc::new(MemoryTransport::new());
        let relay = processor(&transport);
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            relay
                .run(async {
                    let _ = stop_rx.await;
                })
                .await
        });

        wait_for_subscribers(&transport).await;
        transport.inject("inpktsec", ipv4_udp_frame(b"x")).unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        stop_tx.send(()).unwrap();

        handle.await.unwrap().unwrap();

        assert_eq!(transport.published().len(), 1);
        assert!(transport.is_flushed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_failure_is_not_fatal() {
        let transport = Arc::new(MemoryTransport::new());
        transport.reject_publishes(true);
        let relay = processor(&transport);
        let handle = tokio::spawn(async move { relay.run(std::future::pending()).await });

        wait_for_subscribers(&transport).await;
        transport.inject("inpktinsec", ipv4_udp_frame(b"a")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        transport.reject_publishes(false);
        transport.inject("inpktinsec", ipv4_udp_frame(b"b")).unwrap();
        transport.close();

        assert!(handle.await.unwrap().is_ok());
        let published = transport.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].channel, "outpktsec");
    }
}
