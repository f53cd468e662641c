use crate::network::core::{Frame, ZoneRouter};
use crate::network::dissect::{dissect, DecodeError};
use crate::network::modules::DelayModule;
use crate::settings::RelaySettings;
use bytes::Bytes;
use log::{debug, error, info};

/// What should happen to a frame once the pipeline is done with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Publish `payload`, unchanged, on `channel`
    Publish {
        channel: &'static str,
        payload: Bytes,
    },
    /// The frame could not be decoded and goes nowhere
    Drop { error: DecodeError },
}

impl Outcome {
    pub fn is_drop(&self) -> bool {
        matches!(self, Outcome::Drop { .. })
    }
}

/// Per-frame processing: delay, dissect, route.
///
/// Holds nothing mutable, so a single instance is shared by every frame
/// task.
#[derive(Debug, Clone)]
pub struct RelayPipeline {
    delay: DelayModule,
    router: ZoneRouter,
}

impl RelayPipeline {
    pub fn new(settings: &RelaySettings) -> Self {
        Self {
            delay: DelayModule::new(settings.delay),
            router: ZoneRouter::new(),
        }
    }

    /// Runs one frame through the pipeline.
    ///
    /// The returned outcome never carries modified bytes: a published
    /// payload is the frame's own buffer.
    pub async fn process(&self, frame: Frame) -> Outcome {
        info!(
            "Processing ethernet packet from {} zone ({} bytes)",
            frame.zone,
            frame.size()
        );

        self.delay.apply().await;

        let dissection = dissect(&frame.payload);
        if let Some(err) = dissection.error() {
            error!("Error decoding some part of the packet: {}", err);
            return Outcome::Drop { error: err.clone() };
        }

        for (kind, dump) in dissection.layers() {
            info!("{} layer detected.", kind);
            info!("{}", dump);
        }

        let channel = self.router.route(frame.zone);
        debug!(
            "Routing {} zone packet to '{}' after {:?}",
            frame.zone,
            channel,
            frame.age()
        );
        Outcome::Publish {
            channel,
            payload: frame.payload,
        }
    }
}
