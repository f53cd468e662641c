use crate::settings::delay::{DelayDistribution, DelayOptions};
use log::info;
use rand::rng;
use rand_distr::{Distribution, Exp};
use std::time::Duration;

/// Suspends a frame's processing for the configured delay.
///
/// The wait is an async timer on the frame's own task, so other frames in
/// flight keep moving while this one sleeps.
#[derive(Debug, Clone)]
pub struct DelayModule {
    base: Duration,
    /// Present when delays are drawn from an exponential distribution
    /// with mean `base`
    exponential: Option<Exp<f64>>,
}

impl DelayModule {
    pub fn new(options: DelayOptions) -> Self {
        let base = options.duration();
        let exponential = match options.distribution {
            DelayDistribution::Exponential if !base.is_zero() => {
                Exp::new(1.0 / base.as_secs_f64()).ok()
            }
            _ => None,
        };

        Self { base, exponential }
    }

    /// Picks the delay for the next frame.
    pub fn next_delay(&self) -> Duration {
        match &self.exponential {
            Some(exp) => {
                Duration::try_from_secs_f64(exp.sample(&mut rng())).unwrap_or(self.base)
            }
            None => self.base,
        }
    }

    /// Waits out the delay for the current frame and reports what was applied.
    pub async fn apply(&self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        info!("Packet delayed by: {:?}", delay);
        delay
    }
}
