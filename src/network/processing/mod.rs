pub mod pipeline;
pub mod processor;

pub use pipeline::{Outcome, RelayPipeline};
pub use processor::RelayProcessor;
