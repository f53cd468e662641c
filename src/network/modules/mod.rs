pub mod delay;

pub use delay::DelayModule;
