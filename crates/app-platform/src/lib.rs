//! Platform services for Nourish
//!
//! This crate holds the side channels the UI layer consumes from the host
//! platform: haptic feedback and log output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod haptics;
pub mod logging;

pub use haptics::{
    GatedHaptics, HapticError, HapticIntensity, HapticPort, NoopHaptics, SharedHaptics,
    TracingHaptics,
};
pub use logging::{init_tracing, LoggingError};
