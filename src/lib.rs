//! Nourish
//!
//! Animated, theme-aware UI primitives for the Nourish nutrition app.
//!
//! - [`ui`] - Theme, press feedback, progress rings and the primitive components
//! - [`platform`] - Haptic port and logging setup

#![warn(missing_docs)]

pub use app_platform as platform;
pub use app_ui as ui;

pub use app_platform::{init_tracing, HapticIntensity, HapticPort, SharedHaptics};
pub use app_ui::{UiConfig, UiContext};
