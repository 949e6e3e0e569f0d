//! Haptic feedback side channel
//!
//! UI primitives never talk to vibration hardware directly. They receive a
//! [`HapticPort`] at construction and fire pulses through it. Pulses are
//! fire-and-forget: a port may fail, and callers are expected to drop the
//! error after logging it.
//!
//! # Adapters
//!
//! - [`NoopHaptics`] - platforms without haptic hardware
//! - [`TracingHaptics`] - logs each pulse (desktop builds, debugging)
//! - [`GatedHaptics`] - wraps another port and honours the user's
//!   "Haptic Feedback" preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors a haptic port can report
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HapticError {
    /// No haptic engine on this device
    #[error("Haptic engine unavailable")]
    Unavailable,

    /// The platform refused the request (e.g. low power mode)
    #[error("Haptic pulse rejected: {0}")]
    Rejected(String),
}

/// Result type for haptic operations
pub type Result<T> = std::result::Result<T, HapticError>;

/// Intensity tiers for a haptic pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticIntensity {
    /// Short, soft tick for ordinary taps
    Light,
    /// Firmer tick for prominent controls
    Medium,
    /// Strong impact
    Heavy,
    /// Notification-style pattern confirming a committed action
    Success,
}

impl HapticIntensity {
    /// Stable lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticIntensity::Light => "light",
            HapticIntensity::Medium => "medium",
            HapticIntensity::Heavy => "heavy",
            HapticIntensity::Success => "success",
        }
    }
}

impl fmt::Display for HapticIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to emit a haptic pulse
#[cfg_attr(test, mockall::automock)]
pub trait HapticPort: Send + Sync {
    /// Emit one pulse of the given intensity
    fn pulse(&self, intensity: HapticIntensity) -> Result<()>;
}

/// Shared handle to a haptic port
pub type SharedHaptics = Arc<dyn HapticPort>;

/// Port for devices without haptic hardware; every pulse is accepted and dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl HapticPort for NoopHaptics {
    fn pulse(&self, _intensity: HapticIntensity) -> Result<()> {
        Ok(())
    }
}

/// Port that records pulses in the log instead of vibrating
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHaptics;

impl HapticPort for TracingHaptics {
    fn pulse(&self, intensity: HapticIntensity) -> Result<()> {
        tracing::debug!(%intensity, "haptic pulse");
        Ok(())
    }
}

/// Wraps a port and drops pulses while haptics are switched off
pub struct GatedHaptics {
    inner: SharedHaptics,
    enabled: AtomicBool,
}

impl GatedHaptics {
    /// Create a gate around `inner`
    pub fn new(inner: SharedHaptics, enabled: bool) -> Self {
        Self {
            inner,
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Whether pulses are currently forwarded
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Toggle forwarding (mirrors the profile screen switch)
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl fmt::Debug for GatedHaptics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedHaptics")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl HapticPort for GatedHaptics {
    fn pulse(&self, intensity: HapticIntensity) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.inner.pulse(intensity)
    }
}
