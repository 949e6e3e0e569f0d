//! Press feedback shared by tappable primitives
//!
//! [`PressFeedbackController`] turns three touch events into a shrinking
//! scale animation and haptic pulses:
//!
//! - press-start: spring toward the pressed scale, pulse by tier
//! - press-end: spring back to 1.0
//! - press-confirmed: run the caller's callback once, pulse if configured
//!
//! The press lifecycle is `Idle -> Pressed -> Idle`. A confirm only counts
//! when the release landed inside the hit target and the control was enabled
//! at that moment. Disabled controls neither animate nor pulse.

use app_platform::haptics::{HapticIntensity, SharedHaptics};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::animation::{AnimatedScalar, AnimatedValue, Curve, SpringConfig};
use crate::tokens::press;

// =============================================================================
// Configuration Types
// =============================================================================

/// Importance of a tappable control, which picks its shrink depth and pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressTier {
    /// Regular buttons: 0.95 scale, light pulse
    #[default]
    Standard,
    /// Floating action buttons: 0.90 scale, medium pulse
    Prominent,
}

impl PressTier {
    /// Default pressed scale
    pub fn pressed_scale(self) -> f32 {
        match self {
            PressTier::Standard => press::STANDARD_SCALE,
            PressTier::Prominent => press::PROMINENT_SCALE,
        }
    }

    /// Pulse fired at press-start
    pub fn haptic(self) -> HapticIntensity {
        match self {
            PressTier::Standard => HapticIntensity::Light,
            PressTier::Prominent => HapticIntensity::Medium,
        }
    }
}

/// Extra pulse fired when a tap is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmFeedback {
    /// Nothing beyond the press-start pulse
    #[default]
    None,
    /// Light tick (selection chips)
    Light,
    /// Success pattern for committed actions (form submission)
    Success,
}

impl ConfirmFeedback {
    fn intensity(self) -> Option<HapticIntensity> {
        match self {
            ConfirmFeedback::None => None,
            ConfirmFeedback::Light => Some(HapticIntensity::Light),
            ConfirmFeedback::Success => Some(HapticIntensity::Success),
        }
    }
}

/// Press lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressPhase {
    /// No finger down
    Idle,
    /// Finger down on the control
    Pressed,
}

/// Snapshot of the press state at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressState {
    /// Current scale in [pressed_scale, 1.0]
    pub scale: f32,
    /// Whether a finger is down
    pub is_pressed: bool,
}

/// Result of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The release confirmed a tap and the callback ran
    Confirmed,
    /// The release ended a press without confirming it
    Released,
    /// Nothing was pressed (disabled, unmounted or a stray event)
    Ignored,
}

// =============================================================================
// Controller
// =============================================================================

/// Scale animation and haptic state for one control instance
pub struct PressFeedbackController {
    id: Uuid,
    tier: PressTier,
    pressed_scale: f32,
    spring: SpringConfig,
    confirm_feedback: ConfirmFeedback,
    scale: AnimatedValue,
    phase: PressPhase,
    disabled: bool,
    mounted: bool,
    haptics: SharedHaptics,
}

impl PressFeedbackController {
    /// Create a controller for a control of the given tier
    pub fn new(tier: PressTier, haptics: SharedHaptics) -> Self {
        Self {
            id: Uuid::new_v4(),
            tier,
            pressed_scale: tier.pressed_scale(),
            spring: SpringConfig::press(),
            confirm_feedback: ConfirmFeedback::default(),
            scale: AnimatedValue::new(press::REST_SCALE),
            phase: PressPhase::Idle,
            disabled: false,
            mounted: true,
            haptics,
        }
    }

    /// Override the pressed scale; values outside (0, 1) keep the tier default
    pub fn with_pressed_scale(mut self, scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 && scale < 1.0 {
            self.pressed_scale = scale;
        } else {
            tracing::warn!(id = %self.id, scale, "pressed scale out of range, keeping default");
        }
        self
    }

    /// Override the spring
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Set the pulse fired on confirm
    pub fn with_confirm_feedback(mut self, feedback: ConfirmFeedback) -> Self {
        self.confirm_feedback = feedback;
        self
    }

    /// Instance identifier (used in logs)
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Control tier
    pub fn tier(&self) -> PressTier {
        self.tier
    }

    /// Scale while fully pressed
    pub fn pressed_scale(&self) -> f32 {
        self.pressed_scale
    }

    /// Current phase
    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    /// Whether interaction is suppressed
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the owning control is still mounted
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enable or disable the control.
    ///
    /// Disabling cancels any press and puts the scale back at rest without
    /// animating, including a release spring still in flight.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if !disabled {
            return;
        }
        if self.phase == PressPhase::Pressed {
            tracing::debug!(id = %self.id, "press cancelled by disable");
            self.phase = PressPhase::Idle;
        }
        self.scale.snap_to(press::REST_SCALE);
    }

    /// Finger down. Returns false when the event was ignored.
    pub fn on_press_start(&mut self, now: Instant) -> bool {
        if !self.mounted || self.disabled || self.phase == PressPhase::Pressed {
            return false;
        }
        self.phase = PressPhase::Pressed;
        self.scale
            .set_target(self.pressed_scale, Curve::Spring(self.spring), now);
        self.pulse(self.tier.haptic());
        true
    }

    /// Finger up. Returns false when nothing was pressed.
    pub fn on_press_end(&mut self, now: Instant) -> bool {
        if !self.mounted || self.phase != PressPhase::Pressed {
            return false;
        }
        self.phase = PressPhase::Idle;
        self.scale
            .set_target(press::REST_SCALE, Curve::Spring(self.spring), now);
        true
    }

    /// A completed tap. Runs `callback` exactly once unless the control is
    /// disabled or unmounted.
    pub fn on_press_confirmed<F: FnOnce()>(&mut self, callback: F) -> bool {
        if !self.mounted || self.disabled {
            return false;
        }
        if let Some(intensity) = self.confirm_feedback.intensity() {
            self.pulse(intensity);
        }
        callback();
        true
    }

    /// Finger up, confirming the tap when it landed inside the hit target
    pub fn release<F: FnOnce()>(&mut self, now: Instant, inside: bool, callback: F) -> PressOutcome {
        if !self.on_press_end(now) {
            return PressOutcome::Ignored;
        }
        if inside && self.on_press_confirmed(callback) {
            PressOutcome::Confirmed
        } else {
            PressOutcome::Released
        }
    }

    /// Scale at `now`, always within [pressed_scale, 1.0]
    pub fn scale(&self, now: Instant) -> f32 {
        self.scale
            .current_value(now)
            .clamp(self.pressed_scale, press::REST_SCALE)
    }

    /// Snapshot at `now`
    pub fn state(&self, now: Instant) -> PressState {
        PressState {
            scale: self.scale(now),
            is_pressed: self.phase == PressPhase::Pressed,
        }
    }

    /// Whether the scale is still moving at `now`
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.scale.is_settled(now)
    }

    /// Stop everything; later events are ignored
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.phase = PressPhase::Idle;
        self.scale.snap_to(press::REST_SCALE);
    }

    fn pulse(&self, intensity: HapticIntensity) {
        if let Err(error) = self.haptics.pulse(intensity) {
            tracing::debug!(id = %self.id, %intensity, %error, "haptic pulse dropped");
        }
    }
}

impl std::fmt::Debug for PressFeedbackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PressFeedbackController")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("pressed_scale", &self.pressed_scale)
            .field("phase", &self.phase)
            .field("disabled", &self.disabled)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
