//! Continuous animated scalars
//!
//! Animations here are pure functions of time. A host render loop calls
//! [`AnimatedScalar::current_value`] with the frame timestamp; nothing is
//! stepped by a timer and nothing runs on another thread. Retargeting in
//! mid-flight starts the new motion from the interpolated position (and, for
//! springs, the current velocity), so a value never snaps.
//!
//! Two curves are available:
//!
//! - [`Curve::Spring`] - damped harmonic oscillator, solved in closed form
//! - [`Curve::Timing`] - fixed duration with an [`Easing`] function
//!
//! ```rust
//! use app_ui::animation::{AnimatedScalar, AnimatedValue, Curve, Easing};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut value = AnimatedValue::new(0.0);
//! value.set_target(
//!     100.0,
//!     Curve::Timing { duration: Duration::from_millis(1000), easing: Easing::EaseOutCubic },
//!     start,
//! );
//! assert_eq!(value.current_value(start + Duration::from_millis(1000)), 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::tokens::press;

// =============================================================================
// Easing
// =============================================================================

/// Timing curves for fixed-duration animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start, fast finish
    EaseInCubic,
    /// Fast start, decelerating arrival
    #[default]
    EaseOutCubic,
    /// Slow at both ends
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }

    /// Derivative of [`Easing::apply`] with respect to `t`
    pub fn slope(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => 1.0,
            Easing::EaseInCubic => 3.0 * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                3.0 * inv * inv
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    12.0 * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    3.0 * inv * inv
                }
            }
        }
    }
}

// =============================================================================
// Spring
// =============================================================================

/// Configuration for a spring animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Moving mass
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Spring with exactly critical damping for the given stiffness and mass
    pub fn critically_damped(stiffness: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping: 2.0 * (stiffness * mass).sqrt(),
            mass,
        }
    }

    /// Press feedback spring: stiffness 300, unit mass, no overshoot
    pub fn press() -> Self {
        Self::critically_damped(press::STIFFNESS, press::MASS)
    }

    /// A wobbly spring with overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio (1.0 = critical)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0 - CRITICAL_TOLERANCE
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping_ratio() - 1.0).abs() <= CRITICAL_TOLERANCE
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping_ratio() > 1.0 + CRITICAL_TOLERANCE
    }

    /// Whether all parameters are finite and positive
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::press()
    }
}

const CRITICAL_TOLERANCE: f32 = 1e-3;

/// Displacement below which a spring counts as arrived
const REST_DISPLACEMENT: f32 = 1e-3;
/// Speed below which a spring counts as stopped
const REST_VELOCITY: f32 = 1e-2;

/// A spring motion toward `target`, starting at `origin` with the given
/// displacement and velocity. Evaluated analytically at any instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    target: f32,
    origin: Instant,
    displacement: f32,
    velocity: f32,
}

impl Spring {
    /// Start a spring at `value` (at rest) heading for `target`
    pub fn new(config: SpringConfig, value: f32, target: f32, now: Instant) -> Self {
        Self::with_velocity(config, value, 0.0, target, now)
    }

    /// Start a spring with an initial velocity
    pub fn with_velocity(
        config: SpringConfig,
        value: f32,
        velocity: f32,
        target: f32,
        now: Instant,
    ) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            tracing::warn!(?config, "invalid spring config, using press spring");
            SpringConfig::press()
        };
        Self {
            config,
            target,
            origin: now,
            displacement: value - target,
            velocity,
        }
    }

    /// Spring parameters
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Resting point
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Point the spring toward a new target, keeping position and velocity
    pub fn retarget(&mut self, target: f32, now: Instant) {
        let value = self.value_at(now);
        let velocity = self.velocity_at(now);
        *self = Self::with_velocity(self.config, value, velocity, target, now);
    }

    /// Position at `now`
    pub fn value_at(&self, now: Instant) -> f32 {
        let (x, v) = self.solve(self.elapsed(now));
        if x.abs() < REST_DISPLACEMENT && v.abs() < REST_VELOCITY {
            self.target
        } else {
            self.target + x
        }
    }

    /// Velocity at `now`
    pub fn velocity_at(&self, now: Instant) -> f32 {
        let (x, v) = self.solve(self.elapsed(now));
        if x.abs() < REST_DISPLACEMENT && v.abs() < REST_VELOCITY {
            0.0
        } else {
            v
        }
    }

    /// Check if the spring has settled at `now`
    pub fn is_settled_at(&self, now: Instant) -> bool {
        let (x, v) = self.solve(self.elapsed(now));
        x.abs() < REST_DISPLACEMENT && v.abs() < REST_VELOCITY
    }

    fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.origin).as_secs_f32()
    }

    /// Displacement and velocity after `t` seconds
    fn solve(&self, t: f32) -> (f32, f32) {
        let SpringConfig {
            stiffness,
            mass,
            ..
        } = self.config;
        let x0 = self.displacement;
        let v0 = self.velocity;
        let omega = (stiffness / mass).sqrt();
        let zeta = self.config.damping_ratio();

        if self.config.is_critically_damped() {
            let b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = decay * (x0 + b * t);
            let v = decay * (b - omega * (x0 + b * t));
            (x, v)
        } else if zeta < 1.0 {
            let a = zeta * omega;
            let wd = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * x0) / wd;
            let decay = (-a * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = decay * (x0 * cos + b * sin);
            let v = decay * ((b * wd - a * x0) * cos - (x0 * wd + a * b) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }
}

// =============================================================================
// Timing
// =============================================================================

/// A fixed-duration eased transition from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Timing {
    /// Start a transition at `now`
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            start: now,
            duration,
            easing,
        }
    }

    /// Destination value
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Start a new transition from wherever this one is at `now`
    pub fn retarget(&mut self, to: f32, now: Instant) {
        let from = self.value_at(now);
        *self = Self::new(from, to, self.duration, self.easing, now);
    }

    /// Linear progress in [0, 1]
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Value at `now`
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.progress_at(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Rate of change per second at `now`
    pub fn velocity_at(&self, now: Instant) -> f32 {
        let t = self.progress_at(now);
        if t >= 1.0 {
            return 0.0;
        }
        (self.to - self.from) * self.easing.slope(t) / self.duration.as_secs_f32()
    }

    /// Whether the transition has finished at `now`
    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }
}

// =============================================================================
// Animated Scalar
// =============================================================================

/// Curve selection for [`AnimatedScalar::set_target`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Physical spring
    Spring(SpringConfig),
    /// Fixed duration with easing
    Timing {
        /// Transition length
        duration: Duration,
        /// Easing function
        easing: Easing,
    },
}

/// A scalar that moves continuously toward a target over time.
///
/// Hosts drive it from their own frame callback by asking for the value at
/// the frame timestamp.
pub trait AnimatedScalar {
    /// Start moving toward `target` along `curve`, beginning at `now`
    fn set_target(&mut self, target: f32, curve: Curve, now: Instant);

    /// Value at `now`
    fn current_value(&self, now: Instant) -> f32;

    /// Where the value is heading
    fn target(&self) -> f32;

    /// True once the value has arrived and stopped
    fn is_settled(&self, now: Instant) -> bool;

    /// Jump to `value` with no animation
    fn snap_to(&mut self, value: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Resting(f32),
    Spring(Spring),
    Timing(Timing),
}

/// Default [`AnimatedScalar`] implementation switching between curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    motion: Motion,
}

impl AnimatedValue {
    /// A value resting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            motion: Motion::Resting(initial),
        }
    }

    fn velocity(&self, now: Instant) -> f32 {
        match &self.motion {
            Motion::Resting(_) => 0.0,
            Motion::Spring(spring) => spring.velocity_at(now),
            Motion::Timing(timing) => timing.velocity_at(now),
        }
    }
}

impl AnimatedScalar for AnimatedValue {
    fn set_target(&mut self, target: f32, curve: Curve, now: Instant) {
        let value = self.current_value(now);
        let velocity = self.velocity(now);

        self.motion = match curve {
            Curve::Spring(config) => match &mut self.motion {
                Motion::Spring(spring) if spring.config() == config => {
                    spring.retarget(target, now);
                    Motion::Spring(*spring)
                }
                _ => Motion::Spring(Spring::with_velocity(config, value, velocity, target, now)),
            },
            Curve::Timing { duration, easing } => {
                Motion::Timing(Timing::new(value, target, duration, easing, now))
            }
        };
    }

    fn current_value(&self, now: Instant) -> f32 {
        match &self.motion {
            Motion::Resting(value) => *value,
            Motion::Spring(spring) => spring.value_at(now),
            Motion::Timing(timing) => timing.value_at(now),
        }
    }

    fn target(&self) -> f32 {
        match &self.motion {
            Motion::Resting(value) => *value,
            Motion::Spring(spring) => spring.target(),
            Motion::Timing(timing) => timing.target(),
        }
    }

    fn is_settled(&self, now: Instant) -> bool {
        match &self.motion {
            Motion::Resting(_) => true,
            Motion::Spring(spring) => spring.is_settled_at(now),
            Motion::Timing(timing) => timing.is_finished_at(now),
        }
    }

    fn snap_to(&mut self, value: f32) {
        self.motion = Motion::Resting(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ==========================================================================
    // Easing
    // ==========================================================================

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseInCubic,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_out_cubic_decelerates() {
        let e = Easing::EaseOutCubic;
        assert!((e.apply(0.5) - 0.875).abs() < 1e-6);
        assert!(e.slope(0.0) > e.slope(0.5));
        assert!(e.slope(0.5) > e.slope(0.9));
        assert_eq!(e.slope(1.0), 0.0);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(Easing::EaseOutCubic.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
    }

    // ==========================================================================
    // Spring
    // ==========================================================================

    #[test]
    fn test_press_spring_is_critical() {
        let config = SpringConfig::press();
        assert!(config.is_critically_damped());
        assert_eq!(config.stiffness, 300.0);
        assert!(!config.is_underdamped());
    }

    #[test]
    fn test_damping_classification() {
        assert!(SpringConfig::new(300.0, 15.0, 1.0).is_underdamped());
        assert!(SpringConfig::wobbly().is_underdamped());
        assert!(SpringConfig::new(100.0, 40.0, 1.0).is_overdamped());
    }

    #[test]
    fn test_spring_settles_to_target() {
        let t0 = Instant::now();
        let spring = Spring::new(SpringConfig::press(), 1.0, 0.95, t0);

        assert_eq!(spring.value_at(t0), 1.0);
        assert!(spring.is_settled_at(t0 + ms(600)));
        assert_eq!(spring.value_at(t0 + ms(600)), 0.95);
    }

    #[test]
    fn test_critical_spring_is_monotonic() {
        let t0 = Instant::now();
        let spring = Spring::new(SpringConfig::press(), 1.0, 0.9, t0);

        let mut last = spring.value_at(t0);
        for frame in 1..60 {
            let value = spring.value_at(t0 + ms(frame * 16));
            assert!(value <= last, "frame {} went back up", frame);
            assert!(value >= 0.9);
            last = value;
        }
    }

    #[test]
    fn test_underdamped_spring_overshoots_then_settles() {
        let t0 = Instant::now();
        let spring = Spring::new(SpringConfig::new(300.0, 15.0, 1.0), 1.0, 0.0, t0);

        let min = (0..60)
            .map(|f| spring.value_at(t0 + ms(f * 16)))
            .fold(f32::MAX, f32::min);
        assert!(min < 0.0);
        assert!(spring.is_settled_at(t0 + ms(3000)));
    }

    #[test]
    fn test_overdamped_spring_settles() {
        let t0 = Instant::now();
        let spring = Spring::new(SpringConfig::new(100.0, 40.0, 1.0), 0.0, 1.0, t0);
        assert!(spring.value_at(t0 + ms(100)) > 0.0);
        assert!(spring.is_settled_at(t0 + ms(5000)));
    }

    #[test]
    fn test_spring_retarget_keeps_position() {
        let t0 = Instant::now();
        let mut spring = Spring::new(SpringConfig::press(), 1.0, 0.9, t0);
        let mid = t0 + ms(40);
        let before = spring.value_at(mid);
        let velocity = spring.velocity_at(mid);
        assert!(velocity < 0.0);

        spring.retarget(1.0, mid);
        assert!((spring.value_at(mid) - before).abs() < 1e-6);
        assert!((spring.velocity_at(mid) - velocity).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_spring_config_falls_back() {
        let t0 = Instant::now();
        let spring = Spring::new(SpringConfig::new(-1.0, f32::NAN, 0.0), 0.0, 1.0, t0);
        assert_eq!(spring.config(), SpringConfig::press());
    }

    // ==========================================================================
    // Timing
    // ==========================================================================

    #[test]
    fn test_timing_endpoints() {
        let t0 = Instant::now();
        let timing = Timing::new(0.0, 100.0, ms(1000), Easing::EaseOutCubic, t0);
        assert_eq!(timing.value_at(t0), 0.0);
        assert!((timing.value_at(t0 + ms(500)) - 87.5).abs() < 0.01);
        assert_eq!(timing.value_at(t0 + ms(1000)), 100.0);
        assert_eq!(timing.value_at(t0 + ms(5000)), 100.0);
    }

    #[test]
    fn test_timing_zero_duration() {
        let t0 = Instant::now();
        let timing = Timing::new(0.0, 40.0, Duration::ZERO, Easing::EaseOutCubic, t0);
        assert_eq!(timing.value_at(t0), 40.0);
        assert!(timing.is_finished_at(t0));
    }

    #[test]
    fn test_timing_retarget_from_current() {
        let t0 = Instant::now();
        let mut timing = Timing::new(30.0, 70.0, ms(1000), Easing::EaseOutCubic, t0);
        let mid = t0 + ms(300);
        let at_mid = timing.value_at(mid);

        timing.retarget(40.0, mid);
        assert!((timing.value_at(mid) - at_mid).abs() < 1e-4);
        assert_eq!(timing.value_at(mid + ms(1000)), 40.0);
    }

    // ==========================================================================
    // AnimatedValue
    // ==========================================================================

    #[test]
    fn test_animated_value_resting() {
        let value = AnimatedValue::new(1.0);
        let now = Instant::now();
        assert_eq!(value.current_value(now), 1.0);
        assert!(value.is_settled(now));
        assert_eq!(value.target(), 1.0);
    }

    #[test]
    fn test_animated_value_switches_curves_without_jumping() {
        let t0 = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.set_target(
            10.0,
            Curve::Timing {
                duration: ms(500),
                easing: Easing::Linear,
            },
            t0,
        );

        let mid = t0 + ms(250);
        let before = value.current_value(mid);
        value.set_target(0.0, Curve::Spring(SpringConfig::press()), mid);
        assert!((value.current_value(mid) - before).abs() < 1e-5);
        assert!(value.is_settled(mid + ms(3000)));
        assert_eq!(value.current_value(mid + ms(3000)), 0.0);
    }

    #[test]
    fn test_animated_value_snap() {
        let t0 = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.set_target(1.0, Curve::Spring(SpringConfig::press()), t0);
        value.snap_to(0.5);
        assert_eq!(value.current_value(t0 + ms(10)), 0.5);
        assert!(value.is_settled(t0));
    }

    #[test]
    fn test_spring_config_deserialize_defaults() {
        let config: SpringConfig = serde_json::from_str(r#"{"stiffness": 200.0}"#).unwrap();
        assert_eq!(config.stiffness, 200.0);
        assert_eq!(config.mass, 1.0);
    }
}
