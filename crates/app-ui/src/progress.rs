//! Animated progress arc
//!
//! A ring is drawn as a dashed circle whose single dash is exactly one
//! circumference long. Shifting the dash by `offset` hides the unfilled part:
//!
//! ```text
//! radius        = (size - stroke_width) / 2
//! circumference = 2 * PI * radius
//! offset        = circumference - (percent / 100) * circumference
//! ```
//!
//! The arc begins at 12 o'clock (the circle is rotated -90 degrees about its
//! centre) and runs clockwise. Percent changes ease out over a fixed duration
//! and can be retargeted mid-flight.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::animation::{AnimatedScalar, AnimatedValue, Curve, Easing};
use crate::tokens::{duration, sizing};

/// Rotation that moves the stroke start from 3 o'clock to 12 o'clock
pub const START_ROTATION_DEG: f32 = -90.0;

/// Clamp a progress value into [0, 100]; NaN counts as 0
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Ring dimensions derived from diameter and stroke width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Diameter of the drawing box
    pub size: f32,
    /// Ring thickness
    pub stroke_width: f32,
    /// Centreline radius
    pub radius: f32,
    /// Centreline length
    pub circumference: f32,
    /// Centre coordinate (both axes)
    pub center: f32,
}

impl ArcGeometry {
    /// Compute the geometry, replacing unusable inputs.
    ///
    /// A size that is not positive becomes 120. A stroke width outside
    /// (0, size/2) becomes size/10.
    pub fn new(size: f32, stroke_width: f32) -> Self {
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            tracing::warn!(size, "invalid ring size, using fallback");
            sizing::progress::FALLBACK_SIZE
        };

        let stroke_width = if stroke_width.is_finite() && stroke_width > 0.0 && stroke_width < size / 2.0
        {
            stroke_width
        } else {
            tracing::warn!(stroke_width, size, "invalid ring stroke width, using fallback");
            size * sizing::progress::FALLBACK_STROKE_RATIO
        };

        let radius = (size - stroke_width) / 2.0;
        Self {
            size,
            stroke_width,
            radius,
            circumference: 2.0 * PI * radius,
            center: size / 2.0,
        }
    }

    /// Dash offset that leaves `percent` of the ring visible
    pub fn offset_for(&self, percent: f32) -> f32 {
        let percent = clamp_progress(percent);
        self.circumference - (percent / 100.0) * self.circumference
    }

    /// Visible arc length for `percent`
    pub fn filled_length(&self, percent: f32) -> f32 {
        (clamp_progress(percent) / 100.0) * self.circumference
    }
}

// =============================================================================
// Progress State
// =============================================================================

/// Animation snapshot for one ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    /// Percent drawn at the sampled instant
    pub current_percent: f32,
    /// Percent being animated toward
    pub target_percent: f32,
    /// When the running transition began (None before the first one)
    pub started_at: Option<Instant>,
    /// Transition length
    pub duration: Duration,
}

/// Everything a renderer needs to draw one frame of the ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    /// Ring dimensions
    pub geometry: ArcGeometry,
    /// Dash pattern length (one full circumference)
    pub dash_array: f32,
    /// Dash offset hiding the unfilled remainder
    pub dash_offset: f32,
    /// Rotation about the centre in degrees
    pub rotation_deg: f32,
    /// Percent drawn this frame
    pub percent: f32,
    /// Whether the animation has finished
    pub settled: bool,
}

// =============================================================================
// Renderer
// =============================================================================

/// Animated ring state owned by one progress indicator
#[derive(Debug, Clone)]
pub struct AnimatedArcRenderer {
    geometry: ArcGeometry,
    duration: Duration,
    percent: AnimatedValue,
    started_at: Option<Instant>,
    mounted: bool,
}

impl AnimatedArcRenderer {
    /// Create an empty ring
    pub fn new(size: f32, stroke_width: f32) -> Self {
        Self {
            geometry: ArcGeometry::new(size, stroke_width),
            duration: Duration::from_millis(duration::PROGRESS as u64),
            percent: AnimatedValue::new(0.0),
            started_at: None,
            mounted: true,
        }
    }

    /// Set the transition length
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Ring dimensions
    pub fn geometry(&self) -> ArcGeometry {
        self.geometry
    }

    /// Transition length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Recompute the geometry; the animated percent carries over
    pub fn set_geometry(&mut self, size: f32, stroke_width: f32) {
        self.geometry = ArcGeometry::new(size, stroke_width);
    }

    /// Change the transition length. A running transition restarts from its
    /// current position with the new length.
    pub fn set_duration(&mut self, duration: Duration, now: Instant) {
        if duration == self.duration {
            return;
        }
        self.duration = duration;
        if !self.percent.is_settled(now) {
            let target = self.percent.target();
            self.animate_to(target, now);
        }
    }

    /// Animate toward `progress` (clamped). Re-setting the current target
    /// does nothing.
    pub fn set_progress(&mut self, progress: f32, now: Instant) {
        if !self.mounted {
            return;
        }
        let target = clamp_progress(progress);
        if target == self.percent.target() {
            return;
        }
        tracing::debug!(
            from = self.percent.current_value(now),
            to = target,
            "progress retarget"
        );
        self.animate_to(target, now);
    }

    fn animate_to(&mut self, target: f32, now: Instant) {
        self.percent.set_target(
            target,
            Curve::Timing {
                duration: self.duration,
                easing: Easing::EaseOutCubic,
            },
            now,
        );
        self.started_at = Some(now);
    }

    /// Percent drawn at `now`
    pub fn percent_at(&self, now: Instant) -> f32 {
        clamp_progress(self.percent.current_value(now))
    }

    /// Dash offset at `now`
    pub fn offset_at(&self, now: Instant) -> f32 {
        self.geometry.offset_for(self.percent_at(now))
    }

    /// Animation snapshot at `now`
    pub fn state(&self, now: Instant) -> ProgressState {
        ProgressState {
            current_percent: self.percent_at(now),
            target_percent: self.percent.target(),
            started_at: self.started_at,
            duration: self.duration,
        }
    }

    /// Frame description at `now`
    pub fn frame(&self, now: Instant) -> ArcFrame {
        let percent = self.percent_at(now);
        ArcFrame {
            geometry: self.geometry,
            dash_array: self.geometry.circumference,
            dash_offset: self.geometry.offset_for(percent),
            rotation_deg: START_ROTATION_DEG,
            percent,
            settled: self.percent.is_settled(now),
        }
    }

    /// Whether the ring still accepts progress updates
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the ring is still animating at `now`
    pub fn is_animating(&self, now: Instant) -> bool {
        self.mounted && !self.percent.is_settled(now)
    }

    /// Stop animating; later progress updates are ignored
    pub fn teardown(&mut self) {
        self.mounted = false;
        let target = self.percent.target();
        self.percent.snap_to(target);
    }
}
