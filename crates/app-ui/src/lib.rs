//! User interface primitives for Nourish
//!
//! This crate provides the animated, theme-aware building blocks every
//! screen of the nutrition app is composed from.
//!
//! # Design System
//!
//! Brand colors are fixed across themes:
//! - Primary: Leaf green (#4CAF50)
//! - Accent: Carrot orange (#FF8C00)
//!
//! Everything else comes from a light or dark [`theme::ThemePalette`]
//! resolved from a single dark-mode flag.
//!
//! # Modules
//!
//! - [`theme`] - Palette resolution and brand colors
//! - [`tokens`] - Design tokens (spacing, radii, shadows, timings)
//! - [`animation`] - Springs, eased timings and the [`animation::AnimatedScalar`] trait
//! - [`press`] - Press feedback (scale spring plus haptic pulse)
//! - [`progress`] - Animated progress ring geometry
//! - [`components`] - Button, floating action button, card and progress ring
//! - [`config`] - JSON configuration
//! - [`context`] - Composition root building primitives from configuration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use app_platform::haptics::NoopHaptics;
//! use app_ui::components::{ButtonProps, ProgressProps};
//! use app_ui::{UiConfig, UiContext};
//!
//! let ctx = UiContext::new(UiConfig::default(), Arc::new(NoopHaptics));
//! let now = Instant::now();
//!
//! let mut button = ctx.button(ButtonProps::new("Add Meal"));
//! button.press_in(now);
//! assert!(button.press_out(now + Duration::from_millis(80), true));
//!
//! let ring = ctx.circular_progress(ProgressProps::new(62.35), now);
//! let frame = ring.render(now + Duration::from_secs(1), &ctx.palette());
//! assert_eq!(frame.label.unwrap().text, "62%");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod components;
pub mod config;
pub mod context;
pub mod press;
pub mod progress;
pub mod theme;
pub mod tokens;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use animation::{AnimatedScalar, AnimatedValue, Curve, Easing, Spring, SpringConfig, Timing};

pub use components::{
    AccessibilityProps, Button, ButtonFrame, ButtonProps, ButtonSize, ButtonStyle, ButtonVariant,
    Card, CardFrame, CardProps, CircularProgress, FabFrame, FabProps, Fill, FloatingActionButton,
    ProgressFrame, ProgressProps, StyleOverrides,
};

pub use config::{AnimationConfig, ConfigError, HapticsConfig, UiConfig};

pub use context::UiContext;

pub use press::{ConfirmFeedback, PressFeedbackController, PressOutcome, PressState, PressTier};

pub use progress::{AnimatedArcRenderer, ArcFrame, ArcGeometry, ProgressState};

pub use theme::{colors, resolve, Color, PaletteOverrides, ThemePalette, ThemeState};

pub use tokens::{duration, opacity, radius, shadows, sizing, spacing, z_index, Shadow};
