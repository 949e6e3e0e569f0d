//! UI configuration
//!
//! Host-supplied settings for the primitives, read from JSON:
//!
//! ```json
//! {
//!   "theme": { "dark_mode": true, "overrides": { "foreground": "#EEEEEE" } },
//!   "haptics": { "enabled": true },
//!   "animation": {
//!     "press_spring": { "stiffness": 300, "damping": 34.64, "mass": 1 },
//!     "button_pressed_scale": 0.95,
//!     "fab_pressed_scale": 0.9,
//!     "progress_duration_ms": 1000
//!   }
//! }
//! ```
//!
//! Every field is optional. [`UiConfig::validate`] reports the first bad
//! value; [`UiConfig::sanitized`] replaces bad values with defaults instead.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::SpringConfig;
use crate::theme::{parse_hex_color, Color, PaletteOverrides, ThemeState};
use crate::tokens::{duration, press};

/// Longest accepted progress animation
pub const MAX_PROGRESS_DURATION_MS: u64 = 10_000;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but unusable value
    #[error("Invalid value for {field}: {message}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        message: message.into(),
    }
}

/// Haptics settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    /// Whether pulses reach the device
    pub enabled: bool,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Animation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Spring driving press feedback
    pub press_spring: SpringConfig,
    /// Pressed scale for buttons
    pub button_pressed_scale: f32,
    /// Pressed scale for floating action buttons
    pub fab_pressed_scale: f32,
    /// Default progress ring fill duration
    pub progress_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            press_spring: SpringConfig::press(),
            button_pressed_scale: press::STANDARD_SCALE,
            fab_pressed_scale: press::PROMINENT_SCALE,
            progress_duration_ms: duration::PROGRESS as u64,
        }
    }
}

fn is_pressed_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0 && scale < 1.0
}

/// Complete UI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme selection
    pub theme: ThemeState,
    /// Haptics settings
    pub haptics: HapticsConfig,
    /// Animation settings
    pub animation: AnimationConfig,
}

impl UiConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: UiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "ui config loaded");
        Ok(config)
    }

    /// Load a file, falling back to defaults when it is missing or unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(path = %path.as_ref().display(), %error, "using default ui config");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value, reporting the first problem
    pub fn validate(&self) -> Result<()> {
        for (slot, color) in override_slots(&self.theme.overrides) {
            if let Some(color) = color {
                if parse_hex_color(color).is_none() {
                    return Err(invalid(
                        format!("theme.overrides.{}", slot),
                        format!("'{}' is not a hex color", color),
                    ));
                }
            }
        }

        let animation = &self.animation;
        if !animation.press_spring.is_valid() {
            return Err(invalid(
                "animation.press_spring",
                "stiffness, damping and mass must be positive",
            ));
        }
        if !is_pressed_scale(animation.button_pressed_scale) {
            return Err(invalid(
                "animation.button_pressed_scale",
                format!("{} is outside (0, 1)", animation.button_pressed_scale),
            ));
        }
        if !is_pressed_scale(animation.fab_pressed_scale) {
            return Err(invalid(
                "animation.fab_pressed_scale",
                format!("{} is outside (0, 1)", animation.fab_pressed_scale),
            ));
        }
        if animation.progress_duration_ms > MAX_PROGRESS_DURATION_MS {
            return Err(invalid(
                "animation.progress_duration_ms",
                format!("{} exceeds {}", animation.progress_duration_ms, MAX_PROGRESS_DURATION_MS),
            ));
        }

        Ok(())
    }

    /// Replace every bad value with its default
    pub fn sanitized(mut self) -> Self {
        let defaults = AnimationConfig::default();
        let overrides = &mut self.theme.overrides;
        for slot in [
            &mut overrides.foreground,
            &mut overrides.background,
            &mut overrides.border,
            &mut overrides.muted_foreground,
            &mut overrides.surface,
            &mut overrides.track,
        ] {
            if slot.as_deref().is_some_and(|c| parse_hex_color(c).is_none()) {
                tracing::warn!(color = ?slot, "dropping invalid color override");
                *slot = None;
            }
        }

        let animation = &mut self.animation;
        if !animation.press_spring.is_valid() {
            tracing::warn!(spring = ?animation.press_spring, "invalid press spring, using default");
            animation.press_spring = defaults.press_spring;
        }
        if !is_pressed_scale(animation.button_pressed_scale) {
            tracing::warn!(scale = animation.button_pressed_scale, "invalid button scale, using default");
            animation.button_pressed_scale = defaults.button_pressed_scale;
        }
        if !is_pressed_scale(animation.fab_pressed_scale) {
            tracing::warn!(scale = animation.fab_pressed_scale, "invalid fab scale, using default");
            animation.fab_pressed_scale = defaults.fab_pressed_scale;
        }
        if animation.progress_duration_ms > MAX_PROGRESS_DURATION_MS {
            animation.progress_duration_ms = MAX_PROGRESS_DURATION_MS;
        }

        self
    }
}

fn override_slots(overrides: &PaletteOverrides) -> [(&'static str, Option<&Color>); 6] {
    [
        ("foreground", overrides.foreground.as_ref()),
        ("background", overrides.background.as_ref()),
        ("border", overrides.border.as_ref()),
        ("muted_foreground", overrides.muted_foreground.as_ref()),
        ("surface", overrides.surface.as_ref()),
        ("track", overrides.track.as_ref()),
    ]
}
