//! Composition root for the primitives
//!
//! [`UiContext`] owns the theme selection, the haptic port (behind the user's
//! haptics preference) and the loaded configuration, and builds primitives
//! wired to all three.

use std::sync::Arc;
use std::time::{Duration, Instant};

use app_platform::haptics::{GatedHaptics, SharedHaptics};

use crate::components::{
    Button, ButtonProps, Card, CardProps, CircularProgress, FabProps, FloatingActionButton,
    ProgressProps,
};
use crate::config::UiConfig;
use crate::progress::AnimatedArcRenderer;
use crate::theme::{ThemePalette, ThemeState};

/// Shared UI state handed to every screen
#[derive(Debug)]
pub struct UiContext {
    theme: ThemeState,
    haptics: Arc<GatedHaptics>,
    config: UiConfig,
}

impl UiContext {
    /// Build a context around a device haptic port
    pub fn new(config: UiConfig, haptics: SharedHaptics) -> Self {
        let config = config.sanitized();
        tracing::debug!(
            dark_mode = config.theme.dark_mode,
            haptics = config.haptics.enabled,
            "ui context created"
        );
        Self {
            theme: config.theme.clone(),
            haptics: Arc::new(GatedHaptics::new(haptics, config.haptics.enabled)),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Current theme selection
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Palette for the next render
    pub fn palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    /// Dark mode toggle
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        tracing::debug!(dark_mode, "theme changed");
        self.theme.set_dark_mode(dark_mode);
        self.config.theme.dark_mode = dark_mode;
    }

    /// Haptic feedback toggle; applies to already-built primitives too
    pub fn set_haptics_enabled(&mut self, enabled: bool) {
        self.haptics.set_enabled(enabled);
        self.config.haptics.enabled = enabled;
    }

    /// Whether haptic pulses are delivered
    pub fn haptics_enabled(&self) -> bool {
        self.haptics.is_enabled()
    }

    /// Port handed to primitives
    pub fn haptics(&self) -> SharedHaptics {
        self.haptics.clone()
    }

    /// Build a button
    pub fn button(&self, props: ButtonProps) -> Button {
        let animation = &self.config.animation;
        Button::new(props, self.haptics())
            .with_spring(animation.press_spring)
            .with_pressed_scale(animation.button_pressed_scale)
    }

    /// Build a floating action button
    pub fn fab(&self, props: FabProps) -> FloatingActionButton {
        let animation = &self.config.animation;
        FloatingActionButton::new(props, self.haptics())
            .with_spring(animation.press_spring)
            .with_pressed_scale(animation.fab_pressed_scale)
    }

    /// Build a card
    pub fn card(&self, props: CardProps) -> Card {
        Card::new(props)
    }

    /// Build a progress ring that starts filling at `now`.
    ///
    /// Props still carrying the stock duration pick up the configured one.
    pub fn circular_progress(&self, mut props: ProgressProps, now: Instant) -> CircularProgress {
        if props.duration_ms == ProgressProps::default().duration_ms {
            props.duration_ms = self.config.animation.progress_duration_ms;
        }
        CircularProgress::new(props, now)
    }

    /// Bare ring renderer using the configured duration
    pub fn arc_renderer(&self, size: f32, stroke_width: f32) -> AnimatedArcRenderer {
        AnimatedArcRenderer::new(size, stroke_width)
            .with_duration(Duration::from_millis(self.config.animation.progress_duration_ms))
    }
}
