//! Primitive components for Nourish
//!
//! Every screen of the app is built from four primitives:
//!
//! - [`Button`] - Tappable control with variants, sizes and press feedback
//! - [`FloatingActionButton`] - Circular floating control for the main "add" action
//! - [`Card`] - Rounded container with optional gradient and shadow
//! - [`CircularProgress`] - Animated ring with a percentage label
//!
//! Props are plain serializable values supplied by the caller. A component
//! owns its animation and haptic state and turns props plus the current
//! palette into a frame description that a host renderer draws.

use std::time::{Duration, Instant};

use app_platform::haptics::SharedHaptics;
use serde::{Deserialize, Serialize};

use crate::animation::SpringConfig;
use crate::press::{ConfirmFeedback, PressFeedbackController, PressOutcome, PressTier};
use crate::progress::{clamp_progress, AnimatedArcRenderer, ArcFrame};
use crate::theme::{colors, Color, ThemePalette};
use crate::tokens::{
    border, duration, opacity, radius, shadows, sizing, spacing, z_index, Shadow,
};

// =============================================================================
// Common Types
// =============================================================================

/// Component identifier
pub type ComponentId = String;

/// Callback run once per confirmed tap
pub type PressCallback = Box<dyn FnMut()>;

/// Accessibility properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityProps {
    /// Accessible label for screen readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Accessible hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Accessibility role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Whether the element is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// Named glyph drawn inside a control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconFrame {
    /// Glyph name
    pub name: String,
    /// Glyph size
    pub size: f32,
    /// Glyph color
    pub color: Color,
}

// =============================================================================
// Button Component
// =============================================================================

/// Button color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Brand green fill
    #[default]
    Primary,
    /// Transparent with an outline
    Secondary,
    /// Brand orange fill
    Accent,
}

/// Button size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// 36px tall
    Small,
    /// 44px tall
    #[default]
    Medium,
    /// 56px tall
    Large,
}

impl ButtonSize {
    fn metrics(self) -> (f32, f32, f32, f32) {
        // (min_height, padding_horizontal, padding_vertical, font_size)
        match self {
            ButtonSize::Small => (sizing::button::SM_HEIGHT, spacing::SPACE_LG, spacing::SPACE_SM, 14.0),
            ButtonSize::Medium => (sizing::button::MD_HEIGHT, spacing::SPACE_XL, spacing::SPACE_MD, 16.0),
            ButtonSize::Large => (sizing::button::LG_HEIGHT, spacing::SPACE_2XL, spacing::SPACE_LG, 18.0),
        }
    }
}

/// Caller overrides applied on top of the computed style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Replacement background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Replacement text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
}

/// Button properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonProps {
    /// Title text
    pub title: String,
    /// Color scheme
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Size
    #[serde(default)]
    pub size: ButtonSize,
    /// Disabled state
    #[serde(default)]
    pub disabled: bool,
    /// Leading icon name
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<String>,
    /// Style overrides
    #[serde(default, skip_serializing_if = "is_default_overrides")]
    pub style: StyleOverrides,
    /// Extra pulse on a confirmed tap
    #[serde(default)]
    pub confirm_feedback: ConfirmFeedback,
}

fn is_default_overrides(style: &StyleOverrides) -> bool {
    *style == StyleOverrides::default()
}

impl ButtonProps {
    /// Create props for a medium primary button
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            icon: None,
            style: StyleOverrides::default(),
            confirm_feedback: ConfirmFeedback::default(),
        }
    }

    /// Set the variant
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size
    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set the disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Add a leading icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set style overrides
    pub fn with_style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    /// Set the confirm pulse
    pub fn with_confirm_feedback(mut self, feedback: ConfirmFeedback) -> Self {
        self.confirm_feedback = feedback;
        self
    }

    /// Accessibility metadata for these props
    pub fn accessibility(&self) -> AccessibilityProps {
        let hint = if self.disabled {
            "Button is disabled".to_string()
        } else {
            format!("Tap to {}", self.title.to_lowercase())
        };
        AccessibilityProps {
            label: Some(self.title.clone()),
            hint: Some(hint),
            role: Some("button".to_string()),
            disabled: Some(self.disabled),
        }
    }
}

/// Computed button style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    /// Background color
    pub background: Color,
    /// Text and icon color
    pub text_color: Color,
    /// Border color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Border width
    pub border_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Title font size
    pub font_size: f32,
    /// Border radius
    pub border_radius: f32,
    /// Gap between icon and title
    pub gap: f32,
    /// Resting opacity
    pub opacity: f32,
}

impl ButtonStyle {
    /// Style for a (variant, size, disabled) combination under `palette`
    pub fn lookup(
        variant: ButtonVariant,
        size: ButtonSize,
        disabled: bool,
        palette: &ThemePalette,
    ) -> Self {
        let (background, text_color, border_color) = if disabled {
            (palette.track.clone(), palette.muted_foreground.clone(), None)
        } else {
            match variant {
                ButtonVariant::Primary => (colors::PRIMARY.to_string(), colors::ON_BRAND.to_string(), None),
                ButtonVariant::Accent => (colors::ACCENT.to_string(), colors::ON_BRAND.to_string(), None),
                ButtonVariant::Secondary => (
                    colors::TRANSPARENT.to_string(),
                    palette.foreground.clone(),
                    Some(palette.border.clone()),
                ),
            }
        };

        let (min_height, padding_horizontal, padding_vertical, font_size) = size.metrics();

        Self {
            border_width: if border_color.is_some() { border::THIN } else { 0.0 },
            background,
            text_color,
            border_color,
            min_height,
            padding_horizontal,
            padding_vertical,
            font_size,
            border_radius: radius::BUTTON,
            gap: sizing::button::ICON_GAP,
            opacity: if disabled { opacity::DISABLED } else { opacity::OPAQUE },
        }
    }

    fn apply(mut self, overrides: &StyleOverrides) -> Self {
        if let Some(background) = &overrides.background {
            self.background = background.clone();
        }
        if let Some(text_color) = &overrides.text_color {
            self.text_color = text_color.clone();
        }
        self
    }
}

/// One rendered button frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonFrame {
    /// Title text
    pub title: String,
    /// Computed style
    pub style: ButtonStyle,
    /// Leading icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconFrame>,
    /// Press scale
    pub scale: f32,
    /// Effective opacity (dimmed while pressed)
    pub opacity: f32,
    /// Accessibility metadata
    pub accessibility: AccessibilityProps,
}

/// Interactive button
pub struct Button {
    props: ButtonProps,
    press: PressFeedbackController,
    on_press: Option<PressCallback>,
}

impl Button {
    /// Create a button
    pub fn new(props: ButtonProps, haptics: SharedHaptics) -> Self {
        let mut press = PressFeedbackController::new(PressTier::Standard, haptics)
            .with_confirm_feedback(props.confirm_feedback);
        press.set_disabled(props.disabled);
        Self {
            props,
            press,
            on_press: None,
        }
    }

    /// Set the tap callback
    pub fn on_press(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(callback));
        self
    }

    /// Set the press spring
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.press = self.press.with_spring(spring);
        self
    }

    /// Set the pressed scale
    pub fn with_pressed_scale(mut self, scale: f32) -> Self {
        self.press = self.press.with_pressed_scale(scale);
        self
    }

    /// Current props
    pub fn props(&self) -> &ButtonProps {
        &self.props
    }

    /// Press controller
    pub fn press(&self) -> &PressFeedbackController {
        &self.press
    }

    /// Enable or disable the button
    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        self.press.set_disabled(disabled);
    }

    /// Finger down
    pub fn press_in(&mut self, now: Instant) -> bool {
        self.press.on_press_start(now)
    }

    /// Finger up. Returns true when the tap was confirmed.
    pub fn press_out(&mut self, now: Instant, inside: bool) -> bool {
        let Self { press, on_press, .. } = self;
        let outcome = press.release(now, inside, || {
            if let Some(callback) = on_press.as_mut() {
                callback();
            }
        });
        outcome == PressOutcome::Confirmed
    }

    /// Describe the button at `now`
    pub fn render(&self, now: Instant, palette: &ThemePalette) -> ButtonFrame {
        let mut style =
            ButtonStyle::lookup(self.props.variant, self.props.size, self.props.disabled, palette);
        if !self.props.disabled {
            style = style.apply(&self.props.style);
        }

        let state = self.press.state(now);
        let opacity = if state.is_pressed {
            style.opacity * opacity::ACTIVE
        } else {
            style.opacity
        };

        ButtonFrame {
            title: self.props.title.clone(),
            icon: self.props.icon.as_ref().map(|name| IconFrame {
                name: name.clone(),
                size: style.font_size,
                color: style.text_color.clone(),
            }),
            style,
            scale: state.scale,
            opacity,
            accessibility: self.props.accessibility(),
        }
    }

    /// Tear down; the callback is dropped and later events are ignored
    pub fn unmount(&mut self) {
        self.press.teardown();
        self.on_press = None;
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("props", &self.props)
            .field("press", &self.press)
            .field("has_callback", &self.on_press.is_some())
            .finish()
    }
}

// =============================================================================
// Floating Action Button
// =============================================================================

/// Floating action button properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabProps {
    /// Diameter
    pub size: f32,
    /// Distance from the bottom edge
    pub bottom: f32,
    /// Distance from the right edge
    pub right: f32,
    /// Glyph name
    pub icon: String,
    /// Fill color (brand primary when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl Default for FabProps {
    fn default() -> Self {
        Self {
            size: sizing::fab::SIZE,
            bottom: sizing::fab::BOTTOM,
            right: sizing::fab::RIGHT,
            icon: "add".to_string(),
            background: None,
        }
    }
}

impl FabProps {
    /// Set the diameter
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the edge offsets
    pub fn with_position(mut self, bottom: f32, right: f32) -> Self {
        self.bottom = bottom;
        self.right = right;
        self
    }

    /// Set the glyph
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// One rendered floating action button frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabFrame {
    /// Diameter
    pub size: f32,
    /// Corner radius (half the diameter)
    pub border_radius: f32,
    /// Distance from the bottom edge
    pub bottom: f32,
    /// Distance from the right edge
    pub right: f32,
    /// Fill color
    pub background: Color,
    /// Glyph
    pub icon: IconFrame,
    /// Drop shadow
    pub shadow: Shadow,
    /// Stacking order
    pub z_index: i32,
    /// Press scale
    pub scale: f32,
    /// Accessibility metadata
    pub accessibility: AccessibilityProps,
}

/// Circular floating button
pub struct FloatingActionButton {
    props: FabProps,
    press: PressFeedbackController,
    on_press: Option<PressCallback>,
}

impl FloatingActionButton {
    /// Create a floating action button
    pub fn new(props: FabProps, haptics: SharedHaptics) -> Self {
        Self {
            props,
            press: PressFeedbackController::new(PressTier::Prominent, haptics),
            on_press: None,
        }
    }

    /// Set the tap callback
    pub fn on_press(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(callback));
        self
    }

    /// Set the press spring
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.press = self.press.with_spring(spring);
        self
    }

    /// Set the pressed scale
    pub fn with_pressed_scale(mut self, scale: f32) -> Self {
        self.press = self.press.with_pressed_scale(scale);
        self
    }

    /// Current props
    pub fn props(&self) -> &FabProps {
        &self.props
    }

    /// Press controller
    pub fn press(&self) -> &PressFeedbackController {
        &self.press
    }

    /// Finger down
    pub fn press_in(&mut self, now: Instant) -> bool {
        self.press.on_press_start(now)
    }

    /// Finger up. Returns true when the tap was confirmed.
    pub fn press_out(&mut self, now: Instant, inside: bool) -> bool {
        let Self { press, on_press, .. } = self;
        let outcome = press.release(now, inside, || {
            if let Some(callback) = on_press.as_mut() {
                callback();
            }
        });
        outcome == PressOutcome::Confirmed
    }

    /// Describe the button at `now`
    pub fn render(&self, now: Instant) -> FabFrame {
        let size = if self.props.size.is_finite() && self.props.size > 0.0 {
            self.props.size
        } else {
            tracing::warn!(size = self.props.size, "invalid fab size, using default");
            sizing::fab::SIZE
        };

        FabFrame {
            size,
            border_radius: size / 2.0,
            bottom: self.props.bottom,
            right: self.props.right,
            background: self
                .props
                .background
                .clone()
                .unwrap_or_else(|| colors::PRIMARY.to_string()),
            icon: IconFrame {
                name: self.props.icon.clone(),
                size: size * sizing::fab::GLYPH_RATIO,
                color: colors::ON_BRAND.to_string(),
            },
            shadow: shadows::fab(),
            z_index: z_index::FLOATING,
            scale: self.press.scale(now),
            accessibility: AccessibilityProps {
                label: Some("Add new item".to_string()),
                hint: Some("Tap to add a new meal or access AI features".to_string()),
                role: Some("button".to_string()),
                disabled: None,
            },
        }
    }

    /// Tear down; the callback is dropped and later events are ignored
    pub fn unmount(&mut self) {
        self.press.teardown();
        self.on_press = None;
    }
}

impl std::fmt::Debug for FloatingActionButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatingActionButton")
            .field("props", &self.props)
            .field("press", &self.press)
            .field("has_callback", &self.on_press.is_some())
            .finish()
    }
}

// =============================================================================
// Card Component
// =============================================================================

/// Card properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardProps {
    /// Inner padding
    pub padding: f32,
    /// Request a gradient fill
    pub gradient: bool,
    /// Gradient stops; two or more are needed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gradient_colors: Vec<Color>,
    /// Draw a drop shadow
    pub shadow: bool,
    /// Flat fill (palette surface when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            padding: spacing::SPACE_LG,
            gradient: false,
            gradient_colors: Vec::new(),
            shadow: true,
            background: None,
        }
    }
}

impl CardProps {
    /// Set the padding
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Use a gradient fill
    pub fn with_gradient<I, C>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        self.gradient = true;
        self.gradient_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle the shadow
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Set a flat background
    pub fn with_background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// Card fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    /// Single color
    Solid {
        /// Fill color
        color: Color,
    },
    /// Linear gradient in unit coordinates
    LinearGradient {
        /// Color stops, evenly spaced
        colors: Vec<Color>,
        /// Start point
        start: (f32, f32),
        /// End point
        end: (f32, f32),
    },
}

/// One rendered card frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFrame {
    /// Fill
    pub fill: Fill,
    /// Corner radius
    pub border_radius: f32,
    /// Inner padding
    pub padding: f32,
    /// Drop shadow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Child components, in order
    pub children: Vec<ComponentId>,
}

/// Rounded container
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    props: CardProps,
    children: Vec<ComponentId>,
}

impl Card {
    /// Create an empty card
    pub fn new(props: CardProps) -> Self {
        Self {
            props,
            children: Vec::new(),
        }
    }

    /// Set the children
    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ComponentId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Current props
    pub fn props(&self) -> &CardProps {
        &self.props
    }

    /// Describe the card under `palette`
    pub fn render(&self, palette: &ThemePalette) -> CardFrame {
        let fill = if self.props.gradient && self.props.gradient_colors.len() >= 2 {
            Fill::LinearGradient {
                colors: self.props.gradient_colors.clone(),
                start: (0.0, 0.0),
                end: (1.0, 1.0),
            }
        } else {
            if self.props.gradient {
                tracing::warn!(
                    stops = self.props.gradient_colors.len(),
                    "gradient needs two colors, using flat fill"
                );
            }
            Fill::Solid {
                color: self
                    .props
                    .background
                    .clone()
                    .unwrap_or_else(|| palette.surface.clone()),
            }
        };

        CardFrame {
            fill,
            border_radius: radius::CARD,
            padding: self.props.padding,
            shadow: self.props.shadow.then(|| shadows::card(palette.is_dark)),
            children: self.children.clone(),
        }
    }
}

// =============================================================================
// Circular Progress
// =============================================================================

/// Circular progress properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressProps {
    /// Diameter
    pub size: f32,
    /// Ring thickness
    pub stroke_width: f32,
    /// Percent in [0, 100]
    pub progress: f32,
    /// Arc color (brand primary when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Track color (palette track when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Fill animation length in milliseconds
    pub duration_ms: u64,
    /// Label text (rounded percent when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Draw the label
    pub show_label: bool,
}

impl Default for ProgressProps {
    fn default() -> Self {
        Self {
            size: sizing::progress::FALLBACK_SIZE,
            stroke_width: 8.0,
            progress: 0.0,
            color: None,
            background_color: None,
            duration_ms: duration::PROGRESS as u64,
            label: None,
            show_label: true,
        }
    }
}

impl ProgressProps {
    /// Props for a ring at `progress`
    pub fn new(progress: f32) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    /// Set diameter and thickness
    pub fn with_size(mut self, size: f32, stroke_width: f32) -> Self {
        self.size = size;
        self.stroke_width = stroke_width;
        self
    }

    /// Set the arc color
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the track color
    pub fn with_background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the fill animation length
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set a custom label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Toggle the label
    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }
}

/// Stroke end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat ends
    Butt,
    /// Rounded ends
    Round,
}

/// Centered label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFrame {
    /// Label text
    pub text: String,
    /// Font size
    pub font_size: f32,
    /// Text color
    pub color: Color,
}

/// One rendered progress ring frame
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressFrame {
    /// Ring geometry and dash state
    pub arc: ArcFrame,
    /// Arc color
    pub color: Color,
    /// Static track color, drawn beneath the arc
    pub track_color: Color,
    /// Arc end style
    pub line_cap: LineCap,
    /// Centered label
    pub label: Option<LabelFrame>,
}

/// Animated progress ring
#[derive(Debug, Clone)]
pub struct CircularProgress {
    props: ProgressProps,
    ring: AnimatedArcRenderer,
}

impl CircularProgress {
    /// Create a ring that fills from 0 toward `props.progress` starting at `now`
    pub fn new(props: ProgressProps, now: Instant) -> Self {
        let mut ring = AnimatedArcRenderer::new(props.size, props.stroke_width)
            .with_duration(Duration::from_millis(props.duration_ms));
        ring.set_progress(props.progress, now);
        Self { props, ring }
    }

    /// Current props
    pub fn props(&self) -> &ProgressProps {
        &self.props
    }

    /// Ring renderer
    pub fn ring(&self) -> &AnimatedArcRenderer {
        &self.ring
    }

    /// Animate toward a new percent
    pub fn set_progress(&mut self, progress: f32, now: Instant) {
        if !self.ring.is_mounted() {
            return;
        }
        self.props.progress = progress;
        self.ring.set_progress(progress, now);
    }

    /// Change the fill animation length
    pub fn set_duration_ms(&mut self, duration_ms: u64, now: Instant) {
        self.props.duration_ms = duration_ms;
        self.ring.set_duration(Duration::from_millis(duration_ms), now);
    }

    /// Label text for the current props
    pub fn label_text(&self) -> String {
        match &self.props.label {
            Some(label) => label.clone(),
            None => format!("{}%", clamp_progress(self.props.progress).round() as i32),
        }
    }

    /// Describe the ring at `now`
    pub fn render(&self, now: Instant, palette: &ThemePalette) -> ProgressFrame {
        let arc = self.ring.frame(now);
        let label = self.props.show_label.then(|| LabelFrame {
            text: self.label_text(),
            font_size: arc.geometry.size * sizing::progress::LABEL_RATIO,
            color: palette.foreground.clone(),
        });

        ProgressFrame {
            arc,
            color: self
                .props
                .color
                .clone()
                .unwrap_or_else(|| colors::PRIMARY.to_string()),
            track_color: self
                .props
                .background_color
                .clone()
                .unwrap_or_else(|| palette.track.clone()),
            line_cap: LineCap::Round,
            label,
        }
    }

    /// Tear down; later progress updates are ignored
    pub fn unmount(&mut self) {
        self.ring.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{BrokenHaptics, MockHaptics, RecordingHaptics};
    use crate::theme::resolve;
    use app_platform::haptics::{HapticIntensity, NoopHaptics};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn light() -> ThemePalette {
        resolve(false, None)
    }

    fn dark() -> ThemePalette {
        resolve(true, None)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    // ==========================================================================
    // Button Style Tests
    // ==========================================================================

    #[test]
    fn test_button_props_defaults() {
        let props = ButtonProps::new("Save");
        assert_eq!(props.variant, ButtonVariant::Primary);
        assert_eq!(props.size, ButtonSize::Medium);
        assert!(!props.disabled);
        assert_eq!(props.confirm_feedback, ConfirmFeedback::None);
    }

    #[test]
    fn test_button_size_table() {
        let palette = light();
        let small = ButtonStyle::lookup(ButtonVariant::Primary, ButtonSize::Small, false, &palette);
        let medium = ButtonStyle::lookup(ButtonVariant::Primary, ButtonSize::Medium, false, &palette);
        let large = ButtonStyle::lookup(ButtonVariant::Primary, ButtonSize::Large, false, &palette);

        assert_eq!(
            (small.min_height, small.padding_horizontal, small.padding_vertical, small.font_size),
            (36.0, 16.0, 8.0, 14.0)
        );
        assert_eq!(
            (medium.min_height, medium.padding_horizontal, medium.padding_vertical, medium.font_size),
            (44.0, 20.0, 12.0, 16.0)
        );
        assert_eq!(
            (large.min_height, large.padding_horizontal, large.padding_vertical, large.font_size),
            (56.0, 24.0, 16.0, 18.0)
        );
        assert_eq!(medium.border_radius, 12.0);
        assert_eq!(medium.gap, 8.0);
    }

    #[test]
    fn test_button_variant_colors() {
        let palette = light();
        let primary = ButtonStyle::lookup(ButtonVariant::Primary, ButtonSize::Medium, false, &palette);
        assert_eq!(primary.background, "#4CAF50");
        assert_eq!(primary.text_color, "#FFFFFF");
        assert_eq!(primary.border_width, 0.0);

        let accent = ButtonStyle::lookup(ButtonVariant::Accent, ButtonSize::Medium, false, &palette);
        assert_eq!(accent.background, "#FF8C00");

        let secondary =
            ButtonStyle::lookup(ButtonVariant::Secondary, ButtonSize::Medium, false, &palette);
        assert_eq!(secondary.background, "transparent");
        assert_eq!(secondary.border_color.as_deref(), Some("#CCCCCC"));
        assert_eq!(secondary.border_width, 1.0);
        assert_eq!(secondary.text_color, "#212121");

        let secondary_dark =
            ButtonStyle::lookup(ButtonVariant::Secondary, ButtonSize::Medium, false, &dark());
        assert_eq!(secondary_dark.text_color, "#FFFFFF");
        assert_eq!(secondary_dark.border_color.as_deref(), Some("#666666"));
    }

    #[test]
    fn test_button_disabled_colors() {
        for variant in [ButtonVariant::Primary, ButtonVariant::Secondary, ButtonVariant::Accent] {
            let style = ButtonStyle::lookup(variant, ButtonSize::Medium, true, &light());
            assert_eq!(style.background, "#E5E5E5");
            assert_eq!(style.text_color, "#999999");
            assert_eq!(style.opacity, 0.6);

            let style = ButtonStyle::lookup(variant, ButtonSize::Medium, true, &dark());
            assert_eq!(style.background, "#333333");
            assert_eq!(style.text_color, "#666666");
        }
    }

    #[test]
    fn test_button_style_overrides() {
        let props = ButtonProps::new("Go").with_style(StyleOverrides {
            background: Some("#123456".to_string()),
            text_color: None,
        });
        let button = Button::new(props, Arc::new(NoopHaptics));
        let frame = button.render(Instant::now(), &light());
        assert_eq!(frame.style.background, "#123456");
        assert_eq!(frame.style.text_color, "#FFFFFF");
    }

    #[test]
    fn test_overrides_ignored_while_disabled() {
        let props = ButtonProps::new("Go").disabled(true).with_style(StyleOverrides {
            background: Some("#123456".to_string()),
            text_color: Some("#ABCDEF".to_string()),
        });
        let button = Button::new(props, Arc::new(NoopHaptics));
        let frame = button.render(Instant::now(), &light());
        assert_eq!(frame.style.background, "#E5E5E5");
        assert_eq!(frame.style.text_color, "#999999");
    }

    #[test]
    fn test_button_icon_frame() {
        let props = ButtonProps::new("Scan").with_icon("camera").with_size(ButtonSize::Large);
        let button = Button::new(props, Arc::new(NoopHaptics));
        let icon = button.render(Instant::now(), &light()).icon.unwrap();
        assert_eq!(icon.name, "camera");
        assert_eq!(icon.size, 18.0);
        assert_eq!(icon.color, "#FFFFFF");
    }

    #[test]
    fn test_button_accessibility() {
        let a11y = ButtonProps::new("Add Meal").accessibility();
        assert_eq!(a11y.role.as_deref(), Some("button"));
        assert_eq!(a11y.label.as_deref(), Some("Add Meal"));
        assert_eq!(a11y.hint.as_deref(), Some("Tap to add meal"));

        let a11y = ButtonProps::new("Add Meal").disabled(true).accessibility();
        assert_eq!(a11y.hint.as_deref(), Some("Button is disabled"));
        assert_eq!(a11y.disabled, Some(true));
    }

    #[test]
    fn test_button_props_serialization() {
        let props = ButtonProps::new("Log Water").with_variant(ButtonVariant::Secondary);
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["variant"], "secondary");
        assert_eq!(json["size"], "medium");
        assert!(json.get("style").is_none());

        let parsed: ButtonProps = serde_json::from_str(r#"{"title":"Go","size":"small"}"#).unwrap();
        assert_eq!(parsed.size, ButtonSize::Small);
        assert_eq!(parsed.variant, ButtonVariant::Primary);
    }

    // ==========================================================================
    // Button Interaction Tests
    // ==========================================================================

    #[test]
    fn test_button_tap_invokes_callback_once() {
        let haptics = RecordingHaptics::shared();
        let (count, callback) = counter();
        let mut button = Button::new(ButtonProps::new("Save"), haptics.clone()).on_press(callback);
        let t0 = Instant::now();

        assert!(button.press_in(t0));
        assert!(button.press_out(t0 + ms(80), true));
        assert_eq!(count.get(), 1);
        assert_eq!(haptics.pulses(), vec![HapticIntensity::Light]);
    }

    #[test]
    fn test_button_release_outside_does_not_confirm() {
        let (count, callback) = counter();
        let mut button = Button::new(ButtonProps::new("Save"), Arc::new(NoopHaptics)).on_press(callback);
        let t0 = Instant::now();

        button.press_in(t0);
        assert!(!button.press_out(t0 + ms(80), false));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_button_pressed_frame() {
        let mut button = Button::new(ButtonProps::new("Save"), Arc::new(NoopHaptics));
        let t0 = Instant::now();
        button.press_in(t0);

        let frame = button.render(t0 + ms(700), &light());
        assert!((frame.scale - 0.95).abs() < 1e-3);
        assert!((frame.opacity - 0.8).abs() < 1e-6);

        button.press_out(t0 + ms(700), true);
        let frame = button.render(t0 + ms(1700), &light());
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn test_disabled_add_meal_button() {
        let mut mock = MockHaptics::new();
        mock.expect_pulse().times(0);
        let (count, callback) = counter();

        let props = ButtonProps::new("Add Meal").disabled(true);
        let mut button = Button::new(props, Arc::new(mock)).on_press(callback);
        let t0 = Instant::now();

        let frame = button.render(t0, &light());
        assert_eq!(frame.style.background, "#E5E5E5");
        assert_eq!(frame.style.text_color, "#999999");
        assert_eq!(frame.opacity, 0.6);

        assert!(!button.press_in(t0));
        assert!(!button.press_out(t0 + ms(50), true));
        assert_eq!(button.render(t0 + ms(50), &light()).scale, 1.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_disable_while_pressed_cancels() {
        let (count, callback) = counter();
        let mut button = Button::new(ButtonProps::new("Save"), Arc::new(NoopHaptics)).on_press(callback);
        let t0 = Instant::now();

        button.press_in(t0);
        button.set_disabled(true);
        assert!(!button.press_out(t0 + ms(50), true));
        assert_eq!(button.render(t0 + ms(50), &light()).scale, 1.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_success_confirm_pulse() {
        let haptics = RecordingHaptics::shared();
        let props = ButtonProps::new("Submit").with_confirm_feedback(ConfirmFeedback::Success);
        let mut button = Button::new(props, haptics.clone());
        let t0 = Instant::now();

        button.press_in(t0);
        button.press_out(t0 + ms(60), true);
        assert_eq!(
            haptics.pulses(),
            vec![HapticIntensity::Light, HapticIntensity::Success]
        );
    }

    #[test]
    fn test_haptic_failure_still_confirms() {
        let (count, callback) = counter();
        let mut button = Button::new(ButtonProps::new("Save"), Arc::new(BrokenHaptics)).on_press(callback);
        let t0 = Instant::now();

        assert!(button.press_in(t0));
        assert!(button.press_out(t0 + ms(60), true));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_button_unmount_drops_callback() {
        let (count, callback) = counter();
        let mut button = Button::new(ButtonProps::new("Save"), Arc::new(NoopHaptics)).on_press(callback);
        let t0 = Instant::now();

        button.press_in(t0);
        button.unmount();
        assert!(!button.press_out(t0 + ms(50), true));
        assert!(!button.press_in(t0 + ms(60)));
        assert_eq!(count.get(), 0);
        assert_eq!(Rc::strong_count(&count), 1);
    }

    // ==========================================================================
    // Floating Action Button Tests
    // ==========================================================================

    #[test]
    fn test_fab_defaults() {
        let fab = FloatingActionButton::new(FabProps::default(), Arc::new(NoopHaptics));
        let frame = fab.render(Instant::now());

        assert_eq!(frame.size, 56.0);
        assert_eq!(frame.border_radius, 28.0);
        assert_eq!((frame.bottom, frame.right), (100.0, 20.0));
        assert_eq!(frame.background, "#4CAF50");
        assert_eq!(frame.icon.name, "add");
        assert!((frame.icon.size - 22.4).abs() < 1e-4);
        assert_eq!(frame.shadow.offset_y, 4.0);
        assert_eq!(frame.shadow.opacity, 0.3);
        assert_eq!(frame.shadow.radius, 8.0);
        assert_eq!(frame.shadow.elevation, 8.0);
        assert_eq!(frame.z_index, 1000);
        assert_eq!(frame.accessibility.label.as_deref(), Some("Add new item"));
    }

    #[test]
    fn test_fab_press_uses_prominent_tier() {
        let mut mock = MockHaptics::new();
        mock.expect_pulse()
            .withf(|intensity| *intensity == HapticIntensity::Medium)
            .times(1)
            .returning(|_| Ok(()));
        let (count, callback) = counter();
        let mut fab = FloatingActionButton::new(FabProps::default(), Arc::new(mock)).on_press(callback);
        let t0 = Instant::now();

        fab.press_in(t0);
        assert!((fab.render(t0 + ms(700)).scale - 0.9).abs() < 1e-3);
        assert!(fab.press_out(t0 + ms(700), true));
        assert_eq!(count.get(), 1);
        assert_eq!(fab.render(t0 + ms(1700)).scale, 1.0);
    }

    #[test]
    fn test_fab_invalid_size() {
        let fab = FloatingActionButton::new(FabProps::default().with_size(-1.0), Arc::new(NoopHaptics));
        assert_eq!(fab.render(Instant::now()).size, 56.0);
    }

    // ==========================================================================
    // Card Tests
    // ==========================================================================

    #[test]
    fn test_card_flat_defaults() {
        let frame = Card::new(CardProps::default()).render(&light());
        assert_eq!(frame.fill, Fill::Solid { color: "#FFFFFF".to_string() });
        assert_eq!(frame.border_radius, 12.0);
        assert_eq!(frame.padding, 16.0);

        let shadow = frame.shadow.unwrap();
        assert_eq!(shadow.color, "#000000");
        assert_eq!((shadow.offset_x, shadow.offset_y), (0.0, 2.0));
        assert_eq!(shadow.radius, 8.0);
        assert_eq!(shadow.elevation, 4.0);
        assert_eq!(shadow.opacity, 0.1);
    }

    #[test]
    fn test_card_dark_mode() {
        let frame = Card::new(CardProps::default()).render(&dark());
        assert_eq!(frame.fill, Fill::Solid { color: "#1E1E1E".to_string() });
        assert_eq!(frame.shadow.unwrap().opacity, 0.3);
    }

    #[test]
    fn test_card_gradient() {
        let props = CardProps::default().with_gradient(["#4CAF50", "#2E7D32"]);
        let frame = Card::new(props).render(&light());
        assert_eq!(
            frame.fill,
            Fill::LinearGradient {
                colors: vec!["#4CAF50".to_string(), "#2E7D32".to_string()],
                start: (0.0, 0.0),
                end: (1.0, 1.0),
            }
        );
    }

    #[test]
    fn test_card_gradient_needs_two_colors() {
        let props = CardProps::default().with_gradient(["#4CAF50"]);
        let frame = Card::new(props).render(&light());
        assert!(matches!(frame.fill, Fill::Solid { .. }));
    }

    #[test]
    fn test_card_without_shadow_and_children() {
        let card = Card::new(CardProps::default().with_shadow(false).with_padding(8.0))
            .with_children(["calories-ring", "macro-row"]);
        let frame = card.render(&light());
        assert!(frame.shadow.is_none());
        assert_eq!(frame.padding, 8.0);
        assert_eq!(frame.children, vec!["calories-ring", "macro-row"]);
    }

    #[test]
    fn test_fill_serialization() {
        let json = serde_json::to_value(Fill::Solid { color: "#FFFFFF".to_string() }).unwrap();
        assert_eq!(json["type"], "solid");
    }

    // ==========================================================================
    // Circular Progress Tests
    // ==========================================================================

    #[test]
    fn test_progress_reference_scenario() {
        let t0 = Instant::now();
        let props = ProgressProps::new(62.35).with_size(120.0, 8.0);
        let progress = CircularProgress::new(props, t0);

        let start = progress.render(t0, &light());
        assert_eq!(start.arc.geometry.radius, 56.0);
        assert!((start.arc.geometry.circumference - 351.86).abs() < 0.01);
        assert_eq!(start.arc.dash_offset, start.arc.geometry.circumference);

        let end = progress.render(t0 + ms(1000), &light());
        assert!((end.arc.dash_offset - 132.47).abs() < 0.01);

        let label = end.label.unwrap();
        assert_eq!(label.text, "62%");
        assert!((label.font_size - 18.0).abs() < 1e-4);
        assert_eq!(label.color, "#212121");
    }

    #[test]
    fn test_progress_theme_colors() {
        let progress = CircularProgress::new(ProgressProps::new(40.0), Instant::now());
        let frame = progress.render(Instant::now(), &dark());
        assert_eq!(frame.color, "#4CAF50");
        assert_eq!(frame.track_color, "#333333");
        assert_eq!(frame.line_cap, LineCap::Round);
        assert_eq!(frame.label.unwrap().color, "#FFFFFF");
    }

    #[test]
    fn test_progress_clamps_label_and_offset() {
        let t0 = Instant::now();
        let mut progress = CircularProgress::new(ProgressProps::new(150.0), t0);
        assert_eq!(progress.label_text(), "100%");
        assert_eq!(progress.render(t0 + ms(1000), &light()).arc.dash_offset, 0.0);

        progress.set_progress(-10.0, t0 + ms(1000));
        assert_eq!(progress.label_text(), "0%");
        let frame = progress.render(t0 + ms(2000), &light());
        assert_eq!(frame.arc.dash_offset, frame.arc.geometry.circumference);
    }

    #[test]
    fn test_progress_custom_label_and_hidden() {
        let t0 = Instant::now();
        let progress = CircularProgress::new(ProgressProps::new(10.0).with_label("1/3 meals"), t0);
        assert_eq!(progress.render(t0, &light()).label.unwrap().text, "1/3 meals");

        let hidden = CircularProgress::new(ProgressProps::new(10.0).show_label(false), t0);
        assert!(hidden.render(t0, &light()).label.is_none());
    }

    #[test]
    fn test_progress_duration_and_unmount() {
        let t0 = Instant::now();
        let mut progress =
            CircularProgress::new(ProgressProps::new(50.0).with_duration_ms(200), t0);
        assert_eq!(progress.ring().percent_at(t0 + ms(200)), 50.0);

        progress.set_duration_ms(400, t0 + ms(200));
        progress.set_progress(90.0, t0 + ms(200));
        assert_eq!(progress.ring().percent_at(t0 + ms(600)), 90.0);

        progress.unmount();
        progress.set_progress(10.0, t0 + ms(700));
        assert_eq!(progress.ring().percent_at(t0 + ms(2000)), 90.0);
        assert_eq!(progress.label_text(), "90%");
        assert_eq!(progress.props().progress, 90.0);
    }

    #[test]
    fn test_progress_props_deserialize_defaults() {
        let props: ProgressProps = serde_json::from_str(r#"{"progress":25}"#).unwrap();
        assert_eq!(props.size, 120.0);
        assert_eq!(props.stroke_width, 8.0);
        assert_eq!(props.duration_ms, 1000);
        assert!(props.show_label);
    }
}
