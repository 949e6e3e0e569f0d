//! Theme resolution for Nourish
//!
//! Every primitive derives its colors from one place: a dark-mode flag plus
//! optional caller overrides, resolved into a [`ThemePalette`]. The palette is
//! never stored by a primitive; it is recomputed for each render so a theme
//! switch takes effect on the next frame.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{resolve, PaletteOverrides};
//!
//! let dark = resolve(true, None);
//! assert_eq!(dark.foreground, "#FFFFFF");
//!
//! let overrides = PaletteOverrides {
//!     border: Some("#00FF00".to_string()),
//!     ..Default::default()
//! };
//! let custom = resolve(false, Some(&overrides));
//! assert_eq!(custom.border, "#00FF00");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF" or "#FFFFFF80")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    if !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).ok()?;
    }
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

// =============================================================================
// Color Table
// =============================================================================

/// Every color constant used by the primitives
pub mod colors {
    /// Brand green (primary actions, progress arcs, FAB)
    pub const PRIMARY: &str = "#4CAF50";
    /// Brand orange (accent actions)
    pub const ACCENT: &str = "#FF8C00";
    /// Text on brand backgrounds
    pub const ON_BRAND: &str = "#FFFFFF";
    /// Shadow base color
    pub const SHADOW: &str = "#000000";
    /// Fully transparent fill
    pub const TRANSPARENT: &str = "transparent";

    /// Light mode defaults
    pub mod light {
        /// Primary text
        pub const FOREGROUND: &str = "#212121";
        /// Screen background
        pub const BACKGROUND: &str = "#FFFFFF";
        /// Outline color
        pub const BORDER: &str = "#CCCCCC";
        /// Muted text (disabled labels)
        pub const MUTED_FOREGROUND: &str = "#999999";
        /// Card surface
        pub const SURFACE: &str = "#FFFFFF";
        /// Progress track and disabled fills
        pub const TRACK: &str = "#E5E5E5";
    }

    /// Dark mode defaults
    pub mod dark {
        /// Primary text
        pub const FOREGROUND: &str = "#FFFFFF";
        /// Screen background
        pub const BACKGROUND: &str = "#121212";
        /// Outline color
        pub const BORDER: &str = "#666666";
        /// Muted text (disabled labels)
        pub const MUTED_FOREGROUND: &str = "#666666";
        /// Card surface
        pub const SURFACE: &str = "#1E1E1E";
        /// Progress track and disabled fills
        pub const TRACK: &str = "#333333";
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Resolved colors for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    /// Whether this palette was resolved for dark mode
    pub is_dark: bool,
    /// Primary text color
    pub foreground: Color,
    /// Screen background
    pub background: Color,
    /// Outline color
    pub border: Color,
    /// Muted text color
    pub muted_foreground: Color,
    /// Elevated surface (cards)
    pub surface: Color,
    /// Inactive track (progress background, disabled fills)
    pub track: Color,
}

/// Caller-supplied replacements for individual palette slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    /// Replacement foreground
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    /// Replacement background
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Replacement border
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    /// Replacement muted foreground
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_foreground: Option<Color>,
    /// Replacement surface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<Color>,
    /// Replacement track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Color>,
}

impl PaletteOverrides {
    /// True when no slot is overridden
    pub fn is_empty(&self) -> bool {
        self == &PaletteOverrides::default()
    }
}

fn pick(over: Option<&Color>, default: &str) -> Color {
    match over {
        Some(color) if parse_hex_color(color).is_some() => color.clone(),
        _ => default.to_string(),
    }
}

/// Resolve the palette for a dark-mode flag and optional overrides.
///
/// Overrides that are not valid hex colors are ignored for their slot.
pub fn resolve(is_dark: bool, overrides: Option<&PaletteOverrides>) -> ThemePalette {
    let empty = PaletteOverrides::default();
    let o = overrides.unwrap_or(&empty);

    if is_dark {
        ThemePalette {
            is_dark,
            foreground: pick(o.foreground.as_ref(), colors::dark::FOREGROUND),
            background: pick(o.background.as_ref(), colors::dark::BACKGROUND),
            border: pick(o.border.as_ref(), colors::dark::BORDER),
            muted_foreground: pick(o.muted_foreground.as_ref(), colors::dark::MUTED_FOREGROUND),
            surface: pick(o.surface.as_ref(), colors::dark::SURFACE),
            track: pick(o.track.as_ref(), colors::dark::TRACK),
        }
    } else {
        ThemePalette {
            is_dark,
            foreground: pick(o.foreground.as_ref(), colors::light::FOREGROUND),
            background: pick(o.background.as_ref(), colors::light::BACKGROUND),
            border: pick(o.border.as_ref(), colors::light::BORDER),
            muted_foreground: pick(o.muted_foreground.as_ref(), colors::light::MUTED_FOREGROUND),
            surface: pick(o.surface.as_ref(), colors::light::SURFACE),
            track: pick(o.track.as_ref(), colors::light::TRACK),
        }
    }
}

// =============================================================================
// Theme State
// =============================================================================

/// Current theme selection, owned by the host (profile screen toggle)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeState {
    /// Dark mode flag
    pub dark_mode: bool,
    /// Palette overrides
    #[serde(skip_serializing_if = "PaletteOverrides::is_empty")]
    pub overrides: PaletteOverrides,
}

impl ThemeState {
    /// Create a theme state
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            overrides: PaletteOverrides::default(),
        }
    }

    /// Flip dark mode on or off
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Replace the overrides
    pub fn set_overrides(&mut self, overrides: PaletteOverrides) {
        self.overrides = overrides;
    }

    /// Resolve the palette for the current selection
    pub fn palette(&self) -> ThemePalette {
        let overrides = (!self.overrides.is_empty()).then_some(&self.overrides);
        resolve(self.dark_mode, overrides)
    }
}
