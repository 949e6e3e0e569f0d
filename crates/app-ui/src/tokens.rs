//! Design tokens for Nourish
//!
//! Fixed numbers shared by the primitives: spacing, radii, shadows,
//! animation timings and layering.

use serde::{Deserialize, Serialize};

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Spacing scale in pixels, on an 8px grid
pub mod spacing {
    /// 4px - Half step
    pub const SPACE_XS: f32 = 4.0;
    /// 8px - One grid step
    pub const SPACE_SM: f32 = 8.0;
    /// 12px - One and a half steps
    pub const SPACE_MD: f32 = 12.0;
    /// 16px - Two steps (default card padding)
    pub const SPACE_LG: f32 = 16.0;
    /// 20px
    pub const SPACE_XL: f32 = 20.0;
    /// 24px
    pub const SPACE_2XL: f32 = 24.0;

    /// Base grid unit
    pub const GRID: f32 = SPACE_SM;

    /// Get spacing value by name
    pub fn get(name: &str) -> Option<f32> {
        match name {
            "xs" => Some(SPACE_XS),
            "sm" => Some(SPACE_SM),
            "md" => Some(SPACE_MD),
            "lg" => Some(SPACE_LG),
            "xl" => Some(SPACE_XL),
            "2xl" => Some(SPACE_2XL),
            _ => None,
        }
    }
}

// =============================================================================
// Sizing Tokens
// =============================================================================

/// Size tokens for component dimensions
pub mod sizing {
    /// Button metrics per size
    pub mod button {
        /// Small minimum height
        pub const SM_HEIGHT: f32 = 36.0;
        /// Medium minimum height
        pub const MD_HEIGHT: f32 = 44.0;
        /// Large minimum height
        pub const LG_HEIGHT: f32 = 56.0;
        /// Gap between the leading icon and the title
        pub const ICON_GAP: f32 = 8.0;
    }

    /// Floating action button metrics
    pub mod fab {
        /// Default diameter
        pub const SIZE: f32 = 56.0;
        /// Default distance from the bottom edge
        pub const BOTTOM: f32 = 100.0;
        /// Default distance from the right edge
        pub const RIGHT: f32 = 20.0;
        /// Glyph size as a fraction of the diameter
        pub const GLYPH_RATIO: f32 = 0.4;
    }

    /// Circular progress metrics
    pub mod progress {
        /// Diameter used when the caller passes an unusable size
        pub const FALLBACK_SIZE: f32 = 120.0;
        /// Stroke width as a fraction of the diameter when the given one is unusable
        pub const FALLBACK_STROKE_RATIO: f32 = 0.1;
        /// Label font size as a fraction of the diameter
        pub const LABEL_RATIO: f32 = 0.15;
    }
}

// =============================================================================
// Border Radius Tokens
// =============================================================================

/// Border radius scale
pub mod radius {
    /// Card corners
    pub const CARD: f32 = 12.0;
    /// Button corners
    pub const BUTTON: f32 = 12.0;
}

// =============================================================================
// Border Tokens
// =============================================================================

/// Border widths
pub mod border {
    /// Thin border (1px)
    pub const THIN: f32 = 1.0;
}

// =============================================================================
// Opacity Tokens
// =============================================================================

/// Opacity levels
pub mod opacity {
    /// Fully opaque
    pub const OPAQUE: f32 = 1.0;
    /// Touchable opacity while a finger is down
    pub const ACTIVE: f32 = 0.8;
    /// Disabled controls
    pub const DISABLED: f32 = 0.6;
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Drop shadow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub radius: f32,
    /// Shadow opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Shadow base color
    pub color: String,
    /// Android elevation equivalent
    pub elevation: f32,
}

impl Shadow {
    /// Create a new shadow
    pub fn new(offset_x: f32, offset_y: f32, radius: f32, opacity: f32, elevation: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            radius,
            opacity,
            color: crate::theme::colors::SHADOW.to_string(),
            elevation,
        }
    }
}

/// Shadow presets
pub mod shadows {
    use super::Shadow;

    /// Card shadow; stronger in dark mode so it stays visible
    pub fn card(is_dark: bool) -> Shadow {
        let opacity = if is_dark { 0.3 } else { 0.1 };
        Shadow::new(0.0, 2.0, 8.0, opacity, 4.0)
    }

    /// Floating action button shadow
    pub fn fab() -> Shadow {
        Shadow::new(0.0, 4.0, 8.0, 0.3, 8.0)
    }
}

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation duration tokens (in milliseconds)
pub mod duration {
    /// Progress ring fill
    pub const PROGRESS: u32 = 1000;
}

/// Press animation targets
pub mod press {
    /// Resting scale
    pub const REST_SCALE: f32 = 1.0;
    /// Pressed scale for ordinary buttons
    pub const STANDARD_SCALE: f32 = 0.95;
    /// Pressed scale for floating action buttons
    pub const PROMINENT_SCALE: f32 = 0.9;
    /// Spring stiffness
    pub const STIFFNESS: f32 = 300.0;
    /// Spring mass
    pub const MASS: f32 = 1.0;
}

// =============================================================================
// Z-Index Tokens
// =============================================================================

/// Z-index layers
pub mod z_index {
    /// Floating controls above scroll content
    pub const FLOATING: i32 = 1000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_grid() {
        assert_eq!(spacing::GRID, 8.0);
        assert_eq!(spacing::get("lg"), Some(16.0));
        assert_eq!(spacing::get("invalid"), None);
    }

    #[test]
    fn test_button_heights() {
        assert!(sizing::button::SM_HEIGHT < sizing::button::MD_HEIGHT);
        assert!(sizing::button::MD_HEIGHT < sizing::button::LG_HEIGHT);
    }

    #[test]
    fn test_card_shadow_darker_in_dark_mode() {
        assert!(shadows::card(true).opacity > shadows::card(false).opacity);
        assert_eq!(shadows::card(false).offset_y, 2.0);
    }

    #[test]
    fn test_press_scales_in_range() {
        assert!(press::PROMINENT_SCALE < press::STANDARD_SCALE);
        assert!(press::STANDARD_SCALE < press::REST_SCALE);
    }
}
