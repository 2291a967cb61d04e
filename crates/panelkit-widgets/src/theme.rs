//! Process-wide defaults for panels and widgets.

use panelkit_core::{Color, Easing, FontSet};
use serde::{Deserialize, Serialize};

/// Immutable defaults a panel is built with.
///
/// Per-panel and per-widget configuration blobs override individual values;
/// the theme supplies everything they leave out. Missing fields in a
/// deserialized theme take the default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Panel width in pixels
    pub panel_width: f32,
    /// Outer margin between the panel edge and its widgets
    pub margin_large: f32,
    /// Gap between neighbouring widgets
    pub margin_small: f32,
    /// Widgets re-synchronize every `update_frequency` frames
    pub update_frequency: u32,
    /// Edge length of the square offscreen surface
    pub surface_size: u32,
    /// Show/hide fade duration in host time units
    pub fade_duration: f32,
    /// Show/hide fade curve
    pub fade_easing: Easing,
    /// Default height of single-row widgets
    pub widget_height: f32,
    /// Default width of compact widgets (buttons, graphs, 2D sliders)
    pub compact_width: f32,
    /// Stroke width for outlines and graph lines
    pub line_width: f32,
    /// Panel backing color
    pub panel_color: Color,
    /// Idle outline color
    pub stroke_color: Color,
    /// Outline color of an active widget
    pub active_stroke_color: Color,
    /// Widget name color
    pub name_color: Color,
    /// Widget background color
    pub background_color: Color,
    /// Fonts resolved by `style` key
    pub fonts: FontSet,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            panel_width: 216.0,
            margin_large: 10.0,
            margin_small: 4.0,
            update_frequency: 2,
            surface_size: 2048,
            fade_duration: 0.25,
            fade_easing: Easing::Linear,
            widget_height: 36.0,
            compact_width: 96.0,
            line_width: 2.0,
            panel_color: Color::from_argb(0xCC00_0000),
            stroke_color: Color::new(0.07, 0.26, 0.29, 1.0),
            active_stroke_color: Color::new(0.19, 0.66, 0.71, 1.0),
            name_color: Color::from_argb(0xFF23_7C89),
            background_color: Color::from_argb(0xFF00_0000),
            fonts: FontSet::default(),
        }
    }
}

impl Theme {
    /// Width of a full-row widget in a default-width panel.
    #[must_use]
    pub fn default_slider_width(&self) -> f32 {
        self.margin_large.mul_add(-2.0, self.panel_width)
    }
}
