//! One- and two-axis sliders bound to host-owned values.

use crate::panel::PanelState;
use crate::widget::{Widget, WidgetCore};
use log::debug;
use panelkit_core::{lmap, Binding, Canvas, Color, Params, Point, Rect, Size};
use std::any::Any;
use std::rc::Rc;

/// Reads the integer `width` option, defaulting to `default`.
pub(crate) fn width_option(params: &Params, default: f32) -> f32 {
    params.get_i32_opt("width").map_or(default, |w| w as f32)
}

/// Handle travel along `[start, end]` inset by `inset` at both ends.
///
/// A span too short for the inset collapses to its midpoint, so the range
/// is never inverted.
fn rail(start: f32, end: f32, inset: f32) -> (f32, f32) {
    let (low, high) = (start + inset, end - inset);
    if low <= high {
        (low, high)
    } else {
        let mid = (start + end) * 0.5;
        (mid, mid)
    }
}

// =============================================================================
// Slider
// =============================================================================

/// Horizontal slider writing through to a `Binding<f32>`.
///
/// Options: `min` (0), `max` (1), `width` (full panel row).
#[derive(Debug)]
pub struct Slider {
    core: WidgetCore,
    value: Binding<f32>,
    min: f32,
    max: f32,
    screen_min: f32,
    screen_max: f32,
    screen_value: f32,
}

impl Slider {
    /// Half the handle width; the rail is inset by this much on each side.
    pub const HANDLE_HALF_WIDTH: f32 = 8.0;

    /// Build a slider at the panel's insertion cursor.
    #[must_use]
    pub fn new(panel: &Rc<PanelState>, name: &str, value: Binding<f32>, params: &Params) -> Self {
        let mut core = WidgetCore::new(panel, name, params);
        let theme = panel.theme();
        let width = width_option(params, theme.default_slider_width());
        core.set_size(Size::new(width, theme.widget_height));
        core.render_name();
        core.place();

        let bounds = core.bounds();
        let (screen_min, screen_max) = rail(bounds.x, bounds.right(), Self::HANDLE_HALF_WIDTH);
        let mut slider = Self {
            core,
            value,
            min: params.get_f32("min", 0.0),
            max: params.get_f32("max", 1.0),
            screen_min,
            screen_max,
            screen_value: 0.0,
        };
        slider.update();
        debug!("created slider {name:?} range [{}, {}]", slider.min, slider.max);
        slider
    }

    /// Logical minimum.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Logical maximum.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Leftmost handle position, panel-local.
    #[must_use]
    pub const fn screen_min(&self) -> f32 {
        self.screen_min
    }

    /// Rightmost handle position, panel-local.
    #[must_use]
    pub const fn screen_max(&self) -> f32 {
        self.screen_max
    }

    /// Current handle position, panel-local.
    #[must_use]
    pub const fn screen_value(&self) -> f32 {
        self.screen_value
    }

    /// The bound value.
    #[must_use]
    pub const fn binding(&self) -> &Binding<f32> {
        &self.value
    }

    /// Enable or disable interaction.
    pub fn set_locked(&mut self, locked: bool) {
        self.core.set_locked(locked);
    }

    /// Move the handle to `x` and write the mapped value back to the binding.
    pub fn update_position(&mut self, x: f32) {
        self.screen_value = x;
        self.value
            .set(lmap(x, self.screen_min, self.screen_max, self.min, self.max));
    }

    fn handle_rect(&self) -> Rect {
        let bounds = self.core.bounds();
        Rect::new(
            self.screen_value - Self::HANDLE_HALF_WIDTH,
            bounds.y,
            Self::HANDLE_HALF_WIDTH * 2.0,
            bounds.height,
        )
    }
}

impl Widget for Slider {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        let bounds = core.bounds();
        let width = core.line_width();

        let fill = if core.is_locked() {
            core.stroke_color()
        } else {
            core.background_color()
        };
        canvas.fill_rect(bounds, fill);

        let outline = if core.is_active() {
            core.active_stroke_color()
        } else {
            core.stroke_color()
        };
        canvas.stroke_rect(bounds, outline, width);

        let handle_color = if core.is_locked() {
            Color::BLACK
        } else {
            outline
        };
        let handle = self.handle_rect();
        canvas.stroke_rect(handle, handle_color, width);
        canvas.fill_rect(handle, handle_color);

        core.draw_label(canvas);
    }

    fn update(&mut self) {
        self.screen_value = lmap(
            self.value.get(),
            self.min,
            self.max,
            self.screen_min,
            self.screen_max,
        );
    }

    // A press is not clamped, so clicking the inset margin can place the
    // handle just outside the rail until the next drag.
    fn handle_mouse_down(&mut self, position: Point) {
        self.update_position(position.x);
    }

    fn handle_mouse_drag(&mut self, position: Point) {
        self.update_position(position.x.clamp(self.screen_min, self.screen_max));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Slider2D
// =============================================================================

/// Two-axis pad writing through to a `Binding<Point>`.
///
/// Logical `y` grows upward: `maxY` maps to the top of the pad.
///
/// Options: `minX`, `maxX`, `minY`, `maxY` (0, 1, 0, 1), `width` (compact).
#[derive(Debug)]
pub struct Slider2D {
    core: WidgetCore,
    value: Binding<Point>,
    min: Point,
    max: Point,
    screen_min: Point,
    screen_max: Point,
    screen_value: Point,
}

impl Slider2D {
    /// Half the handle edge; the pad is inset by this much on each side.
    pub const HANDLE_HALF_WIDTH: f32 = 4.0;

    /// Pad height.
    pub const HEIGHT: f32 = 96.0;

    /// Build a pad at the panel's insertion cursor.
    #[must_use]
    pub fn new(
        panel: &Rc<PanelState>,
        name: &str,
        value: Binding<Point>,
        params: &Params,
    ) -> Self {
        let mut core = WidgetCore::new(panel, name, params);
        let width = width_option(params, panel.theme().compact_width);
        core.set_size(Size::new(width, Self::HEIGHT));
        core.render_name();
        core.place();

        let bounds = core.bounds();
        let (min_x, max_x) = rail(bounds.x, bounds.right(), Self::HANDLE_HALF_WIDTH);
        let (min_y, max_y) = rail(bounds.y, bounds.bottom(), Self::HANDLE_HALF_WIDTH);
        let mut pad = Self {
            core,
            value,
            min: Point::new(params.get_f32("minX", 0.0), params.get_f32("minY", 0.0)),
            max: Point::new(params.get_f32("maxX", 1.0), params.get_f32("maxY", 1.0)),
            screen_min: Point::new(min_x, min_y),
            screen_max: Point::new(max_x, max_y),
            screen_value: Point::ORIGIN,
        };
        pad.update();
        debug!("created 2d slider {name:?}");
        pad
    }

    /// Logical minimum per axis.
    #[must_use]
    pub const fn min(&self) -> Point {
        self.min
    }

    /// Logical maximum per axis.
    #[must_use]
    pub const fn max(&self) -> Point {
        self.max
    }

    /// Top-left limit of the handle, panel-local.
    #[must_use]
    pub const fn screen_min(&self) -> Point {
        self.screen_min
    }

    /// Bottom-right limit of the handle, panel-local.
    #[must_use]
    pub const fn screen_max(&self) -> Point {
        self.screen_max
    }

    /// Current handle center, panel-local.
    #[must_use]
    pub const fn screen_value(&self) -> Point {
        self.screen_value
    }

    /// The bound value.
    #[must_use]
    pub const fn binding(&self) -> &Binding<Point> {
        &self.value
    }

    /// Move the handle to `position` and write the mapped value back.
    pub fn update_position(&mut self, position: Point) {
        self.screen_value = position;
        self.value.set(Point::new(
            lmap(position.x, self.screen_min.x, self.screen_max.x, self.min.x, self.max.x),
            lmap(position.y, self.screen_min.y, self.screen_max.y, self.max.y, self.min.y),
        ));
    }
}

impl Widget for Slider2D {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        let bounds = core.bounds();
        let width = core.line_width();

        canvas.stroke_rect(bounds, core.stroke_color(), width);
        canvas.fill_rect(bounds, core.stroke_color());

        let marker = core.active_stroke_color();
        let v = self.screen_value;
        canvas.draw_line(Point::new(bounds.x, v.y), Point::new(bounds.right(), v.y), marker, width);
        canvas.draw_line(Point::new(v.x, bounds.y), Point::new(v.x, bounds.bottom()), marker, width);

        let half = Point::new(Self::HANDLE_HALF_WIDTH, Self::HANDLE_HALF_WIDTH);
        let handle = Rect::from_points(v - half, v + half);
        canvas.stroke_rect(handle, marker, width);
        canvas.fill_rect(handle, marker);
    }

    fn update(&mut self) {
        let v = self.value.get();
        self.screen_value = Point::new(
            lmap(v.x, self.min.x, self.max.x, self.screen_min.x, self.screen_max.x),
            lmap(v.y, self.min.y, self.max.y, self.screen_max.y, self.screen_min.y),
        );
    }

    fn handle_mouse_down(&mut self, position: Point) {
        self.update_position(position);
    }

    fn handle_mouse_drag(&mut self, position: Point) {
        self.update_position(position.clamp(self.screen_min, self.screen_max));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
