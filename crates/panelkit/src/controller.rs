//! The panel controller: owns widgets, lays them out, routes panel-level
//! input, and composites everything onto the window.

use log::{debug, trace};
use panelkit_core::{
    Binding, Canvas, Color, Font, MetricsRasterizer, MouseEvent, Params, Point, Rect,
    ScopedConnection, Size, Surface, TextRasterizer, Tween, Window,
};
use panelkit_widgets::{
    connect_mouse, Button, Label, LinkedButton, MovingGraph, PanelState, Slider, Slider2D, Theme,
    Widget, WidgetCore,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Routing priority of the panel hit-test relative to its own widgets.
const PANEL_PRIORITY_OFFSET: i32 = 99;

// =============================================================================
// WidgetHandle
// =============================================================================

/// Non-owning reference to a widget added to a [`Controller`].
///
/// Handles stay valid to hold after the widget is released; every accessor
/// then returns `None`.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    widget: Weak<RefCell<dyn Widget>>,
}

impl WidgetHandle {
    fn new(widget: &Rc<RefCell<dyn Widget>>) -> Self {
        Self {
            widget: Rc::downgrade(widget),
        }
    }

    /// Whether the widget still exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.widget.strong_count() > 0
    }

    /// Run `f` against the widget as a `W`.
    ///
    /// Returns `None` when the widget was released, is not a `W`, or is
    /// currently mutably borrowed.
    pub fn with<W: Widget, R>(&self, f: impl FnOnce(&W) -> R) -> Option<R> {
        let widget = self.widget.upgrade()?;
        let widget = widget.try_borrow().ok()?;
        widget.as_any().downcast_ref::<W>().map(f)
    }

    /// Run `f` against the widget as a mutable `W`.
    pub fn with_mut<W: Widget, R>(&self, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        let widget = self.widget.upgrade()?;
        let mut widget = widget.try_borrow_mut().ok()?;
        widget.as_any_mut().downcast_mut::<W>().map(f)
    }

    /// Run `f` against the shared widget state.
    pub fn with_core<R>(&self, f: impl FnOnce(&WidgetCore) -> R) -> Option<R> {
        let widget = self.widget.upgrade()?;
        let widget = widget.try_borrow().ok()?;
        Some(f(widget.core()))
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.with_core(|core| core.name().to_string())
    }

    /// Group tag.
    #[must_use]
    pub fn group(&self) -> Option<String> {
        self.with_core(|core| core.group().to_string())
    }

    /// Panel-local bounds.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.with_core(WidgetCore::bounds)
    }

    fn refers_to(&self, widget: &Rc<RefCell<dyn Widget>>) -> bool {
        self.widget.as_ptr().cast::<()>() == Rc::as_ptr(widget).cast::<()>()
    }
}

// =============================================================================
// Controller
// =============================================================================

struct Entry {
    group: String,
    widget: Rc<RefCell<dyn Widget>>,
}

/// Panel placement options that survive construction.
#[derive(Debug, Clone, Copy)]
struct Placement {
    width: f32,
    height: Option<f32>,
    centered: bool,
}

impl Placement {
    /// Window-space position and size for a window of `window` size.
    fn resolve(self, window: Size) -> (Point, Size) {
        let size = Size::new(self.width, self.height.unwrap_or(window.height));
        let position = if self.centered {
            Rect::from_size(window).center() - size.half()
        } else {
            Point::ORIGIN
        };
        (position, size)
    }
}

/// A panel of widgets drawn over a host window.
///
/// Options: `visible` (true), `width` (theme panel width), `height` (tracks
/// the window height when absent), `centered` (false), `depth` (0),
/// `forceInteraction` (false), `marginLarge` (theme), `panelColor` (theme,
/// `"0xAARRGGBB"`).
pub struct Controller {
    window: Rc<Window>,
    panel: Rc<PanelState>,
    placement: Placement,
    panel_color: Color,
    fade: Tween,
    frame: u64,
    surface: Surface,
    widgets: Vec<Entry>,
    _mouse_down: ScopedConnection,
    _resized: ScopedConnection,
}

impl Controller {
    /// Create a panel with the default theme and text metrics.
    #[must_use]
    pub fn new(window: &Rc<Window>, params: &str) -> Self {
        Self::with_theme(window, params, Theme::default(), Rc::new(MetricsRasterizer))
    }

    /// Create a panel with explicit defaults and text rasterizer.
    #[must_use]
    pub fn with_theme(
        window: &Rc<Window>,
        params: &str,
        theme: Theme,
        rasterizer: Rc<dyn TextRasterizer>,
    ) -> Self {
        let params = Params::parse(params);
        let visible = params.get_bool("visible", true);
        let placement = Placement {
            width: params
                .get_i32_opt("width")
                .map_or(theme.panel_width, |w| w as f32),
            height: params.get_i32_opt("height").map(|h| h as f32),
            centered: params.get_bool("centered", false),
        };
        let depth = params.get_i32("depth", 0);
        let force_interaction = params.get_bool("forceInteraction", false);
        let margin_large = params
            .get_i32_opt("marginLarge")
            .map_or(theme.margin_large, |m| m as f32);
        let panel_color = params.get_color("panelColor", theme.panel_color);
        let surface_size = theme.surface_size;

        let panel = Rc::new(PanelState::new(
            theme,
            rasterizer,
            depth,
            force_interaction,
            margin_large,
        ));
        panel.set_visible(visible);
        let (position, size) = placement.resolve(window.size());
        panel.set_position(position);
        panel.set_size(size);

        let mouse_down = {
            let panel = Rc::downgrade(&panel);
            window
                .signal_mouse_down()
                .connect(depth + PANEL_PRIORITY_OFFSET, move |event: &mut MouseEvent| {
                    if let Some(panel) = panel.upgrade() {
                        hit_test_panel(&panel, event);
                    }
                })
        };
        let resized = {
            let panel = Rc::downgrade(&panel);
            window
                .signal_resized()
                .connect(0, move |window_size: &mut Size| {
                    if let Some(panel) = panel.upgrade() {
                        let (position, size) = placement.resolve(*window_size);
                        panel.set_position(position);
                        panel.set_size(size);
                    }
                })
        };

        debug!(
            "created panel at ({}, {}) size {}x{} depth {depth}",
            position.x, position.y, size.width, size.height
        );

        Self {
            window: Rc::clone(window),
            panel,
            placement,
            panel_color,
            fade: Tween::settled(if visible { 1.0 } else { 0.0 }),
            frame: 0,
            surface: Surface::new(surface_size, surface_size),
            widgets: Vec::new(),
            _mouse_down: mouse_down.into(),
            _resized: resized.into(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether the panel is visible (including while fading out).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.panel.is_visible()
    }

    /// Current opacity.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.fade.value()
    }

    /// Window-space top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        self.panel.position()
    }

    /// Panel size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.panel.size()
    }

    /// Window-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.panel.bounds()
    }

    /// Routing depth.
    #[must_use]
    pub fn depth(&self) -> i32 {
        self.panel.depth()
    }

    /// Where the next widget will be placed.
    #[must_use]
    pub fn insert_position(&self) -> Point {
        self.panel.insert_position()
    }

    /// Resolve a font style key.
    #[must_use]
    pub fn font(&self, style: &str) -> &Font {
        self.panel.font(style)
    }

    /// Defaults this panel was built with.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.panel.theme()
    }

    /// Panel backing color.
    #[must_use]
    pub const fn panel_color(&self) -> Color {
        self.panel_color
    }

    /// Number of owned widgets.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Handles to every widget, in insertion order.
    #[must_use]
    pub fn widgets(&self) -> Vec<WidgetHandle> {
        self.widgets
            .iter()
            .map(|entry| WidgetHandle::new(&entry.widget))
            .collect()
    }

    // =========================================================================
    // Visibility, layout and frame entry points
    // =========================================================================

    /// Recompute position and size from the window size.
    ///
    /// Runs automatically when the window reports a resize.
    pub fn resize(&self) {
        let (position, size) = self.placement.resolve(self.window.size());
        self.panel.set_position(position);
        self.panel.set_size(size);
    }

    /// Become visible and fade in.
    pub fn show(&mut self) {
        self.panel.set_visible(true);
        self.fade = self.fade_to(1.0);
        debug!("showing panel");
    }

    /// Fade out, then become invisible once the fade completes.
    pub fn hide(&mut self) {
        let panel = Rc::downgrade(&self.panel);
        self.fade = self.fade_to(0.0).on_complete(move || {
            if let Some(panel) = panel.upgrade() {
                panel.set_visible(false);
            }
        });
        debug!("hiding panel");
    }

    fn fade_to(&self, target: f32) -> Tween {
        let theme = self.theme();
        Tween::new(self.alpha(), target, theme.fade_duration).with_easing(theme.fade_easing)
    }

    /// Advance the fade by `dt` and, every `update_frequency` frames,
    /// re-synchronize widgets with their bound values.
    pub fn update(&mut self, dt: f32) {
        let frame = self.frame;
        self.frame += 1;
        if !self.is_visible() {
            return;
        }
        self.fade.update(dt);

        let frequency = u64::from(self.theme().update_frequency.max(1));
        if frame % frequency == 0 {
            trace!("updating {} widgets on frame {frame}", self.widgets.len());
            for entry in &self.widgets {
                if let Ok(mut widget) = entry.widget.try_borrow_mut() {
                    widget.update();
                }
            }
        }
    }

    /// Render the panel into its offscreen surface and composite it onto
    /// `canvas` at the current opacity.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }

        let size = self.panel.size();
        self.surface.clear(Color::TRANSPARENT);
        self.surface.fill_rect(Rect::from_size(size), self.panel_color);
        for entry in &self.widgets {
            if let Ok(widget) = entry.widget.try_borrow() {
                widget.draw(&mut self.surface);
            }
        }

        let alpha = self.alpha();
        if self.panel.force_interaction() {
            canvas.fill_rect(self.window.bounds(), Color::BLACK.with_alpha(0.5 * alpha));
        }
        let limit = self.surface.size();
        let dest = Rect::from_origin_size(
            self.panel.position(),
            Size::new(size.width.min(limit.width), size.height.min(limit.height)),
        );
        canvas.draw_surface(&self.surface, dest, alpha);
    }

    // =========================================================================
    // Widget factories
    // =========================================================================

    /// Add a horizontal slider bound to `value`.
    pub fn add_slider(&mut self, name: &str, value: Binding<f32>, params: &str) -> WidgetHandle {
        let slider = Slider::new(&self.panel, name, value, &Params::parse(params));
        self.insert(slider).1
    }

    /// Add a two-axis pad bound to `value`.
    pub fn add_slider_2d(&mut self, name: &str, value: Binding<Point>, params: &str) -> WidgetHandle {
        let pad = Slider2D::new(&self.panel, name, value, &Params::parse(params));
        self.insert(pad).1
    }

    /// Add a button reporting its state to `handler`.
    pub fn add_button(
        &mut self,
        name: &str,
        handler: impl FnMut(bool) + 'static,
        params: &str,
    ) -> WidgetHandle {
        let button = Button::new(&self.panel, name, handler, &Params::parse(params));
        self.insert(button).1
    }

    /// Add a toggle button mirroring `linked`.
    pub fn add_linked_button(
        &mut self,
        name: &str,
        handler: impl FnMut(bool) + 'static,
        linked: Binding<bool>,
        params: &str,
    ) -> WidgetHandle {
        let button = LinkedButton::new(&self.panel, name, handler, linked, &Params::parse(params));
        self.insert(button).1
    }

    /// Add a text label.
    pub fn add_label(&mut self, name: &str, params: &str) -> WidgetHandle {
        let label = Label::new(&self.panel, name, &Params::parse(params));
        self.insert(label).1
    }

    /// Add a rolling graph of `value`.
    pub fn add_graph(&mut self, name: &str, value: Binding<f32>, params: &str) -> WidgetHandle {
        let graph = MovingGraph::new(&self.panel, name, value, &Params::parse(params));
        self.insert(graph).1
    }

    /// Add a slider followed by a button that also locks the slider while
    /// the button is down.
    pub fn add_toggle_slider(
        &mut self,
        slider_name: &str,
        value: Binding<f32>,
        button_name: &str,
        handler: impl FnMut(bool) + 'static,
        slider_params: &str,
        button_params: &str,
    ) -> (WidgetHandle, WidgetHandle) {
        let slider = Slider::new(&self.panel, slider_name, value, &Params::parse(slider_params));
        let (slider, slider_handle) = self.insert(slider);

        let mut button = Button::new(&self.panel, button_name, handler, &Params::parse(button_params));
        let slider = Rc::downgrade(&slider);
        button.add_event_handler(move |state| {
            if let Some(slider) = slider.upgrade() {
                if let Ok(mut slider) = slider.try_borrow_mut() {
                    slider.set_locked(state);
                }
            }
        });
        let (_, button_handle) = self.insert(button);
        (slider_handle, button_handle)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove every widget whose group equals `group`; returns how many.
    pub fn release_group(&mut self, group: &str) -> usize {
        let before = self.widgets.len();
        self.widgets.retain(|entry| entry.group != group);
        let released = before - self.widgets.len();
        debug!("released {released} widgets in group {group:?}");
        released
    }

    /// Remove a single widget; returns whether it was owned by this panel.
    pub fn remove(&mut self, handle: &WidgetHandle) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|entry| !handle.refers_to(&entry.widget));
        before != self.widgets.len()
    }

    fn insert<W: Widget>(&mut self, widget: W) -> (Rc<RefCell<W>>, WidgetHandle) {
        let group = widget.core().group().to_string();
        let interactive = widget.is_interactive();
        let widget = Rc::new(RefCell::new(widget));
        if interactive {
            connect_mouse(&widget, &self.window);
        }
        let erased: Rc<RefCell<dyn Widget>> = widget.clone();
        let handle = WidgetHandle::new(&erased);
        self.widgets.push(Entry {
            group,
            widget: erased,
        });
        (widget, handle)
    }
}

/// Claim presses landing on a visible panel, or anywhere when the panel
/// forces interaction.
fn hit_test_panel(panel: &PanelState, event: &mut MouseEvent) {
    if panel.is_visible()
        && (panel.force_interaction() || panel.bounds().contains_point(&event.position))
    {
        event.set_handled();
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("panel", &self.panel)
            .field("alpha", &self.alpha())
            .field("frame", &self.frame)
            .field("widgets", &self.widgets.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::{DrawCommand, Easing, RecordingCanvas};

    fn window() -> Rc<Window> {
        Window::new(Size::new(800.0, 600.0))
    }

    // =========================================================================
    // Construction and placement
    // =========================================================================

    #[test]
    fn test_defaults() {
        let window = window();
        let controller = Controller::new(&window, "{}");
        assert!(controller.is_visible());
        assert_eq!(controller.alpha(), 1.0);
        assert_eq!(controller.size(), Size::new(216.0, 600.0));
        assert_eq!(controller.position(), Point::ORIGIN);
        assert_eq!(controller.insert_position(), Point::new(10.0, 10.0));
        assert_eq!(controller.panel_color().to_argb(), 0xCC00_0000);
        assert_eq!(controller.depth(), 0);
    }

    #[test]
    fn test_invisible_start() {
        let window = window();
        let controller = Controller::new(&window, r#"{"visible":false}"#);
        assert!(!controller.is_visible());
        assert_eq!(controller.alpha(), 0.0);
    }

    #[test]
    fn test_centered_panel() {
        let window = window();
        let controller = Controller::new(&window, r#"{"width":200,"height":100,"centered":true}"#);
        assert_eq!(controller.bounds(), Rect::new(300.0, 250.0, 200.0, 100.0));
    }

    #[test]
    fn test_height_tracks_window_when_unspecified() {
        let window = window();
        let tracking = Controller::new(&window, "{}");
        let fixed = Controller::new(&window, r#"{"height":300}"#);
        window.set_size(Size::new(1024.0, 900.0));
        assert_eq!(tracking.size().height, 900.0);
        assert_eq!(fixed.size().height, 300.0);
        assert_eq!(fixed.position(), Point::ORIGIN);
    }

    #[test]
    fn test_malformed_params_use_defaults() {
        let window = window();
        let controller = Controller::new(&window, r#"{"width":"wide","panelColor":"0xNOPE""#);
        assert_eq!(controller.size().width, 216.0);
        assert_eq!(controller.panel_color(), Theme::default().panel_color);
    }

    // =========================================================================
    // Panel hit-test
    // =========================================================================

    #[test]
    fn test_press_inside_panel_is_claimed() {
        let window = window();
        let _controller = Controller::new(&window, "{}");
        assert!(window.mouse_down(Point::new(100.0, 300.0)).is_handled());
        assert!(!window.mouse_down(Point::new(500.0, 300.0)).is_handled());
    }

    #[test]
    fn test_dropping_controller_unsubscribes() {
        let window = window();
        let controller = Controller::new(&window, "{}");
        drop(controller);
        assert!(window.signal_mouse_down().is_empty());
        assert!(window.signal_resized().is_empty());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    #[test]
    fn test_draw_composites_panel() {
        let window = window();
        let mut controller = Controller::new(&window, "{}");
        controller.add_label("hello", "{}");
        let mut canvas = RecordingCanvas::new();
        controller.draw(&mut canvas);

        assert_eq!(canvas.command_count(), 1);
        match &canvas.commands()[0] {
            DrawCommand::Composite { commands, dest, alpha } => {
                assert_eq!(*alpha, 1.0);
                assert_eq!(*dest, Rect::new(0.0, 0.0, 216.0, 600.0));
                assert_eq!(commands[0], DrawCommand::Clear(Color::TRANSPARENT));
                assert!(matches!(commands[1], DrawCommand::FillRect { .. }));
                assert!(matches!(commands[2], DrawCommand::TextImage { .. }));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_force_interaction_dims_window() {
        let window = window();
        let mut controller = Controller::new(&window, r#"{"forceInteraction":true}"#);
        let mut canvas = RecordingCanvas::new();
        controller.draw(&mut canvas);
        assert_eq!(canvas.command_count(), 2);
        assert_eq!(
            canvas.commands()[0],
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                color: Color::BLACK.with_alpha(0.5),
            }
        );
    }

    #[test]
    fn test_fade_follows_theme_easing() {
        let window = window();
        let theme = Theme {
            fade_easing: Easing::EaseIn,
            ..Theme::default()
        };
        let mut controller = Controller::with_theme(&window, "{}", theme, Rc::new(MetricsRasterizer));
        controller.hide();
        controller.update(0.125);
        assert!((controller.alpha() - 0.75).abs() < 1e-6);
        controller.update(0.125);
        assert_eq!(controller.alpha(), 0.0);
        assert!(!controller.is_visible());
    }

    // =========================================================================
    // Removal
    // =========================================================================

    #[test]
    fn test_remove_single_widget() {
        let window = window();
        let mut controller = Controller::new(&window, "{}");
        let a = controller.add_label("a", "{}");
        let b = controller.add_label("b", "{}");
        assert!(controller.remove(&a));
        assert!(!controller.remove(&a));
        assert!(!a.is_alive());
        assert!(b.is_alive());
        assert_eq!(controller.widget_count(), 1);
    }

    #[test]
    fn test_handle_downcasts() {
        let window = window();
        let mut controller = Controller::new(&window, "{}");
        let handle = controller.add_slider("gain", Binding::new(0.5), r#"{"group":"mix"}"#);
        assert_eq!(handle.with(|s: &Slider| s.screen_value()), Some(108.0));
        assert_eq!(handle.with(|_: &Button| ()), None);
        assert_eq!(handle.group().as_deref(), Some("mix"));
        assert_eq!(handle.name().as_deref(), Some("gain"));
    }
}
