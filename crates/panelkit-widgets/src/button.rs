//! Push and toggle buttons.

use crate::panel::PanelState;
use crate::slider::width_option;
use crate::widget::{Widget, WidgetCore};
use log::debug;
use panelkit_core::{Binding, Canvas, Color, Params, Point, Size};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Callback receiving a button's new state.
pub type ButtonHandler = Box<dyn FnMut(bool)>;

// =============================================================================
// Button
// =============================================================================

/// Clickable button reporting its state to registered handlers.
///
/// A stateful button (the default) toggles on each press and reports the new
/// state. A stateless button reports `true` on press and pops back up on
/// release without a second report.
///
/// Options: `width` (compact), `stateless` (false), `pressedColor` (active
/// stroke color).
pub struct Button {
    core: WidgetCore,
    pressed: bool,
    stateless: bool,
    pressed_color: Color,
    handlers: Vec<ButtonHandler>,
}

impl Button {
    /// Build a button at the panel's insertion cursor.
    #[must_use]
    pub fn new(
        panel: &Rc<PanelState>,
        name: &str,
        handler: impl FnMut(bool) + 'static,
        params: &Params,
    ) -> Self {
        let mut core = WidgetCore::new(panel, name, params);
        let theme = panel.theme();
        let width = width_option(params, theme.compact_width);
        core.set_size(Size::new(width, theme.widget_height));
        core.render_name();
        core.place();

        let stateless = params.get_bool("stateless", false);
        debug!("created button {name:?} (stateless: {stateless})");
        Self {
            core,
            pressed: false,
            stateless,
            pressed_color: params.get_color("pressedColor", theme.active_stroke_color),
            handlers: vec![Box::new(handler)],
        }
    }

    /// Whether the button is down.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the state without notifying handlers.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Whether the button pops back up on release.
    #[must_use]
    pub const fn is_stateless(&self) -> bool {
        self.stateless
    }

    /// Append a handler; handlers run in registration order.
    pub fn add_event_handler(&mut self, handler: impl FnMut(bool) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn notify(&mut self) {
        let state = self.pressed;
        for handler in &mut self.handlers {
            handler(state);
        }
    }

    fn draw_button(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        let bounds = core.bounds();
        let fill = if self.pressed {
            self.pressed_color
        } else {
            core.background_color()
        };
        canvas.fill_rect(bounds, fill);
        let outline = if core.is_active() {
            core.active_stroke_color()
        } else {
            core.stroke_color()
        };
        canvas.stroke_rect(bounds, outline, core.line_width());
        core.draw_label(canvas);
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("core", &self.core)
            .field("pressed", &self.pressed)
            .field("stateless", &self.stateless)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_button(canvas);
    }

    fn update(&mut self) {}

    fn handle_mouse_down(&mut self, _position: Point) {
        self.pressed = self.stateless || !self.pressed;
        self.notify();
    }

    fn handle_mouse_up(&mut self, _position: Point) {
        if self.stateless {
            self.pressed = false;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// LinkedButton
// =============================================================================

/// Toggle button mirroring a host-owned `Binding<bool>`.
///
/// [`Widget::update`] pulls the bound state; a press writes the toggled state
/// back before handlers run.
#[derive(Debug)]
pub struct LinkedButton {
    button: Button,
    linked: Binding<bool>,
}

impl LinkedButton {
    /// Build a linked button at the panel's insertion cursor.
    #[must_use]
    pub fn new(
        panel: &Rc<PanelState>,
        name: &str,
        handler: impl FnMut(bool) + 'static,
        linked: Binding<bool>,
        params: &Params,
    ) -> Self {
        let mut button = Button::new(panel, name, handler, params);
        button.stateless = false;
        button.set_pressed(linked.get());
        Self { button, linked }
    }

    /// Whether the button is down.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    /// The bound state.
    #[must_use]
    pub const fn binding(&self) -> &Binding<bool> {
        &self.linked
    }

    /// Append a handler.
    pub fn add_event_handler(&mut self, handler: impl FnMut(bool) + 'static) {
        self.button.add_event_handler(handler);
    }
}

impl Widget for LinkedButton {
    fn core(&self) -> &WidgetCore {
        &self.button.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.button.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.button.draw_button(canvas);
    }

    fn update(&mut self) {
        self.button.set_pressed(self.linked.get());
    }

    fn handle_mouse_down(&mut self, _position: Point) {
        let state = !self.linked.get();
        self.linked.set(state);
        self.button.set_pressed(state);
        self.button.notify();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::tests::test_panel;
    use crate::widget::{dispatch_mouse_down, dispatch_mouse_up};
    use panelkit_core::{DrawCommand, MouseEvent, RecordingCanvas, Rect};
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(bool) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |state| sink.borrow_mut().push(state))
    }

    fn click<W: Widget>(widget: &mut W) {
        let center = widget.core().bounds().center();
        dispatch_mouse_down(widget, &mut MouseEvent::new(center));
        dispatch_mouse_up(widget, &mut MouseEvent::new(center));
    }

    #[test]
    fn test_button_geometry() {
        let panel = test_panel(Point::ORIGIN);
        let button = Button::new(&panel, "go", |_| {}, &Params::default());
        assert_eq!(button.core().bounds(), Rect::new(10.0, 10.0, 96.0, 36.0));
        assert!(!button.is_stateless());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_stateful_button_toggles() {
        let panel = test_panel(Point::ORIGIN);
        let (log, handler) = recorder();
        let mut button = Button::new(&panel, "mute", handler, &Params::default());
        click(&mut button);
        assert!(button.is_pressed());
        click(&mut button);
        assert!(!button.is_pressed());
        assert_eq!(*log.borrow(), vec![true, false]);
    }

    #[test]
    fn test_stateless_button_pops_up() {
        let panel = test_panel(Point::ORIGIN);
        let (log, handler) = recorder();
        let mut button = Button::new(&panel, "reset", handler, &Params::parse(r#"{"stateless":true}"#));
        let center = button.core().bounds().center();
        dispatch_mouse_down(&mut button, &mut MouseEvent::new(center));
        assert!(button.is_pressed());
        dispatch_mouse_up(&mut button, &mut MouseEvent::new(center));
        assert!(!button.is_pressed());
        click(&mut button);
        assert_eq!(*log.borrow(), vec![true, true]);
    }

    #[test]
    fn test_stateless_button_locked_mid_press_pops_up() {
        let panel = test_panel(Point::ORIGIN);
        let mut button = Button::new(&panel, "fire", |_| {}, &Params::parse(r#"{"stateless":true}"#));
        let center = button.core().bounds().center();
        dispatch_mouse_down(&mut button, &mut MouseEvent::new(center));
        button.core_mut().set_locked(true);
        dispatch_mouse_up(&mut button, &mut MouseEvent::new(center));
        assert!(!button.is_pressed());
        assert!(!button.core().is_active());
    }

    #[test]
    fn test_extra_handlers_run_in_order() {
        let panel = test_panel(Point::ORIGIN);
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        let mut button = Button::new(&panel, "b", move |_| first.borrow_mut().push(1), &Params::default());
        button.add_event_handler(move |_| second.borrow_mut().push(2));
        assert_eq!(button.handler_count(), 2);
        click(&mut button);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_pressed_fill_color() {
        let panel = test_panel(Point::ORIGIN);
        let mut button = Button::new(&panel, "b", |_| {}, &Params::parse(r#"{"pressedColor":"0xFF00FF00"}"#));
        click(&mut button);
        let mut canvas = RecordingCanvas::new();
        button.draw(&mut canvas);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::FillRect { color, .. } if color == Color::from_argb(0xFF00_FF00)
        ));
    }

    #[test]
    fn test_linked_button_follows_binding() {
        let panel = test_panel(Point::ORIGIN);
        let linked = Binding::new(true);
        let mut button = LinkedButton::new(&panel, "loop", |_| {}, linked.clone(), &Params::default());
        assert!(button.is_pressed());
        linked.set(false);
        assert!(button.is_pressed());
        button.update();
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_linked_button_writes_before_handlers() {
        let panel = test_panel(Point::ORIGIN);
        let linked = Binding::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (probe, sink) = (linked.clone(), Rc::clone(&seen));
        let mut button = LinkedButton::new(
            &panel,
            "loop",
            move |state| sink.borrow_mut().push((state, probe.get())),
            linked.clone(),
            &Params::parse(r#"{"stateless":true}"#),
        );
        click(&mut button);
        click(&mut button);
        assert_eq!(*seen.borrow(), vec![(true, true), (false, false)]);
        assert!(!linked.get());
    }
}
