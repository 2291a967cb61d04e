//! Widget trait, shared widget state, and mouse dispatch.
//!
//! Every widget variant embeds a [`WidgetCore`] and implements [`Widget`].
//! Hit-testing and activation live in the `dispatch_mouse_*` functions, which
//! variants cannot override; variants only see the `handle_mouse_*` hooks,
//! called with panel-local positions once the dispatch policy has let an
//! event through.

use crate::panel::PanelState;
use log::debug;
use panelkit_core::{
    Canvas, Color, Font, MouseEvent, Params, Point, Rect, ScopedConnection, Signal, Size,
    TextAlign, TextImage, Window,
};
use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Behaviour implemented by every widget variant.
pub trait Widget: Any {
    /// Shared widget state.
    fn core(&self) -> &WidgetCore;

    /// Mutable shared widget state.
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Render into panel-local space.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Re-synchronize from bound external state.
    fn update(&mut self);

    /// Press inside the widget's bounds.
    fn handle_mouse_down(&mut self, _position: Point) {}

    /// Pointer motion while active, wherever the pointer is.
    fn handle_mouse_drag(&mut self, _position: Point) {}

    /// Release while active.
    fn handle_mouse_up(&mut self, _position: Point) {}

    /// Whether the widget subscribes to mouse input.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Upcast for typed access through type-erased handles.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access through type-erased handles.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// State common to all widgets.
#[derive(Debug)]
pub struct WidgetCore {
    name: String,
    group: String,
    icon: bool,
    locked: bool,
    clear: bool,
    name_color: Color,
    background_color: Color,
    stroke_color: Color,
    active_stroke_color: Color,
    line_width: f32,
    alignment: TextAlign,
    font: Font,
    position: Point,
    size: Size,
    active: bool,
    name_image: Option<TextImage>,
    panel: Weak<PanelState>,
    connections: Vec<ScopedConnection>,
}

impl WidgetCore {
    /// Parse the options shared by every widget.
    ///
    /// Recognized keys: `group`, `icon`, `locked`, `clear`, `nameColor`,
    /// `backgroundColor`, `justification`, `style`.
    #[must_use]
    pub fn new(panel: &Rc<PanelState>, name: &str, params: &Params) -> Self {
        let theme = panel.theme();
        let icon = params.get_bool("icon", false);
        let style = if params.has("style") {
            params.get_string("style", "label")
        } else if icon {
            "icon".to_string()
        } else {
            "label".to_string()
        };

        Self {
            name: name.to_string(),
            group: params.get_string("group", ""),
            icon,
            locked: params.get_bool("locked", false),
            clear: params.get_bool("clear", true),
            name_color: params.get_color("nameColor", theme.name_color),
            background_color: params.get_color("backgroundColor", theme.background_color),
            stroke_color: theme.stroke_color,
            active_stroke_color: theme.active_stroke_color,
            line_width: theme.line_width,
            alignment: TextAlign::from_justification(&params.get_string("justification", "center")),
            font: panel.font(&style).clone(),
            position: panel.insert_position(),
            size: Size::ZERO,
            active: false,
            name_image: None,
            panel: Rc::downgrade(panel),
            connections: Vec::new(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group tag; empty when ungrouped.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Whether the name is an icon glyph.
    #[must_use]
    pub const fn is_icon(&self) -> bool {
        self.icon
    }

    /// Whether interaction is disabled.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Enable or disable interaction.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Whether this widget starts a new layout row.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.clear
    }

    /// Whether a pointer button is held on this widget.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Name text color.
    #[must_use]
    pub const fn name_color(&self) -> Color {
        self.name_color
    }

    /// Background fill color.
    #[must_use]
    pub const fn background_color(&self) -> Color {
        self.background_color
    }

    /// Idle outline color.
    #[must_use]
    pub const fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Outline color while active.
    #[must_use]
    pub const fn active_stroke_color(&self) -> Color {
        self.active_stroke_color
    }

    /// Outline stroke width.
    #[must_use]
    pub const fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Name alignment.
    #[must_use]
    pub const fn alignment(&self) -> TextAlign {
        self.alignment
    }

    /// Resolved font.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Top-left corner in panel-local space.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Widget size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Panel-local bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// The cached name image, once rendered.
    #[must_use]
    pub const fn name_image(&self) -> Option<&TextImage> {
        self.name_image.as_ref()
    }

    /// The owning panel, if it still exists.
    #[must_use]
    pub fn panel(&self) -> Option<Rc<PanelState>> {
        self.panel.upgrade()
    }

    /// Number of live input subscriptions.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|c| c.connection().is_connected())
            .count()
    }

    // =========================================================================
    // Construction steps
    // =========================================================================

    /// Set the widget size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Rasterize the name once, wrapping at the widget width.
    pub fn render_name(&mut self) {
        let Some(panel) = self.panel() else {
            return;
        };
        let image = panel.rasterizer().rasterize(
            &self.name,
            &self.font,
            self.name_color,
            self.alignment,
            self.size.width,
        );
        self.name_image = Some(image);
    }

    /// Take the panel's insertion cursor as this widget's position and
    /// advance the cursor past it.
    pub fn place(&mut self) {
        let Some(panel) = self.panel() else {
            return;
        };
        self.position = panel.insert_position();
        let margin = panel.theme().margin_small;
        if self.clear {
            panel.reset_insert_position(self.size.height + margin);
        } else {
            panel.offset_insert_position(Point::new(self.size.width + margin, 0.0));
        }
        debug!(
            "placed widget {:?} at ({}, {}) size {}x{}",
            self.name, self.position.x, self.position.y, self.size.width, self.size.height
        );
    }

    /// Blit the cached name image centered in the bounds.
    pub fn draw_label(&self, canvas: &mut dyn Canvas) {
        if let Some(image) = &self.name_image {
            let offset = (self.bounds().center() - image.size.half()).trunc();
            canvas.draw_text_image(image, offset);
        }
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

// =============================================================================
// Dispatch policy
// =============================================================================

/// Route a press: activate and claim it when the panel is visible, the
/// widget unlocked, and the press inside the widget's bounds.
pub fn dispatch_mouse_down<W: Widget + ?Sized>(widget: &mut W, event: &mut MouseEvent) {
    let Some(panel) = widget.core().panel() else {
        return;
    };
    if !panel.is_visible() || widget.core().is_locked() {
        return;
    }
    let local = event.local_position(panel.position());
    if widget.core().bounds().contains_point(&local) {
        widget.core_mut().set_active(true);
        widget.handle_mouse_down(local);
        event.set_handled();
    }
}

/// Route a drag to an active widget. Drags are not hit-tested.
pub fn dispatch_mouse_drag<W: Widget + ?Sized>(widget: &mut W, event: &mut MouseEvent) {
    if !widget.core().is_active() {
        return;
    }
    let Some(panel) = widget.core().panel() else {
        return;
    };
    if panel.is_visible() && !widget.core().is_locked() {
        widget.handle_mouse_drag(event.local_position(panel.position()));
    }
}

/// Route a release: deactivate an active widget and run its hook, without
/// claiming the event.
///
/// The hook runs even when the widget was locked or the panel hidden after
/// the press, so press state never outlives the press.
pub fn dispatch_mouse_up<W: Widget + ?Sized>(widget: &mut W, event: &mut MouseEvent) {
    if !widget.core().is_active() {
        return;
    }
    widget.core_mut().set_active(false);
    let local = widget
        .core()
        .panel()
        .map_or(event.position, |panel| event.local_position(panel.position()));
    widget.handle_mouse_up(local);
}

/// Subscribe a widget to the window's mouse signals at its panel's depth.
///
/// The subscriptions hold only a weak reference; the widget owns the
/// connections, so dropping the widget unsubscribes it.
pub fn connect_mouse<W: Widget>(widget: &Rc<RefCell<W>>, window: &Window) {
    let Some(panel) = widget.borrow().core().panel() else {
        return;
    };
    let depth = panel.depth();
    let erased: Rc<RefCell<dyn Widget>> = widget.clone();
    let weak = Rc::downgrade(&erased);

    let connections = [
        route(window.signal_mouse_down(), depth, &weak, Phase::Down),
        route(window.signal_mouse_drag(), depth, &weak, Phase::Drag),
        route(window.signal_mouse_up(), depth, &weak, Phase::Up),
    ];
    widget.borrow_mut().core_mut().connections.extend(connections);
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Down,
    Drag,
    Up,
}

fn route(
    signal: &Signal<MouseEvent>,
    priority: i32,
    widget: &Weak<RefCell<dyn Widget>>,
    phase: Phase,
) -> ScopedConnection {
    let widget = widget.clone();
    signal
        .connect(priority, move |event: &mut MouseEvent| {
            let Some(widget) = widget.upgrade() else {
                return;
            };
            // Already borrowed means the widget is inside its own callback.
            let Ok(mut widget) = widget.try_borrow_mut() else {
                return;
            };
            let widget = &mut *widget;
            match phase {
                Phase::Down => dispatch_mouse_down(widget, event),
                Phase::Drag => dispatch_mouse_drag(widget, event),
                Phase::Up => dispatch_mouse_up(widget, event),
            }
        })
        .into()
}
