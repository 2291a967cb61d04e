//! Host window model: size plus the input signals panels subscribe to.

use crate::event::{MouseEvent, Signal};
use crate::geometry::{Point, Rect, Size};
use std::cell::Cell;
use std::rc::Rc;

/// A host window shared between the application and its panels.
///
/// The application owns the real window; it mirrors the size here and feeds
/// mouse input through [`Window::mouse_down`] and friends. Panels and widgets
/// subscribe to the signals with their routing priority.
#[derive(Debug)]
pub struct Window {
    size: Cell<Size>,
    mouse_down: Signal<MouseEvent>,
    mouse_drag: Signal<MouseEvent>,
    mouse_up: Signal<MouseEvent>,
    resized: Signal<Size>,
}

impl Window {
    /// Create a shared window of the given size.
    #[must_use]
    pub fn new(size: Size) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(size),
            mouse_down: Signal::new(),
            mouse_drag: Signal::new(),
            mouse_up: Signal::new(),
            resized: Signal::new(),
        })
    }

    /// Current size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Window-space bounds, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Window center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Record a new size and notify resize subscribers.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
        let mut size = size;
        self.resized.emit(&mut size);
    }

    /// Signal fired on button press.
    #[must_use]
    pub const fn signal_mouse_down(&self) -> &Signal<MouseEvent> {
        &self.mouse_down
    }

    /// Signal fired on pointer motion with a button held.
    #[must_use]
    pub const fn signal_mouse_drag(&self) -> &Signal<MouseEvent> {
        &self.mouse_drag
    }

    /// Signal fired on button release.
    #[must_use]
    pub const fn signal_mouse_up(&self) -> &Signal<MouseEvent> {
        &self.mouse_up
    }

    /// Signal fired after [`Window::set_size`].
    #[must_use]
    pub const fn signal_resized(&self) -> &Signal<Size> {
        &self.resized
    }

    /// Dispatch a press at `position`; returns the event so the caller can
    /// check whether a panel claimed it.
    pub fn mouse_down(&self, position: Point) -> MouseEvent {
        let mut event = MouseEvent::new(position);
        self.mouse_down.emit(&mut event);
        event
    }

    /// Dispatch a drag to `position`.
    pub fn mouse_drag(&self, position: Point) -> MouseEvent {
        let mut event = MouseEvent::new(position);
        self.mouse_drag.emit(&mut event);
        event
    }

    /// Dispatch a release at `position`.
    pub fn mouse_up(&self, position: Point) -> MouseEvent {
        let mut event = MouseEvent::new(position);
        self.mouse_up.emit(&mut event);
        event
    }
}
