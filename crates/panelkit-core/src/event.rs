//! Mouse events and prioritized signal dispatch.
//!
//! A [`Signal`] is an ordered list of `(priority, handler)` pairs. Higher
//! priorities run first; equal priorities run in registration order. The
//! `handled` flag on [`MouseEvent`] travels through every handler: consuming
//! an event is cooperative, so each handler decides whether to honor it.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left button
    #[default]
    Left,
    /// Right button
    Right,
    /// Middle button
    Middle,
}

/// A mouse event in window space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// Pointer position in window pixels
    pub position: Point,
    /// Button involved
    pub button: MouseButton,
    handled: bool,
}

impl MouseEvent {
    /// Create an unhandled left-button event at `position`.
    #[must_use]
    pub const fn new(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Left,
            handled: false,
        }
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Whether some handler has claimed this event.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        self.handled
    }

    /// Claim this event.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    /// Position relative to `origin` (e.g. a panel's window position).
    #[must_use]
    pub fn local_position(&self, origin: Point) -> Point {
        self.position - origin
    }
}

type Handler<E> = Rc<RefCell<dyn FnMut(&mut E)>>;

struct Slot<E> {
    id: u64,
    priority: i32,
    handler: Handler<E>,
}

struct SlotList<E> {
    next_id: u64,
    slots: Vec<Slot<E>>,
}

trait SlotRegistry {
    fn remove(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<E> SlotRegistry for RefCell<SlotList<E>> {
    fn remove(&self, id: u64) {
        self.borrow_mut().slots.retain(|slot| slot.id != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow().slots.iter().any(|slot| slot.id == id)
    }
}

/// Prioritized multicast signal.
pub struct Signal<E> {
    inner: Rc<RefCell<SlotList<E>>>,
}

impl<E: 'static> Signal<E> {
    /// Create a signal with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotList {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Register `handler` at `priority`.
    pub fn connect<F>(&self, priority: i32, handler: F) -> Connection
    where
        F: FnMut(&mut E) + 'static,
    {
        let mut list = self.inner.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;

        // After every slot of the same or higher priority.
        let index = list
            .slots
            .iter()
            .position(|slot| slot.priority < priority)
            .unwrap_or(list.slots.len());
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        list.slots.insert(
            index,
            Slot {
                id,
                priority,
                handler,
            },
        );
        drop(list);

        let registry: Weak<dyn SlotRegistry> = Rc::downgrade(&self.inner) as Weak<dyn SlotRegistry>;
        Connection { id, registry }
    }

    /// Deliver `event` to every handler in priority order.
    ///
    /// Handlers run against a snapshot of the slot list, so they may connect
    /// or disconnect (themselves included) while the event is in flight. A
    /// slot disconnected by an earlier handler is skipped; a handler that is
    /// already running (re-entrant emit) is skipped too.
    pub fn emit(&self, event: &mut E) {
        let snapshot: Vec<(u64, Handler<E>)> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| (slot.id, Rc::clone(&slot.handler)))
            .collect();

        for (id, handler) in snapshot {
            if !self.inner.contains(id) {
                continue;
            }
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(event);
            }
        }
    }

    /// Number of connected handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Whether no handler is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.inner.borrow().slots.len())
            .finish()
    }
}

/// Handle to a connected handler.
#[derive(Clone)]
pub struct Connection {
    id: u64,
    registry: Weak<dyn SlotRegistry>,
}

impl Connection {
    /// Remove the handler. Does nothing if the signal is gone or the handler
    /// was already removed.
    pub fn disconnect(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }

    /// Whether the handler is still registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// A [`Connection`] that disconnects when dropped.
#[derive(Debug)]
pub struct ScopedConnection(Connection);

impl ScopedConnection {
    /// Borrow the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.0
    }
}

impl From<Connection> for ScopedConnection {
    fn from(connection: Connection) -> Self {
        Self(connection)
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.0.disconnect();
    }
}
