//! Host-owned values shared with widgets.
//!
//! A slider does not own the number it edits: the application does, and the
//! slider writes through to it while dragging. `Binding<T>` is that shared
//! cell. Clones alias the same storage, so the host keeps one clone and hands
//! another to the widget.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared, single-threaded value cell.
pub struct Binding<T: Copy> {
    cell: Rc<Cell<T>>,
}

impl<T: Copy> Binding<T> {
    /// Create a binding holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    /// Read the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Overwrite the value.
    pub fn set(&self, value: T) {
        self.cell.set(value);
    }

    /// Whether two bindings alias the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Copy> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Copy + Default> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}
