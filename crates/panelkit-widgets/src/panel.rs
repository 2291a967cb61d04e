//! Panel context shared between a controller and its widgets.
//!
//! The controller owns a `Rc<PanelState>`; every widget keeps a
//! `Weak<PanelState>` back to it. Widgets read visibility and the panel's
//! window position during mouse dispatch, and move the insertion cursor while
//! they are being constructed.

use crate::Theme;
use panelkit_core::{Font, Point, Rect, Size, TextRasterizer};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared panel state.
pub struct PanelState {
    theme: Theme,
    rasterizer: Rc<dyn TextRasterizer>,
    depth: i32,
    force_interaction: bool,
    margin_large: f32,
    visible: Cell<bool>,
    position: Cell<Point>,
    size: Cell<Size>,
    insert_position: Cell<Point>,
}

impl PanelState {
    /// Create panel state with the cursor at `(margin_large, margin_large)`.
    #[must_use]
    pub fn new(
        theme: Theme,
        rasterizer: Rc<dyn TextRasterizer>,
        depth: i32,
        force_interaction: bool,
        margin_large: f32,
    ) -> Self {
        Self {
            theme,
            rasterizer,
            depth,
            force_interaction,
            margin_large,
            visible: Cell::new(true),
            position: Cell::new(Point::ORIGIN),
            size: Cell::new(Size::ZERO),
            insert_position: Cell::new(Point::new(margin_large, margin_large)),
        }
    }

    /// Defaults this panel was built with.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Rasterizer used for cached name images.
    #[must_use]
    pub fn rasterizer(&self) -> &dyn TextRasterizer {
        self.rasterizer.as_ref()
    }

    /// Routing priority of this panel's widgets.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Whether the panel captures clicks outside its bounds.
    #[must_use]
    pub const fn force_interaction(&self) -> bool {
        self.force_interaction
    }

    /// Outer margin.
    #[must_use]
    pub const fn margin_large(&self) -> f32 {
        self.margin_large
    }

    /// Resolve a font style key.
    #[must_use]
    pub fn font(&self, style: &str) -> &Font {
        self.theme.fonts.get(style)
    }

    // =========================================================================
    // Visibility and placement
    // =========================================================================

    /// Whether the panel is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Set the visible flag.
    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Window-space top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// Set the window-space top-left corner.
    pub fn set_position(&self, position: Point) {
        self.position.set(position);
    }

    /// Panel size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Set the panel size.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    /// Panel-local bounds, anchored at the origin.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Window-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    // =========================================================================
    // Insertion cursor
    // =========================================================================

    /// Where the next widget will be placed, in panel-local space.
    #[must_use]
    pub fn insert_position(&self) -> Point {
        self.insert_position.get()
    }

    /// Move the cursor by `delta` (continue the current row).
    pub fn offset_insert_position(&self, delta: Point) {
        self.move_cursor(self.insert_position() + delta);
    }

    /// Start a new row `row_height` below the current one.
    pub fn reset_insert_position(&self, row_height: f32) {
        let cursor = self.insert_position();
        self.move_cursor(Point::new(self.margin_large, cursor.y + row_height));
    }

    fn move_cursor(&self, to: Point) {
        let size = self.size();
        let max = Point::new(size.width.max(0.0), size.height.max(0.0));
        self.insert_position.set(to.clamp(Point::ORIGIN, max));
    }
}

impl fmt::Debug for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelState")
            .field("depth", &self.depth)
            .field("force_interaction", &self.force_interaction)
            .field("visible", &self.is_visible())
            .field("position", &self.position())
            .field("size", &self.size())
            .field("insert_position", &self.insert_position())
            .finish_non_exhaustive()
    }
}
