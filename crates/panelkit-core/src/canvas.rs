//! Rendering capability contract and canvas implementations.
//!
//! Widgets never talk to a graphics API directly. They draw primitive shapes
//! and cached text images into a [`Canvas`]; the panel collects those into an
//! offscreen [`Surface`] and composites the surface onto the window canvas
//! with a uniform alpha.

use crate::{Color, Point, Rect, Size, TextImage};

/// Minimal drawing interface implemented by rendering backends.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw an open polyline.
    fn draw_path(&mut self, points: &[Point], color: Color, width: f32);

    /// Blit a cached text image with its top-left corner at `position`.
    fn draw_text_image(&mut self, image: &TextImage, position: Point);

    /// Composite the `dest`-sized top-left region of an offscreen surface
    /// at `dest`, with every texel's alpha multiplied by `alpha`.
    fn draw_surface(&mut self, surface: &Surface, dest: Rect, alpha: f32);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole target
    Clear(Color),
    /// Filled rectangle
    FillRect {
        /// Rectangle
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Stroked rectangle
    StrokeRect {
        /// Rectangle
        rect: Rect,
        /// Stroke color
        color: Color,
        /// Line width
        width: f32,
    },
    /// Open polyline (a line is a two-point path)
    Path {
        /// Vertices
        points: Vec<Point>,
        /// Stroke color
        color: Color,
        /// Line width
        width: f32,
    },
    /// Cached text image blit
    TextImage {
        /// The image
        image: TextImage,
        /// Top-left corner
        position: Point,
    },
    /// Offscreen surface composite
    Composite {
        /// Commands retained by the surface
        commands: Vec<DrawCommand>,
        /// Destination rectangle
        dest: Rect,
        /// Uniform alpha
        alpha: f32,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Stands in for a window when no GPU backend is attached, and lets tests
/// verify what was painted.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Add a raw draw command.
    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.draw_path(&[from, to], color, width);
    }

    fn draw_path(&mut self, points: &[Point], color: Color, width: f32) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn draw_text_image(&mut self, image: &TextImage, position: Point) {
        self.commands.push(DrawCommand::TextImage {
            image: image.clone(),
            position,
        });
    }

    fn draw_surface(&mut self, surface: &Surface, dest: Rect, alpha: f32) {
        self.commands.push(DrawCommand::Composite {
            commands: surface.commands().to_vec(),
            dest,
            alpha,
        });
    }
}

/// Fixed-size offscreen render target.
///
/// The size is chosen once and never changes, so a panel can grow (for
/// example when it tracks the window height) without reallocating.
#[derive(Debug)]
pub struct Surface {
    size: Size,
    canvas: RecordingCanvas,
}

impl Surface {
    /// Allocate a surface of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width as f32, height as f32),
            canvas: RecordingCanvas::new(),
        }
    }

    /// Pixel size of the surface.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Discard previous content and fill with `color`.
    pub fn clear(&mut self, color: Color) {
        self.canvas.clear();
        self.canvas.add_command(DrawCommand::Clear(color));
    }

    /// Commands drawn since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        self.canvas.commands()
    }
}

impl Canvas for Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.canvas.stroke_rect(rect, color, width);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.canvas.draw_line(from, to, color, width);
    }

    fn draw_path(&mut self, points: &[Point], color: Color, width: f32) {
        self.canvas.draw_path(points, color, width);
    }

    fn draw_text_image(&mut self, image: &TextImage, position: Point) {
        self.canvas.draw_text_image(image, position);
    }

    fn draw_surface(&mut self, surface: &Surface, dest: Rect, alpha: f32) {
        self.canvas.draw_surface(surface, dest, alpha);
    }
}
