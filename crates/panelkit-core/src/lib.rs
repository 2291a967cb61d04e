//! Core types and traits for the panelkit overlay toolkit.
//!
//! This crate provides the pieces every panel and widget builds on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`lmap`]
//! - Color representation: [`Color`] with `0xAARRGGBB` parsing
//! - The rendering contract: [`Canvas`], [`Surface`], [`RecordingCanvas`]
//! - Text: [`Font`], [`FontSet`], [`TextImage`], [`TextRasterizer`]
//! - Input: [`MouseEvent`], [`Signal`], [`Window`]
//! - Host state: [`Binding`]
//! - Animation: [`Tween`], [`Easing`]
//! - Configuration: [`Params`]

pub mod animation;
mod binding;
pub mod canvas;
mod color;
pub mod event;
mod geometry;
pub mod params;
pub mod text;
mod window;

pub use animation::{Easing, Tween};
pub use binding::Binding;
pub use canvas::{Canvas, DrawCommand, RecordingCanvas, Surface};
pub use color::{Color, ColorParseError};
pub use event::{Connection, MouseButton, MouseEvent, ScopedConnection, Signal};
pub use geometry::{lmap, Point, Rect, Size};
pub use params::{ParamError, Params};
pub use text::{Font, FontSet, MetricsRasterizer, TextAlign, TextImage, TextRasterizer};
pub use window::Window;
