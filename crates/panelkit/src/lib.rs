//! Panelkit: tweakable control panels drawn over a host window.
//!
//! A [`Controller`] owns a column of widgets bound to host values through
//! [`Binding`]s, routes the window's mouse signals to them, and composites
//! the panel onto the window at its current opacity.
//!
//! ```
//! use panelkit::{Binding, Controller, RecordingCanvas, Size, Window};
//!
//! let window = Window::new(Size::new(800.0, 600.0));
//! let mut panel = Controller::new(&window, r#"{"width":216}"#);
//! let gain = Binding::new(0.5);
//! panel.add_slider("gain", gain.clone(), r#"{"min":0,"max":2}"#);
//!
//! panel.update(1.0 / 60.0);
//! let mut canvas = RecordingCanvas::new();
//! panel.draw(&mut canvas);
//! assert_eq!(canvas.command_count(), 1);
//! ```

mod controller;

pub use controller::{Controller, WidgetHandle};
pub use panelkit_core::*;
pub use panelkit_widgets as widgets;
pub use panelkit_widgets::{
    Button, Label, LinkedButton, MovingGraph, Slider, Slider2D, Theme, Widget, WidgetCore,
};
