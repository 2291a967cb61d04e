//! Widget implementations for the panelkit overlay toolkit.

pub mod button;
pub mod graph;
pub mod label;
pub mod panel;
pub mod slider;
pub mod theme;
pub mod widget;

pub use button::{Button, ButtonHandler, LinkedButton};
pub use graph::MovingGraph;
pub use label::Label;
pub use panel::PanelState;
pub use slider::{Slider, Slider2D};
pub use theme::Theme;
pub use widget::{
    connect_mouse, dispatch_mouse_down, dispatch_mouse_drag, dispatch_mouse_up, Widget, WidgetCore,
};
