//! End-to-end tests driving panels through a window's mouse signals.

use panelkit::{
    Binding, Button, Controller, DrawCommand, LinkedButton, MouseEvent, MovingGraph, Point,
    RecordingCanvas, Rect, Size, Slider, Slider2D, Widget, Window,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn window() -> Rc<Window> {
    Window::new(Size::new(800.0, 600.0))
}

fn click(window: &Window, at: Point) {
    window.mouse_down(at);
    window.mouse_up(at);
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_default_slider_fills_row() {
    let window = window();
    let mut panel = Controller::new(&window, r#"{"width":216,"marginLarge":10}"#);
    let slider = panel.add_slider("gain", Binding::new(0.0), "{}");
    assert_eq!(slider.bounds(), Some(Rect::new(10.0, 10.0, 196.0, 36.0)));
}

#[test]
fn test_widgets_stack_and_continue_rows() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let a = panel.add_slider("a", Binding::new(0.0), "{}");
    let b = panel.add_button("b", |_| {}, r#"{"clear":false}"#);
    let c = panel.add_button("c", |_| {}, "{}");
    let d = panel.add_label("d", "{}");

    assert_eq!(a.bounds().map(|r| r.origin()), Some(Point::new(10.0, 10.0)));
    assert_eq!(b.bounds().map(|r| r.origin()), Some(Point::new(10.0, 50.0)));
    assert_eq!(c.bounds().map(|r| r.origin()), Some(Point::new(110.0, 50.0)));
    assert_eq!(d.bounds().map(|r| r.origin()), Some(Point::new(10.0, 90.0)));
}

// =============================================================================
// Sliders
// =============================================================================

#[test]
fn test_slider_press_then_drag_clamps() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let slider = panel.add_slider("gain", value.clone(), r#"{"min":0,"max":10}"#);

    window.mouse_down(Point::new(108.0, 28.0));
    assert!((value.get() - 5.0).abs() < 1e-4);
    assert_eq!(slider.with(|s: &Slider| s.core().is_active()), Some(true));

    window.mouse_drag(Point::new(500.0, 28.0));
    assert_eq!(value.get(), 10.0);
    window.mouse_drag(Point::new(-40.0, 28.0));
    assert_eq!(value.get(), 0.0);

    window.mouse_up(Point::new(-40.0, 28.0));
    assert_eq!(slider.with(|s: &Slider| s.core().is_active()), Some(false));
    window.mouse_drag(Point::new(500.0, 28.0));
    assert_eq!(value.get(), 0.0);
}

#[test]
fn test_slider_follows_host_value() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let slider = panel.add_slider("gain", value.clone(), r#"{"min":0,"max":10}"#);

    value.set(7.5);
    panel.update(0.016);
    assert_eq!(slider.with(|s: &Slider| s.screen_value()), Some(153.0));
}

#[test]
fn test_slider_press_outside_is_ignored() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.25);
    panel.add_slider("gain", value.clone(), "{}");

    let event = window.mouse_down(Point::new(108.0, 200.0));
    assert!(event.is_handled());
    assert_eq!(value.get(), 0.25);
}

#[test]
fn test_slider_2d_y_grows_upward() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(Point::new(0.0, 1.0));
    let pad = panel.add_slider_2d("pan", value.clone(), "{}");

    assert_eq!(
        pad.with(|p: &Slider2D| p.screen_value()),
        Some(Point::new(14.0, 14.0))
    );

    window.mouse_down(Point::new(102.0, 102.0));
    assert_eq!(value.get(), Point::new(1.0, 0.0));
    window.mouse_drag(Point::new(58.0, 58.0));
    assert_eq!(value.get(), Point::new(0.5, 0.5));
    window.mouse_up(Point::new(58.0, 58.0));
}

#[test]
fn test_locked_slider_ignores_input() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.5);
    panel.add_slider("gain", value.clone(), r#"{"locked":true}"#);

    window.mouse_down(Point::new(30.0, 28.0));
    window.mouse_drag(Point::new(190.0, 28.0));
    assert_eq!(value.get(), 0.5);
}

// =============================================================================
// Buttons
// =============================================================================

#[test]
fn test_button_reports_toggles() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    panel.add_button("mute", move |state| sink.borrow_mut().push(state), "{}");

    click(&window, Point::new(50.0, 28.0));
    click(&window, Point::new(50.0, 28.0));
    click(&window, Point::new(300.0, 28.0));
    assert_eq!(*log.borrow(), vec![true, false]);
}

#[test]
fn test_linked_button_writes_binding() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let looping = Binding::new(false);
    let button = panel.add_linked_button("loop", |_| {}, looping.clone(), "{}");

    click(&window, Point::new(50.0, 28.0));
    assert!(looping.get());

    looping.set(false);
    panel.update(0.016);
    assert_eq!(button.with(|b: &LinkedButton| b.is_pressed()), Some(false));
}

#[test]
fn test_toggle_slider_locks_while_pressed() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let (slider, button) = panel.add_toggle_slider("gain", value.clone(), "hold", |_| {}, "{}", "{}");

    let button_center = button.bounds().map(|b| b.center()).unwrap_or(Point::ORIGIN);
    click(&window, button_center);
    assert_eq!(button.with(|b: &Button| b.is_pressed()), Some(true));
    assert_eq!(slider.with(|s: &Slider| s.core().is_locked()), Some(true));

    window.mouse_down(Point::new(190.0, 28.0));
    window.mouse_up(Point::new(190.0, 28.0));
    assert_eq!(value.get(), 0.0);

    click(&window, button_center);
    assert_eq!(slider.with(|s: &Slider| s.core().is_locked()), Some(false));
    window.mouse_down(Point::new(108.0, 28.0));
    assert!((value.get() - 0.5).abs() < 1e-4);
}

// =============================================================================
// Graph and update throttling
// =============================================================================

#[test]
fn test_updates_run_every_other_frame() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let graph = panel.add_graph("fps", value.clone(), r#"{"capacity":8}"#);
    assert_eq!(graph.with(MovingGraph::len), Some(1));

    for frame in 1..=4 {
        value.set(frame as f32);
        panel.update(0.016);
    }
    assert_eq!(
        graph.with(|g: &MovingGraph| g.samples().collect::<Vec<_>>()),
        Some(vec![0.0, 1.0, 3.0])
    );
}

#[test]
fn test_graph_keeps_newest_samples() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let graph = panel.add_graph("fps", value.clone(), r#"{"capacity":3}"#);

    for frame in 1..=20 {
        value.set(frame as f32);
        panel.update(0.016);
    }
    assert_eq!(
        graph.with(|g: &MovingGraph| g.samples().collect::<Vec<_>>()),
        Some(vec![15.0, 17.0, 19.0])
    );
}

#[test]
fn test_graph_ignores_mouse() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    panel.add_graph("fps", Binding::new(0.0), "{}");
    assert_eq!(window.signal_mouse_down().len(), 1);
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn test_hide_fades_then_goes_quiet() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    let graph = panel.add_graph("fps", value.clone(), "{}");

    panel.hide();
    assert!(panel.is_visible());
    for _ in 0..3 {
        panel.update(0.25);
    }
    assert!(!panel.is_visible());
    assert_eq!(panel.alpha(), 0.0);

    let samples = graph.with(MovingGraph::len);
    panel.update(0.016);
    panel.update(0.016);
    assert_eq!(graph.with(MovingGraph::len), samples);

    let mut canvas = RecordingCanvas::new();
    panel.draw(&mut canvas);
    assert!(canvas.is_empty());
    assert!(!window.mouse_down(Point::new(50.0, 50.0)).is_handled());
}

#[test]
fn test_fading_panel_accepts_input_until_hidden() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    panel.add_slider("gain", value.clone(), "{}");

    panel.hide();
    panel.update(0.1);
    assert!(panel.is_visible());
    let event = window.mouse_down(Point::new(108.0, 28.0));
    window.mouse_up(Point::new(108.0, 28.0));
    assert!(event.is_handled());
    assert!((value.get() - 0.5).abs() < 1e-4);

    panel.update(0.25);
    assert!(!panel.is_visible());
    value.set(0.0);
    let event = window.mouse_down(Point::new(108.0, 28.0));
    window.mouse_up(Point::new(108.0, 28.0));
    assert!(!event.is_handled());
    assert_eq!(value.get(), 0.0);
}

#[test]
fn test_show_fades_in() {
    let window = window();
    let mut panel = Controller::new(&window, r#"{"visible":false}"#);
    panel.show();
    assert!(panel.is_visible());
    assert_eq!(panel.alpha(), 0.0);
    panel.update(0.125);
    assert!(panel.alpha() > 0.0 && panel.alpha() < 1.0);
    panel.update(0.125);
    assert_eq!(panel.alpha(), 1.0);
}

#[test]
fn test_show_during_fade_out_stays_visible() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    panel.hide();
    panel.update(0.1);
    panel.show();
    for _ in 0..4 {
        panel.update(0.25);
    }
    assert!(panel.is_visible());
    assert_eq!(panel.alpha(), 1.0);
}

#[test]
fn test_draw_uses_fade_alpha() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    panel.hide();
    panel.update(0.125);
    let mut canvas = RecordingCanvas::new();
    panel.draw(&mut canvas);
    match canvas.commands() {
        [DrawCommand::Composite { alpha, .. }] => assert!((alpha - 0.5).abs() < 1e-4),
        other => panic!("unexpected commands {other:?}"),
    }
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn test_force_interaction_claims_everything() {
    let window = window();
    let _panel = Controller::new(&window, r#"{"forceInteraction":true}"#);
    assert!(window.mouse_down(Point::new(700.0, 500.0)).is_handled());
}

#[test]
fn test_panel_claims_before_widgets_run() {
    let window = window();
    let mut panel = Controller::new(&window, r#"{"depth":5}"#);
    panel.add_slider("gain", Binding::new(0.0), "{}");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _probe = window
        .signal_mouse_down()
        .connect(50, move |event: &mut MouseEvent| sink.borrow_mut().push(event.is_handled()));

    window.mouse_down(Point::new(108.0, 28.0));
    assert_eq!(*seen.borrow(), vec![true]);
}

#[test]
fn test_deeper_panel_sees_press_first() {
    let window = window();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut low = Controller::new(&window, r#"{"depth":0}"#);
    let mut high = Controller::new(&window, r#"{"depth":10}"#);
    let (a, b) = (Rc::clone(&order), Rc::clone(&order));
    low.add_button("low", move |_| a.borrow_mut().push("low"), "{}");
    high.add_button("high", move |_| b.borrow_mut().push("high"), "{}");

    click(&window, Point::new(50.0, 28.0));
    assert_eq!(*order.borrow(), vec!["high", "low"]);
}

#[test]
fn test_centered_panel_routes_in_local_space() {
    let window = window();
    let mut panel = Controller::new(&window, r#"{"width":216,"height":200,"centered":true}"#);
    let value = Binding::new(0.0);
    panel.add_slider("gain", value.clone(), "{}");
    let origin = panel.position();
    assert_eq!(origin, Point::new(292.0, 200.0));

    window.mouse_down(origin + Point::new(198.0, 28.0));
    assert_eq!(value.get(), 1.0);
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn test_release_group_removes_members_only() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let a = panel.add_slider("a", Binding::new(0.0), r#"{"group":"fx"}"#);
    let b = panel.add_button("b", |_| {}, r#"{"group":"fx"}"#);
    let c = panel.add_label("c", "{}");

    assert_eq!(panel.release_group("fx"), 2);
    assert!(!a.is_alive());
    assert!(!b.is_alive());
    assert!(c.is_alive());
    assert_eq!(panel.widget_count(), 1);
    assert_eq!(window.signal_mouse_down().len(), 1);
    assert_eq!(panel.release_group("fx"), 0);
}

#[test]
fn test_release_mid_drag_is_safe() {
    let window = window();
    let mut panel = Controller::new(&window, "{}");
    let value = Binding::new(0.0);
    panel.add_slider("gain", value.clone(), r#"{"group":"tmp"}"#);

    window.mouse_down(Point::new(108.0, 28.0));
    let pressed = value.get();
    panel.release_group("tmp");
    window.mouse_drag(Point::new(190.0, 28.0));
    window.mouse_up(Point::new(190.0, 28.0));
    assert_eq!(value.get(), pressed);
}

#[test]
fn test_release_from_own_handler() {
    let window = window();
    let panel = Rc::new(RefCell::new(Controller::new(&window, "{}")));
    let weak = Rc::downgrade(&panel);
    let button = panel.borrow_mut().add_button(
        "close",
        move |_| {
            if let Some(panel) = weak.upgrade() {
                if let Ok(mut panel) = panel.try_borrow_mut() {
                    panel.release_group("dialog");
                }
            }
        },
        r#"{"group":"dialog"}"#,
    );

    click(&window, Point::new(50.0, 28.0));
    assert!(!button.is_alive());
    assert_eq!(panel.borrow().widget_count(), 0);
}

proptest! {
    #[test]
    fn prop_drag_always_lands_in_range(
        min in -100.0f32..0.0,
        span in 1.0f32..100.0,
        xs in prop::collection::vec(-200.0f32..1000.0, 1..16),
    ) {
        let window = window();
        let mut panel = Controller::new(&window, "{}");
        let value = Binding::new(min);
        panel.add_slider("v", value.clone(), &format!(r#"{{"min":{min},"max":{}}}"#, min + span));

        window.mouse_down(Point::new(108.0, 28.0));
        for x in xs {
            window.mouse_drag(Point::new(x, 28.0));
            let v = value.get();
            prop_assert!(v >= min - 1e-3 && v <= min + span + 1e-3);
        }
    }
}
