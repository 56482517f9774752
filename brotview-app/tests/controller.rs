use std::time::{Duration, Instant};

use brotview_app::{
    GestureOutcome, GestureState, PanRedraw, PointerButton, ViewOptions, ViewportController,
};
use brotview_core::{Complex, FractalKind, ViewSettings, Window};

const EPSILON: f64 = 1e-12;
const SIZE: u32 = 100;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn window_approx_eq(a: &Window, b: &Window) -> bool {
    approx_eq(a.x_min, b.x_min)
        && approx_eq(a.x_max, b.x_max)
        && approx_eq(a.y_min, b.y_min)
        && approx_eq(a.y_max, b.y_max)
}

fn options(max_iterations: u32, pan_redraw: PanRedraw) -> ViewOptions {
    ViewOptions {
        settings: ViewSettings::new(max_iterations, 1.25).unwrap(),
        pan_redraw,
        repaint: None,
    }
}

fn mandelbrot() -> ViewportController {
    let mut view =
        ViewportController::mandelbrot(SIZE, SIZE, options(64, PanRedraw::EveryMove)).unwrap();
    assert!(view.wait_for_render());
    view
}

fn julia(c: Complex) -> ViewportController {
    let mut view =
        ViewportController::julia(c, SIZE, SIZE, options(64, PanRedraw::EveryMove)).unwrap();
    assert!(view.wait_for_render());
    view
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn starts_idle_on_initial_window() {
    let view = mandelbrot();
    assert_eq!(view.window(), Window::INITIAL);
    assert_eq!(view.zoomed(), 1.0);
    assert_eq!(view.gesture(), GestureState::Idle);
    assert_eq!(view.size(), (SIZE, SIZE));
    let buffer = view.buffer().expect("initial frame");
    assert_eq!((buffer.width, buffer.height), (SIZE, SIZE));
}

#[test]
fn poll_eventually_delivers_the_first_frame() {
    let mut view =
        ViewportController::mandelbrot(32, 32, options(32, PanRedraw::EveryMove)).unwrap();
    let deadline = Instant::now() + Duration::from_secs(10);
    while !view.poll() {
        assert!(Instant::now() < deadline, "render never arrived");
        std::thread::sleep(Duration::from_millis(2));
    }
    assert!(view.buffer().is_some());
    assert!(!view.is_rendering());
}

#[test]
fn invalid_size_is_rejected() {
    assert!(ViewportController::mandelbrot(0, 10, ViewOptions::default()).is_err());
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn double_click_at_center_zooms_in() {
    let mut view = mandelbrot();
    let outcome = view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    assert!(matches!(outcome, GestureOutcome::RenderRequested));
    assert_eq!(view.gesture(), GestureState::Generating);
    assert!(approx_eq(view.zoomed(), 1.25));
    let expected = Window::new(-2.0, 2.0, -2.0, 2.0).unwrap();
    assert!(window_approx_eq(&view.window(), &expected), "{}", view.window());

    assert!(view.wait_for_render());
    assert_eq!(view.gesture(), GestureState::Idle);
    let frame = view.frame().unwrap();
    assert_eq!(frame.job.window, view.window());
}

#[test]
fn secondary_double_click_zooms_out() {
    let mut view = mandelbrot();
    view.on_click(50.0, 50.0, PointerButton::Secondary, 2);
    assert!(approx_eq(view.zoomed(), 0.8));
    let w = view.window();
    assert!(approx_eq(w.width(), 6.25));
    assert!(approx_eq(w.x_min + w.x_max, 0.0));
}

#[test]
fn zoom_keeps_the_clicked_point_under_the_cursor() {
    let mut view = mandelbrot();
    let (sx, sy) = (20.0, 70.0);
    let before = view.plane_point(sx, sy);
    view.on_click(sx, sy, PointerButton::Primary, 2);
    let after = view.plane_point(sx, sy);
    assert!(approx_eq(before.re, after.re));
    assert!(approx_eq(before.im, after.im));
}

#[test]
fn zoom_in_then_out_restores_window() {
    let mut view = mandelbrot();
    view.on_click(30.0, 60.0, PointerButton::Primary, 2);
    view.wait_for_render();
    view.on_click(30.0, 60.0, PointerButton::Secondary, 2);
    view.wait_for_render();
    assert!(window_approx_eq(&view.window(), &Window::INITIAL), "{}", view.window());
    assert!(approx_eq(view.zoomed(), 1.0));
}

#[test]
fn double_click_while_dragging_is_ignored() {
    let mut view = mandelbrot();
    view.on_press(10.0, 10.0);
    assert_eq!(view.gesture(), GestureState::Dragging);
    let outcome = view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    assert!(outcome.is_ignored());
    assert_eq!(view.window(), Window::INITIAL);
    assert_eq!(view.zoomed(), 1.0);
    assert_eq!(view.gesture(), GestureState::Dragging);
}

#[test]
fn double_click_while_generating_is_ignored() {
    let mut view = mandelbrot();
    view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    let window = view.window();
    let outcome = view.on_click(10.0, 10.0, PointerButton::Primary, 2);
    assert!(outcome.is_ignored());
    assert_eq!(view.window(), window);
    assert!(approx_eq(view.zoomed(), 1.25));
}

#[test]
fn zoom_to_non_finite_window_is_refused() {
    let mut view = ViewportController::mandelbrot(
        SIZE,
        SIZE,
        ViewOptions {
            settings: ViewSettings::new(4, 1e300).unwrap(),
            ..ViewOptions::default()
        },
    )
    .unwrap();
    view.wait_for_render();

    view.on_click(50.0, 50.0, PointerButton::Secondary, 2);
    view.wait_for_render();
    let window = view.window();
    let zoomed = view.zoomed();

    let outcome = view.on_click(50.0, 50.0, PointerButton::Secondary, 2);
    assert!(outcome.is_ignored());
    assert_eq!(view.window(), window);
    assert_eq!(view.zoomed(), zoomed);
    assert_eq!(view.gesture(), GestureState::Idle);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn dragging_right_moves_window_left() {
    let mut view = mandelbrot();
    view.on_press(50.0, 50.0);
    let outcome = view.on_move(60.0, 50.0);
    assert!(matches!(outcome, GestureOutcome::RenderRequested));
    let expected = Window::new(-3.0, 2.0, -2.5, 2.5).unwrap();
    assert!(window_approx_eq(&view.window(), &expected), "{}", view.window());
}

#[test]
fn dragging_up_moves_window_down() {
    let mut view = mandelbrot();
    view.on_press(50.0, 50.0);
    view.on_move(50.0, 40.0);
    let expected = Window::new(-2.5, 2.5, -3.0, 2.0).unwrap();
    assert!(window_approx_eq(&view.window(), &expected), "{}", view.window());
}

#[test]
fn consecutive_moves_add_up() {
    let mut a = mandelbrot();
    a.on_press(10.0, 10.0);
    a.on_move(25.0, 18.0);
    a.on_move(47.0, 3.0);

    let mut b = mandelbrot();
    b.on_press(10.0, 10.0);
    b.on_move(47.0, 3.0);

    assert!(window_approx_eq(&a.window(), &b.window()));
}

#[test]
fn moves_outside_a_drag_are_ignored() {
    let mut view = mandelbrot();
    assert!(view.on_move(70.0, 70.0).is_ignored());
    assert!(view.on_release(70.0, 70.0).is_ignored());
    assert_eq!(view.window(), Window::INITIAL);
    assert_eq!(view.gesture(), GestureState::Idle);
}

#[test]
fn release_ends_the_drag() {
    let mut view = mandelbrot();
    view.on_press(50.0, 50.0);
    view.on_move(55.0, 50.0);
    let outcome = view.on_release(55.0, 50.0);
    assert!(outcome.is_ignored());
    assert_eq!(view.gesture(), GestureState::Idle);
    // No anchor: further moves do nothing.
    let window = view.window();
    view.on_move(90.0, 90.0);
    assert_eq!(view.window(), window);
}

#[test]
fn on_release_policy_renders_once() {
    let mut view =
        ViewportController::mandelbrot(SIZE, SIZE, options(32, PanRedraw::OnRelease)).unwrap();
    view.wait_for_render();

    view.on_press(50.0, 50.0);
    assert!(matches!(view.on_move(40.0, 50.0), GestureOutcome::Panned));
    assert!(matches!(view.on_move(30.0, 50.0), GestureOutcome::Panned));
    assert!(!view.is_rendering());
    assert!(matches!(
        view.on_release(30.0, 50.0),
        GestureOutcome::RenderRequested
    ));
    assert!(view.wait_for_render());
    assert_eq!(view.frame().unwrap().job.window, view.window());
}

#[test]
fn switching_policy_mid_drag_takes_effect_on_the_next_move() {
    let mut view = mandelbrot();
    view.on_press(50.0, 50.0);
    assert!(matches!(
        view.on_move(45.0, 50.0),
        GestureOutcome::RenderRequested
    ));
    view.set_pan_redraw(PanRedraw::OnRelease);
    assert_eq!(view.pan_redraw(), PanRedraw::OnRelease);
    assert!(matches!(view.on_move(40.0, 50.0), GestureOutcome::Panned));
    assert!(matches!(
        view.on_release(40.0, 50.0),
        GestureOutcome::RenderRequested
    ));
    assert!(view.wait_for_render());
    assert_eq!(view.frame().unwrap().job.window, view.window());
}

#[test]
fn pan_to_non_finite_window_is_refused() {
    let mut view = ViewportController::mandelbrot(
        SIZE,
        SIZE,
        ViewOptions {
            settings: ViewSettings::new(4, 1e300).unwrap(),
            ..ViewOptions::default()
        },
    )
    .unwrap();
    view.wait_for_render();

    // One zoom-out leaves a window about 5e300 wide.
    view.on_click(50.0, 50.0, PointerButton::Secondary, 2);
    view.wait_for_render();
    let window = view.window();
    assert!(window.width() > 1e300);

    view.on_press(50.0, 50.0);
    // A shift of 1e8 window widths overflows to infinity.
    let outcome = view.on_move(-1e10, 50.0);
    assert!(outcome.is_ignored());
    assert_eq!(view.window(), window);
    assert_eq!(view.gesture(), GestureState::Dragging);

    // The anchor is kept, so an ordinary move still pans from it.
    assert!(matches!(
        view.on_move(60.0, 50.0),
        GestureOutcome::RenderRequested
    ));
    assert!(view.window().x_min < window.x_min);
}

#[test]
fn burst_of_moves_lands_on_the_last_window() {
    let mut view = mandelbrot();
    view.on_press(50.0, 50.0);
    for step in 1..=20 {
        view.on_move(50.0 + step as f64, 50.0 - step as f64);
    }
    view.on_release(70.0, 30.0);
    assert!(view.wait_for_render());
    assert_eq!(view.frame().unwrap().job.window, view.window());
}

// ---------------------------------------------------------------------------
// Press and release while generating
// ---------------------------------------------------------------------------

#[test]
fn press_during_generating_resumes_as_drag() {
    let mut view = mandelbrot();
    view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    view.on_press(20.0, 20.0);
    assert_eq!(view.gesture(), GestureState::Generating);
    assert!(view.on_move(30.0, 30.0).is_ignored());

    view.wait_for_render();
    assert_eq!(view.gesture(), GestureState::Dragging);
    let window = view.window();
    view.on_move(30.0, 20.0);
    assert_ne!(view.window(), window);
}

#[test]
fn release_during_generating_returns_to_idle() {
    let mut view = mandelbrot();
    view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    view.on_press(20.0, 20.0);
    assert!(view.on_release(20.0, 20.0).is_ignored());
    assert_eq!(view.gesture(), GestureState::Generating);

    view.wait_for_render();
    assert_eq!(view.gesture(), GestureState::Idle);
}

// ---------------------------------------------------------------------------
// Single and triple clicks
// ---------------------------------------------------------------------------

#[test]
fn single_click_reports_coordinates() {
    let mut view = mandelbrot();
    match view.on_click(50.0, 50.0, PointerButton::Primary, 1) {
        GestureOutcome::Coordinates(c) => {
            assert!(approx_eq(c.re, 0.0));
            assert!(approx_eq(c.im, 0.0));
        }
        other => panic!("expected coordinates, got {other:?}"),
    }
    // Top-left corner is (x_min, y_max).
    match view.on_click(0.0, 0.0, PointerButton::Primary, 1) {
        GestureOutcome::Coordinates(c) => {
            assert!(approx_eq(c.re, -2.5));
            assert!(approx_eq(c.im, 2.5));
        }
        other => panic!("expected coordinates, got {other:?}"),
    }
    assert_eq!(view.window(), Window::INITIAL);
    assert!(view
        .on_click(50.0, 50.0, PointerButton::Secondary, 1)
        .is_ignored());
}

#[test]
fn triple_click_spawns_independent_julia() {
    let mut view = mandelbrot();
    let outcome = view.on_click(50.0, 50.0, PointerButton::Primary, 3);
    let GestureOutcome::SpawnJulia(mut spawned) = outcome else {
        panic!("expected a Julia viewport");
    };

    match spawned.kind() {
        FractalKind::Julia { c } => {
            assert!(approx_eq(c.re, 0.0));
            assert!(approx_eq(c.im, 0.0));
        }
        other => panic!("expected Julia, got {other:?}"),
    }
    assert_eq!(spawned.window(), Window::INITIAL);
    assert_eq!(spawned.zoomed(), 1.0);
    assert_eq!(spawned.gesture(), GestureState::Idle);
    assert_eq!(spawned.size(), view.size());
    assert_eq!(view.window(), Window::INITIAL);

    // The two viewports share nothing mutable.
    spawned.on_click(50.0, 50.0, PointerButton::Primary, 2);
    spawned.set_settings(ViewSettings::new(10, 3.0).unwrap());
    assert_eq!(view.window(), Window::INITIAL);
    assert_eq!(view.settings().max_iterations, 64);
    assert!(spawned.wait_for_render());
    assert_eq!(view.gesture(), GestureState::Idle);
}

#[test]
fn julia_views_do_not_report_or_spawn() {
    let mut view = julia(Complex::new(-0.7, 0.27015));
    assert!(view
        .on_click(50.0, 50.0, PointerButton::Primary, 1)
        .is_ignored());
    assert!(view
        .on_click(50.0, 50.0, PointerButton::Primary, 3)
        .is_ignored());
    // Zoom and pan work exactly as for Mandelbrot.
    assert!(matches!(
        view.on_click(50.0, 50.0, PointerButton::Primary, 2),
        GestureOutcome::RenderRequested
    ));
    assert!(approx_eq(view.window().width(), 4.0));
}

// ---------------------------------------------------------------------------
// Settings and export
// ---------------------------------------------------------------------------

#[test]
fn new_settings_apply_to_the_next_render() {
    let mut view = mandelbrot();
    view.set_settings(ViewSettings::new(200, 2.0).unwrap());
    view.request_render();
    assert!(view.wait_for_render());
    assert_eq!(view.frame().unwrap().job.config.max_iterations, 200);

    view.on_click(50.0, 50.0, PointerButton::Primary, 2);
    assert!(approx_eq(view.window().width(), 2.5));
    assert!(approx_eq(view.zoomed(), 2.0));
}

#[test]
fn export_writes_the_displayed_frame() {
    let view = mandelbrot();
    let dir = std::env::temp_dir().join(format!("brotview_controller_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("view.png");

    assert!(view.export(&path).unwrap());
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let meta = view.export_metadata().unwrap();
    assert_eq!(meta.window, Window::INITIAL);
    assert_eq!(meta.max_iterations, 64);
    assert_eq!(meta.kind, FractalKind::Mandelbrot);

    let _ = std::fs::remove_dir_all(&dir);
}
