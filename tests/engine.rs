// End-to-end behavior of the sampling engine over in-memory canvases,
// driven by synthetic pointer events the way a host window would.

use image::{Rgba, RgbaImage};
use pixel_dropper::{
    Bitmap, Canvas, ChannelObserver, ColorEvent, ColorSample, DropperConfig, DropperState, Error,
    ObserverError, Offset, PointerEvent, SamplingEngine, Surface, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

const ORIGIN: Offset = Offset::new(30, 40);

/// Pixel (x, y) is rgb(x, y, 200), fully opaque.
fn gradient(w: u32, h: u32) -> Bitmap {
    Bitmap::from_rgba(RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 200, 255])))
}

fn engine_with_image(w: u32, h: u32) -> SamplingEngine<Canvas> {
    let mut engine = SamplingEngine::new(DropperConfig::default(), Viewport::new(1024, 768)).expect("config");
    engine.init(Canvas::new(ORIGIN)).expect("init");
    engine.draw_image(&gradient(w, h)).expect("draw");
    engine
}

fn recorder() -> (Rc<RefCell<Vec<ColorEvent>>>, impl FnMut(&ColorEvent) -> Result<(), ObserverError>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let cb = move |ev: &ColorEvent| -> Result<(), ObserverError> {
        sink.borrow_mut().push(ev.clone());
        Ok(())
    };
    (seen, cb)
}

#[test]
fn hover_reports_pixel_under_cursor_in_canvas_space() {
    let mut engine = engine_with_image(200, 100);
    let (seen, cb) = recorder();
    engine.set_on_hover(cb);

    for (x, y) in [(30, 40), (31, 41), (100, 90), (229, 139)] {
        engine.handle_pointer(PointerEvent::moved(x, y));
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], ColorEvent { x: 30, y: 40, color: ColorSample::new(0, 0, 200, 255).to_hex() });
    assert_eq!(seen[1].color, "#0101c8");
    assert_eq!(seen[2].color, ColorSample::new(70, 50, 200, 255).to_hex());
    assert_eq!(seen[3].color, ColorSample::new(199, 99, 200, 255).to_hex());
}

#[test]
fn oversized_image_is_clamped_to_viewport() {
    let big = Bitmap::from_rgba(RgbaImage::from_pixel(4000, 4000, Rgba([1, 2, 3, 255])));
    let mut engine = SamplingEngine::new(DropperConfig::default(), Viewport::new(1024, 768)).expect("config");
    engine.init(Canvas::new(Offset::default())).expect("init");
    engine.draw_image(&big).expect("draw");

    let fb = engine.primary_frame().expect("frame");
    assert_eq!((fb.width, fb.height), (1024, 768));
}

#[test]
fn small_image_keeps_its_size() {
    let engine = engine_with_image(64, 48);
    let fb = engine.primary_frame().expect("frame");
    assert_eq!((fb.width, fb.height), (64, 48));
}

#[test]
fn hover_without_dropper_draws_nothing() {
    let mut engine = engine_with_image(100, 100);
    engine.init_dropper(Canvas::new(Offset::default())).expect("container");
    engine.handle_pointer(PointerEvent::moved(80, 80));
    assert!(engine.dropper_container().is_none());
    assert!(matches!(engine.dropper(), DropperState::Inactive { container: Some(_) }));
}

#[test]
fn dropper_follows_pointer_and_shows_neighborhood() {
    let cfg = DropperConfig::default();
    let mut engine = engine_with_image(200, 200);
    engine.init_dropper(Canvas::new(Offset::default())).expect("container");
    assert!(engine.toggle_dropper().expect("on"));

    // canvas-local (50, 60)
    engine.handle_pointer(PointerEvent::moved(80, 100));

    let container = engine.dropper_container().expect("mounted");
    let half = (cfg.real_size() / 2) as i32;
    assert_eq!(container.origin(), Offset::new(80 - half, 100 - half));
    assert_eq!(container.opacity(), 1.0);

    // grid origin is (50 - 4, 60 - 4); cell (0,0) is that pixel scaled 45x
    let fb = container.frame().expect("frame");
    assert_eq!((fb.width, fb.height), (315, 315));
    assert_eq!(fb.sample(0, 0), ColorSample::new(46, 56, 200, 255));
    assert_eq!(fb.sample(44, 44), ColorSample::new(46, 56, 200, 255));
    assert_eq!(fb.sample(300, 300), ColorSample::new(52, 62, 200, 255));
    // center cell is outlined
    assert_eq!(fb.sample(135, 135), ColorSample::RED);
}

#[test]
fn grid_near_top_left_edge_never_goes_negative() {
    let mut engine = engine_with_image(200, 200);
    engine.init_dropper(Canvas::new(Offset::default())).expect("container");
    engine.toggle_dropper().expect("on");

    // canvas-local (2, 1): unclamped origin would be (-2, -3)
    engine.handle_pointer(PointerEvent::moved(ORIGIN.x + 2, ORIGIN.y + 1));
    let fb = engine.dropper_container().and_then(|c| c.frame()).expect("frame");
    assert_eq!(fb.sample(0, 0), ColorSample::new(0, 0, 200, 255));
    assert_eq!(fb.sample(314, 314), ColorSample::new(6, 6, 200, 255));
}

#[test]
fn toggling_off_and_on_starts_from_a_blank_magnifier() {
    let mut engine = engine_with_image(100, 100);
    engine.init_dropper(Canvas::new(Offset::default())).expect("container");
    engine.toggle_dropper().expect("on");
    engine.handle_pointer(PointerEvent::moved(60, 60));
    assert!(!engine.dropper_container().and_then(|c| c.frame()).expect("frame").is_blank());

    assert!(!engine.toggle_dropper().expect("off"));
    assert!(engine.dropper_container().is_none());

    assert!(engine.toggle_dropper().expect("on again"));
    let fb = engine.dropper_container().and_then(|c| c.frame()).expect("frame");
    assert_eq!((fb.width, fb.height), (315, 315));
    assert!(fb.is_blank());
}

#[test]
fn click_selects_only_while_dropper_is_on() {
    let mut engine = engine_with_image(100, 100);
    let (tx, rx) = mpsc::channel();
    engine.set_on_color_selected(ChannelObserver(tx));

    engine.handle_pointer(PointerEvent::click(40, 50));
    assert!(rx.try_recv().is_err());

    engine.toggle_dropper().expect("on"); // no container: armed, clicks still select
    engine.handle_pointer(PointerEvent::click(40, 50));
    let ev = rx.try_recv().expect("selection");
    assert_eq!(ev, ColorEvent { x: 40, y: 50, color: ColorSample::new(10, 10, 200, 255).to_hex() });
}

#[test]
fn failing_hover_observer_does_not_block_selection() {
    let mut engine = engine_with_image(100, 100);
    engine.set_on_hover(|_: &ColorEvent| -> Result<(), ObserverError> { Err("consumer broke".into()) });
    let (seen, cb) = recorder();
    engine.set_on_color_selected(cb);
    engine.toggle_dropper().expect("on");

    engine.handle_pointer(PointerEvent::moved(35, 45));
    engine.handle_pointer(PointerEvent::click(35, 45));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].color, ColorSample::new(5, 5, 200, 255).to_hex());
}

#[test]
fn panicking_hover_observer_does_not_block_selection() {
    let mut engine = engine_with_image(100, 100);
    engine.set_on_hover(|_: &ColorEvent| -> Result<(), ObserverError> { panic!("consumer bug") });
    let (seen, cb) = recorder();
    engine.set_on_color_selected(cb);
    engine.toggle_dropper().expect("on");

    engine.handle_pointer(PointerEvent::moved(36, 46));
    engine.handle_pointer(PointerEvent::click(36, 46));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn teardown_silences_all_callbacks() {
    let mut engine = engine_with_image(100, 100);
    let (hovers, hover_cb) = recorder();
    let (picks, pick_cb) = recorder();
    engine.set_on_hover(hover_cb);
    engine.set_on_color_selected(pick_cb);
    engine.toggle_dropper().expect("on");

    engine.teardown();
    engine.handle_pointer(PointerEvent::moved(50, 50));
    engine.handle_pointer(PointerEvent::click(50, 50));

    assert!(hovers.borrow().is_empty());
    assert!(picks.borrow().is_empty());
    assert!(!engine.is_listening());
}

#[test]
fn events_before_init_are_ignored() {
    let mut engine: SamplingEngine<Canvas> =
        SamplingEngine::new(DropperConfig::default(), Viewport::default()).expect("config");
    let (seen, cb) = recorder();
    engine.set_on_hover(cb);
    engine.handle_pointer(PointerEvent::moved(1, 1));
    assert!(seen.borrow().is_empty());
    assert!(matches!(engine.init(Canvas::without_context(Offset::default())), Err(Error::ContextUnavailable)));
}

#[test]
fn label_uses_cursor_color_even_when_grid_is_clamped() {
    // 3x3 image: the grid is pinned at 0 and reads past the surface edge.
    let mut engine = engine_with_image(3, 3);
    engine.init_dropper(Canvas::new(Offset::default())).expect("container");
    engine.toggle_dropper().expect("on");
    let (seen, cb) = recorder();
    engine.set_on_hover(cb);

    engine.handle_pointer(PointerEvent::moved(ORIGIN.x + 2, ORIGIN.y + 2));
    assert_eq!(seen.borrow()[0].color, ColorSample::new(2, 2, 200, 255).to_hex());

    let fb = engine.dropper_container().and_then(|c| c.frame()).expect("frame");
    assert_eq!(fb.sample(0, 0), ColorSample::new(0, 0, 200, 255));
    // cells past the 3x3 image are transparent reads, drawn as nothing
    assert_eq!(fb.sample(300, 300), ColorSample::TRANSPARENT);
}
