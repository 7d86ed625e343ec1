// What you SEE:
// • The image you passed on the command line, under a small HUD strip.
// • Move the mouse: the HUD swatch + hex follow the pixel under the cursor.
// • D toggles the dropper: a zoomed 7x7 grid with the hex label follows the cursor.
// • Left click while the dropper is on: that color is "picked" (HUD + printed on exit).
// • ESC quits.

use clap::Parser;
use pixel_dropper::draw::{clear, composite, draw_text_5x7, fill_rect, Drawer};
use pixel_dropper::loader::load_bitmap;
use pixel_dropper::{
    Canvas, ChannelObserver, ColorEvent, DropperConfig, Error, FrameBuffer, HexColor, ObserverError,
    Offset, PointerEvent, SamplingEngine, Surface, Viewport,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

/// Height of the HUD strip above the image; the image canvas starts below it.
const HUD_HEIGHT: usize = 20;
const MIN_WINDOW_WIDTH: usize = 360;

#[derive(Parser, Debug)]
#[command(name = "pixel-dropper")]
#[command(about = "Pick colors from an image with a zoomed dropper", long_about = None)]
struct Args {
    /// Image to open (any format the image crate decodes)
    image: PathBuf,

    /// Largest size the image is shown at, as WIDTHxHEIGHT
    #[arg(long, default_value = "1024x768", value_parser = parse_viewport)]
    viewport: Viewport,

    /// Pixels per dropper side (odd)
    #[arg(long, default_value_t = pixel_dropper::config::DEFAULT_ZOOMED_PIXELS)]
    zoomed_pixels: usize,

    /// On-screen size of each zoomed pixel
    #[arg(long, default_value_t = pixel_dropper::config::DEFAULT_PIXEL_MULTIPLIER)]
    multiplier: usize,

    /// Start with the dropper turned on
    #[arg(long)]
    start_active: bool,
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s.split_once('x').ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width = w.trim().parse::<usize>().map_err(|e| format!("width: {e}"))?;
    let height = h.trim().parse::<usize>().map_err(|e| format!("height: {e}"))?;
    if width == 0 || height == 0 {
        return Err("viewport must be non-zero".into());
    }
    Ok(Viewport::new(width, height))
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    /* --- Image + engine setup ---
       Visual: nothing on screen yet; the image is decoded and blitted off-screen. */
    let bitmap = load_bitmap(&args.image)?;
    let config = DropperConfig {
        zoomed_pixels: args.zoomed_pixels,
        pixel_multiplier: args.multiplier,
        ..DropperConfig::default()
    };
    let mut engine = SamplingEngine::new(config, args.viewport)?;
    engine.init(Canvas::new(Offset::new(0, HUD_HEIGHT as i32)))?;
    engine.draw_image(&bitmap)?;
    engine.init_dropper(Canvas::new(Offset::default()))?;
    if args.start_active {
        engine.toggle_dropper()?;
    }

    /* --- Observers ---
       Visual: hover feeds the HUD swatch; picks arrive over a channel. */
    let hovered: Rc<RefCell<Option<HexColor>>> = Rc::new(RefCell::new(None));
    let hover_sink = Rc::clone(&hovered);
    engine.set_on_hover(move |ev: &ColorEvent| -> Result<(), ObserverError> {
        *hover_sink.borrow_mut() = Some(ev.color.clone());
        Ok(())
    });
    let (picked_tx, picked_rx) = mpsc::channel();
    engine.set_on_color_selected(ChannelObserver(picked_tx));
    let mut picked: Option<HexColor> = None;

    /* --- Window + reusable screen buffer --- */
    let (img_w, img_h) = engine
        .primary_frame()
        .map(|fb| (fb.width, fb.height))
        .ok_or(Error::NotInitialized)?;
    let width = img_w.max(MIN_WINDOW_WIDTH);
    let height = img_h + HUD_HEIGHT;
    let mut drawer = Drawer::new("Pixel Dropper", width, height)?;
    let mut screen = FrameBuffer::new(width, height);

    let mut last_pos: Option<(i32, i32)> = None;
    let mut was_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs */
        if drawer.d_pressed_once() {
            engine.toggle_dropper()?; // visual: dropper appears / disappears
        }

        // Only pointer positions over the image canvas reach the engine.
        let over_image = drawer.mouse_pos().filter(|&(x, y)| {
            let (lx, ly) = (x, y - HUD_HEIGHT as i32);
            lx >= 0 && ly >= 0 && (lx as usize) < img_w && (ly as usize) < img_h
        });
        let down = drawer.left_mouse_down();
        if let Some((mx, my)) = over_image {
            if last_pos != Some((mx, my)) {
                engine.handle_pointer(PointerEvent::moved(mx, my)); // visual: HUD + dropper update
                last_pos = Some((mx, my));
            }
            if down && !was_down {
                engine.handle_pointer(PointerEvent::click(mx, my)); // visual: picked color changes
            }
        }
        was_down = down;

        for ev in picked_rx.try_iter() {
            log::info!("picked {} at ({}, {})", ev.color, ev.x, ev.y);
            picked = Some(ev.color);
        }

        /* 2) Compose: image, then the dropper on top of it */
        clear(&mut screen);
        if let Some(surface) = engine.surface() {
            if let Some(fb) = surface.frame() {
                composite(&mut screen, fb, surface.origin(), 1.0);
            }
        }
        if let Some(container) = engine.dropper_container() {
            if let Some(fb) = container.frame() {
                composite(&mut screen, fb, container.origin(), container.opacity());
            }
        }

        /* 3) HUD: swatch + hover hex, picked hex, dropper state */
        let swatch = over_image.and_then(|(x, y)| engine.color_at(x, y));
        if let Some(c) = swatch {
            fill_rect(&mut screen, 4, 4, 12, 12, c, 1.0);
        }
        let hover_text = hovered.borrow().as_ref().map(|h| h.to_string()).unwrap_or_else(|| "-".into());
        let picked_text = picked.as_ref().map(|h| h.to_string()).unwrap_or_else(|| "-".into());
        let state = if engine.is_dropper_on() { "ON" } else { "OFF" };
        let hud = format!("HOVER {hover_text} | PICKED {picked_text} | D: DROPPER {state}");
        draw_text_5x7(&mut screen, 22, 6, &hud, 0xFF_FF_FF_FF);

        /* 4) Present to the window */
        drawer.present(&screen)?;
    }

    engine.teardown();
    if let Some(hex) = picked {
        println!("{hex}");
    }
    Ok(())
}
