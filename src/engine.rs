// The sampling engine: binds the primary surface, blits the image, and turns
// every pointer event into a color (plus a magnifier redraw while the dropper is on).
//
// Everything runs synchronously inside `handle_pointer`; events are handled
// strictly in the order the host delivers them.

use crate::config::{DropperConfig, Viewport};
use crate::error::{Error, Result};
use crate::magnifier::Magnifier;
use crate::observer::{dispatch, ColorObserver};
use crate::sampling::{blit_scaled, canvas_local, extract_neighborhood, neighborhood_origin};
use crate::surface::Surface;
use crate::types::{Bitmap, ColorEvent, ColorSample, FrameBuffer, Offset, PointerEvent, PointerKind};

/// Where the dropper stands. The magnifier only exists in `Active`.
pub enum DropperState<S> {
    /// Off. The host's container is parked here once supplied.
    Inactive { container: Option<S> },
    /// On, but no container was supplied yet: clicks select, nothing is drawn.
    Armed,
    /// On, with a mounted magnifier.
    Active(Magnifier<S>),
}

impl<S> DropperState<S> {
    pub fn is_on(&self) -> bool {
        !matches!(self, DropperState::Inactive { .. })
    }
}

/// The primary surface plus what was captured when it was bound.
struct Primary<S> {
    surface: S,
    offset: Offset,  // screen origin at init, never refreshed
    listening: bool, // move + click listeners attached
}

pub struct SamplingEngine<S: Surface> {
    config: DropperConfig,
    viewport: Viewport,
    primary: Option<Primary<S>>,
    dropper: DropperState<S>,
    on_hover: Option<Box<dyn ColorObserver>>,
    on_color_selected: Option<Box<dyn ColorObserver>>,
}

impl<S: Surface> SamplingEngine<S> {
    pub fn new(config: DropperConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            viewport,
            primary: None,
            dropper: DropperState::Inactive { container: None },
            on_hover: None,
            on_color_selected: None,
        })
    }

    /// Bind `surface` as the primary surface, record its screen offset and
    /// attach the pointer listeners. Returns the previously bound surface, if any.
    pub fn init(&mut self, mut surface: S) -> Result<Option<S>> {
        if surface.context_2d().is_none() {
            return Err(Error::ContextUnavailable);
        }
        let offset = surface.origin();
        log::debug!("init: primary surface at ({}, {})", offset.x, offset.y);

        let previous = self.primary.replace(Primary { surface, offset, listening: true });
        if let Some(prev) = &previous {
            if prev.listening {
                log::warn!("init: replacing a surface that was never torn down");
            }
        }
        Ok(previous.map(|p| p.surface))
    }

    /// Size the primary surface to `min(viewport, bitmap)` and blit the bitmap into it.
    pub fn draw_image(&mut self, bitmap: &Bitmap) -> Result<()> {
        let primary = self.primary.as_mut().ok_or(Error::NotInitialized)?;
        let fb = primary.surface.context_2d().ok_or(Error::ContextUnavailable)?;
        blit_scaled(fb, bitmap, self.viewport);
        log::debug!(
            "draw_image: {}x{} bitmap -> {}x{} surface",
            bitmap.width(),
            bitmap.height(),
            fb.width,
            fb.height
        );
        Ok(())
    }

    /// Hand the engine the host's dropper container. If the dropper is already
    /// on, a fresh magnifier is mounted into it straight away.
    pub fn init_dropper(&mut self, mut container: S) -> Result<()> {
        if container.context_2d().is_none() {
            return Err(Error::ContextUnavailable);
        }
        let size = self.config.real_size();
        let next = match std::mem::replace(&mut self.dropper, DropperState::Armed) {
            DropperState::Inactive { .. } => {
                container.set_opacity(0.0);
                Ok(DropperState::Inactive { container: Some(container) })
            }
            DropperState::Armed | DropperState::Active(_) => Self::mount(container, size),
        };
        self.settle(next).map(|_| ())
    }

    /// Flip the dropper. Turning on mounts a brand-new magnifier (never a
    /// resized old one); turning off unmounts it. Returns the new on/off state.
    pub fn toggle_dropper(&mut self) -> Result<bool> {
        let size = self.config.real_size();
        let next = match std::mem::replace(&mut self.dropper, DropperState::Armed) {
            DropperState::Inactive { container: Some(container) } => Self::mount(container, size),
            DropperState::Inactive { container: None } => {
                log::debug!("toggle_dropper: on without a container, magnifier skipped");
                Ok(DropperState::Armed)
            }
            DropperState::Armed => Ok(DropperState::Inactive { container: None }),
            DropperState::Active(magnifier) => {
                Ok(DropperState::Inactive { container: Some(magnifier.unmount()) })
            }
        };
        let on = self.settle(next)?;
        log::debug!("toggle_dropper: {}", if on { "on" } else { "off" });
        Ok(on)
    }

    fn mount(container: S, size: usize) -> Result<DropperState<S>> {
        // A container that lost its context since init_dropper is dropped.
        Magnifier::mount(container, size)
            .map(DropperState::Active)
            .map_err(|_| Error::ContextUnavailable)
    }

    /// Store the next dropper state; a failed transition leaves the dropper off.
    fn settle(&mut self, next: Result<DropperState<S>>) -> Result<bool> {
        match next {
            Ok(state) => {
                self.dropper = state;
                Ok(self.dropper.is_on())
            }
            Err(err) => {
                self.dropper = DropperState::Inactive { container: None };
                Err(err)
            }
        }
    }

    pub fn set_on_hover(&mut self, observer: impl ColorObserver + 'static) {
        self.on_hover = Some(Box::new(observer));
    }

    pub fn set_on_color_selected(&mut self, observer: impl ColorObserver + 'static) {
        self.on_color_selected = Some(Box::new(observer));
    }

    /// Detach the pointer listeners. The dropper is left as is; turn it off
    /// first to release the magnifier.
    pub fn teardown(&mut self) {
        if let Some(primary) = self.primary.as_mut() {
            primary.listening = false;
            log::debug!("teardown: listeners detached");
        }
    }

    /// Entry point for the host's pointer listeners.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(primary) = self.primary.as_ref() else {
            return;
        };
        if !primary.listening {
            return;
        }
        match event.kind {
            PointerKind::Move => self.on_move(event.x, event.y),
            PointerKind::Click => self.on_click(event.x, event.y),
        }
    }

    fn on_move(&mut self, x: i32, y: i32) {
        let Some((local, color)) = self.sample_at(x, y) else {
            return;
        };
        let hex = color.to_hex();

        if let Some(observer) = self.on_hover.as_mut() {
            let event = ColorEvent { x, y, color: hex.clone() };
            dispatch(&mut **observer, &event, "on_hover");
        }

        let DropperState::Active(magnifier) = &mut self.dropper else {
            return;
        };
        let Some(fb) = self.primary.as_ref().and_then(|p| p.surface.frame()) else {
            return;
        };

        magnifier.follow(x, y);
        let n = self.config.zoomed_pixels;
        let origin = neighborhood_origin(local, n, fb.width, fb.height);
        let grid = extract_neighborhood(fb, origin, n);
        // Label shows the pixel under the real cursor, not the clamped grid center.
        magnifier.render(&grid, &hex, &self.config);
    }

    fn on_click(&mut self, x: i32, y: i32) {
        if !self.dropper.is_on() {
            return;
        }
        let Some((_, color)) = self.sample_at(x, y) else {
            return;
        };
        if let Some(observer) = self.on_color_selected.as_mut() {
            let event = ColorEvent { x, y, color: color.to_hex() };
            dispatch(&mut **observer, &event, "on_color_selected");
        }
    }

    /// Canvas-local coordinates and the color there.
    fn sample_at(&self, x: i32, y: i32) -> Option<((i32, i32), ColorSample)> {
        let primary = self.primary.as_ref()?;
        let fb = primary.surface.frame()?;
        let local = canvas_local(x, y, primary.offset);
        Some((local, fb.sample(local.0, local.1)))
    }

    /// Color under a screen position, without notifying anyone.
    pub fn color_at(&self, x: i32, y: i32) -> Option<ColorSample> {
        self.sample_at(x, y).map(|(_, c)| c)
    }

    pub fn offset(&self) -> Option<Offset> {
        self.primary.as_ref().map(|p| p.offset)
    }

    pub fn surface(&self) -> Option<&S> {
        self.primary.as_ref().map(|p| &p.surface)
    }

    pub fn primary_frame(&self) -> Option<&FrameBuffer> {
        self.primary.as_ref().and_then(|p| p.surface.frame())
    }

    pub fn is_listening(&self) -> bool {
        self.primary.as_ref().is_some_and(|p| p.listening)
    }

    pub fn dropper(&self) -> &DropperState<S> {
        &self.dropper
    }

    pub fn is_dropper_on(&self) -> bool {
        self.dropper.is_on()
    }

    /// The mounted magnifier's container, while the dropper is active.
    pub fn dropper_container(&self) -> Option<&S> {
        match &self.dropper {
            DropperState::Active(m) => Some(m.container()),
            _ => None,
        }
    }

    pub fn config(&self) -> &DropperConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
