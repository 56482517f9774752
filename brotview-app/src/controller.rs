//! One interactive viewport: the current window, the zoom accumulator and
//! the press/drag/click state machine that decides when to re-render.
//!
//! Pointer positions are in buffer pixels with `y` growing downward, as the
//! pointer reports them. The presentation layer is responsible for scaling
//! from its own widget coordinates.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use brotview_core::{
    pan_window, screen_fraction, screen_to_plane, zoom_window, Complex, FractalKind,
    ViewSettings, Window,
};
use brotview_render::{export_png, ExportMetadata, PixelBuffer, RenderJob, Renderer};

use crate::gesture::{GestureOutcome, GestureState, PanRedraw, PointerButton};
use crate::render_bridge::{RenderBridge, RepaintHook};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Construction-time options. A spawned Julia viewport inherits a copy.
#[derive(Clone, Default)]
pub struct ViewOptions {
    pub settings: ViewSettings,
    pub pan_redraw: PanRedraw,
    pub repaint: Option<RepaintHook>,
}

impl std::fmt::Debug for ViewOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewOptions")
            .field("settings", &self.settings)
            .field("pan_redraw", &self.pan_redraw)
            .field("repaint", &self.repaint.is_some())
            .finish()
    }
}

/// The last completed render and the job that produced it.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: PixelBuffer,
    pub job: RenderJob,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct ViewportController {
    kind: FractalKind,
    window: Window,
    zoomed: f64,
    gesture: GestureState,
    anchor: Option<(f64, f64)>,
    settings: ViewSettings,
    pan_redraw: PanRedraw,
    repaint: Option<RepaintHook>,
    renderer: Renderer,
    bridge: RenderBridge,
    /// Job most recently handed to the bridge.
    queued: Option<RenderJob>,
    frame: Option<Frame>,
}

impl ViewportController {
    /// A viewport over the initial window, with its first render already queued.
    pub fn new(
        kind: FractalKind,
        width: u32,
        height: u32,
        options: ViewOptions,
    ) -> brotview_render::Result<Self> {
        let renderer = Renderer::new(width, height)?;
        Ok(Self::with_renderer(kind, renderer, options))
    }

    pub fn mandelbrot(width: u32, height: u32, options: ViewOptions) -> brotview_render::Result<Self> {
        Self::new(FractalKind::Mandelbrot, width, height, options)
    }

    pub fn julia(
        c: Complex,
        width: u32,
        height: u32,
        options: ViewOptions,
    ) -> brotview_render::Result<Self> {
        Self::new(FractalKind::Julia { c }, width, height, options)
    }

    fn with_renderer(kind: FractalKind, renderer: Renderer, options: ViewOptions) -> Self {
        let bridge = RenderBridge::spawn(renderer, kind.label(), options.repaint.clone());
        let mut controller = Self {
            kind,
            window: Window::INITIAL,
            zoomed: 1.0,
            gesture: GestureState::Idle,
            anchor: None,
            settings: options.settings,
            pan_redraw: options.pan_redraw,
            repaint: options.repaint,
            renderer,
            bridge,
            queued: None,
            frame: None,
        };
        info!(
            fractal = kind.label(),
            width = renderer.width(),
            height = renderer.height(),
            "Created viewport"
        );
        controller.request_render();
        controller
    }

    // -- Accessors ----------------------------------------------------------

    pub fn kind(&self) -> FractalKind {
        self.kind
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn zoomed(&self) -> f64 {
        self.zoomed
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    pub fn pan_redraw(&self) -> PanRedraw {
        self.pan_redraw
    }

    pub fn size(&self) -> (u32, u32) {
        (self.renderer.width(), self.renderer.height())
    }

    /// Last completed frame, if any render has finished yet.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.frame.as_ref().map(|f| &f.buffer)
    }

    /// Whether a requested render has not landed yet.
    pub fn is_rendering(&self) -> bool {
        self.bridge.pending()
    }

    /// Plane point under a screen position, for hover read-outs.
    pub fn plane_point(&self, px: f64, py: f64) -> Complex {
        let (w, h) = self.size();
        screen_to_plane(&self.window, w, h, px, py)
    }

    // -- Configuration ------------------------------------------------------

    /// Replace the iteration cap and zoom ratio. Takes effect on the next render.
    pub fn set_settings(&mut self, settings: ViewSettings) {
        if settings != self.settings {
            debug!(
                max_iterations = settings.max_iterations,
                zoom_ratio = settings.zoom_ratio,
                "Updated view settings"
            );
        }
        self.settings = settings;
    }

    pub fn set_pan_redraw(&mut self, policy: PanRedraw) {
        self.pan_redraw = policy;
    }

    /// Queue a render of the current window with the current settings.
    pub fn request_render(&mut self) {
        let job = self
            .renderer
            .job(self.window, self.settings.max_iterations, self.kind);
        self.bridge.submit(job);
        self.queued = Some(job);
    }

    // -- Gestures -----------------------------------------------------------

    pub fn on_press(&mut self, px: f64, py: f64) -> GestureOutcome {
        self.anchor = Some((px, py));
        if self.gesture != GestureState::Generating {
            self.gesture = GestureState::Dragging;
        }
        GestureOutcome::Ignored
    }

    pub fn on_move(&mut self, px: f64, py: f64) -> GestureOutcome {
        if self.gesture != GestureState::Dragging {
            return GestureOutcome::Ignored;
        }
        let Some((ax, ay)) = self.anchor else {
            return GestureOutcome::Ignored;
        };

        let (w, h) = self.size();
        let moved = pan_window(&self.window, ax - px, ay - py, w, h);
        if !moved.is_valid() {
            warn!(window = %moved, "Refusing pan to a degenerate window");
            return GestureOutcome::Ignored;
        }
        self.window = moved;
        self.anchor = Some((px, py));

        match self.pan_redraw {
            PanRedraw::EveryMove => {
                self.request_render();
                GestureOutcome::RenderRequested
            }
            PanRedraw::OnRelease => GestureOutcome::Panned,
        }
    }

    pub fn on_release(&mut self, _px: f64, _py: f64) -> GestureOutcome {
        self.anchor = None;
        if self.gesture != GestureState::Dragging {
            return GestureOutcome::Ignored;
        }
        self.gesture = GestureState::Idle;
        match self.pan_redraw {
            PanRedraw::OnRelease => {
                self.request_render();
                GestureOutcome::RenderRequested
            }
            PanRedraw::EveryMove => GestureOutcome::Ignored,
        }
    }

    pub fn on_click(
        &mut self,
        px: f64,
        py: f64,
        button: PointerButton,
        count: u32,
    ) -> GestureOutcome {
        match (count, button) {
            (1, PointerButton::Primary) if self.kind == FractalKind::Mandelbrot => {
                GestureOutcome::Coordinates(self.plane_point(px, py))
            }
            (2, _) => self.zoom_at(px, py, button),
            (3, PointerButton::Primary) if self.kind == FractalKind::Mandelbrot => {
                self.spawn_julia(px, py)
            }
            _ => GestureOutcome::Ignored,
        }
    }

    fn zoom_at(&mut self, px: f64, py: f64, button: PointerButton) -> GestureOutcome {
        if self.gesture != GestureState::Idle {
            return GestureOutcome::Ignored;
        }
        self.gesture = GestureState::Generating;

        let (w, h) = self.size();
        let (fx, fy) = screen_fraction(w, h, px, py);
        let center = screen_to_plane(&self.window, w, h, px, py);
        let ratio = self.settings.zoom_ratio;
        let (scale, zoomed) = match button {
            PointerButton::Primary => (1.0 / ratio, self.zoomed * ratio),
            PointerButton::Secondary => (ratio, self.zoomed / ratio),
        };

        let zoomed_window = zoom_window(&self.window, center, fx, fy, scale);
        if !zoomed_window.is_valid() {
            warn!(
                window = %zoomed_window,
                zoomed,
                "Refusing zoom to a degenerate window"
            );
            self.gesture = GestureState::Idle;
            return GestureOutcome::Ignored;
        }

        self.window = zoomed_window;
        self.zoomed = zoomed;
        debug!(%center, scale, zoomed, "Zoom");
        self.request_render();
        GestureOutcome::RenderRequested
    }

    fn spawn_julia(&self, px: f64, py: f64) -> GestureOutcome {
        let c = self.plane_point(px, py);
        info!(%c, "Spawning Julia viewport");
        let options = ViewOptions {
            settings: self.settings,
            pan_redraw: self.pan_redraw,
            repaint: self.repaint.clone(),
        };
        let julia = Self::with_renderer(FractalKind::Julia { c }, self.renderer, options);
        GestureOutcome::SpawnJulia(Box::new(julia))
    }

    // -- Render completion ---------------------------------------------------

    /// Pick up a finished render without blocking. Returns `true` when a new
    /// frame replaced the previous one.
    pub fn poll(&mut self) -> bool {
        match self.bridge.try_latest() {
            Some(result) => self.complete(result),
            None => false,
        }
    }

    /// Block until the newest queued render lands.
    pub fn wait_for_render(&mut self) -> bool {
        match self.bridge.wait_latest() {
            Some(result) => self.complete(result),
            None => false,
        }
    }

    fn complete(&mut self, result: brotview_render::Result<brotview_render::RenderResult>) -> bool {
        if self.gesture == GestureState::Generating {
            self.gesture = if self.anchor.is_some() {
                GestureState::Dragging
            } else {
                GestureState::Idle
            };
        }
        match (result, self.queued.take()) {
            (Ok(result), Some(job)) => {
                self.frame = Some(Frame {
                    buffer: result.buffer,
                    job,
                    elapsed: result.elapsed,
                });
                true
            }
            (Ok(_), None) => false,
            (Err(e), _) => {
                warn!("Keeping previous frame: {e}");
                false
            }
        }
    }

    // -- Export ---------------------------------------------------------------

    /// Metadata describing the displayed frame.
    pub fn export_metadata(&self) -> Option<ExportMetadata> {
        self.frame.as_ref().map(|f| ExportMetadata {
            kind: f.job.kind,
            window: f.job.window,
            zoomed: self.zoomed,
            max_iterations: f.job.config.max_iterations,
        })
    }

    /// Write the displayed frame to a PNG. Returns `false` when no frame has
    /// been rendered yet.
    pub fn export(&self, path: &Path) -> brotview_render::Result<bool> {
        let (Some(frame), Some(meta)) = (self.frame.as_ref(), self.export_metadata()) else {
            return Ok(false);
        };
        export_png(&frame.buffer, path, &meta)?;
        info!("Exported {} view to {}", self.kind.label(), path.display());
        Ok(true)
    }
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("kind", &self.kind)
            .field("window", &self.window)
            .field("zoomed", &self.zoomed)
            .field("gesture", &self.gesture)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
