use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use brotview_core::{pixel_to_plane, EscapeResult, FractalKind, RenderConfig, Window};

use crate::buffer::PixelBuffer;
use crate::color::color_for;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// Everything one render reads, captured by value before any work starts.
///
/// Workers only ever see this snapshot, so a viewport may move its live
/// window while a render is in flight without tearing the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderJob {
    pub window: Window,
    pub config: RenderConfig,
    pub kind: FractalKind,
}

impl RenderJob {
    pub fn new(window: Window, config: RenderConfig, kind: FractalKind) -> Self {
        Self {
            window,
            config,
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a full-frame render.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub buffer: PixelBuffer,
    pub elapsed: Duration,
    /// Pixels rejected by the `|c| > 2` pre-test.
    pub rejected: usize,
    /// Pixels that stayed bounded up to the cap.
    pub bounded: usize,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// A renderer bound to one output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        // Validates the dimensions; the iteration cap here is a placeholder.
        RenderConfig::new(width, height, 1)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Snapshot a job at this renderer's resolution.
    pub fn job(&self, window: Window, max_iterations: u32, kind: FractalKind) -> RenderJob {
        RenderJob::new(
            window,
            RenderConfig {
                width: self.width,
                height: self.height,
                max_iterations,
            },
            kind,
        )
    }

    /// Render a job produced for this renderer.
    pub fn render(&self, job: &RenderJob) -> crate::Result<RenderResult> {
        if job.config.width != self.width || job.config.height != self.height {
            return Err(RenderError::SizeMismatch {
                width: self.width,
                height: self.height,
                got_width: job.config.width,
                got_height: job.config.height,
            });
        }
        render_job(job)
    }
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Render a window into a fresh buffer.
pub fn render(window: &Window, config: &RenderConfig, kind: FractalKind) -> crate::Result<PixelBuffer> {
    render_job(&RenderJob::new(*window, *config, kind)).map(|r| r.buffer)
}

/// Render a snapshot, one output row per Rayon task.
///
/// Output row `y` shows plane row `height - 1 - y`, so the bottom of the
/// window lands at the bottom of the image. This is the only vertical flip
/// in the pipeline. A degenerate window or invalid config aborts before any
/// pixel is computed.
pub fn render_job(job: &RenderJob) -> crate::Result<RenderResult> {
    job.window.validate()?;
    job.config.validate()?;

    let start = Instant::now();
    let RenderJob {
        window,
        config,
        kind,
    } = *job;
    let RenderConfig {
        width,
        height,
        max_iterations,
    } = config;

    debug!(
        width,
        height,
        max_iterations,
        fractal = kind.label(),
        %window,
        "Starting render"
    );

    let mut pixels = vec![0u8; config.pixel_count() * 4];
    let stride = width as usize * 4;

    let (rejected, bounded) = pixels
        .par_chunks_mut(stride)
        .enumerate()
        .map(|(row, out)| {
            let py = (height - 1 - row as u32) as f64;
            let mut rejected = 0usize;
            let mut bounded = 0usize;
            for (px, pixel) in out.chunks_exact_mut(4).enumerate() {
                let point = pixel_to_plane(&window, width, height, px as f64, py);
                let result = kind.iterate(point, max_iterations);
                match result {
                    EscapeResult::Rejected => rejected += 1,
                    EscapeResult::Bounded { .. } => bounded += 1,
                    EscapeResult::Escaped { .. } => {}
                }
                let [r, g, b] = color_for(result, max_iterations);
                pixel[0] = r;
                pixel[1] = g;
                pixel[2] = b;
                pixel[3] = 255;
            }
            (rejected, bounded)
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        rejected,
        bounded,
        fractal = kind.label(),
        "Render complete"
    );

    let buffer = PixelBuffer::from_rgba(width, height, pixels)?;
    Ok(RenderResult {
        buffer,
        elapsed,
        rejected,
        bounded,
    })
}
