use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::kernel::{escape_time, EscapeResult};

/// Which escape-time family to draw.
///
/// Both families share one kernel; they differ only in which argument the
/// mapped pixel feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FractalKind {
    /// `c` is the pixel, `z₀ = 0`.
    Mandelbrot,

    /// `c` is fixed, `z₀` is the pixel.
    Julia { c: Complex },
}

impl FractalKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    /// The fixed constant, for Julia sets.
    pub fn julia_c(&self) -> Option<Complex> {
        match *self {
            Self::Mandelbrot => None,
            Self::Julia { c } => Some(c),
        }
    }

    /// Kernel arguments `(c, z₀)` for a mapped pixel.
    #[inline]
    pub fn kernel_inputs(&self, point: Complex) -> (Complex, Complex) {
        match *self {
            Self::Mandelbrot => (point, Complex::ZERO),
            Self::Julia { c } => (c, point),
        }
    }

    /// Run the kernel for a mapped pixel.
    #[inline]
    pub fn iterate(&self, point: Complex, max_iterations: u32) -> EscapeResult {
        let (c, z0) = self.kernel_inputs(point);
        escape_time(c, z0, max_iterations)
    }
}

/// Resolution and iteration cap for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> crate::Result<Self> {
        let config = Self {
            width,
            height,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(self.max_iterations));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
