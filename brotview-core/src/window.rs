use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The visible rectangle of the complex plane.
///
/// A valid window has finite bounds with `x_min < x_max` and
/// `y_min < y_max`. Windows are plain values: every pan or zoom produces a
/// new one rather than editing fields in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Window {
    /// Startup view for both fractal families: `[-2.5, 2.5] × [-2.5, 2.5]`.
    ///
    /// Both sets lie inside `|z| ≤ 2`, so this leaves a margin on every side.
    pub const INITIAL: Self = Self {
        x_min: -2.5,
        x_max: 2.5,
        y_min: -2.5,
        y_max: 2.5,
    };

    /// Build a window, rejecting empty, inverted or non-finite bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> crate::Result<Self> {
        let window = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        window.validate()?;
        Ok(window)
    }

    /// Check the window invariant.
    ///
    /// NaN bounds fail the `<` comparisons, so they are caught here too.
    pub fn validate(&self) -> crate::Result<()> {
        let finite = self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite();
        if finite && self.x_min < self.x_max && self.y_min < self.y_max {
            Ok(())
        } else {
            Err(CoreError::DegenerateWindow {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Extent along the real axis.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the imaginary axis.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
