use crate::complex::Complex;

/// Squared escape radius. `|z| > 2` guarantees divergence.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Outcome of iterating one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeResult {
    /// `|c| > 2`: rejected before iterating. Counts as escaped at 0.
    Rejected,

    /// The orbit left the escape radius after `iterations` steps,
    /// before reaching the cap.
    Escaped { iterations: u32 },

    /// The orbit stayed bounded up to the cap; `iterations` equals it.
    Bounded { iterations: u32 },
}

impl EscapeResult {
    #[inline]
    pub fn iterations(&self) -> u32 {
        match *self {
            Self::Rejected => 0,
            Self::Escaped { iterations } | Self::Bounded { iterations } => iterations,
        }
    }

    #[inline]
    pub fn escaped(&self) -> bool {
        !matches!(self, Self::Bounded { .. })
    }
}

/// Iterate `z ← z² + c` from `z0` and count steps until `|z|² > 4`.
///
/// Points with `|c|² > 4` are rejected up front. That is a valid
/// membership test for the Mandelbrot set only; it is applied to Julia
/// constants as well so both families share one kernel and one look.
///
/// `max_iterations == 0` returns `Escaped { iterations: 0 }`; callers are
/// expected to pass a validated cap of at least 1.
#[inline]
pub fn escape_time(c: Complex, z0: Complex, max_iterations: u32) -> EscapeResult {
    if c.norm_sq() > ESCAPE_RADIUS_SQ {
        return EscapeResult::Rejected;
    }

    let (mut a, mut b) = (z0.re, z0.im);
    let mut n: u32 = 0;
    while a * a + b * b <= ESCAPE_RADIUS_SQ && n < max_iterations {
        let next_a = a * a - b * b + c.re;
        b = 2.0 * a * b + c.im;
        a = next_a;
        n += 1;
    }

    if n < max_iterations || max_iterations == 0 {
        EscapeResult::Escaped { iterations: n }
    } else {
        EscapeResult::Bounded { iterations: n }
    }
}
