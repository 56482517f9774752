//! Coordinate transforms between pixel space and the complex plane.
//!
//! Two pixel conventions meet here:
//!
//! * **buffer rows** (`pixel_to_plane`): row 0 is the *bottom* of the window,
//!   which is how the renderer iterates before it flips rows on write;
//! * **screen positions** (`screen_to_plane`, `screen_fraction`): `y` grows
//!   downward, as pointer events report it.
//!
//! The screen flip lives only in the two `screen_*` helpers.

use crate::complex::Complex;
use crate::window::Window;

/// Map buffer pixel `(px, py)` to a point on the plane.
///
/// Out-of-range pixels extrapolate linearly; that is not an error.
#[inline]
pub fn pixel_to_plane(window: &Window, width: u32, height: u32, px: f64, py: f64) -> Complex {
    Complex::new(
        window.x_min + (px / width as f64) * window.width(),
        window.y_min + (py / height as f64) * window.height(),
    )
}

/// Map a screen position (y down) to a point on the plane.
#[inline]
pub fn screen_to_plane(window: &Window, width: u32, height: u32, sx: f64, sy: f64) -> Complex {
    pixel_to_plane(window, width, height, sx, height as f64 - sy)
}

/// Fractional position of a screen point inside the surface, measured from
/// the bottom-left corner so that it lines up with [`pixel_to_plane`].
#[inline]
pub fn screen_fraction(width: u32, height: u32, sx: f64, sy: f64) -> (f64, f64) {
    (sx / width as f64, (height as f64 - sy) / height as f64)
}

/// Scale the window by `scale` while keeping `center` at fraction `(fx, fy)`.
///
/// `scale < 1` zooms in, `scale > 1` zooms out.
pub fn zoom_window(window: &Window, center: Complex, fx: f64, fy: f64, scale: f64) -> Window {
    let new_width = window.width() * scale;
    let new_height = window.height() * scale;
    let x_min = center.re - fx * new_width;
    let y_min = center.im - fy * new_height;
    Window {
        x_min,
        x_max: x_min + new_width,
        y_min,
        y_max: y_min + new_height,
    }
}

/// Translate the window by a pixel displacement.
///
/// `(dx, dy)` is measured in screen pixels as `anchor - current`, so dragging
/// the image right moves the window left. The vertical term is subtracted
/// because screen rows grow downward while the imaginary axis grows upward.
pub fn pan_window(window: &Window, dx: f64, dy: f64, width: u32, height: u32) -> Window {
    let shift_x = (dx / width as f64) * window.width();
    let shift_y = (dy / height as f64) * window.height();
    Window {
        x_min: window.x_min + shift_x,
        x_max: window.x_max + shift_x,
        y_min: window.y_min - shift_y,
        y_max: window.y_max - shift_y,
    }
}
