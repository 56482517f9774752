use brotview_core::EscapeResult;

/// Color of points rejected by the `|c| > 2` pre-test. Shared by both families.
pub const REJECTED_COLOR: [u8; 3] = [28, 1, 0];

/// Color of points whose orbit stayed bounded up to the cap.
pub const BOUNDED_COLOR: [u8; 3] = [0, 0, 0];

/// Iterations per full trip around the hue wheel.
pub const HUE_PERIOD: f32 = 256.0;

/// Map a kernel result to an RGB color.
///
/// Escaped points cycle through the hue wheel every [`HUE_PERIOD`]
/// iterations at full saturation, with brightness `n / (n + 8)` so that
/// slow-escaping points approach full brightness.
pub fn color_for(result: EscapeResult, max_iterations: u32) -> [u8; 3] {
    match result {
        EscapeResult::Rejected => REJECTED_COLOR,
        _ if result.iterations() == max_iterations => BOUNDED_COLOR,
        _ => {
            let n = result.iterations() as f32;
            hsb_to_rgb(n / HUE_PERIOD, 1.0, n / (n + 8.0))
        }
    }
}

/// HSB (a.k.a. HSV) to RGB in single precision.
///
/// `hue` wraps modulo 1. Channels round as `v·255 + 0.5`, truncated, which
/// keeps the output byte-identical to the classic AWT conversion.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [u8; 3] {
    let to_byte = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = to_byte(brightness);
        return [v, v, v];
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        5 => (brightness, p, q),
        _ => (0.0, 0.0, 0.0),
    };
    [to_byte(r), to_byte(g), to_byte(b)]
}
