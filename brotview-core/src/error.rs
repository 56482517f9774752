use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid zoom ratio: {0} (must be finite and > 1.0)")]
    InvalidZoomRatio(f64),

    #[error("invalid dimensions: {width}×{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("degenerate window: [{x_min}, {x_max}] × [{y_min}, {y_max}]")]
    DegenerateWindow {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("could not parse {field} from {input:?}")]
    Parse { field: &'static str, input: String },
}
