use crate::error::CoreError;

/// User-editable settings held by each viewport.
///
/// Every viewport owns its own copy, so editing the iteration cap of a Julia
/// view never affects the Mandelbrot view it came from. Values are checked on
/// construction and again on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ViewSettings {
    /// Iteration cap per pixel.
    pub max_iterations: u32,

    /// Multiplicative zoom per double-click; always `> 1`.
    pub zoom_ratio: f64,
}

impl<'de> serde::Deserialize<'de> for ViewSettings {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            max_iterations: u32,
            zoom_ratio: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.max_iterations, raw.zoom_ratio).map_err(serde::de::Error::custom)
    }
}

impl ViewSettings {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 5000;
    pub const DEFAULT_ZOOM_RATIO: f64 = 1.25;

    pub fn new(max_iterations: u32, zoom_ratio: f64) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if !zoom_ratio.is_finite() || zoom_ratio <= 1.0 {
            return Err(CoreError::InvalidZoomRatio(zoom_ratio));
        }
        Ok(Self {
            max_iterations,
            zoom_ratio,
        })
    }

    /// Parse the two text inputs a front-end collects.
    ///
    /// Negative or non-numeric iteration counts surface as `Parse` errors;
    /// out-of-range but well-formed values get the specific variant.
    pub fn parse(max_iterations: &str, zoom_ratio: &str) -> crate::Result<Self> {
        let iterations_text = max_iterations.trim();
        let iterations = iterations_text
            .parse::<u32>()
            .map_err(|_| CoreError::Parse {
                field: "max iterations",
                input: iterations_text.to_string(),
            })?;
        let ratio_text = zoom_ratio.trim();
        let ratio = ratio_text.parse::<f64>().map_err(|_| CoreError::Parse {
            field: "zoom ratio",
            input: ratio_text.to_string(),
        })?;
        Self::new(iterations, ratio)
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            zoom_ratio: Self::DEFAULT_ZOOM_RATIO,
        }
    }
}
