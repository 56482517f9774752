use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pixel data of {len} bytes does not fit a {width}×{height} RGBA buffer")]
    BufferLength { width: u32, height: u32, len: usize },

    #[error("render size {got_width}×{got_height} does not match renderer {width}×{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] brotview_core::CoreError),
}
