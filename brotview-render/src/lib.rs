pub mod buffer;
pub mod color;
pub mod error;
pub mod export;
pub mod renderer;

pub use buffer::PixelBuffer;
pub use color::{color_for, hsb_to_rgb, BOUNDED_COLOR, REJECTED_COLOR};
pub use error::RenderError;
pub use export::{encode_png, export_png, ExportMetadata};
pub use renderer::{render, render_job, RenderJob, RenderResult, Renderer};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
