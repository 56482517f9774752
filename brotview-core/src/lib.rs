pub mod complex;
pub mod error;
pub mod fractal;
pub mod kernel;
pub mod mapper;
pub mod settings;
pub mod window;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{FractalKind, RenderConfig};
pub use kernel::{escape_time, EscapeResult};
pub use mapper::{pan_window, pixel_to_plane, screen_fraction, screen_to_plane, zoom_window};
pub use settings::ViewSettings;
pub use window::Window;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
