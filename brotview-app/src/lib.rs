pub mod app_dir;
pub mod controller;
pub mod gesture;
pub mod preferences;
pub mod render_bridge;

pub use controller::{Frame, ViewOptions, ViewportController};
pub use gesture::{GestureOutcome, GestureState, PanRedraw, PointerButton};
pub use preferences::AppPreferences;
pub use render_bridge::{RenderBridge, RepaintHook};
