use serde::{Deserialize, Serialize};

use brotview_core::Complex;

use crate::controller::ViewportController;

/// Where a viewport is in its pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A press was recorded; moves pan the window.
    Dragging,
    /// A zoom render is in flight. Moves and zooms are dropped until it lands.
    Generating,
}

impl GestureState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging => "Dragging",
            Self::Generating => "Generating\u{2026}",
        }
    }
}

/// When a drag re-renders the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanRedraw {
    /// Re-render after every pointer move.
    #[default]
    EveryMove,
    /// Re-render once when the pointer is released.
    OnRelease,
}

impl PanRedraw {
    pub fn label(self) -> &'static str {
        match self {
            Self::EveryMove => "Every move",
            Self::OnRelease => "On release",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a gesture did, for the presentation layer to act on.
#[derive(Debug)]
pub enum GestureOutcome {
    /// Nothing visible changed.
    Ignored,
    /// The window moved but no render was requested.
    Panned,
    /// A render of the current window was queued.
    RenderRequested,
    /// Plane coordinates under a single click.
    Coordinates(Complex),
    /// A new Julia viewport, owned by the caller from now on.
    SpawnJulia(Box<ViewportController>),
}

impl GestureOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
