use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use brotview_core::ViewSettings;

use crate::gesture::PanRedraw;

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Render resolution of every viewport. Fixed for the session.
    #[serde(default = "default_canvas_size")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_size")]
    pub canvas_height: u32,
    /// Iteration cap and zoom ratio new viewports start with.
    #[serde(default)]
    pub view_settings: ViewSettings,
    #[serde(default)]
    pub pan_redraw: PanRedraw,
    /// Where "Save PNG" opens. When empty, the user's pictures folder is used.
    #[serde(default)]
    pub export_dir: String,
}

fn default_window_width() -> f32 {
    1000.0
}
fn default_window_height() -> f32 {
    760.0
}
fn default_canvas_size() -> u32 {
    600
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            canvas_width: default_canvas_size(),
            canvas_height: default_canvas_size(),
            view_settings: ViewSettings::default(),
            pan_redraw: PanRedraw::default(),
            export_dir: String::new(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(mut prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        if prefs.canvas_width == 0 || prefs.canvas_height == 0 {
                            prefs.canvas_width = default_canvas_size();
                            prefs.canvas_height = default_canvas_size();
                        }
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Directory the save dialog starts in.
    pub fn export_directory(&self) -> PathBuf {
        if self.export_dir.trim().is_empty() {
            crate::app_dir::images_directory()
        } else {
            PathBuf::from(self.export_dir.trim())
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
