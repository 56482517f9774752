//! Directories the app reads from and writes to.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default directory for exported images: the user's pictures folder, or
/// `images/` next to the executable when the platform has none.
pub fn images_directory() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(PathBuf::from))
        .unwrap_or_else(|| exe_directory().join("images"))
}
