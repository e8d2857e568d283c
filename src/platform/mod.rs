use anyhow::Result;
use std::path::{Path, PathBuf};

/// Answer to "save the unsaved changes first?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveChoice {
    Cancel,
    Save,
    DontSave,
}

/// All OS / environment specific behavior belongs here.
///
/// The document controller only talks to the desktop through this trait, so
/// tests can drive it with scripted answers instead of real dialogs.
pub trait Platform: Send + Sync {
    // ---------------------------
    // File dialogs
    // ---------------------------

    /// Pick an existing file (open / insert). `current` seeds the dialog.
    fn choose_file(&self, title: &str, current: Option<&Path>) -> Option<PathBuf>;

    /// Pick a target path for saving. `current` seeds the dialog.
    fn choose_save_path(&self, title: &str, current: Option<&Path>) -> Option<PathBuf>;

    // ---------------------------
    // Message boxes
    // ---------------------------

    /// Three-way Cancel / Save / Don't Save question.
    fn confirm_save(&self, message: &str) -> SaveChoice;

    /// Blocking error notification.
    fn alert(&self, message: &str);

    /// Blocking informational notification.
    fn message(&self, message: &str);

    // ---------------------------
    // Clipboard
    // ---------------------------

    /// Current system clipboard text, or `None` if it can't be read.
    fn clipboard_text(&self) -> Option<String>;

    // ---------------------------
    // App data paths
    // ---------------------------

    /// Returns an app-specific config dir, e.g.:
    /// - Windows: %APPDATA%/<app>/config
    /// - macOS: ~/Library/Application Support/<app>
    /// - Linux: ~/.config/<app>
    fn config_dir(&self, app_name: &str) -> Result<PathBuf>;
}

pub mod native;

#[cfg(test)]
pub mod scripted;
