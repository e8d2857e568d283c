use anyhow::{Context, Result};
use directories::ProjectDirs;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Platform, SaveChoice};

const SAVE: &str = "Save";
const DONT_SAVE: &str = "Don't Save";
const CANCEL: &str = "Cancel";

#[derive(Clone, Debug, Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

/// Start the dialog in the current file's folder, pre-filled with its name.
fn seeded_dialog(title: &str, current: Option<&Path>) -> FileDialog {
    let mut dialog = FileDialog::new().set_title(title);
    if let Some(path) = current {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = path.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
    }
    dialog
}

impl Platform for NativePlatform {
    fn choose_file(&self, title: &str, current: Option<&Path>) -> Option<PathBuf> {
        seeded_dialog(title, current).pick_file()
    }

    fn choose_save_path(&self, title: &str, current: Option<&Path>) -> Option<PathBuf> {
        seeded_dialog(title, current).save_file()
    }

    fn confirm_save(&self, message: &str) -> SaveChoice {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("textpad")
            .set_description(message)
            .set_buttons(MessageButtons::YesNoCancelCustom(
                SAVE.to_string(),
                DONT_SAVE.to_string(),
                CANCEL.to_string(),
            ))
            .show();

        match result {
            MessageDialogResult::Yes => SaveChoice::Save,
            MessageDialogResult::No => SaveChoice::DontSave,
            MessageDialogResult::Custom(label) if label == SAVE => SaveChoice::Save,
            MessageDialogResult::Custom(label) if label == DONT_SAVE => SaveChoice::DontSave,
            _ => SaveChoice::Cancel,
        }
    }

    fn alert(&self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("textpad")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn message(&self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("textpad")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn clipboard_text(&self) -> Option<String> {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(c) => c,
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                return None;
            }
        };
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("clipboard read failed: {e}");
                None
            }
        }
    }

    fn config_dir(&self, app_name: &str) -> Result<PathBuf> {
        let pd = ProjectDirs::from("", "", app_name)
            .context("Failed to resolve platform config directory (ProjectDirs::from)")?;
        Ok(pd.config_dir().to_path_buf())
    }
}
