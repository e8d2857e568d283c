use anyhow::Result;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Platform, SaveChoice};

/// Test double: answers dialogs from queues and records what was shown.
#[derive(Default)]
pub struct ScriptedPlatform {
    files: Mutex<VecDeque<Option<PathBuf>>>,
    choices: Mutex<VecDeque<SaveChoice>>,
    config: Option<PathBuf>,
    clipboard: Mutex<Option<String>>,

    pub dialogs_opened: Mutex<Vec<(String, Option<PathBuf>)>>,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
    pub messages: Mutex<Vec<String>>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_dir(dir: PathBuf) -> Self {
        Self {
            config: Some(dir),
            ..Self::default()
        }
    }

    /// What the system clipboard holds (`None` = unreadable).
    pub fn set_clipboard(&self, text: Option<&str>) {
        *self.clipboard.lock().unwrap() = text.map(str::to_string);
    }

    /// Next file/save dialog returns `path` (`None` = user cancelled).
    pub fn answer_file(&self, path: Option<PathBuf>) {
        self.files.lock().unwrap().push_back(path);
    }

    pub fn answer_confirm(&self, choice: SaveChoice) {
        self.choices.lock().unwrap().push_back(choice);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn confirm_count(&self) -> usize {
        self.confirms.lock().unwrap().len()
    }

    pub fn dialogs_opened(&self) -> Vec<(String, Option<PathBuf>)> {
        self.dialogs_opened.lock().unwrap().clone()
    }

    fn next_file(&self, title: &str, current: Option<&Path>) -> Option<PathBuf> {
        self.dialogs_opened
            .lock()
            .unwrap()
            .push((title.to_string(), current.map(Path::to_path_buf)));
        self.files.lock().unwrap().pop_front().flatten()
    }
}

impl Platform for ScriptedPlatform {
    fn choose_file(&self, title: &str, current: Option<&Path>) -> Option<PathBuf> {
        self.next_file(title, current)
    }

    fn choose_save_path(&self, title: &str, current: Option<&Path>) -> Option<PathBuf> {
        self.next_file(title, current)
    }

    fn confirm_save(&self, message: &str) -> SaveChoice {
        self.confirms.lock().unwrap().push(message.to_string());
        self.choices
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SaveChoice::Cancel)
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn clipboard_text(&self) -> Option<String> {
        self.clipboard.lock().unwrap().clone()
    }

    fn config_dir(&self, _app_name: &str) -> Result<PathBuf> {
        self.config
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no config dir in this test"))
    }
}
