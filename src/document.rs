// src/document.rs
//
// The document controller: file identity, dirty tracking and the find/replace
// sessions. It owns the text buffer and the editor view state, and talks to the
// desktop only through `Platform`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::buffer::{cc_len, TextBuffer};
use crate::editor::EditorState;
use crate::platform::{Platform, SaveChoice};

pub const UNTITLED: &str = "Untitled";
pub const MODIFIED_SUFFIX: &str = " (modified)";

const UNSAVED_PROMPT: &str =
    "The current file has not been saved.\nWould you like to save it now?";

/// How `load_file` puts the file into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    /// Replace the document and adopt the file's name.
    Replace,
    /// Insert at the given char position; the document stays what it was.
    Insert(usize),
}

/// Non-modal replace panel. Its fields are read when a button is pressed,
/// never cached when the panel opens.
#[derive(Clone, Debug, Default)]
pub struct ReplacePanel {
    pub open: bool,
    pub find: String,
    pub with: String,
    /// The Find field takes keyboard focus once, on the next frame.
    pub focus_pending: bool,
}

pub struct Document {
    platform: Arc<dyn Platform>,

    pub buffer: TextBuffer,
    pub view: EditorState,

    filename: Option<PathBuf>,
    dirty: bool,
    loading: bool,

    // Find session
    search: String,
    /// Draft of the "Search String:" prompt while it is showing.
    pub search_prompt: Option<String>,

    pub replace: ReplacePanel,

    title: String,
    clipboard: String,
    exit_requested: bool,
}

/// Last path component, treating both `/` and the platform separator as separators.
pub fn base_name(path: &Path) -> String {
    let full = path.to_string_lossy();
    let is_sep = |c: char| c == '/' || c == std::path::MAIN_SEPARATOR;
    full.rsplit(is_sep).next().unwrap_or_default().to_string()
}

impl Document {
    pub fn new(platform: Arc<dyn Platform>, undo_capacity: usize) -> Self {
        Self {
            platform,
            buffer: TextBuffer::new(undo_capacity),
            view: EditorState::default(),
            filename: None,
            dirty: false,
            loading: false,
            search: String::new(),
            search_prompt: None,
            replace: ReplacePanel::default(),
            title: UNTITLED.to_string(),
            clipboard: String::new(),
            exit_requested: false,
        }
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ---------------------------
    // Change notifications
    // ---------------------------

    /// Deliver queued buffer modifications, in order, to the view and to
    /// `on_buffer_changed`.
    pub(crate) fn flush_modifications(&mut self) {
        for m in self.buffer.take_modifications() {
            self.view.buffer_modified(&m);
            self.on_buffer_changed(m.inserted, m.deleted);
        }
    }

    /// Resync title (and view) without an edit.
    pub fn refresh(&mut self) {
        self.buffer.call_modify_callbacks();
        self.flush_modifications();
    }

    pub fn on_buffer_changed(&mut self, inserted: usize, deleted: usize) {
        if (inserted > 0 || deleted > 0) && !self.loading {
            self.dirty = true;
        }
        self.title = self.compute_title();
        if self.loading {
            self.view.show_insert_position();
        }
    }

    pub fn compute_title(&self) -> String {
        let mut title = match &self.filename {
            Some(path) => base_name(path),
            None => UNTITLED.to_string(),
        };
        if self.dirty {
            title.push_str(MODIFIED_SUFFIX);
        }
        title
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.title = self.compute_title();
    }

    /// Run `f` with `loading` set; it is cleared again whatever `f` returns.
    fn while_loading<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.loading = true;
        let result = f(self);
        self.loading = false;
        result
    }

    // ---------------------------
    // File commands
    // ---------------------------

    /// Returns `true` when it is fine to throw the current content away.
    pub fn confirm_discard_if_dirty(&mut self) -> bool {
        if !self.is_dirty() {
            return true;
        }
        match self.platform.confirm_save(UNSAVED_PROMPT) {
            SaveChoice::Cancel => false,
            SaveChoice::Save => {
                self.save_document();
                !self.is_dirty()
            }
            SaveChoice::DontSave => true,
        }
    }

    pub fn new_document(&mut self) {
        if !self.confirm_discard_if_dirty() {
            return;
        }

        self.filename = None;
        let len = self.buffer.len();
        self.view.select(0, len);
        self.buffer.remove(0, len);
        self.flush_modifications();
        self.buffer.clear_undo();
        self.view.reset();

        // The clearing edit above is not an unsaved change.
        self.dirty = false;
        self.refresh();
        info!("new document");
    }

    pub fn open_document(&mut self) {
        if !self.confirm_discard_if_dirty() {
            return;
        }
        let chosen = self.platform.choose_file("Open File?", self.filename());
        if let Some(path) = chosen {
            self.load_file(&path, LoadMode::Replace);
        }
    }

    pub fn insert_document(&mut self) {
        let chosen = self.platform.choose_file("Insert File?", self.filename());
        if let Some(path) = chosen {
            let at = self.view.insert_position();
            self.load_file(&path, LoadMode::Insert(at));
        }
    }

    /// Load or insert `path`. Returns whether the read succeeded.
    pub fn load_file(&mut self, path: &Path, mode: LoadMode) -> bool {
        let ok = self.while_loading(|doc| {
            let result = match mode {
                LoadMode::Replace => {
                    doc.dirty = false;
                    doc.filename = None;
                    doc.view.reset();
                    doc.buffer.load_file(path)
                }
                LoadMode::Insert(at) => {
                    doc.dirty = true;
                    doc.buffer.insert_file(path, at)
                }
            };
            doc.flush_modifications();

            match result {
                Ok(bytes) => {
                    info!(path = %path.display(), bytes, ?mode, "loaded file");
                    if mode == LoadMode::Replace {
                        doc.filename = Some(path.to_path_buf());
                    }
                    true
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "read failed");
                    doc.platform.alert(&format!(
                        "Error reading from file '{}':\n{}.",
                        path.display(),
                        e
                    ));
                    false
                }
            }
        });
        self.refresh();
        ok
    }

    pub fn save_document(&mut self) {
        match self.filename.clone() {
            Some(path) => {
                self.save_file(&path);
            }
            None => self.save_document_as(),
        }
    }

    pub fn save_document_as(&mut self) {
        let chosen = self.platform.choose_save_path("Save File As?", self.filename());
        if let Some(path) = chosen {
            self.save_file(&path);
        }
    }

    /// Write the buffer to `path`. On failure the document stays dirty and
    /// keeps its old name.
    pub fn save_file(&mut self, path: &Path) -> bool {
        let ok = match self.buffer.save_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "saved file");
                self.filename = Some(path.to_path_buf());
                self.dirty = false;
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "write failed");
                self.platform.alert(&format!(
                    "Error writing to file '{}':\n{}.",
                    path.display(),
                    e
                ));
                false
            }
        };
        self.refresh();
        ok
    }

    /// Returns `true` when the application may exit now.
    pub fn quit(&mut self) -> bool {
        if self.dirty && !self.confirm_discard_if_dirty() {
            debug!("quit cancelled");
            return false;
        }
        info!("exiting");
        self.exit_requested = true;
        true
    }

    // ---------------------------
    // Edit commands
    // ---------------------------

    /// Copy the selection into the clipboard register. Returns the copied text.
    pub fn copy(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.clipboard = text.clone();
        Some(text)
    }

    pub fn cut(&mut self) -> Option<String> {
        let copied = self.copy();
        if copied.is_some() {
            self.buffer.begin_undo_group();
            self.delete_selection();
        }
        self.mark_changed();
        copied
    }

    /// Paste the system clipboard at the caret. The register filled by
    /// cut/copy is used when the system clipboard can't be read.
    pub fn paste(&mut self) {
        let text = match self.platform.clipboard_text() {
            Some(text) => text,
            None => {
                debug!("system clipboard unavailable; pasting register");
                self.clipboard.clone()
            }
        };
        self.paste_text(&text);
    }

    /// Paste `text` at the caret, replacing the selection.
    pub fn paste_text(&mut self, text: &str) {
        self.clipboard = text.to_string();
        self.buffer.begin_undo_group();
        self.insert_at_caret(text);
        self.mark_changed();
    }

    pub fn delete(&mut self) {
        self.buffer.begin_undo_group();
        self.delete_selection();
        self.mark_changed();
    }

    pub fn undo(&mut self) {
        if !self.buffer.can_undo() {
            debug!("nothing to undo");
        }
        if let Some(caret) = self.buffer.undo() {
            self.flush_modifications();
            self.view.set_insert_position(caret);
            self.view.show_insert_position();
        }
        self.mark_changed();
    }

    // ---------------------------
    // Find session
    // ---------------------------

    /// Open the "Search String:" prompt seeded with the last term.
    pub fn find(&mut self) {
        self.search_prompt = Some(self.search.clone());
    }

    /// Result of the search prompt. `None` means the user cancelled; an empty
    /// string is a real answer.
    pub fn submit_search(&mut self, answer: Option<String>) {
        self.search_prompt = None;
        if let Some(term) = answer {
            self.search = term;
            self.find_next();
        }
    }

    pub fn find_next(&mut self) {
        if self.search.is_empty() {
            self.find();
            return;
        }

        let pos = self.view.insert_position();
        match self.buffer.search_forward(pos, &self.search) {
            Some(at) => {
                let end = at + cc_len(&self.search);
                debug!(term = %self.search, at, "found");
                self.view.select(at, end);
                self.view.show_insert_position();
            }
            None => {
                debug!(term = %self.search, from = pos, "not found");
                self.platform
                    .alert(&format!("No occurrences of '{}' found!", self.search));
            }
        }
    }

    // ---------------------------
    // Replace session
    // ---------------------------

    pub fn open_replace_dialog(&mut self) {
        self.show_replace_panel();
    }

    fn show_replace_panel(&mut self) {
        self.replace.open = true;
        self.replace.focus_pending = true;
    }

    pub fn cancel_replace(&mut self) {
        self.replace.open = false;
    }

    pub fn replace_next(&mut self) {
        let find = self.replace.find.clone();
        let with = self.replace.with.clone();

        if find.is_empty() {
            self.show_replace_panel();
            return;
        }
        self.replace.open = false;

        let pos = self.view.insert_position();
        let Some(at) = self.buffer.search_forward(pos, &find) else {
            debug!(term = %find, from = pos, "nothing to replace");
            self.platform
                .alert(&format!("No occurrences of '{}' found!", find));
            return;
        };

        let with_len = cc_len(&with);
        self.buffer.begin_undo_group();
        self.view.select(at, at + cc_len(&find));
        self.buffer.remove(at, at + cc_len(&find));
        self.buffer.insert(at, &with);
        self.flush_modifications();

        self.view.select(at, at + with_len);
        self.view.show_insert_position();
        self.mark_changed();
        debug!(term = %find, at, "replaced one");
    }

    /// Replace every occurrence from the top. Returns the count.
    pub fn replace_all(&mut self) -> usize {
        let find = self.replace.find.clone();
        let with = self.replace.with.clone();

        if find.is_empty() {
            self.show_replace_panel();
            return 0;
        }
        self.replace.open = false;

        let find_len = cc_len(&find);
        let with_len = cc_len(&with);

        self.buffer.begin_undo_group();
        self.view.set_insert_position(0);
        let mut times = 0usize;

        // The caret always lands after the inserted text, so the next search
        // cannot see a replacement again.
        while let Some(at) = self
            .buffer
            .search_forward(self.view.insert_position(), &find)
        {
            self.buffer.remove(at, at + find_len);
            self.buffer.insert(at, &with);
            self.flush_modifications();
            self.view.set_insert_position(at + with_len);
            self.view.show_insert_position();
            times += 1;
        }

        if times > 0 {
            self.mark_changed();
        }
        debug!(term = %find, times, "replaced all");
        self.platform
            .message(&format!("Replaced {} occurrences.", times));
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scripted::ScriptedPlatform;

    fn doc() -> (Document, Arc<ScriptedPlatform>) {
        let platform = Arc::new(ScriptedPlatform::new());
        let mut d = Document::new(platform.clone(), 100);
        d.refresh();
        (d, platform)
    }

    fn type_text(d: &mut Document, s: &str) {
        d.buffer.begin_undo_group();
        d.insert_at_caret(s);
    }

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let p = dir.path().join(name);
        std::fs::write(&p, text).unwrap();
        p
    }

    #[test]
    fn fresh_document_is_untitled_and_clean() {
        let (d, _) = doc();
        assert_eq!(d.title(), "Untitled");
        assert!(!d.is_dirty());
        assert!(d.filename().is_none());
    }

    #[test]
    fn edits_dirty_until_save() {
        let dir = tempfile::tempdir().unwrap();
        let (mut d, _) = doc();
        type_text(&mut d, "a");
        assert!(d.is_dirty());
        assert_eq!(d.title(), "Untitled (modified)");

        d.view.set_insert_position(0);
        d.delete_forward();
        type_text(&mut d, "bc");
        d.on_buffer_changed(0, 0);
        assert!(d.is_dirty());

        assert!(d.save_file(&dir.path().join("t.txt")));
        assert!(!d.is_dirty());
        assert_eq!(d.title(), "t.txt");
    }

    #[test]
    fn zero_count_notifications_do_not_dirty() {
        let (mut d, _) = doc();
        d.on_buffer_changed(0, 0);
        assert!(!d.is_dirty());
    }

    #[test]
    fn title_uses_base_name_and_modified_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "report.txt", "x");
        let (mut d, _) = doc();
        assert!(d.load_file(&p, LoadMode::Replace));
        assert_eq!(d.title(), "report.txt");
        type_text(&mut d, "y");
        assert_eq!(d.title(), "report.txt (modified)");

        assert_eq!(base_name(Path::new("/a/b/report.txt")), "report.txt");
        assert_eq!(base_name(Path::new("plain.txt")), "plain.txt");
    }

    #[test]
    fn new_type_save_as_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x.txt");
        let (mut d, platform) = doc();

        d.new_document();
        type_text(&mut d, "hello");
        assert!(d.is_dirty());

        platform.answer_file(Some(target.clone()));
        d.save_document();

        assert!(!d.is_dirty());
        assert_eq!(d.filename(), Some(target.as_path()));
        assert_eq!(d.title(), "x.txt");
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello");
        assert_eq!(platform.dialogs_opened()[0].0, "Save File As?");
    }

    #[test]
    fn save_with_a_name_skips_the_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "a.txt", "abc");
        let (mut d, platform) = doc();
        d.load_file(&p, LoadMode::Replace);
        d.view.set_insert_position(3);
        type_text(&mut d, "d");

        d.save_document();
        assert!(platform.dialogs_opened().is_empty());
        assert_eq!(std::fs::read_to_string(&p).unwrap(), "abcd");
        assert!(!d.is_dirty());
    }

    #[test]
    fn failed_save_keeps_dirty_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "orig.txt", "abc");
        let (mut d, platform) = doc();
        d.load_file(&p, LoadMode::Replace);
        type_text(&mut d, "!");

        // A directory cannot be written as a file.
        assert!(!d.save_file(dir.path()));
        assert!(d.is_dirty());
        assert_eq!(d.filename(), Some(p.as_path()));
        assert_eq!(d.title(), "orig.txt (modified)");

        let alerts = platform.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with(&format!(
            "Error writing to file '{}':\n",
            dir.path().display()
        )));
    }

    #[test]
    fn replace_load_resets_dirty_and_adopts_name() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "doc.txt", "content");
        let (mut d, _) = doc();
        type_text(&mut d, "scratch");

        assert!(d.load_file(&p, LoadMode::Replace));
        assert_eq!(d.buffer.text(), "content");
        assert!(!d.is_dirty());
        assert!(!d.is_loading());
        assert_eq!(d.filename(), Some(p.as_path()));
    }

    #[test]
    fn failed_load_clears_name_and_loading() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.txt", "abc");
        let (mut d, platform) = doc();
        d.load_file(&good, LoadMode::Replace);

        let missing = dir.path().join("missing.txt");
        assert!(!d.load_file(&missing, LoadMode::Replace));
        assert!(!d.is_loading());
        assert!(d.filename().is_none());
        assert!(!d.is_dirty());
        assert_eq!(d.title(), "Untitled");

        let alerts = platform.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with(&format!(
            "Error reading from file '{}':\n",
            missing.display()
        )));
        assert!(alerts[0].ends_with('.'));
    }

    #[test]
    fn insert_file_always_dirties() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(&dir, "base.txt", "ac");
        let part = write(&dir, "part.txt", "b");
        let (mut d, platform) = doc();
        d.load_file(&base, LoadMode::Replace);

        d.view.set_insert_position(1);
        platform.answer_file(Some(part));
        d.insert_document();
        assert_eq!(d.buffer.text(), "abc");
        assert!(d.is_dirty());
        assert_eq!(d.filename(), Some(base.as_path()));
        assert_eq!(platform.confirm_count(), 0);

        // Even a failed insert marks the document modified.
        let (mut d2, _) = doc();
        assert!(!d2.load_file(&dir.path().join("nope"), LoadMode::Insert(0)));
        assert!(d2.is_dirty());
        assert!(!d2.is_loading());
    }

    #[test]
    fn open_is_cancelled_by_confirm() {
        let (mut d, platform) = doc();
        type_text(&mut d, "unsaved");
        platform.answer_confirm(SaveChoice::Cancel);
        d.open_document();
        assert!(platform.dialogs_opened().is_empty());
        assert_eq!(d.buffer.text(), "unsaved");
    }

    #[test]
    fn open_seeds_dialog_with_current_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.txt", "A");
        let b = write(&dir, "b.txt", "B");
        let (mut d, platform) = doc();
        d.load_file(&a, LoadMode::Replace);

        platform.answer_file(Some(b.clone()));
        d.open_document();
        assert_eq!(d.buffer.text(), "B");
        assert_eq!(
            platform.dialogs_opened(),
            vec![("Open File?".to_string(), Some(a))]
        );
        assert_eq!(d.filename(), Some(b.as_path()));
    }

    #[test]
    fn new_document_dont_save_discards() {
        let (mut d, platform) = doc();
        type_text(&mut d, "junk");
        platform.answer_confirm(SaveChoice::DontSave);
        d.new_document();
        assert!(d.buffer.is_empty());
        assert!(!d.is_dirty());
        assert_eq!(d.title(), "Untitled");
    }

    #[test]
    fn confirm_save_that_fails_refuses_discard() {
        let dir = tempfile::tempdir().unwrap();
        let (mut d, platform) = doc();
        type_text(&mut d, "precious");

        platform.answer_confirm(SaveChoice::Save);
        platform.answer_file(Some(dir.path().to_path_buf()));
        d.new_document();

        assert_eq!(d.buffer.text(), "precious");
        assert!(d.is_dirty());
    }

    #[test]
    fn confirm_save_then_new() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("kept.txt");
        let (mut d, platform) = doc();
        type_text(&mut d, "precious");

        platform.answer_confirm(SaveChoice::Save);
        platform.answer_file(Some(target.clone()));
        d.new_document();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "precious");
        assert!(d.buffer.is_empty());
        assert!(d.filename().is_none());
    }

    #[test]
    fn quit_cancel_keeps_state() {
        let (mut d, platform) = doc();
        type_text(&mut d, "x");
        platform.answer_confirm(SaveChoice::Cancel);
        assert!(!d.quit());
        assert!(!d.exit_requested());
        assert!(d.is_dirty());
        assert_eq!(d.buffer.text(), "x");
    }

    #[test]
    fn quit_clean_does_not_ask() {
        let (mut d, platform) = doc();
        assert!(d.quit());
        assert!(d.exit_requested());
        assert_eq!(platform.confirm_count(), 0);
    }

    #[test]
    fn find_selects_and_moves_caret_after_match() {
        let (mut d, _) = doc();
        type_text(&mut d, "one two one");
        d.view.set_insert_position(0);

        d.submit_search(Some("one".into()));
        assert_eq!(d.view.selection_range(), Some((0, 3)));
        assert_eq!(d.view.insert_position(), 3);

        d.find_next();
        assert_eq!(d.view.selection_range(), Some((8, 11)));
        assert_eq!(d.search_term(), "one");
    }

    #[test]
    fn find_miss_alerts_without_changes() {
        let (mut d, platform) = doc();
        type_text(&mut d, "abc");
        let was_dirty = d.is_dirty();
        d.view.select(0, 1);

        d.submit_search(Some("zzz".into()));
        assert_eq!(platform.alerts(), vec!["No occurrences of 'zzz' found!".to_string()]);
        assert_eq!(d.view.selection_range(), Some((0, 1)));
        assert_eq!(d.is_dirty(), was_dirty);
    }

    #[test]
    fn find_next_without_term_opens_prompt() {
        let (mut d, platform) = doc();
        type_text(&mut d, "abc");
        d.find_next();
        assert_eq!(d.search_prompt.as_deref(), Some(""));
        assert!(platform.alerts().is_empty());
    }

    #[test]
    fn empty_answer_is_not_cancel() {
        let (mut d, _) = doc();
        d.submit_search(Some("abc".into()));
        d.find();
        assert_eq!(d.search_prompt.as_deref(), Some("abc"));

        d.submit_search(None);
        assert_eq!(d.search_term(), "abc");
        assert!(d.search_prompt.is_none());

        d.submit_search(Some(String::new()));
        assert_eq!(d.search_term(), "");
        // find_next re-prompted instead of searching for nothing
        assert_eq!(d.search_prompt.as_deref(), Some(""));
    }

    #[test]
    fn replace_all_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "x.txt", "foo bar foo");
        let (mut d, platform) = doc();
        d.load_file(&p, LoadMode::Replace);

        d.replace.find = "foo".into();
        d.replace.with = "baz".into();
        assert_eq!(d.replace_all(), 2);
        assert_eq!(d.buffer.text(), "baz bar baz");
        assert!(d.is_dirty());
        assert_eq!(platform.messages(), vec!["Replaced 2 occurrences.".to_string()]);

        assert_eq!(d.replace_all(), 0);
        assert_eq!(platform.messages()[1], "Replaced 0 occurrences.");
    }

    #[test]
    fn replace_all_terminates_when_replacement_contains_term() {
        let (mut d, _) = doc();
        type_text(&mut d, "a-a-a");
        d.replace.find = "a".into();
        d.replace.with = "aa".into();
        assert_eq!(d.replace_all(), 3);
        assert_eq!(d.buffer.text(), "aa-aa-aa");
    }

    #[test]
    fn replace_all_with_nothing_found_stays_clean() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "x.txt", "abc");
        let (mut d, platform) = doc();
        d.load_file(&p, LoadMode::Replace);
        d.replace.find = "q".into();
        assert_eq!(d.replace_all(), 0);
        assert!(!d.is_dirty());
        assert_eq!(platform.messages(), vec!["Replaced 0 occurrences.".to_string()]);
    }

    #[test]
    fn replace_with_empty_find_reopens_panel() {
        let (mut d, platform) = doc();
        type_text(&mut d, "abc");
        d.replace.with = "x".into();

        d.replace_next();
        assert!(d.replace.open);
        d.cancel_replace();
        assert_eq!(d.replace_all(), 0);
        assert!(d.replace.open);
        assert!(platform.messages().is_empty());
        assert_eq!(d.buffer.text(), "abc");
    }

    #[test]
    fn replace_next_reads_fields_at_call_time() {
        let (mut d, platform) = doc();
        type_text(&mut d, "cat cat");
        d.view.set_insert_position(0);

        d.open_replace_dialog();
        d.replace.find = "cat".into();
        d.replace.with = "dog".into();
        d.replace_next();
        assert!(!d.replace.open);
        assert_eq!(d.buffer.text(), "dog cat");
        assert_eq!(d.view.selection_range(), Some((0, 3)));
        assert_eq!(d.view.insert_position(), 3);

        // Edited while the panel was hidden.
        d.replace.with = "cow".into();
        d.replace_next();
        assert_eq!(d.buffer.text(), "dog cow");
        assert!(d.is_dirty());

        d.replace_next();
        assert_eq!(platform.alerts(), vec!["No occurrences of 'cat' found!".to_string()]);
        assert!(!d.replace.open);
    }

    #[test]
    fn cancel_keeps_fields() {
        let (mut d, _) = doc();
        d.open_replace_dialog();
        d.replace.find = "a".into();
        d.replace.with = "b".into();
        d.cancel_replace();
        d.open_replace_dialog();
        assert_eq!((d.replace.find.as_str(), d.replace.with.as_str()), ("a", "b"));
    }

    #[test]
    fn clipboard_commands() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "c.txt", "hello world");
        let (mut d, _) = doc();
        d.load_file(&p, LoadMode::Replace);

        d.view.select(0, 5);
        assert_eq!(d.copy().as_deref(), Some("hello"));
        assert!(!d.is_dirty());

        d.view.select(5, 11);
        assert_eq!(d.cut().as_deref(), Some(" world"));
        assert_eq!(d.buffer.text(), "hello");
        assert!(d.is_dirty());

        d.view.set_insert_position(0);
        d.paste();
        assert_eq!(d.buffer.text(), " worldhello");
        assert_eq!(d.view.insert_position(), 6);

        d.view.select(0, 6);
        d.delete();
        assert_eq!(d.buffer.text(), "hello");
    }

    #[test]
    fn paste_reads_system_clipboard_first() {
        let (mut d, platform) = doc();
        platform.set_clipboard(Some("from elsewhere"));
        d.paste();
        assert_eq!(d.buffer.text(), "from elsewhere");
        assert_eq!(d.title(), "Untitled (modified)");

        // Unreadable clipboard falls back to what was last cut or copied.
        platform.set_clipboard(None);
        d.view.select(0, 4);
        d.copy();
        d.view.set_insert_position(0);
        d.paste();
        assert_eq!(d.buffer.text(), "fromfrom elsewhere");
    }

    #[test]
    fn replace_panel_asks_for_focus_each_time_it_opens() {
        let (mut d, _) = doc();
        d.open_replace_dialog();
        assert!(d.replace.focus_pending);

        d.replace.focus_pending = false;
        d.cancel_replace();
        d.replace_all();
        assert!(d.replace.open);
        assert!(d.replace.focus_pending);
    }

    #[test]
    fn undo_reverts_and_marks_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "u.txt", "abc");
        let (mut d, _) = doc();
        d.load_file(&p, LoadMode::Replace);
        assert!(!d.buffer.can_undo());

        d.undo();
        assert!(d.is_dirty());
        assert_eq!(d.buffer.text(), "abc");

        d.replace.find = "b".into();
        d.replace.with = "XYZ".into();
        d.replace_all();
        assert_eq!(d.buffer.text(), "aXYZc");
        d.undo();
        assert_eq!(d.buffer.text(), "abc");
    }
}
