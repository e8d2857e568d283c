// src/editor.rs
use eframe::egui;

use crate::buffer::{cc_len, clamp_cc, Modification};
use crate::document::Document;

/// Persistent editor view state (caret, selection, scroll requests).
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    pub cursor_cc: usize,
    pub selection_anchor_cc: Option<usize>,
    pub has_focus: bool,

    // Mouse selection
    pub(crate) mouse_selecting: bool,
    pub(crate) mouse_anchor_cc: Option<usize>, // persistent drag anchor across frames

    // Scroll state (for PgUp/PgDn scrolling)
    pub(crate) scroll_offset: egui::Vec2,

    // Scroll-to support (find, replace, load)
    pub(crate) pending_scroll_to_cc: Option<usize>,
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Compute (line, col) from cc, clamped safely to the current text.
pub fn cc_to_lc_safe(text: &str, cc: usize) -> (usize, usize) {
    let cc = clamp_cc(text, cc);
    let mut cur_cc = 0usize;
    let mut line = 0usize;
    let mut col = 0usize;
    for ch in text.chars() {
        if cur_cc == cc {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        cur_cc += 1;
    }
    (line, col)
}

/// Line start offsets and lengths, in cc.
pub fn compute_line_metrics(text: &str) -> (Vec<usize>, Vec<usize>) {
    let mut starts: Vec<usize> = vec![0];
    let mut lens: Vec<usize> = Vec::new();

    let mut cur_line_len = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            lens.push(cur_line_len);
            let prev_start = *starts.last().unwrap_or(&0);
            starts.push(prev_start + cur_line_len + 1);
            cur_line_len = 0;
        } else {
            cur_line_len += 1;
        }
    }
    lens.push(cur_line_len);

    (starts, lens)
}

fn lc_to_cc_metrics(starts: &[usize], lens: &[usize], line: usize, col: usize) -> usize {
    if starts.is_empty() || lens.is_empty() {
        return 0;
    }
    let line = line.min(lens.len().saturating_sub(1));
    let col = col.min(lens[line]);
    starts[line] + col
}

/// Where `cc` ends up after `m` is applied to the text before it.
fn shift_for(cc: usize, m: &Modification) -> usize {
    if cc <= m.pos {
        cc
    } else if cc >= m.pos + m.deleted {
        cc - m.deleted + m.inserted
    } else {
        m.pos
    }
}

impl EditorState {
    pub fn insert_position(&self) -> usize {
        self.cursor_cc
    }

    /// Move the caret and drop any selection.
    pub fn set_insert_position(&mut self, cc: usize) {
        self.cursor_cc = cc;
        self.selection_anchor_cc = None;
    }

    /// Select `a..b` with the caret at `b`.
    pub fn select(&mut self, a: usize, b: usize) {
        self.selection_anchor_cc = Some(a);
        self.cursor_cc = b;
    }

    pub fn clear_selection(&mut self) {
        self.selection_anchor_cc = None;
    }

    /// Selection range in cc (if any), ordered.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let a = self.selection_anchor_cc?;
        let b = self.cursor_cc;
        if a == b {
            None
        } else if a < b {
            Some((a, b))
        } else {
            Some((b, a))
        }
    }

    /// Ask the view to bring the caret into sight on the next frame.
    pub fn show_insert_position(&mut self) {
        self.pending_scroll_to_cc = Some(self.cursor_cc);
    }

    /// Keep caret and anchor attached to the same text across a buffer edit.
    pub fn buffer_modified(&mut self, m: &Modification) {
        self.cursor_cc = shift_for(self.cursor_cc, m);
        if let Some(a) = self.selection_anchor_cc {
            self.selection_anchor_cc = Some(shift_for(a, m));
        }
        if self.selection_anchor_cc == Some(self.cursor_cc) {
            self.selection_anchor_cc = None;
        }
    }

    pub fn reset(&mut self) {
        self.cursor_cc = 0;
        self.selection_anchor_cc = None;
        self.mouse_selecting = false;
        self.mouse_anchor_cc = None;
        self.scroll_offset = egui::Vec2::ZERO;
        self.pending_scroll_to_cc = None;
    }

    fn begin_move(&mut self, cur: usize, selecting: bool) {
        if !selecting {
            self.clear_selection();
        } else if self.selection_anchor_cc.is_none() {
            self.selection_anchor_cc = Some(cur);
        }
    }

    // --- Caret movement ---

    pub fn move_left(&mut self, text: &str, selecting: bool) {
        let cur = clamp_cc(text, self.cursor_cc);
        self.begin_move(cur, selecting);
        self.cursor_cc = cur.saturating_sub(1);
    }

    pub fn move_right(&mut self, text: &str, selecting: bool) {
        let cur = clamp_cc(text, self.cursor_cc);
        self.begin_move(cur, selecting);
        self.cursor_cc = (cur + 1).min(cc_len(text));
    }

    pub fn move_word_left(&mut self, text: &str, selecting: bool) {
        let cur = clamp_cc(text, self.cursor_cc);
        let chars: Vec<char> = text.chars().collect();
        let mut i = cur;

        while i > 0 && !is_word_char(chars[i - 1]) {
            i -= 1;
        }
        while i > 0 && is_word_char(chars[i - 1]) {
            i -= 1;
        }

        self.begin_move(cur, selecting);
        self.cursor_cc = i;
    }

    pub fn move_word_right(&mut self, text: &str, selecting: bool) {
        let cur = clamp_cc(text, self.cursor_cc);
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut i = cur;

        while i < len && is_word_char(chars[i]) {
            i += 1;
        }
        while i < len && !is_word_char(chars[i]) {
            i += 1;
        }

        self.begin_move(cur, selecting);
        self.cursor_cc = i.min(len);
    }

    /// Move up (`delta < 0`) or down by whole lines, keeping the column.
    pub fn move_lines(&mut self, text: &str, delta: isize, selecting: bool) {
        let (starts, lens) = compute_line_metrics(text);
        let (line, col) = cc_to_lc_safe(text, self.cursor_cc);
        let max_line = lens.len().saturating_sub(1) as isize;
        let target = (line as isize + delta).clamp(0, max_line) as usize;

        let cur = self.cursor_cc;
        self.begin_move(cur, selecting);
        self.cursor_cc = lc_to_cc_metrics(&starts, &lens, target, col);
    }

    pub fn move_home(&mut self, text: &str, to_document_start: bool, selecting: bool) {
        let (starts, lens) = compute_line_metrics(text);
        let (line, _col) = cc_to_lc_safe(text, self.cursor_cc);
        let cur = self.cursor_cc;
        self.begin_move(cur, selecting);
        self.cursor_cc = if to_document_start {
            0
        } else {
            lc_to_cc_metrics(&starts, &lens, line, 0)
        };
    }

    pub fn move_end(&mut self, text: &str, to_document_end: bool, selecting: bool) {
        let (starts, lens) = compute_line_metrics(text);
        let (line, _col) = cc_to_lc_safe(text, self.cursor_cc);
        let cur = self.cursor_cc;
        self.begin_move(cur, selecting);
        self.cursor_cc = if to_document_end {
            cc_len(text)
        } else {
            let line_len = lens.get(line).copied().unwrap_or(0);
            lc_to_cc_metrics(&starts, &lens, line, line_len)
        };
    }

    pub fn select_all(&mut self, text: &str) {
        self.select(0, cc_len(text));
    }
}

// Interactive editing primitives used by the editor widget. Each one goes
// through the buffer so the change notification reaches the document.
impl Document {
    /// Insert `s` at the caret, replacing the selection.
    pub fn insert_at_caret(&mut self, s: &str) {
        self.delete_selection();
        let cur = clamp_cc(self.buffer.text(), self.view.cursor_cc);
        let pos = self.buffer.insert(cur, s);
        self.flush_modifications();
        self.view.set_insert_position(pos + cc_len(s));
    }

    /// Backspace. Returns whether anything was removed.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let cur = clamp_cc(self.buffer.text(), self.view.cursor_cc);
        if cur == 0 {
            return false;
        }
        self.buffer.remove(cur - 1, cur);
        self.flush_modifications();
        self.view.set_insert_position(cur - 1);
        true
    }

    /// Delete key.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let cur = clamp_cc(self.buffer.text(), self.view.cursor_cc);
        if cur >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(cur, cur + 1);
        self.flush_modifications();
        self.view.set_insert_position(cur);
        true
    }

    /// Ctrl+Backspace.
    pub fn delete_prev_word(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let text = self.buffer.text();
        let cur = clamp_cc(text, self.view.cursor_cc);
        if cur == 0 {
            return false;
        }

        let chars: Vec<char> = text.chars().collect();
        let mut i = cur;
        while i > 0 && !is_word_char(chars[i - 1]) {
            i -= 1;
        }
        while i > 0 && is_word_char(chars[i - 1]) {
            i -= 1;
        }

        self.buffer.remove(i, cur);
        self.flush_modifications();
        self.view.set_insert_position(i);
        true
    }

    /// Remove the selected range, leaving the caret at its start.
    pub fn delete_selection(&mut self) -> bool {
        let Some((a, b)) = self.view.selection_range() else {
            return false;
        };
        self.buffer.remove(a, b);
        self.flush_modifications();
        self.view.set_insert_position(a);
        true
    }

    pub fn selected_text(&self) -> Option<String> {
        let (a, b) = self.view.selection_range()?;
        Some(self.buffer.text_range(a, b).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_metrics_cover_trailing_newline() {
        let (starts, lens) = compute_line_metrics("ab\ncde\n");
        assert_eq!(starts, vec![0, 3, 7]);
        assert_eq!(lens, vec![2, 3, 0]);
        assert_eq!(cc_to_lc_safe("ab\ncde\n", 5), (1, 2));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let text = "abcdef\nxy\nlonger line";
        let mut st = EditorState::default();
        st.set_insert_position(5);
        st.move_lines(text, 1, false);
        assert_eq!(st.cursor_cc, 9);
        st.move_lines(text, 1, false);
        assert_eq!(st.cursor_cc, 12);
        st.move_lines(text, -5, true);
        assert_eq!(st.cursor_cc, 2);
        assert_eq!(st.selection_range(), Some((2, 12)));
    }

    #[test]
    fn word_moves_skip_punctuation() {
        let text = "foo, bar_baz  qux";
        let mut st = EditorState::default();
        st.move_word_right(text, false);
        assert_eq!(st.cursor_cc, 5);
        st.move_word_right(text, false);
        assert_eq!(st.cursor_cc, 14);
        st.move_word_left(text, false);
        assert_eq!(st.cursor_cc, 5);
    }

    #[test]
    fn caret_follows_edits_before_it() {
        let mut st = EditorState::default();
        st.select(4, 8);
        st.buffer_modified(&Modification { pos: 0, inserted: 3, deleted: 0 });
        assert_eq!(st.selection_range(), Some((7, 11)));

        st.buffer_modified(&Modification { pos: 6, inserted: 0, deleted: 10 });
        assert_eq!(st.cursor_cc, 6);
        assert_eq!(st.selection_range(), None);

        // Inserting exactly at the caret leaves it in place.
        st.buffer_modified(&Modification { pos: 6, inserted: 2, deleted: 0 });
        assert_eq!(st.cursor_cc, 6);
    }
}
