// src/buffer.rs
use std::io;
use std::path::Path;

/// One insert/remove as seen by listeners. Counts are in chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modification {
    pub pos: usize,
    pub inserted: usize,
    pub deleted: usize,
}

#[derive(Clone, Debug)]
enum Edit {
    Insert { pos: usize, text: String },
    Remove { pos: usize, text: String },
}

/// Document text plus the bookkeeping the editor needs around it.
///
/// All positions are char indices (cc). Every mutation is appended to the
/// modification log; the owner drains it with [`TextBuffer::take_modifications`]
/// right after the mutation so listeners observe edits in order.
pub struct TextBuffer {
    text: String,
    modifications: Vec<Modification>,

    // Undo journal (grouped)
    undo_groups: Vec<Vec<Edit>>,
    group_open: bool,
    undo_capacity: usize,
}

pub fn cc_len(s: &str) -> usize {
    s.chars().count()
}

pub fn clamp_cc(s: &str, cc: usize) -> usize {
    cc.min(cc_len(s))
}

/// Convert char-index to byte-index (O(n), used only on edits/selection ops).
pub fn cc_to_bc(s: &str, cc: usize) -> usize {
    if cc == 0 {
        return 0;
    }
    let mut cur = 0usize;
    for (bi, _ch) in s.char_indices() {
        if cur == cc {
            return bi;
        }
        cur += 1;
    }
    s.len()
}

/// Convert byte-index to char-index (O(n)).
pub fn bc_to_cc(s: &str, bc: usize) -> usize {
    let mut cc = 0usize;
    for (bi, _ch) in s.char_indices() {
        if bi >= bc {
            break;
        }
        cc += 1;
    }
    cc
}

fn read_text(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("not UTF-8 text (invalid byte at offset {})", e.utf8_error().valid_up_to()),
        )
    })
}

impl TextBuffer {
    pub fn new(undo_capacity: usize) -> Self {
        Self {
            text: String::new(),
            modifications: Vec::new(),
            undo_groups: Vec::new(),
            group_open: false,
            undo_capacity: undo_capacity.max(1),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        cc_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text between two char positions (clamped, order-insensitive).
    pub fn text_range(&self, a: usize, b: usize) -> &str {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let a_bc = cc_to_bc(&self.text, a);
        let b_bc = cc_to_bc(&self.text, b);
        &self.text[a_bc..b_bc]
    }

    // --- Editing ---

    /// Insert `s` at `pos` (clamped). Returns the position actually used.
    pub fn insert(&mut self, pos: usize, s: &str) -> usize {
        let pos = self.insert_raw(pos, s);
        if !s.is_empty() {
            self.journal(Edit::Insert {
                pos,
                text: s.to_string(),
            });
        }
        pos
    }

    /// Remove the chars in `a..b` (clamped, order-insensitive).
    pub fn remove(&mut self, a: usize, b: usize) {
        let (pos, removed) = self.remove_raw(a, b);
        if !removed.is_empty() {
            self.journal(Edit::Remove { pos, text: removed });
        }
    }

    fn insert_raw(&mut self, pos: usize, s: &str) -> usize {
        let pos = clamp_cc(&self.text, pos);
        if s.is_empty() {
            return pos;
        }
        let bi = cc_to_bc(&self.text, pos);
        self.text.insert_str(bi, s);
        self.modifications.push(Modification {
            pos,
            inserted: cc_len(s),
            deleted: 0,
        });
        pos
    }

    fn remove_raw(&mut self, a: usize, b: usize) -> (usize, String) {
        let len = self.len();
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let (a, b) = (a.min(len), b.min(len));
        if a == b {
            return (a, String::new());
        }
        let a_bc = cc_to_bc(&self.text, a);
        let b_bc = cc_to_bc(&self.text, b);
        let removed: String = self.text.drain(a_bc..b_bc).collect();
        self.modifications.push(Modification {
            pos: a,
            inserted: 0,
            deleted: b - a,
        });
        (a, removed)
    }

    // --- File I/O ---

    /// Replace the whole content with the file at `path`.
    ///
    /// The old content is dropped before the read, so a failed read leaves the
    /// buffer empty. Resets the undo journal. Returns the byte count read.
    pub fn load_file(&mut self, path: &Path) -> io::Result<usize> {
        let len = self.len();
        self.remove_raw(0, len);
        self.clear_undo();

        let text = read_text(path)?;
        self.insert_raw(0, &text);
        Ok(text.len())
    }

    /// Insert the content of the file at `path` at char position `pos`.
    pub fn insert_file(&mut self, path: &Path, pos: usize) -> io::Result<usize> {
        let text = read_text(path)?;
        self.begin_undo_group();
        self.insert(pos, &text);
        Ok(text.len())
    }

    /// Write the content to `path` verbatim.
    pub fn save_file(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.text.as_bytes())
    }

    // --- Search ---

    /// First occurrence of `needle` starting at or after char position `start`.
    ///
    /// Case-sensitive literal match; never wraps. An empty needle never matches.
    pub fn search_forward(&self, start: usize, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let start_bc = cc_to_bc(&self.text, start);
        let hit = self.text[start_bc..].find(needle)?;
        Some(bc_to_cc(&self.text, start_bc + hit))
    }

    // --- Modification log ---

    /// Queue a zero-count notification so listeners resync without an edit.
    pub fn call_modify_callbacks(&mut self) {
        self.modifications.push(Modification {
            pos: 0,
            inserted: 0,
            deleted: 0,
        });
    }

    pub fn take_modifications(&mut self) -> Vec<Modification> {
        std::mem::take(&mut self.modifications)
    }

    // --- Undo ---

    /// The next edit starts a new undo group.
    pub fn begin_undo_group(&mut self) {
        self.group_open = false;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_groups.is_empty()
    }

    pub fn clear_undo(&mut self) {
        self.undo_groups.clear();
        self.group_open = false;
    }

    fn journal(&mut self, edit: Edit) {
        if !self.group_open || self.undo_groups.is_empty() {
            self.undo_groups.push(Vec::new());
            self.group_open = true;
            if self.undo_groups.len() > self.undo_capacity {
                let overflow = self.undo_groups.len() - self.undo_capacity;
                self.undo_groups.drain(0..overflow);
            }
        }
        if let Some(group) = self.undo_groups.last_mut() {
            group.push(edit);
        }
    }

    /// Revert the most recent undo group.
    ///
    /// Returns where the caret should go, or `None` if there was nothing to undo.
    pub fn undo(&mut self) -> Option<usize> {
        let group = self.undo_groups.pop()?;
        self.group_open = false;

        let mut caret = None;
        for edit in group.into_iter().rev() {
            match edit {
                Edit::Insert { pos, text } => {
                    self.remove_raw(pos, pos + cc_len(&text));
                    caret = Some(pos);
                }
                Edit::Remove { pos, text } => {
                    self.insert_raw(pos, &text);
                    caret = Some(pos + cc_len(&text));
                }
            }
        }
        caret
    }
}
