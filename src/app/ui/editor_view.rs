// src/app/ui/editor_view.rs
use eframe::egui;

use crate::buffer::{cc_len, clamp_cc};
use crate::document::Document;
use crate::editor::{cc_to_lc_safe, EditorState};

// --- Monospace measuring (fast + stable) ---

fn monospace_char_width(ui: &egui::Ui, font_id: &egui::FontId) -> f32 {
    ui.fonts(|f| {
        f.layout_no_wrap("M".to_string(), font_id.clone(), ui.visuals().text_color())
            .size()
            .x
    })
    .max(1.0)
}

fn click_to_col(line: &str, x: f32, line_left: f32, cw: f32) -> usize {
    let target = (x - line_left).max(0.0);
    let col = (target / cw).round().max(0.0) as usize;
    col.min(line.chars().count())
}

// --- Key consumption helpers ---

fn mods_shift() -> egui::Modifiers {
    let mut m = egui::Modifiers::NONE;
    m.shift = true;
    m
}
fn mods_cmd() -> egui::Modifiers {
    let mut m = egui::Modifiers::NONE;
    m.command = true;
    m
}
fn mods_cmd_shift() -> egui::Modifiers {
    let mut m = egui::Modifiers::NONE;
    m.command = true;
    m.shift = true;
    m
}

fn consume_key_variants(i: &mut egui::InputState, key: egui::Key) {
    let _ = i.consume_key(egui::Modifiers::NONE, key);
    let _ = i.consume_key(mods_shift(), key);
    let _ = i.consume_key(mods_cmd(), key);
    let _ = i.consume_key(mods_cmd_shift(), key);
}

/// Ensure the pending scroll target is visible by adjusting the scroll offset.
fn apply_scroll_to_cc_if_needed(
    text: &str,
    st: &mut EditorState,
    row_height: f32,
    cw: f32,
    viewport: egui::Vec2,
) -> bool {
    let Some(cc) = st.pending_scroll_to_cc.take() else {
        return false;
    };

    if viewport.y <= 1.0 || row_height <= 1.0 {
        return false;
    }

    let (line, col) = cc_to_lc_safe(text, cc);
    let mut moved = false;

    // vertical
    let y = (line as f32) * row_height;
    let margin = (row_height * 2.0).min(viewport.y * 0.25);
    let top = st.scroll_offset.y;
    let bottom = st.scroll_offset.y + viewport.y;

    if y < top + margin {
        st.scroll_offset.y = (y - margin).max(0.0);
        moved = true;
    } else if y + row_height + margin > bottom {
        st.scroll_offset.y = (y + row_height + margin - viewport.y).max(0.0);
        moved = true;
    }

    // horizontal
    let x = (col as f32) * cw;
    let hmargin = (cw * 4.0).min(viewport.x * 0.25);
    if x < st.scroll_offset.x {
        st.scroll_offset.x = (x - hmargin).max(0.0);
        moved = true;
    } else if x + hmargin > st.scroll_offset.x + viewport.x {
        st.scroll_offset.x = (x + hmargin - viewport.x).max(0.0);
        moved = true;
    }

    moved
}

/// Keyboard handling. Edits go through the document so it sees every change.
fn handle_keyboard(ctx: &egui::Context, ui: &egui::Ui, doc: &mut Document) -> i32 {
    let events = ui.input(|i| i.events.clone());
    let ctrl_down = ui.input(|i| i.modifiers.ctrl || i.modifiers.command);

    let mut pending_copy = false;
    let mut pending_cut = false;
    let mut scroll_pages = 0i32;
    let mut touched = false;

    for ev in &events {
        match ev {
            egui::Event::Copy => pending_copy = true,
            egui::Event::Cut => pending_cut = true,

            egui::Event::Paste(t) => {
                doc.paste_text(t);
                touched = true;
            }

            egui::Event::Text(t) => {
                if ctrl_down {
                    continue;
                }
                if !t.is_empty() && !t.chars().any(|c| c == '\u{7f}') {
                    doc.insert_at_caret(t);
                    touched = true;
                }
            }

            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                let shift = modifiers.shift;
                let ctrl = modifiers.ctrl || modifiers.command;
                touched = true;

                match key {
                    egui::Key::ArrowLeft if ctrl => doc.view.move_word_left(doc.buffer.text(), shift),
                    egui::Key::ArrowLeft => doc.view.move_left(doc.buffer.text(), shift),
                    egui::Key::ArrowRight if ctrl => {
                        doc.view.move_word_right(doc.buffer.text(), shift)
                    }
                    egui::Key::ArrowRight => doc.view.move_right(doc.buffer.text(), shift),
                    egui::Key::ArrowUp => doc.view.move_lines(doc.buffer.text(), -1, shift),
                    egui::Key::ArrowDown => doc.view.move_lines(doc.buffer.text(), 1, shift),
                    egui::Key::Home => doc.view.move_home(doc.buffer.text(), ctrl, shift),
                    egui::Key::End => doc.view.move_end(doc.buffer.text(), ctrl, shift),

                    // PageUp / PageDown: SCROLL ONLY
                    egui::Key::PageUp => {
                        scroll_pages -= 1;
                        touched = false;
                    }
                    egui::Key::PageDown => {
                        scroll_pages += 1;
                        touched = false;
                    }

                    egui::Key::A if ctrl => doc.view.select_all(doc.buffer.text()),
                    egui::Key::C if ctrl => pending_copy = true,
                    egui::Key::X if ctrl => pending_cut = true,

                    egui::Key::Backspace if ctrl => {
                        doc.delete_prev_word();
                    }
                    egui::Key::Backspace => {
                        doc.delete_backward();
                    }
                    egui::Key::Delete => {
                        doc.delete_forward();
                    }
                    egui::Key::Enter => doc.insert_at_caret("\n"),
                    egui::Key::Tab => doc.insert_at_caret("    "),

                    _ => touched = false,
                }
            }

            _ => {}
        }
    }

    ui.ctx().input_mut(|i| {
        for key in [
            egui::Key::ArrowLeft,
            egui::Key::ArrowRight,
            egui::Key::ArrowUp,
            egui::Key::ArrowDown,
            egui::Key::Home,
            egui::Key::End,
            egui::Key::PageUp,
            egui::Key::PageDown,
            egui::Key::Tab,
        ] {
            consume_key_variants(i, key);
        }
    });

    // Clipboard ops AFTER selection updated
    if pending_cut {
        if let Some(text) = doc.cut() {
            ctx.copy_text(text);
        }
        touched = true;
    } else if pending_copy {
        if let Some(text) = doc.copy() {
            ctx.copy_text(text);
        }
    }

    if touched {
        doc.view.show_insert_position();
        ctx.request_repaint();
    }
    scroll_pages
}

/// Focus id of the text area.
pub fn editor_id() -> egui::Id {
    egui::Id::new("textpad_editor")
}

/// The text area. Typing within one frame undoes as one step.
pub fn editor_view(ctx: &egui::Context, ui: &mut egui::Ui, doc: &mut Document, font_size: f32) {
    doc.buffer.begin_undo_group();

    let editor_id = editor_id();
    let font_id = egui::FontId::monospace(font_size);

    let desired_size = ui.available_size();
    let (outer_rect, _) = ui.allocate_exact_size(desired_size, egui::Sense::hover());

    let outer_resp = ui.interact(outer_rect, editor_id, egui::Sense::click_and_drag());
    let nobody_focused = ui.memory(|m| m.focused().is_none());
    if outer_resp.clicked() || outer_resp.drag_started() || nobody_focused {
        ui.memory_mut(|m| m.request_focus(editor_id));
        doc.view.has_focus = true;
    } else {
        doc.view.has_focus = ui.memory(|m| m.has_focus(editor_id));
    }

    // ---- Keyboard input (only when focused) ----
    let mut pending_scroll_pages = 0;
    if doc.view.has_focus {
        ui.memory_mut(|m| {
            m.set_focus_lock_filter(
                editor_id,
                egui::EventFilter {
                    tab: true,
                    horizontal_arrows: true,
                    vertical_arrows: true,
                    escape: false,
                },
            );
        });
        pending_scroll_pages = handle_keyboard(ctx, ui, doc);
    }

    // ---- Render ----
    let text = doc.buffer.text();
    let st = &mut doc.view;

    let row_height = ui.fonts(|f| f.row_height(&font_id)).max(1.0);
    let cw = monospace_char_width(ui, &font_id);
    let viewport = outer_rect.size();

    let pointer_down = ui.input(|i| i.pointer.primary_down());
    let pointer_pos = ui.input(|i| i.pointer.interact_pos());
    let shift_held = ui.input(|i| i.modifiers.shift);

    let lines: Vec<&str> = text.split('\n').collect();

    ui.allocate_ui_at_rect(outer_rect, |ui| {
        ui.set_clip_rect(outer_rect);

        let out = egui::ScrollArea::both()
            .id_source(("editor_scroll", editor_id))
            .auto_shrink([false, false])
            .scroll_offset(st.scroll_offset)
            .show_rows(ui, row_height, lines.len().max(1), |ui, row_range| {
                let mut line_start_cc = 0usize;
                for line in lines.iter().take(row_range.start.min(lines.len())) {
                    line_start_cc += line.chars().count() + 1;
                }

                let (caret_line, _caret_col) = cc_to_lc_safe(text, st.cursor_cc);
                let text_color = ui.visuals().text_color();

                for row in row_range {
                    let line = lines.get(row).copied().unwrap_or("");
                    let line_len_cc = line.chars().count();
                    let line_end_cc = line_start_cc + line_len_cc;

                    let galley =
                        ui.fonts(|f| f.layout_no_wrap(line.to_string(), font_id.clone(), text_color));

                    let w = ui.available_width().max(galley.size().x + cw);
                    let (row_rect, row_resp) =
                        ui.allocate_exact_size(egui::vec2(w, row_height), egui::Sense::click_and_drag());

                    if row_resp.clicked() || row_resp.drag_started() {
                        ui.memory_mut(|m| m.request_focus(editor_id));
                        st.has_focus = true;
                    }

                    // current line highlight
                    if st.has_focus && caret_line == row {
                        let line_fill = ui.visuals().selection.bg_fill.linear_multiply(0.18);
                        ui.painter().rect_filled(row_rect, 0.0, line_fill);
                    }

                    // selection background
                    if let Some((a, b)) = st.selection_range() {
                        let sa = a.max(line_start_cc).min(line_end_cc);
                        let sb = b.max(line_start_cc).min(line_end_cc);
                        if sa < sb {
                            let x1 = row_rect.left() + ((sa - line_start_cc) as f32) * cw;
                            let x2 = row_rect.left() + ((sb - line_start_cc) as f32) * cw;
                            let sel_rect = egui::Rect::from_min_max(
                                egui::pos2(x1, row_rect.top()),
                                egui::pos2(x2, row_rect.bottom()),
                            );
                            ui.painter()
                                .rect_filled(sel_rect, 0.0, ui.visuals().selection.bg_fill);
                        }
                    }

                    ui.painter().galley(row_rect.left_top(), galley, text_color);

                    // click / drag start
                    if row_resp.clicked() || row_resp.drag_started() {
                        if let Some(pos) = pointer_pos {
                            if row_rect.contains(pos) {
                                let col = click_to_col(line, pos.x, row_rect.left(), cw);
                                let new_cc = (line_start_cc + col).min(line_end_cc);

                                if shift_held {
                                    if st.selection_anchor_cc.is_none() {
                                        st.selection_anchor_cc = Some(st.cursor_cc);
                                    }
                                    st.cursor_cc = new_cc;
                                } else {
                                    st.set_insert_position(new_cc);

                                    if row_resp.drag_started() {
                                        st.mouse_selecting = true;
                                        st.mouse_anchor_cc = Some(new_cc);
                                        st.selection_anchor_cc = Some(new_cc);
                                    } else {
                                        st.mouse_selecting = false;
                                        st.mouse_anchor_cc = None;
                                    }
                                }

                                ctx.request_repaint();
                            }
                        }
                    }

                    // drag selection
                    if st.mouse_selecting && pointer_down {
                        if let Some(pos) = pointer_pos {
                            if row_rect.y_range().contains(pos.y) {
                                let col = click_to_col(line, pos.x, row_rect.left(), cw);
                                let new_cc = (line_start_cc + col).min(line_end_cc);

                                if let Some(anchor) = st.mouse_anchor_cc {
                                    st.selection_anchor_cc = Some(anchor);
                                }
                                st.cursor_cc = new_cc;
                                ctx.request_repaint();
                            }
                        }
                    }

                    // caret
                    if st.has_focus {
                        let cur_cc = clamp_cc(text, st.cursor_cc);
                        if cur_cc >= line_start_cc && cur_cc <= line_end_cc {
                            let caret_x = row_rect.left() + ((cur_cc - line_start_cc) as f32) * cw;
                            let caret_rect = egui::Rect::from_min_max(
                                egui::pos2(caret_x, row_rect.top()),
                                egui::pos2(caret_x + 1.0, row_rect.bottom()),
                            );
                            ui.painter().rect_filled(caret_rect, 0.0, text_color);
                        }
                    }

                    line_start_cc = line_end_cc + 1;
                }
            });

        st.scroll_offset = out.state.offset;
    });

    // end selection
    if st.mouse_selecting && !pointer_down {
        st.mouse_selecting = false;
        st.mouse_anchor_cc = None;
        if st.selection_range().is_none() {
            st.clear_selection();
        }
    }

    if pending_scroll_pages != 0 {
        let overlap = (row_height * 2.0).min(viewport.y * 0.25);
        let page = (viewport.y - overlap).max(row_height);
        st.scroll_offset.y = (st.scroll_offset.y + (pending_scroll_pages as f32) * page).max(0.0);
        ctx.request_repaint();
    }

    if apply_scroll_to_cc_if_needed(text, st, row_height, cw, viewport) {
        ctx.request_repaint();
    }

    st.cursor_cc = st.cursor_cc.min(cc_len(text));
}
