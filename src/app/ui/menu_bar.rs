// src/app/ui/menu_bar.rs
use eframe::egui;
use egui::{Key, KeyboardShortcut, Modifiers};

use crate::app::actions::Action;
use crate::app::ui::editor_view::editor_id;

pub struct MenuEntry {
    pub label: &'static str,
    pub shortcut: Option<KeyboardShortcut>,
    pub action: Action,
    pub divider_after: bool,
}

fn mods_cmd() -> Modifiers {
    let mut m = Modifiers::NONE;
    m.command = true;
    m
}

fn mods_cmd_shift() -> Modifiers {
    let mut m = Modifiers::NONE;
    m.command = true;
    m.shift = true;
    m
}

fn entry(label: &'static str, shortcut: Option<KeyboardShortcut>, action: Action) -> MenuEntry {
    MenuEntry {
        label,
        shortcut,
        action,
        divider_after: false,
    }
}

fn ctrl(key: Key) -> Option<KeyboardShortcut> {
    Some(KeyboardShortcut::new(mods_cmd(), key))
}

fn divided(mut e: MenuEntry) -> MenuEntry {
    e.divider_after = true;
    e
}

/// The menu table: (menu title, entries).
pub fn menus() -> Vec<(&'static str, Vec<MenuEntry>)> {
    vec![
        (
            "File",
            vec![
                entry("New File", None, Action::NewFile),
                entry("Open File...", ctrl(Key::O), Action::OpenFile),
                divided(entry("Insert File...", ctrl(Key::I), Action::InsertFile)),
                entry("Save File", ctrl(Key::S), Action::SaveFile),
                divided(entry(
                    "Save File As...",
                    Some(KeyboardShortcut::new(mods_cmd_shift(), Key::S)),
                    Action::SaveFileAs,
                )),
                entry("Exit", ctrl(Key::Q), Action::Exit),
            ],
        ),
        (
            "Edit",
            vec![
                divided(entry("Undo", ctrl(Key::Z), Action::Undo)),
                entry("Cut", ctrl(Key::X), Action::Cut),
                entry("Copy", ctrl(Key::C), Action::Copy),
                entry("Paste", ctrl(Key::V), Action::Paste),
                entry("Delete", None, Action::Delete),
            ],
        ),
        (
            "Search",
            vec![
                entry("Find...", ctrl(Key::F), Action::Find),
                entry("Find Again", ctrl(Key::G), Action::FindAgain),
                entry("Replace...", ctrl(Key::H), Action::Replace),
                entry("Replace Again", ctrl(Key::T), Action::ReplaceAgain),
            ],
        ),
    ]
}

/// Clipboard keys arrive as Copy/Cut/Paste events and are left to the editor.
fn handled_by_editor(action: &Action) -> bool {
    matches!(action, Action::Cut | Action::Copy | Action::Paste)
}

/// Accelerators fire from the text area, or when nothing has focus. A focused
/// dialog field keeps its own Ctrl+Z and friends.
fn accelerators_enabled(focused: Option<egui::Id>) -> bool {
    focused.map_or(true, |id| id == editor_id())
}

/// Consume accelerator keys for this frame and return their actions.
pub fn shortcuts(ctx: &egui::Context) -> Vec<Action> {
    if !accelerators_enabled(ctx.memory(|m| m.focused())) {
        return vec![];
    }

    let mut table: Vec<(KeyboardShortcut, Action)> = menus()
        .into_iter()
        .flat_map(|(_, entries)| entries)
        .filter(|e| !handled_by_editor(&e.action))
        .filter_map(|e| e.shortcut.map(|s| (s, e.action)))
        .collect();

    // Ctrl+Shift+S must win over Ctrl+S.
    table.sort_by_key(|(s, _)| !s.modifiers.shift);

    ctx.input_mut(|i| {
        table
            .into_iter()
            .filter(|(s, _)| i.consume_shortcut(s))
            .map(|(_, a)| a)
            .collect()
    })
}

pub fn menu_bar(ui: &mut egui::Ui) -> Vec<Action> {
    let mut actions = vec![];

    egui::menu::bar(ui, |ui| {
        for (title, entries) in menus() {
            ui.menu_button(title, |ui| {
                for e in entries {
                    let mut button = egui::Button::new(e.label);
                    if let Some(s) = &e.shortcut {
                        button = button.shortcut_text(ui.ctx().format_shortcut(s));
                    }
                    if ui.add(button).clicked() {
                        actions.push(e.action.clone());
                        ui.close_menu();
                    }
                    if e.divider_after {
                        ui.separator();
                    }
                }
            });
        }
    });

    actions
}
