// src/app/ui/replace_dialog.rs
use eframe::egui;

use crate::app::actions::Action;
use crate::document::Document;

/// Non-modal "Replace" panel. Edits the field values in place.
pub fn replace_dialog(ctx: &egui::Context, doc: &mut Document) -> Vec<Action> {
    let mut actions = vec![];
    if !doc.replace.open {
        return actions;
    }

    let mut open = true;
    egui::Window::new("Replace")
        .id(egui::Id::new("replace_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            egui::Grid::new("replace_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Find:");
                    let find = ui.add(
                        egui::TextEdit::singleline(&mut doc.replace.find).desired_width(220.0),
                    );
                    ui.end_row();

                    ui.label("Replace:");
                    let with = ui.add(
                        egui::TextEdit::singleline(&mut doc.replace.with).desired_width(220.0),
                    );
                    ui.end_row();

                    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter && (find.lost_focus() || with.lost_focus()) {
                        actions.push(Action::ReplaceAgain);
                    }
                    if doc.replace.focus_pending {
                        find.request_focus();
                        doc.replace.focus_pending = false;
                    }
                });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Replace All").clicked() {
                    actions.push(Action::ReplaceAll);
                }
                if ui.button("Replace Next").clicked() {
                    actions.push(Action::ReplaceAgain);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(Action::CancelReplace);
                }
            });
        });

    if !open {
        actions.push(Action::CancelReplace);
    }
    actions
}
