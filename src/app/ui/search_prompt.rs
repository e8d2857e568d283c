// src/app/ui/search_prompt.rs
use eframe::egui;

use crate::app::actions::Action;
use crate::document::Document;

/// The "Search String:" prompt. Answers with `SubmitSearch`.
pub fn search_prompt(ctx: &egui::Context, doc: &mut Document) -> Vec<Action> {
    let mut actions = vec![];
    let Some(term) = doc.search_prompt.as_mut() else {
        return actions;
    };

    let mut open = true;
    egui::Window::new("Find")
        .id(egui::Id::new("search_prompt"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label("Search String:");
            let edit = ui.add(egui::TextEdit::singleline(term).desired_width(260.0));
            if !edit.has_focus() && !edit.lost_focus() {
                edit.request_focus();
            }

            let (enter, escape) =
                ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let ok = ui.button("OK").clicked();
                let cancel = ui.button("Cancel").clicked();

                if ok || (enter && edit.lost_focus()) {
                    actions.push(Action::SubmitSearch(Some(term.clone())));
                } else if cancel || escape {
                    actions.push(Action::SubmitSearch(None));
                }
            });
        });

    if !open && actions.is_empty() {
        actions.push(Action::SubmitSearch(None));
    }
    actions
}
