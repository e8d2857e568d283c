use eframe::egui;

use super::ui;
use super::AppState;

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window close box goes through the same confirm as File > Exit.
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.doc.exit_requested() || self.doc.quit() {
                self.deferred.close_sent = true;
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }

        for a in ui::menu_bar::shortcuts(ctx) {
            self.apply_action(a);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui_top| {
            let actions = ui::menu_bar::menu_bar(ui_top);
            for a in actions {
                self.apply_action(a);
            }
        });

        let font_size = self.settings.font_size;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(ctx.style().visuals.extreme_bg_color))
            .show(ctx, |ui| {
                ui::editor_view::editor_view(ctx, ui, &mut self.doc, font_size);
            });

        // Dialogs (drawn on top)
        let actions = ui::replace_dialog::replace_dialog(ctx, &mut self.doc);
        for a in actions {
            self.apply_action(a);
        }
        let actions = ui::search_prompt::search_prompt(ctx, &mut self.doc);
        for a in actions {
            self.apply_action(a);
        }

        self.finalize_frame(ctx);
    }
}
