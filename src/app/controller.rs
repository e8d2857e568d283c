use super::actions::Action;
use super::state::AppState;

use super::controllers::{edit_controller, file_controller, search_controller};

impl AppState {
    pub fn apply_action(&mut self, action: Action) {
        // Keep ordering stable (file -> edit -> search)
        if file_controller::handle(self, &action) {
            return;
        }
        if edit_controller::handle(self, &action) {
            return;
        }
        if search_controller::handle(self, &action) {
            return;
        }
    }

    pub fn finalize_frame(&mut self, ctx: &eframe::egui::Context) {
        use eframe::egui;

        // Deferred effects (clipboard, title, exit)
        if let Some(text) = self.deferred.copy_text.take() {
            ctx.copy_text(text);
        }

        let title = self.doc.title();
        if self.last_window_title.as_deref() != Some(title) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            self.last_window_title = Some(title.to_string());
        }

        if self.doc.exit_requested() && !self.deferred.close_sent {
            self.deferred.close_sent = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
