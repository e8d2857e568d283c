use eframe::egui;

use crate::settings::Settings;

/// Install visuals and the editor font size from settings.
pub fn apply(ctx: &egui::Context, settings: &Settings) {
    let visuals = if settings.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(settings.font_size),
        );
    });
}
