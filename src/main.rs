mod app;
mod buffer;
mod document;
mod editor;
mod platform;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use document::LoadMode;
use platform::native::NativePlatform;
use platform::Platform;
use settings::{Settings, MIN_WINDOW_SIZE};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> eframe::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let platform: Arc<dyn Platform> = Arc::new(NativePlatform::new());
    let settings = Settings::load_or_init(platform.as_ref());

    let mut args = std::env::args_os().skip(1);
    let initial: Option<PathBuf> = args.next().map(PathBuf::from);
    let extra = args.count();
    if extra > 0 {
        warn!(extra, "ignoring extra command line arguments");
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(document::UNTITLED)
            .with_inner_size(settings.window_size)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        settings::APP_NAME,
        native_options,
        Box::new(move |cc| {
            app::theme::apply(&cc.egui_ctx, &settings);

            let mut state = app::AppState::new(platform, settings);
            if let Some(path) = initial {
                info!(path = %path.display(), "opening");
                state.doc.load_file(&path, LoadMode::Replace);
            }
            state.doc.refresh();
            Box::new(state)
        }),
    )
}
