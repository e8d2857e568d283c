// src/app/state.rs
use std::sync::Arc;

use crate::document::Document;
use crate::platform::Platform;
use crate::settings::Settings;

/// Effects that need the egui context; applied at the end of the frame.
#[derive(Clone, Debug, Default)]
pub struct DeferredActions {
    pub copy_text: Option<String>,
    pub close_sent: bool,
}

pub struct AppState {
    pub settings: Settings,

    /// The one document this window edits.
    pub doc: Document,

    pub deferred: DeferredActions,
    pub last_window_title: Option<String>,
}

impl AppState {
    pub fn new(platform: Arc<dyn Platform>, settings: Settings) -> Self {
        let doc = Document::new(platform, settings.undo_capacity);
        Self {
            settings,
            doc,
            deferred: DeferredActions::default(),
            last_window_title: None,
        }
    }
}
