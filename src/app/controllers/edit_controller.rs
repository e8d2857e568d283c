use crate::app::actions::Action;
use crate::app::state::AppState;

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::Undo => {
            state.doc.undo();
            true
        }
        Action::Cut => {
            if let Some(text) = state.doc.cut() {
                state.deferred.copy_text = Some(text);
            }
            true
        }
        Action::Copy => {
            if let Some(text) = state.doc.copy() {
                state.deferred.copy_text = Some(text);
            }
            true
        }
        Action::Paste => {
            state.doc.paste();
            true
        }
        Action::Delete => {
            state.doc.delete();
            true
        }
        _ => false,
    }
}
