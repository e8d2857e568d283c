use crate::app::actions::Action;
use crate::app::state::AppState;

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::NewFile => {
            state.doc.new_document();
            true
        }
        Action::OpenFile => {
            state.doc.open_document();
            true
        }
        Action::InsertFile => {
            state.doc.insert_document();
            true
        }
        Action::SaveFile => {
            state.doc.save_document();
            true
        }
        Action::SaveFileAs => {
            state.doc.save_document_as();
            true
        }
        Action::Exit => {
            state.doc.quit();
            true
        }
        _ => false,
    }
}
