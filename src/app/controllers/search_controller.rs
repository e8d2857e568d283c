use crate::app::actions::Action;
use crate::app::state::AppState;

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::Find => {
            state.doc.find();
            true
        }
        Action::FindAgain => {
            state.doc.find_next();
            true
        }
        Action::SubmitSearch(answer) => {
            state.doc.submit_search(answer.clone());
            true
        }
        Action::Replace => {
            state.doc.open_replace_dialog();
            true
        }
        Action::ReplaceAgain => {
            state.doc.replace_next();
            true
        }
        Action::ReplaceAll => {
            state.doc.replace_all();
            true
        }
        Action::CancelReplace => {
            state.doc.cancel_replace();
            true
        }
        _ => false,
    }
}
