pub mod editor_view;
pub mod menu_bar;
pub mod replace_dialog;
pub mod search_prompt;
