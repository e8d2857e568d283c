pub mod edit_controller;
pub mod file_controller;
pub mod search_controller;
