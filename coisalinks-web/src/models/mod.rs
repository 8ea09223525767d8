pub mod app_state;
pub mod link_editor;
