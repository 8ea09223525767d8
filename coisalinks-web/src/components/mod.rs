pub(crate) mod copy_button;
pub(crate) mod language_selector;
pub(crate) mod language_selector_button;
pub(crate) mod link_table;
pub(crate) mod loading;
pub(crate) mod shorten_form;
pub(crate) mod social_button;
pub(crate) mod user_menu;

pub use link_table::LinkTable;
pub use shorten_form::ShortenForm;
pub use social_button::{SocialButton, SocialProvider};
