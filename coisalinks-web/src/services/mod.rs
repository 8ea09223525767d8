pub mod account;
pub mod links;

pub use account::{register_account, reset_password, send_reset_link};
pub use links::{ActionError, SaveError, save_link_edit, shorten_link};
