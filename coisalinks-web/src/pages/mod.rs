mod dashboard;
pub mod login;
mod main_page;
mod not_found;
mod password_recovery;
mod register;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use main_page::MainPage;
pub use not_found::NotFoundPage;
pub use password_recovery::PasswordRecoveryPage;
pub use register::RegisterPage;
