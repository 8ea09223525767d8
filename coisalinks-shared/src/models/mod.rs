//! Wire models exchanged with the `CoisaLinks` REST API.

pub mod account;
pub mod auth;
pub mod errors;
pub mod link;
pub mod user;

pub use account::{ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest};
pub use auth::{AuthResponse, FederatedLoginRequest, LoginRequest};
pub use errors::ApiMessage;
pub use link::{Link, LinkUpdateRequest, ShortenRequest, ShortenResponse};
pub use user::User;
