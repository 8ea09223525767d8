#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
//! Shared building blocks for the `CoisaLinks` web client.
//!
//! Everything here is target independent: wire models exchanged with the
//! backend, the client-side validation rules applied before any request is
//! made, and the names of the entries persisted in browser storage.

pub mod models;
pub mod storage_keys;
pub mod validation;

pub use models::{
    ApiMessage, AuthResponse, FederatedLoginRequest, ForgotPasswordRequest, Link,
    LinkUpdateRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, ShortenRequest,
    ShortenResponse, User,
};
pub use validation::{RegistrationField, ValidationError};
