//! Names of the entries the client keeps in browser local storage.

/// Namespace shared by every persisted entry.
pub const STORAGE_PREFIX: &str = "@CoisaLinks:";

/// Backend-issued bearer token.
pub const TOKEN_KEY: &str = "@CoisaLinks:token";

/// JSON-serialized [`crate::User`].
pub const USER_KEY: &str = "@CoisaLinks:user";

/// Last provider token exchanged with the backend. Present only while the
/// current session was established through federated sign-in.
pub const FEDERATED_TOKEN_KEY: &str = "@CoisaLinks:federatedToken";

/// Every key the session owns, in the order they are cleared.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, FEDERATED_TOKEN_KEY];
