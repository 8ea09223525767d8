use crate::session::SessionStatus;
use yewdux::Store;

/// Global UI state mirrored from the session store.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    /// Set once persisted session state has been read at startup.
    pub restored: bool,
    pub session: SessionStatus,
}
