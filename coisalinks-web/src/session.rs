//! Authentication session store.
//!
//! Single owner of "who is signed in". It moves between three states:
//!
//! ```text
//! Anonymous --sign-in--> Authenticating --ok--> Authenticated
//!     ^                        |                     |
//!     +-------- failure -------+                     |
//!     +------------- sign-out / provider signed out -+
//! ```
//!
//! Persisted entries (see [`shared::storage_keys`]) are written together and
//! purged together: a session is restored only when both the token and the
//! user record are present. The bearer token reaches the API client through
//! [`Credentials`], read per request, never through a shared default header.

use crate::api::{ApiError, CoisaLinksClient, Credentials};
use crate::identity::{IdentityError, IdentityProvider, ProviderBridge};
use crate::storage::{BrowserStorage, KeyValueStore, MemoryStorage, StorageError};
use async_trait::async_trait;
use once_cell::unsync::OnceCell;
use shared::models::{AuthResponse, FederatedLoginRequest, LoginRequest, User};
use shared::storage_keys::{FEDERATED_TOKEN_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

thread_local! {
    static SHARED_SESSION: OnceCell<Rc<SessionStore>> = const { OnceCell::new() };
}

/// Backend endpoints that issue bearer tokens.
#[async_trait(?Send)]
pub trait AuthBackend {
    async fn sign_in_with_password(&self, request: &LoginRequest)
    -> Result<AuthResponse, ApiError>;

    async fn exchange_federated_token(
        &self,
        request: &FederatedLoginRequest,
    ) -> Result<AuthResponse, ApiError>;
}

#[async_trait(?Send)]
impl AuthBackend for CoisaLinksClient {
    async fn sign_in_with_password(
        &self,
        request: &LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.login(request).await
    }

    async fn exchange_federated_token(
        &self,
        request: &FederatedLoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        CoisaLinksClient::exchange_federated_token(self, request).await
    }
}

/// How the current session was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMethod {
    Password,
    Federated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub method: SignInMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Session),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            Self::Anonymous | Self::Authenticating => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self, Self::Authenticating)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A newer sign-in or a sign-out started before this attempt finished;
    /// its result was discarded.
    #[error("sign-in was superseded by a newer session change")]
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&SessionStatus)>;

pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    backend: Rc<dyn AuthBackend>,
    provider: Rc<dyn IdentityProvider>,
    credentials: Credentials,
    status: RefCell<SessionStatus>,
    /// Last status that was not `Authenticating`; restored when an attempt fails.
    settled: RefCell<SessionStatus>,
    epoch: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("status", &self.status.borrow())
            .field("epoch", &self.epoch.get())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        backend: Rc<dyn AuthBackend>,
        provider: Rc<dyn IdentityProvider>,
        credentials: Credentials,
    ) -> Self {
        Self {
            storage,
            backend,
            provider,
            credentials,
            status: RefCell::new(SessionStatus::Anonymous),
            settled: RefCell::new(SessionStatus::Anonymous),
            epoch: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    /// The per-tab store, wired to browser storage, the shared API client's
    /// credentials, and the page's identity provider shim.
    pub fn shared() -> Rc<Self> {
        SHARED_SESSION.with(|cell| {
            Rc::clone(cell.get_or_init(|| {
                let client = CoisaLinksClient::shared();
                let credentials = client.credentials().clone();
                let storage: Rc<dyn KeyValueStore> = if BrowserStorage::is_available() {
                    Rc::new(BrowserStorage)
                } else {
                    log::warn!("localStorage unavailable, session will not survive a reload");
                    Rc::new(MemoryStorage::new())
                };
                Rc::new(Self::new(
                    storage,
                    Rc::new(client),
                    Rc::new(ProviderBridge),
                    credentials,
                ))
            }))
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    #[cfg(test)]
    pub fn current_user(&self) -> Option<User> {
        self.status.borrow().user().cloned()
    }

    /// Register a callback run after every status change.
    pub fn subscribe(&self, listener: impl Fn(&SessionStatus) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Rehydrate from storage without contacting the backend.
    ///
    /// A stored session is trusted until a protected call fails. Partial or
    /// unreadable state is purged.
    pub fn restore(&self) -> SessionStatus {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);

        match (token, user) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => {
                    let method = if self.storage.get(FEDERATED_TOKEN_KEY).is_some() {
                        SignInMethod::Federated
                    } else {
                        SignInMethod::Password
                    };
                    log::info!("restored {method:?} session for user {}", user.id);
                    self.credentials.set(Some(token));
                    self.transition(SessionStatus::Authenticated(Session { user, method }));
                }
                Err(err) => {
                    log::warn!("stored user record is unreadable, clearing session: {err}");
                    self.clear_session();
                }
            },
            (None, None) => {
                // A provider token without a session is a leftover from a failed exchange.
                self.storage.remove(FEDERATED_TOKEN_KEY);
                self.credentials.clear();
                self.transition(SessionStatus::Anonymous);
            }
            _ => {
                log::warn!("stored session is incomplete, clearing it");
                self.clear_session();
            }
        }
        self.status()
    }

    /// Sign in with username-or-email and password.
    ///
    /// # Errors
    /// The backend or storage failure; the previous session is left in place.
    pub async fn sign_in_with_password(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let epoch = self.begin_attempt();
        let request = LoginRequest {
            username_or_email: identifier.to_string(),
            password: password.to_string(),
        };
        let attempt = PendingAttempt::new(self, epoch);
        let result = self.backend.sign_in_with_password(&request).await;
        attempt.settle();
        if !self.is_current(epoch) {
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(response) => {
                self.storage.remove(FEDERATED_TOKEN_KEY);
                self.establish(response, SignInMethod::Password)
            }
            Err(err) => {
                log::error!("password sign-in failed: {err}");
                self.abandon_attempt();
                Err(err.into())
            }
        }
    }

    /// Sign in through the identity provider popup, then trade its token for a
    /// backend token.
    ///
    /// # Errors
    /// Provider, backend, or storage failure. The cached provider token is
    /// removed in every failure case.
    pub async fn sign_in_with_federated_provider(&self) -> Result<User, SessionError> {
        let epoch = self.begin_attempt();
        let attempt = PendingAttempt::new(self, epoch);
        let signed_in = self.provider.sign_in().await;
        attempt.settle();
        let provider_token = match signed_in {
            Ok(token) => token,
            Err(err) => {
                log::error!("identity provider sign-in failed: {err}");
                if self.is_current(epoch) {
                    self.storage.remove(FEDERATED_TOKEN_KEY);
                    self.abandon_attempt();
                }
                return Err(err.into());
            }
        };
        if !self.is_current(epoch) {
            return Err(SessionError::Superseded);
        }
        self.exchange(provider_token, epoch).await
    }

    /// Sign out of the provider (best effort) and drop every trace of the
    /// session. Safe to call when nobody is signed in.
    pub async fn sign_out(&self) {
        if let SessionStatus::Authenticated(session) = &*self.settled.borrow() {
            log::debug!(
                "signing out user {} ({:?} session)",
                session.user.id,
                session.method
            );
        }
        self.begin_superseding();
        if let Err(err) = self.provider.sign_out().await {
            log::warn!("identity provider sign-out failed, continuing: {err}");
        }
        self.clear_session();
        log::info!("signed out");
    }

    /// React to the provider's auth-state subscription.
    ///
    /// A new provider token is exchanged again; a repeated one is ignored.
    /// When the provider reports nobody signed in, a federated session is
    /// dropped while a password session is kept.
    ///
    /// # Errors
    /// Failure of the re-exchange, after which the session has been cleared.
    pub async fn handle_provider_change(&self, token: Option<String>) -> Result<(), SessionError> {
        match token {
            Some(token) => {
                if self.storage.get(FEDERATED_TOKEN_KEY).as_deref() == Some(token.as_str()) {
                    return Ok(());
                }
                let epoch = self.begin_attempt();
                match self.exchange(token, epoch).await {
                    Ok(_) => Ok(()),
                    Err(SessionError::Superseded) => Err(SessionError::Superseded),
                    Err(err) => {
                        self.clear_session();
                        Err(err)
                    }
                }
            }
            None => {
                let federated = self.storage.get(FEDERATED_TOKEN_KEY).is_some();
                let signed_in = self.settled.borrow().is_authenticated();
                if federated || !signed_in {
                    self.clear_session();
                }
                Ok(())
            }
        }
    }

    async fn exchange(&self, provider_token: String, epoch: u64) -> Result<User, SessionError> {
        if let Err(err) = self.storage.set(FEDERATED_TOKEN_KEY, &provider_token) {
            log::warn!("could not cache provider token: {err}");
        }
        let attempt = PendingAttempt::new(self, epoch).caching(&provider_token);
        let request = FederatedLoginRequest {
            id_token: provider_token,
        };
        let result = self.backend.exchange_federated_token(&request).await;
        attempt.settle();
        if !self.is_current(epoch) {
            if self.storage.get(FEDERATED_TOKEN_KEY).as_deref() == Some(request.id_token.as_str())
                && !self.status.borrow().is_authenticated()
            {
                self.storage.remove(FEDERATED_TOKEN_KEY);
            }
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(response) => self.establish(response, SignInMethod::Federated),
            Err(err) => {
                log::error!("backend rejected the provider token: {err}");
                self.storage.remove(FEDERATED_TOKEN_KEY);
                self.abandon_attempt();
                Err(err.into())
            }
        }
    }

    fn establish(
        &self,
        response: AuthResponse,
        method: SignInMethod,
    ) -> Result<User, SessionError> {
        let AuthResponse { token, user } = response;
        if let Err(err) = self.persist(&token, &user) {
            log::error!("could not persist session: {err}");
            self.clear_session();
            return Err(err.into());
        }
        self.credentials.set(Some(token));
        log::info!("signed in user {} via {method:?}", user.id);
        self.transition(SessionStatus::Authenticated(Session {
            user: user.clone(),
            method,
        }));
        Ok(user)
    }

    fn persist(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user).map_err(|err| StorageError {
            key: USER_KEY.to_string(),
            reason: err.to_string(),
        })?;
        self.storage.set(USER_KEY, &user_json)?;
        self.storage.set(TOKEN_KEY, token)
    }

    fn clear_session(&self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
        self.credentials.clear();
        self.transition(SessionStatus::Anonymous);
    }

    fn begin_attempt(&self) -> u64 {
        let epoch = self.begin_superseding();
        self.transition(SessionStatus::Authenticating);
        epoch
    }

    fn begin_superseding(&self) -> u64 {
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    fn abandon_attempt(&self) {
        let settled = self.settled.borrow().clone();
        self.transition(settled);
    }

    fn transition(&self, status: SessionStatus) {
        if !status.is_authenticating() {
            *self.settled.borrow_mut() = status.clone();
        }
        *self.status.borrow_mut() = status.clone();

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&status);
        }
    }
}

/// Open sign-in attempt. Dropped before [`PendingAttempt::settle`] while
/// still the newest attempt, it puts the store back to its settled status and
/// forgets the provider token it cached.
struct PendingAttempt<'a> {
    store: &'a SessionStore,
    epoch: u64,
    provider_token: Option<String>,
    done: bool,
}

impl<'a> PendingAttempt<'a> {
    fn new(store: &'a SessionStore, epoch: u64) -> Self {
        Self {
            store,
            epoch,
            provider_token: None,
            done: false,
        }
    }

    fn caching(mut self, provider_token: &str) -> Self {
        self.provider_token = Some(provider_token.to_string());
        self
    }

    fn settle(mut self) {
        self.done = true;
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        if self.done || !self.store.is_current(self.epoch) {
            return;
        }
        log::warn!("sign-in dropped before it finished, restoring previous session");
        if let Some(token) = &self.provider_token {
            let cached = self.store.storage.get(FEDERATED_TOKEN_KEY);
            if cached.as_deref() == Some(token.as_str())
                && !self.store.settled.borrow().is_authenticated()
            {
                self.store.storage.remove(FEDERATED_TOKEN_KEY);
            }
        }
        self.store.abandon_attempt();
    }
}
