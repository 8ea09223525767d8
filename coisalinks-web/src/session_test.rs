use crate::api::{ApiError, CoisaLinksClient, Credentials};
use crate::hooks::ScopedTasks;
use crate::identity::{IdentityError, IdentityProvider};
use crate::session::{AuthBackend, SessionError, SessionStatus, SessionStore, SignInMethod};
use crate::storage::{KeyValueStore, MemoryStorage};
use async_trait::async_trait;
use futures::channel::oneshot;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use shared::models::{AuthResponse, FederatedLoginRequest, LoginRequest, User};
use shared::storage_keys::{FEDERATED_TOKEN_KEY, TOKEN_KEY, USER_KEY};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct FakeBackend {
    password_results: RefCell<VecDeque<Result<AuthResponse, ApiError>>>,
    federated_results: RefCell<VecDeque<Result<AuthResponse, ApiError>>>,
    password_requests: RefCell<Vec<LoginRequest>>,
    federated_requests: RefCell<Vec<FederatedLoginRequest>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeBackend {
    fn queue_password(&self, result: Result<AuthResponse, ApiError>) {
        self.password_results.borrow_mut().push_back(result);
    }

    fn queue_federated(&self, result: Result<AuthResponse, ApiError>) {
        self.federated_results.borrow_mut().push_back(result);
    }

    /// Hold the next call until the sender fires.
    fn hold_next_call(&self, gate: oneshot::Receiver<()>) {
        *self.gate.borrow_mut() = Some(gate);
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for FakeBackend {
    async fn sign_in_with_password(
        &self,
        request: &LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.password_requests.borrow_mut().push(request.clone());
        self.wait_for_gate().await;
        self.password_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(rejected("no response queued")))
    }

    async fn exchange_federated_token(
        &self,
        request: &FederatedLoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.federated_requests.borrow_mut().push(request.clone());
        self.wait_for_gate().await;
        self.federated_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(rejected("no response queued")))
    }
}

#[derive(Default)]
struct FakeProvider {
    sign_in_results: RefCell<VecDeque<Result<String, IdentityError>>>,
    fail_sign_out: Cell<bool>,
    sign_outs: Cell<usize>,
    popup: RefCell<Option<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn sign_in(&self) -> Result<String, IdentityError> {
        let popup = self.popup.borrow_mut().take();
        if let Some(popup) = popup {
            let _ = popup.await;
        }
        self.sign_in_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(IdentityError::MissingToken))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_outs.set(self.sign_outs.get() + 1);
        if self.fail_sign_out.get() {
            Err(IdentityError::SignOut("network down".to_string()))
        } else {
            Ok(())
        }
    }
}

struct Harness {
    store: SessionStore,
    storage: Rc<MemoryStorage>,
    backend: Rc<FakeBackend>,
    provider: Rc<FakeProvider>,
    credentials: Credentials,
}

fn harness() -> Harness {
    let storage = Rc::new(MemoryStorage::new());
    let backend = Rc::new(FakeBackend::default());
    let provider = Rc::new(FakeProvider::default());
    let credentials = Credentials::default();
    let store = SessionStore::new(
        storage.clone(),
        backend.clone(),
        provider.clone(),
        credentials.clone(),
    );
    Harness {
        store,
        storage,
        backend,
        provider,
        credentials,
    }
}

fn maria() -> User {
    User {
        id: 7,
        name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        username: Some("maria".to_string()),
        perfil: None,
    }
}

fn joao() -> User {
    User {
        id: 9,
        name: "João Souza".to_string(),
        email: "joao@example.com".to_string(),
        username: None,
        perfil: Some("admin".to_string()),
    }
}

fn granted(token: &str, user: User) -> Result<AuthResponse, ApiError> {
    Ok(AuthResponse {
        token: token.to_string(),
        user,
    })
}

fn rejected(message: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::UNAUTHORIZED,
        message: Some(message.to_string()),
    }
}

fn store_password_session(storage: &MemoryStorage, token: &str, user: &User) {
    storage.set(TOKEN_KEY, token).unwrap();
    storage
        .set(USER_KEY, &serde_json::to_string(user).unwrap())
        .unwrap();
}

#[tokio::test]
async fn test_restore_without_entries_is_anonymous() {
    let h = harness();
    assert_eq!(h.store.restore(), SessionStatus::Anonymous);
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_restore_password_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-1", &maria());

    let status = h.store.restore();

    assert_eq!(status.user(), Some(&maria()));
    let SessionStatus::Authenticated(session) = status else {
        panic!("expected an authenticated session");
    };
    assert_eq!(session.method, SignInMethod::Password);
    assert_eq!(h.credentials.token().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_restore_federated_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-1", &maria());
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();

    let SessionStatus::Authenticated(session) = h.store.restore() else {
        panic!("expected an authenticated session");
    };
    assert_eq!(session.method, SignInMethod::Federated);
}

#[tokio::test]
async fn test_restore_purges_token_without_user() {
    let h = harness();
    h.storage.set(TOKEN_KEY, "tok-1").unwrap();
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();

    assert_eq!(h.store.restore(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_restore_purges_user_without_token() {
    let h = harness();
    h.storage
        .set(USER_KEY, &serde_json::to_string(&maria()).unwrap())
        .unwrap();

    assert_eq!(h.store.restore(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_restore_purges_unreadable_user() {
    let h = harness();
    h.storage.set(TOKEN_KEY, "tok-1").unwrap();
    h.storage.set(USER_KEY, "{not json").unwrap();

    assert_eq!(h.store.restore(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_restore_drops_orphan_provider_token() {
    let h = harness();
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();

    assert_eq!(h.store.restore(), SessionStatus::Anonymous);
    assert!(h.storage.get(FEDERATED_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_password_sign_in_persists_and_authorizes_requests() {
    let h = harness();
    h.backend.queue_password(granted("tok-1", maria()));

    let user = h
        .store
        .sign_in_with_password("maria@example.com", "s3cret")
        .await
        .unwrap();

    assert_eq!(user, maria());
    assert_eq!(
        h.backend.password_requests.borrow()[0],
        LoginRequest {
            username_or_email: "maria@example.com".to_string(),
            password: "s3cret".to_string(),
        }
    );
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    let stored: User = serde_json::from_str(&h.storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, maria());
    assert!(h.storage.get(FEDERATED_TOKEN_KEY).is_none());

    let client = CoisaLinksClient::new("http://localhost:8000", h.credentials.clone());
    let request = client.request(Method::GET, "list").build().unwrap();
    assert_eq!(
        request.headers().get(AUTHORIZATION).unwrap(),
        "Bearer tok-1"
    );
}

#[tokio::test]
async fn test_password_sign_in_failure_stays_anonymous() {
    let h = harness();
    h.backend.queue_password(Err(rejected("Credenciais inválidas")));

    let error = h
        .store
        .sign_in_with_password("maria", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(error, SessionError::Api(_)));
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());

    let client = CoisaLinksClient::new("http://localhost:8000", h.credentials.clone());
    let request = client.request(Method::GET, "list").build().unwrap();
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_password_failure_keeps_previous_session() {
    let h = harness();
    h.backend.queue_password(granted("tok-1", maria()));
    h.backend.queue_password(Err(rejected("Credenciais inválidas")));

    h.store.sign_in_with_password("maria", "s3cret").await.unwrap();
    assert!(h.store.sign_in_with_password("joao", "wrong").await.is_err());

    assert_eq!(h.store.current_user(), Some(maria()));
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(h.credentials.token().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_listeners_observe_transitions_until_unsubscribed() {
    let h = harness();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = h.store.subscribe(move |status| sink.borrow_mut().push(status.clone()));
    h.backend.queue_password(granted("tok-1", maria()));

    h.store.sign_in_with_password("maria", "s3cret").await.unwrap();

    {
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_authenticating());
        assert_eq!(seen[1].user(), Some(&maria()));
    }

    h.store.unsubscribe(id);
    h.store.sign_out().await;
    assert_eq!(seen.borrow().len(), 2);
}

#[tokio::test]
async fn test_federated_sign_in_exchanges_provider_token() {
    let h = harness();
    h.provider
        .sign_in_results
        .borrow_mut()
        .push_back(Ok("provider-token".to_string()));
    h.backend.queue_federated(granted("tok-2", joao()));

    let user = h.store.sign_in_with_federated_provider().await.unwrap();

    assert_eq!(user, joao());
    assert_eq!(
        h.backend.federated_requests.borrow()[0].id_token,
        "provider-token"
    );
    assert_eq!(
        h.storage.get(FEDERATED_TOKEN_KEY).as_deref(),
        Some("provider-token")
    );
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-2"));
    let SessionStatus::Authenticated(session) = h.store.status() else {
        panic!("expected an authenticated session");
    };
    assert_eq!(session.method, SignInMethod::Federated);
}

#[tokio::test]
async fn test_federated_provider_failure_skips_backend() {
    let h = harness();
    h.provider
        .sign_in_results
        .borrow_mut()
        .push_back(Err(IdentityError::SignIn("popup closed".to_string())));

    let error = h.store.sign_in_with_federated_provider().await.unwrap_err();

    assert!(matches!(error, SessionError::Identity(_)));
    assert!(h.backend.federated_requests.borrow().is_empty());
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_federated_exchange_failure_removes_provider_token() {
    let h = harness();
    h.provider
        .sign_in_results
        .borrow_mut()
        .push_back(Ok("provider-token".to_string()));
    h.backend.queue_federated(Err(rejected("Token inválido")));

    let error = h.store.sign_in_with_federated_provider().await.unwrap_err();

    assert!(matches!(error, SessionError::Api(_)));
    assert!(h.storage.is_empty());
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
}

#[tokio::test]
async fn test_sign_out_clears_session_when_provider_fails() {
    let h = harness();
    store_password_session(&h.storage, "tok-1", &maria());
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();
    h.store.restore();
    h.provider.fail_sign_out.set(true);

    h.store.sign_out().await;

    assert_eq!(h.provider.sign_outs.get(), 1);
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let h = harness();
    h.store.sign_out().await;
    h.store.sign_out().await;

    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_provider_reporting_same_token_is_ignored() {
    let h = harness();
    store_password_session(&h.storage, "tok-2", &joao());
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();
    h.store.restore();

    h.store
        .handle_provider_change(Some("provider-token".to_string()))
        .await
        .unwrap();

    assert!(h.backend.federated_requests.borrow().is_empty());
    assert_eq!(h.store.current_user(), Some(joao()));
}

#[tokio::test]
async fn test_provider_reporting_new_token_exchanges_again() {
    let h = harness();
    store_password_session(&h.storage, "tok-2", &joao());
    h.storage.set(FEDERATED_TOKEN_KEY, "old-token").unwrap();
    h.store.restore();
    h.backend.queue_federated(granted("tok-3", joao()));

    h.store
        .handle_provider_change(Some("new-token".to_string()))
        .await
        .unwrap();

    assert_eq!(
        h.backend.federated_requests.borrow()[0].id_token,
        "new-token"
    );
    assert_eq!(h.storage.get(FEDERATED_TOKEN_KEY).as_deref(), Some("new-token"));
    assert_eq!(h.credentials.token().as_deref(), Some("tok-3"));
}

#[tokio::test]
async fn test_failed_reexchange_purges_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-2", &joao());
    h.storage.set(FEDERATED_TOKEN_KEY, "old-token").unwrap();
    h.store.restore();
    h.backend.queue_federated(Err(rejected("Token expirado")));

    let result = h
        .store
        .handle_provider_change(Some("new-token".to_string()))
        .await;

    assert!(matches!(result, Err(SessionError::Api(_))));
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_provider_sign_out_clears_federated_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-2", &joao());
    h.storage.set(FEDERATED_TOKEN_KEY, "provider-token").unwrap();
    h.store.restore();

    h.store.handle_provider_change(None).await.unwrap();

    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_provider_sign_out_keeps_password_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-1", &maria());
    h.store.restore();

    h.store.handle_provider_change(None).await.unwrap();

    assert_eq!(h.store.current_user(), Some(maria()));
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_storage_failure_leaves_no_partial_session() {
    let h = harness();
    h.storage.reject_writes_to(TOKEN_KEY);
    h.backend.queue_password(granted("tok-1", maria()));

    let error = h
        .store
        .sign_in_with_password("maria", "s3cret")
        .await
        .unwrap_err();

    assert!(matches!(error, SessionError::Storage(_)));
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.get(USER_KEY).is_none());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_sign_out_supersedes_pending_sign_in() {
    let h = harness();
    let (release, gate) = oneshot::channel();
    h.backend.hold_next_call(gate);
    h.backend.queue_password(granted("tok-1", maria()));

    let attempt = h.store.sign_in_with_password("maria", "s3cret");
    let interrupt = async {
        h.store.sign_out().await;
        let _ = release.send(());
    };
    let (result, ()) = futures::join!(attempt, interrupt);

    assert!(matches!(result, Err(SessionError::Superseded)));
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_dropped_password_sign_in_returns_to_anonymous() {
    let h = harness();
    let (_release, gate) = oneshot::channel();
    h.backend.hold_next_call(gate);
    h.backend.queue_password(granted("tok-1", maria()));

    let mut attempt = Box::pin(h.store.sign_in_with_password("maria", "s3cret"));
    assert!(futures::poll!(attempt.as_mut()).is_pending());
    assert!(h.store.status().is_authenticating());
    drop(attempt);

    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_dropped_password_sign_in_keeps_previous_session() {
    let h = harness();
    store_password_session(&h.storage, "tok-0", &joao());
    let before = h.store.restore();
    let (_release, gate) = oneshot::channel();
    h.backend.hold_next_call(gate);
    h.backend.queue_password(granted("tok-1", maria()));

    let mut attempt = Box::pin(h.store.sign_in_with_password("maria", "s3cret"));
    assert!(futures::poll!(attempt.as_mut()).is_pending());
    drop(attempt);

    assert_eq!(h.store.status(), before);
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("tok-0"));
    assert_eq!(h.credentials.token().as_deref(), Some("tok-0"));
}

#[tokio::test]
async fn test_aborted_page_task_does_not_leave_sign_in_pending() {
    let h = harness();
    let tasks = ScopedTasks::default();
    let (_release, gate) = oneshot::channel();
    h.backend.hold_next_call(gate);
    h.backend.queue_password(granted("tok-1", maria()));

    let mut attempt = Box::pin(tasks.guard(h.store.sign_in_with_password("maria", "s3cret")));
    assert!(futures::poll!(attempt.as_mut()).is_pending());
    tasks.abort_all();

    assert!(attempt.await.is_none());
    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.credentials.token().is_none());
}

#[tokio::test]
async fn test_dropped_provider_popup_returns_to_anonymous() {
    let h = harness();
    let (_release, popup) = oneshot::channel();
    *h.provider.popup.borrow_mut() = Some(popup);
    h.provider
        .sign_in_results
        .borrow_mut()
        .push_back(Ok("provider-token".to_string()));

    let mut attempt = Box::pin(h.store.sign_in_with_federated_provider());
    assert!(futures::poll!(attempt.as_mut()).is_pending());
    drop(attempt);

    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.is_empty());
    assert!(h.backend.federated_requests.borrow().is_empty());
}

#[tokio::test]
async fn test_dropped_exchange_forgets_provider_token() {
    let h = harness();
    h.provider
        .sign_in_results
        .borrow_mut()
        .push_back(Ok("provider-token".to_string()));
    let (_release, gate) = oneshot::channel();
    h.backend.hold_next_call(gate);
    h.backend.queue_federated(granted("tok-1", maria()));

    let mut attempt = Box::pin(h.store.sign_in_with_federated_provider());
    assert!(futures::poll!(attempt.as_mut()).is_pending());
    assert_eq!(h.backend.federated_requests.borrow().len(), 1);
    drop(attempt);

    assert_eq!(h.store.status(), SessionStatus::Anonymous);
    assert!(h.storage.get(FEDERATED_TOKEN_KEY).is_none());
    assert!(h.storage.is_empty());
    assert!(h.credentials.token().is_none());
}
