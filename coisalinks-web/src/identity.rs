//! Bridge to the federated identity provider.
//!
//! The provider SDK lives in JavaScript. The host page installs a small shim
//! at `window.coisaLinksIdentity` exposing three functions:
//!
//! - `signInWithPopup(): Promise<string>` resolving to the provider id token,
//! - `signOut(): Promise<void>`,
//! - `onAuthStateChanged(cb): () => void` calling `cb(token | null)` and
//!   returning an unsubscribe function.

use async_trait::async_trait;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = coisaLinksIdentity, js_name = signInWithPopup)]
    async fn js_sign_in_with_popup() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = coisaLinksIdentity, js_name = signOut)]
    async fn js_sign_out() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = coisaLinksIdentity, js_name = onAuthStateChanged)]
    fn js_on_auth_state_changed(
        callback: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<js_sys::Function, JsValue>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity provider sign-in failed: {0}")]
    SignIn(String),
    #[error("identity provider sign-out failed: {0}")]
    SignOut(String),
    #[error("identity provider returned no token")]
    MissingToken,
    #[error("identity provider is unavailable: {0}")]
    Unavailable(String),
}

/// Popup sign-in and sign-out against the federated provider.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Run the provider's interactive sign-in and return its id token.
    async fn sign_in(&self) -> Result<String, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}

/// [`IdentityProvider`] backed by the page's JavaScript shim.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderBridge;

#[async_trait(?Send)]
impl IdentityProvider for ProviderBridge {
    async fn sign_in(&self) -> Result<String, IdentityError> {
        let value = js_sign_in_with_popup()
            .await
            .map_err(|err| IdentityError::SignIn(describe_js_error(&err)))?;
        value
            .as_string()
            .filter(|token| !token.is_empty())
            .ok_or(IdentityError::MissingToken)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        js_sign_out()
            .await
            .map(|_| ())
            .map_err(|err| IdentityError::SignOut(describe_js_error(&err)))
    }
}

/// Live subscription to provider auth-state changes.
///
/// The callback receives `Some(token)` while a principal is signed in and
/// `None` otherwise. Dropping the watch unsubscribes.
pub struct ProviderWatch {
    unsubscribe: js_sys::Function,
    _callback: Closure<dyn FnMut(JsValue)>,
}

impl ProviderWatch {
    /// # Errors
    /// [`IdentityError::Unavailable`] when the shim is not installed.
    pub fn start<F>(mut on_change: F) -> Result<Self, IdentityError>
    where
        F: FnMut(Option<String>) + 'static,
    {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            on_change(value.as_string().filter(|token| !token.is_empty()));
        });
        let unsubscribe = js_on_auth_state_changed(&callback)
            .map_err(|err| IdentityError::Unavailable(describe_js_error(&err)))?;
        Ok(Self {
            unsubscribe,
            _callback: callback,
        })
    }
}

impl Drop for ProviderWatch {
    fn drop(&mut self) {
        if let Err(err) = self.unsubscribe.call0(&JsValue::NULL) {
            log::warn!(
                "failed to unsubscribe from identity provider: {}",
                describe_js_error(&err)
            );
        }
    }
}

impl std::fmt::Debug for ProviderWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderWatch").finish_non_exhaustive()
    }
}

fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
