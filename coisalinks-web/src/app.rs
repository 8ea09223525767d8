use crate::components::loading::Loading;
use crate::identity::ProviderWatch;
use crate::models::app_state::AppState;
use crate::routes::{MainRoute, switch};
use crate::session::{SessionError, SessionStore};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with, use_mut_ref};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

/// Forward provider auth-state changes to the session store.
fn watch_provider() -> Option<ProviderWatch> {
    let started = ProviderWatch::start(|token| {
        spawn_local(async move {
            match SessionStore::shared().handle_provider_change(token).await {
                Ok(()) | Err(SessionError::Superseded) => {}
                Err(err) => log::warn!("provider session change not applied: {err}"),
            }
        });
    });
    started
        .inspect_err(|err| log::warn!("identity provider not available: {err}"))
        .ok()
}

#[function_component(App)]
pub fn app() -> Html {
    let (state, dispatch) = use_store::<AppState>();
    let provider_watch = use_mut_ref(|| None::<ProviderWatch>);

    use_effect_with((), move |_| {
        let store = SessionStore::shared();
        let listener = {
            let dispatch = dispatch.clone();
            store.subscribe(move |status| {
                let status = status.clone();
                dispatch.reduce_mut(|state| state.session = status);
            })
        };
        let session = store.restore();
        dispatch.set(AppState {
            restored: true,
            session,
        });
        *provider_watch.borrow_mut() = watch_provider();

        move || {
            store.unsubscribe(listener);
            provider_watch.borrow_mut().take();
        }
    });

    if !state.restored {
        return html! { <Loading /> };
    }

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
        </BrowserRouter>
    }
}
