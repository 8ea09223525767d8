use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use crate::session::SessionStore;
use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

/// Signs out, then returns to the home page.
#[hook]
pub fn use_sign_out() -> Callback<MouseEvent> {
    let navigator = use_navigator();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        let navigator = navigator.clone();
        spawn_local(async move {
            SessionStore::shared().sign_out().await;
            if let Some(navigator) = navigator {
                navigator.push(&MainRoute::Home);
            }
        });
    })
}

#[function_component(UserMenu)]
pub fn user_menu() -> Html {
    let navigator = use_navigator();
    let (i18n, ..) = use_translation();
    let user_state = use_selector(|state: &AppState| state.session.user().cloned());
    let on_sign_out = use_sign_out();
    let Some(user) = (*user_state).clone() else {
        return html! {};
    };

    let on_dashboard = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        if let Some(navigator) = &navigator {
            navigator.push(&MainRoute::Dashboard);
        }
    });

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                <Icon icon_id={IconId::HeroiconsSolidUserCircle} class="w-6 h-6" />
                <span class="hidden md:inline">{user.display_name().to_string()}</span>
            </div>
            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-56">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold text-base-content">{user.display_name().to_string()}</div>
                    <div class="text-xs text-base-content/70">{&user.email}</div>
                </li>
                <div class="divider my-0"></div>
                <li><a onclick={on_dashboard}>{i18n.t("header.dashboard")}</a></li>
                <li><a onclick={on_sign_out}>{i18n.t("header.sign_out")}</a></li>
            </ul>
        </div>
    }
}
