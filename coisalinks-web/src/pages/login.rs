use crate::{
    components::{SocialButton, SocialProvider},
    hooks::use_scoped_tasks,
    routes::MainRoute,
    session::{SessionError, SessionStore},
};
use i18nrs::yew::use_translation;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Link;

/// Maps a failed sign-in to the message shown under the form, if any.
fn failure_key(error: &SessionError, federated: bool) -> Option<&'static str> {
    match error {
        SessionError::Superseded => None,
        _ if federated => Some("login.federated_failed"),
        _ => Some("login.failed"),
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (i18n, ..) = use_translation();
    let identifier = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let tasks = use_scoped_tasks();

    let finish = {
        let error = error.clone();
        let loading = loading.clone();
        let i18n = i18n.clone();
        Callback::from(move |(result, federated): (Result<(), SessionError>, bool)| {
            loading.set(false);
            match result {
                Ok(()) => {
                    if let Some(nav) = &navigator {
                        nav.push(&MainRoute::Dashboard);
                    }
                }
                Err(err) => {
                    error.set(failure_key(&err, federated).map(|key| i18n.t(key)));
                }
            }
        })
    };

    let onsubmit = {
        let identifier = identifier.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let finish = finish.clone();
        let tasks = tasks.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let identifier = (*identifier).clone();
            let password = (*password).clone();
            let finish = finish.clone();
            loading.set(true);
            error.set(None);
            tasks.spawn_detached(
                async move {
                    SessionStore::shared()
                        .sign_in_with_password(&identifier, &password)
                        .await
                        .map(|_| ())
                },
                move |result| finish.emit((result, false)),
            );
        })
    };

    let on_federated = {
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |_: MouseEvent| {
            let finish = finish.clone();
            loading.set(true);
            error.set(None);
            tasks.spawn_detached(
                async move {
                    SessionStore::shared()
                        .sign_in_with_federated_provider()
                        .await
                        .map(|_| ())
                },
                move |result| finish.emit((result, true)),
            );
        })
    };

    let on_identifier_change = {
        let identifier = identifier.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                identifier.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = identifier.is_empty() || password.is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center py-12">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{i18n.t("login.title")}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="identifier">
                            <span class="label-text">{i18n.t("login.identifier")}</span>
                        </label>
                        <input
                            id="identifier"
                            class="input input-bordered"
                            type="text"
                            autocomplete="username"
                            required=true
                            value={(*identifier).clone()}
                            oninput={on_identifier_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{i18n.t("login.password")}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            autocomplete="current-password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                        <label class="label">
                            <Link<MainRoute> to={MainRoute::ForgotPassword} classes="label-text-alt link link-hover">
                                {i18n.t("login.forgot")}
                            </Link<MainRoute>>
                        </label>
                    </div>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { i18n.t("login.submitting") } else { i18n.t("login.submit") }}
                        </button>
                    </div>
                    <div class="divider">{i18n.t("login.or")}</div>
                    <div class="grid gap-2">
                    {
                        for SocialProvider::all().into_iter().map(|provider| {
                            let available = provider.is_available();
                            let label = if available {
                                i18n.t(provider.label_key())
                            } else {
                                format!("{} ({})", i18n.t(provider.label_key()), i18n.t("social.unavailable"))
                            };
                            html! {
                                <SocialButton
                                    {provider}
                                    {label}
                                    disabled={is_busy || !available}
                                    onclick={if available { on_federated.clone() } else { Callback::noop() }}
                                />
                            }
                        })
                    }
                    </div>
                    <p class="text-sm text-center mt-2">
                        {i18n.t("login.no_account")}{" "}
                        <Link<MainRoute> to={MainRoute::Register} classes="link link-primary">
                            {i18n.t("login.register")}
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
