use crate::{
    api::CoisaLinksClient,
    browser,
    hooks::use_scoped_tasks,
    routes::MainRoute,
    services::{ActionError, reset_password, send_reset_link},
};
use i18nrs::yew::use_translation;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct PasswordRecoveryPageProps {
    /// Token from `/reset-password/:token`. Without one the page asks for an
    /// email address instead.
    #[prop_or_default]
    pub token: Option<AttrValue>,
}

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Success(String),
    Failure(String),
}

fn bind(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

#[function_component(PasswordRecoveryPage)]
pub fn password_recovery_page(props: &PasswordRecoveryPageProps) -> Html {
    let (i18n, ..) = use_translation();
    let email = use_state(String::new);
    let new_password = use_state(String::new);
    let confirmation = use_state(String::new);
    let notice = use_state(|| None::<Notice>);
    let loading = use_state(|| false);
    let tasks = use_scoped_tasks();
    let reset_mode = props.token.is_some();

    let onsubmit = {
        let email = email.clone();
        let new_password = new_password.clone();
        let confirmation = confirmation.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let i18n = i18n.clone();
        let token = props.token.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email = (*email).clone();
            let new_password = (*new_password).clone();
            let confirmation = (*confirmation).clone();
            let token = token.clone();
            let notice = notice.clone();
            let loading_handle = loading.clone();
            let i18n = i18n.clone();
            loading.set(true);
            notice.set(None);
            tasks.spawn(async move {
                let client = CoisaLinksClient::shared();
                let (result, sent_key, failed_key) = match token.as_deref() {
                    Some(token) => (
                        reset_password(&client, &new_password, &confirmation, Some(token)).await,
                        "recovery.reset_done",
                        "recovery.reset_failed",
                    ),
                    None => (
                        send_reset_link(&client, &email).await,
                        "recovery.request_sent",
                        "recovery.request_failed",
                    ),
                };
                match result {
                    Ok(message) => notice.set(Some(Notice::Success(
                        message.into_text().unwrap_or_else(|| i18n.t(sent_key)),
                    ))),
                    Err(ActionError::Invalid(err)) => browser::alert(&i18n.t(err.translation_key())),
                    Err(ActionError::Api(_)) => notice.set(Some(Notice::Failure(i18n.t(failed_key)))),
                }
                loading_handle.set(false);
            });
        })
    };

    let is_busy = *loading;
    let (title, submit) = if reset_mode {
        ("recovery.reset_title", "recovery.reset_submit")
    } else {
        ("recovery.request_title", "recovery.request_submit")
    };

    html! {
        <div class="flex items-center justify-center py-12">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{i18n.t(title)}</h2>
                    {
                        match &*notice {
                            Some(Notice::Success(message)) => html! {
                                <div class="alert alert-success"><span>{message.clone()}</span></div>
                            },
                            Some(Notice::Failure(message)) => html! {
                                <div class="alert alert-error"><span>{message.clone()}</span></div>
                            },
                            None => html! {},
                        }
                    }
                    if reset_mode {
                        <div class="form-control">
                            <label class="label" for="new-password">
                                <span class="label-text">{i18n.t("recovery.new_password")}</span>
                            </label>
                            <input
                                id="new-password"
                                class="input input-bordered"
                                type="password"
                                autocomplete="new-password"
                                value={(*new_password).clone()}
                                oninput={bind(&new_password)}
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm-password">
                                <span class="label-text">{i18n.t("recovery.confirm_password")}</span>
                            </label>
                            <input
                                id="confirm-password"
                                class="input input-bordered"
                                type="password"
                                autocomplete="new-password"
                                value={(*confirmation).clone()}
                                oninput={bind(&confirmation)}
                            />
                        </div>
                    } else {
                        <p class="text-sm text-base-content/80">{i18n.t("recovery.request_hint")}</p>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">{i18n.t("recovery.email")}</span>
                            </label>
                            <input
                                id="email"
                                class="input input-bordered"
                                type="email"
                                autocomplete="email"
                                value={(*email).clone()}
                                oninput={bind(&email)}
                            />
                        </div>
                    }
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { i18n.t("recovery.submitting") } else { i18n.t(submit) }}
                        </button>
                    </div>
                    <Link<MainRoute> to={MainRoute::Login} classes="link link-hover text-sm text-center">
                        {i18n.t("recovery.back_to_login")}
                    </Link<MainRoute>>
                </form>
            </div>
        </div>
    }
}
