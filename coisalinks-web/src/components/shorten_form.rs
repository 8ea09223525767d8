use crate::api::CoisaLinksClient;
use crate::browser;
use crate::components::copy_button::CopyButton;
use crate::hooks::use_scoped_tasks;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use crate::services::{ActionError, shorten_link};
use i18nrs::yew::use_translation;
use shared::models::ShortenResponse;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct ShortenFormProps {
    /// Called after the backend created a link.
    #[prop_or_default]
    pub on_created: Option<Callback<ShortenResponse>>,
    /// Empty the input after a successful shortening.
    #[prop_or_default]
    pub clear_on_success: bool,
}

#[function_component(ShortenForm)]
pub fn shorten_form(props: &ShortenFormProps) -> Html {
    let (i18n, ..) = use_translation();
    let input = use_state(String::new);
    let result = use_state(|| None::<String>);
    let failure = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let tasks = use_scoped_tasks();
    let signed_in = use_selector(|state: &AppState| state.session.is_authenticated());

    let onsubmit = {
        let input = input.clone();
        let result = result.clone();
        let failure = failure.clone();
        let busy = busy.clone();
        let i18n = i18n.clone();
        let on_created = props.on_created.clone();
        let clear_on_success = props.clear_on_success;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let value = (*input).clone();
            let input = input.clone();
            let result = result.clone();
            let failure = failure.clone();
            let busy_handle = busy.clone();
            let i18n = i18n.clone();
            let on_created = on_created.clone();
            busy.set(true);
            failure.set(None);
            tasks.spawn(async move {
                let client = CoisaLinksClient::shared();
                match shorten_link(&client, &value).await {
                    Ok(response) => {
                        result.set(Some(response.shortened_url.clone()));
                        if clear_on_success {
                            input.set(String::new());
                        }
                        if let Some(callback) = on_created {
                            callback.emit(response);
                        }
                    }
                    Err(ActionError::Invalid(err)) => {
                        browser::alert(&i18n.t(err.translation_key()));
                    }
                    Err(ActionError::Api(_)) => {
                        failure.set(Some(i18n.t("shorten.failed")));
                    }
                }
                busy_handle.set(false);
            });
        })
    };

    let oninput = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(element) = event.target_dyn_into::<HtmlInputElement>() {
                input.set(element.value());
            }
        })
    };

    let is_busy = *busy;

    html! {
        <div class="w-full max-w-2xl space-y-4">
            <form class="join w-full" {onsubmit}>
                <input
                    class="input input-bordered join-item w-full"
                    type="text"
                    placeholder={i18n.t("shorten.placeholder")}
                    value={(*input).clone()}
                    {oninput}
                />
                <button class="btn btn-primary join-item" type="submit" disabled={is_busy}>
                    <Icon icon_id={IconId::HeroiconsOutlineLink} class="w-5 h-5" />
                    {if is_busy { i18n.t("shorten.submitting") } else { i18n.t("shorten.submit") }}
                </button>
            </form>
            if let Some(message) = &*failure {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            if let Some(short_url) = &*result {
                <div class="card bg-base-200">
                    <div class="card-body flex-row items-center justify-between gap-4">
                        <div class="min-w-0">
                            <p class="text-sm text-base-content/70">{i18n.t("shorten.result")}</p>
                            <a class="link link-primary break-all" href={short_url.clone()} target="_blank" rel="noopener noreferrer">
                                {short_url.clone()}
                            </a>
                        </div>
                        <CopyButton text={short_url.clone()} />
                    </div>
                </div>
                if !*signed_in {
                    <div class="alert alert-info">
                        <span>{i18n.t("shorten.signup_prompt")}</span>
                        <Link<MainRoute> to={MainRoute::Register} classes="btn btn-sm btn-primary">
                            {i18n.t("shorten.signup_cta")}
                        </Link<MainRoute>>
                    </div>
                }
            }
        </div>
    }
}
