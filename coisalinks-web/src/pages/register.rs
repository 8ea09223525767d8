use crate::{
    api::CoisaLinksClient,
    hooks::use_scoped_tasks,
    routes::MainRoute,
    services::{ActionError, register_account},
};
use i18nrs::yew::use_translation;
use shared::models::RegisterRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Created(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Username,
    Email,
    Password,
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(RegisterRequest::default);
    let outcome = use_state(|| None::<Outcome>);
    let loading = use_state(|| false);
    let tasks = use_scoped_tasks();

    let oninput = |field: Field| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let mut next = (*form).clone();
            let value = input.value();
            match field {
                Field::Name => next.name = value,
                Field::Username => next.username = value,
                Field::Email => next.email = value,
                Field::Password => next.password = value,
            }
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let outcome = outcome.clone();
        let loading = loading.clone();
        let i18n = i18n.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = (*form).clone();
            let outcome = outcome.clone();
            let loading_handle = loading.clone();
            let i18n = i18n.clone();
            loading.set(true);
            outcome.set(None);
            tasks.spawn(async move {
                let client = CoisaLinksClient::shared();
                let next = match register_account(&client, &request).await {
                    Ok(message) => Outcome::Created(
                        message
                            .into_text()
                            .unwrap_or_else(|| i18n.t("register.success")),
                    ),
                    Err(ActionError::Invalid(err)) => Outcome::Failed(i18n.t(err.translation_key())),
                    Err(ActionError::Api(err)) => Outcome::Failed(
                        err.message()
                            .map_or_else(|| i18n.t("register.failed"), str::to_string),
                    ),
                };
                outcome.set(Some(next));
                loading_handle.set(false);
            });
        })
    };

    if let Some(Outcome::Created(message)) = &*outcome {
        return html! {
            <div class="flex items-center justify-center py-12">
                <div class="card w-full max-w-md shadow-lg bg-base-200">
                    <div class="card-body items-center text-center">
                        <div class="alert alert-success"><span>{message.clone()}</span></div>
                        <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary">
                            {i18n.t("register.to_login")}
                        </Link<MainRoute>>
                    </div>
                </div>
            </div>
        };
    }

    let field = |id: &'static str, kind: &'static str, label: String, value: &str, handler: Callback<InputEvent>| {
        html! {
            <div class="form-control">
                <label class="label" for={id}>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    {id}
                    class="input input-bordered"
                    type={kind}
                    value={value.to_string()}
                    oninput={handler}
                />
            </div>
        }
    };

    let is_busy = *loading;

    html! {
        <div class="flex items-center justify-center py-12">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{i18n.t("register.title")}</h2>
                    if let Some(Outcome::Failed(message)) = &*outcome {
                        <div class="alert alert-error"><span>{message.clone()}</span></div>
                    }
                    {field("name", "text", i18n.t("register.name"), &form.name, oninput(Field::Name))}
                    {field("username", "text", i18n.t("register.username"), &form.username, oninput(Field::Username))}
                    {field("email", "email", i18n.t("register.email"), &form.email, oninput(Field::Email))}
                    {field("password", "password", i18n.t("register.password"), &form.password, oninput(Field::Password))}
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { i18n.t("register.submitting") } else { i18n.t("register.submit") }}
                        </button>
                    </div>
                    <p class="text-sm text-center mt-2">
                        {i18n.t("register.have_account")}{" "}
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                            {i18n.t("header.sign_in")}
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
