use crate::routes::MainRoute;
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="p-4 space-y-6 text-center">
            <h1 class="text-2xl font-bold">{i18n.t("not_found.title")}</h1>
            <p>{i18n.t("not_found.body")}</p>
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-primary">
                {i18n.t("not_found.home")}
            </Link<MainRoute>>
        </div>
    }
}
