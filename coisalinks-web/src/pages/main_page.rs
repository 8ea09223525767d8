use crate::components::ShortenForm;
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};

/// Landing page: anyone can shorten a link here.
#[function_component(MainPage)]
pub fn main_page() -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <section class="hero py-12">
            <div class="hero-content flex-col text-center w-full">
                <h1 class="text-4xl font-bold">{i18n.t("app.title")}</h1>
                <p class="text-lg text-base-content/80">{i18n.t("app.tagline")}</p>
                <ShortenForm />
            </div>
        </section>
    }
}
