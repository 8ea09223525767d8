use crate::config::FrontendConfig;
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};

#[function_component(Footer)]
pub fn footer() -> Html {
    let (i18n, ..) = use_translation();
    let config = FrontendConfig::new();

    html! {
        <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
            <nav>
                <a class="link link-hover" href={config.privacy_policy_url().to_string()}>
                    {i18n.t("footer.privacy")}
                </a>
            </nav>
            <aside>
                <p>{i18n.t("footer.copyright")}</p>
            </aside>
        </footer>
    }
}
