use crate::{
    components::{
        language_selector::LanguageSelector,
        user_menu::{UserMenu, use_sign_out},
    },
    models::app_state::AppState,
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[function_component(Header)]
pub fn header() -> Html {
    let (i18n, ..) = use_translation();
    let signed_in = use_selector(|state: &AppState| state.session.is_authenticated());
    let menu_open = use_state(|| false);
    let on_sign_out = use_sign_out();

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let mobile_entries = if *signed_in {
        let on_sign_out = {
            let close_menu = close_menu.clone();
            Callback::from(move |event: MouseEvent| {
                close_menu.emit(event.clone());
                on_sign_out.emit(event);
            })
        };
        html! {
            <>
                <li onclick={close_menu.clone()}>
                    <Link<MainRoute> to={MainRoute::Dashboard}>{i18n.t("header.dashboard")}</Link<MainRoute>>
                </li>
                <li><a onclick={on_sign_out}>{i18n.t("header.sign_out")}</a></li>
            </>
        }
    } else {
        html! {
            <>
                <li onclick={close_menu.clone()}>
                    <Link<MainRoute> to={MainRoute::Login}>{i18n.t("header.sign_in")}</Link<MainRoute>>
                </li>
                <li onclick={close_menu.clone()}>
                    <Link<MainRoute> to={MainRoute::Register}>{i18n.t("header.sign_up")}</Link<MainRoute>>
                </li>
            </>
        }
    };

    html! {
        <header class="bg-base-300">
            <nav class="navbar justify-between max-w-6xl mx-auto">
                <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-xl">
                    {i18n.t("app.title")}
                </Link<MainRoute>>
                <div class="hidden sm:flex items-center gap-2">
                    <LanguageSelector />
                    if *signed_in {
                        <UserMenu />
                    } else {
                        <Link<MainRoute> to={MainRoute::Login} classes="btn btn-ghost btn-sm">
                            {i18n.t("header.sign_in")}
                        </Link<MainRoute>>
                        <Link<MainRoute> to={MainRoute::Register} classes="btn btn-primary btn-sm">
                            {i18n.t("header.sign_up")}
                        </Link<MainRoute>>
                    }
                </div>
                <div class="sm:hidden flex items-center gap-1">
                    <LanguageSelector />
                    <button
                        type="button"
                        class="btn btn-ghost btn-square"
                        aria-label={i18n.t("header.menu")}
                        aria-expanded={(*menu_open).to_string()}
                        onclick={toggle_menu}
                    >
                        if *menu_open {
                            <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-6 h-6" />
                        } else {
                            <Icon icon_id={IconId::HeroiconsOutlineBars3} class="w-6 h-6" />
                        }
                    </button>
                </div>
            </nav>
            if *menu_open {
                <ul class="menu sm:hidden bg-base-200 p-4 gap-2">
                    {mobile_entries}
                </ul>
            }
        </header>
    }
}
