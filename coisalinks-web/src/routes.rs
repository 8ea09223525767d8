use crate::{
    components::loading::Loading, containers::layout::Layout, models::app_state::AppState,
    pages::*, session::SessionStatus,
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/forgot-password")]
    ForgotPassword,
    #[at("/reset-password/:token")]
    ResetPassword { token: String },
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// What a route does for the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAccess {
    Render,
    /// A sign-in is running; show a placeholder until it settles.
    Wait,
    Redirect(MainRoute),
}

/// Guard rules: the dashboard needs a session, the login page is skipped
/// once signed in. Everything else is public.
pub fn route_access(route: &MainRoute, session: &SessionStatus) -> RouteAccess {
    match (route, session) {
        (MainRoute::Dashboard, SessionStatus::Authenticated(_))
        | (MainRoute::Login, SessionStatus::Anonymous | SessionStatus::Authenticating) => {
            RouteAccess::Render
        }
        (MainRoute::Dashboard, SessionStatus::Authenticating) => RouteAccess::Wait,
        (MainRoute::Dashboard, SessionStatus::Anonymous) => RouteAccess::Redirect(MainRoute::Login),
        (MainRoute::Login, SessionStatus::Authenticated(_)) => {
            RouteAccess::Redirect(MainRoute::Dashboard)
        }
        _ => RouteAccess::Render,
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let (i18n, ..) = use_translation();
    let session = use_selector(|state: &AppState| state.session.clone());

    match route_access(&props.route, &session) {
        RouteAccess::Redirect(to) => return html! { <Redirect<MainRoute> {to} /> },
        RouteAccess::Wait => {
            return html! {
                <Layout>
                    <Loading message={i18n.t("loading.text")} />
                </Layout>
            };
        }
        RouteAccess::Render => {}
    }

    let page = match props.route.clone() {
        MainRoute::Home => html! { <MainPage /> },
        MainRoute::Login => html! { <LoginPage /> },
        MainRoute::Register => html! { <RegisterPage /> },
        MainRoute::ForgotPassword => html! { <PasswordRecoveryPage /> },
        MainRoute::ResetPassword { token } => {
            html! { <PasswordRecoveryPage token={Some(AttrValue::from(token))} /> }
        }
        MainRoute::Dashboard => html! { <DashboardPage /> },
        MainRoute::NotFound => html! { <NotFoundPage /> },
    };
    html! { <Layout>{page}</Layout> }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log::debug!("switching to route {route:?}");
    html! { <MainRouteView {route} /> }
}
