use crate::api::CoisaLinksClient;
use crate::browser;
use crate::components::{LinkTable, ShortenForm, loading::Loading};
use crate::hooks::use_scoped_tasks;
use crate::models::link_editor::LinkEditor;
use crate::services::{SaveError, save_link_edit};
use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use shared::models::{Link, ShortenResponse};
use yew::prelude::*;

const NOTICE_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
enum LinkList {
    Loading,
    Failed,
    Loaded(Vec<Link>),
}

/// Dashboard page component
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let (i18n, ..) = use_translation();
    let links = use_state(|| LinkList::Loading);
    let editor = use_state(LinkEditor::default);
    let saving = use_state(|| false);
    let notice = use_state(|| None::<String>);
    let notice_timer = use_mut_ref(|| None::<Timeout>);
    let tasks = use_scoped_tasks();

    let reload = {
        let links = links.clone();
        let tasks = tasks.clone();
        Callback::from(move |()| {
            let links = links.clone();
            tasks.spawn(async move {
                match CoisaLinksClient::shared().list_links().await {
                    Ok(fetched) => links.set(LinkList::Loaded(fetched)),
                    Err(err) => {
                        log::error!("loading links failed: {err}");
                        links.set(LinkList::Failed);
                    }
                }
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let show_notice = {
        let notice = notice.clone();
        Callback::from(move |message: String| {
            notice.set(Some(message));
            let notice = notice.clone();
            // Replacing the handle cancels the previous timer.
            *notice_timer.borrow_mut() = Some(Timeout::new(NOTICE_MS, move || notice.set(None)));
        })
    };

    let on_save = {
        let editor = editor.clone();
        let links = links.clone();
        let saving = saving.clone();
        let i18n = i18n.clone();
        Callback::from(move |()| {
            let Some(draft) = editor.draft().cloned() else {
                return;
            };
            let editor = editor.clone();
            let links = links.clone();
            let saving = saving.clone();
            let show_notice = show_notice.clone();
            let i18n = i18n.clone();
            saving.set(true);
            tasks.spawn(async move {
                let client = CoisaLinksClient::shared();
                match save_link_edit(&client, &draft).await {
                    Ok(updated) => {
                        editor.set(LinkEditor::default());
                        links.set(LinkList::Loaded(updated));
                        show_notice.emit(i18n.t("dashboard.updated"));
                    }
                    Err(SaveError::Refetch(_)) => {
                        editor.set(LinkEditor::default());
                        links.set(LinkList::Failed);
                        show_notice.emit(i18n.t("dashboard.updated"));
                    }
                    Err(SaveError::Update(_)) => {
                        browser::alert(&i18n.t("dashboard.update_failed"));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |link: Link| editor.set(editor.begin(&link)))
    };
    let on_original_input = {
        let editor = editor.clone();
        Callback::from(move |value: String| editor.set(editor.with_original_url(value)))
    };
    let on_short_input = {
        let editor = editor.clone();
        Callback::from(move |value: String| editor.set(editor.with_shortened_url(value)))
    };
    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(editor.cancel()))
    };
    let on_created = reload.reform(|_: ShortenResponse| ());

    let content = match &*links {
        LinkList::Loading => html! { <Loading message={i18n.t("dashboard.loading")} /> },
        LinkList::Failed => html! {
            <div class="alert alert-error"><span>{i18n.t("dashboard.load_failed")}</span></div>
        },
        LinkList::Loaded(items) if items.is_empty() => html! {
            <p class="text-center text-base-content/70 py-8">{i18n.t("dashboard.empty")}</p>
        },
        LinkList::Loaded(items) => html! {
            <LinkTable
                links={items.clone()}
                editor={(*editor).clone()}
                saving={*saving}
                {on_edit}
                {on_original_input}
                {on_short_input}
                {on_save}
                {on_cancel}
            />
        },
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{i18n.t("dashboard.title")}</h1>
            <ShortenForm {on_created} clear_on_success=true />
            if let Some(message) = &*notice {
                <div class="alert alert-success"><span>{message.clone()}</span></div>
            }
            {content}
        </div>
    }
}
