use crate::components::copy_button::CopyButton;
use crate::models::link_editor::{LinkDraft, LinkEditor};
use i18nrs::yew::use_translation;
use shared::models::Link;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct LinkTableProps {
    pub links: Vec<Link>,
    pub editor: LinkEditor,
    #[prop_or_default]
    pub saving: bool,
    pub on_edit: Callback<Link>,
    pub on_original_input: Callback<String>,
    pub on_short_input: Callback<String>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(LinkTable)]
pub fn link_table(props: &LinkTableProps) -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>{i18n.t("dashboard.original")}</th>
                        <th>{i18n.t("dashboard.short")}</th>
                        <th>{i18n.t("dashboard.clicks")}</th>
                        <th>{i18n.t("dashboard.expiration")}</th>
                        <th>{i18n.t("dashboard.actions")}</th>
                    </tr>
                </thead>
                <tbody>
                {
                    for props.links.iter().map(|link| {
                        let draft = props.editor.draft().filter(|_| props.editor.is_editing(link.id)).cloned();
                        html! {
                            <LinkRow
                                key={link.id}
                                link={link.clone()}
                                {draft}
                                saving={props.saving}
                                on_edit={props.on_edit.clone()}
                                on_original_input={props.on_original_input.clone()}
                                on_short_input={props.on_short_input.clone()}
                                on_save={props.on_save.clone()}
                                on_cancel={props.on_cancel.clone()}
                            />
                        }
                    })
                }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkRowProps {
    pub link: Link,
    /// Present while this row is in edit mode.
    #[prop_or_default]
    pub draft: Option<LinkDraft>,
    #[prop_or_default]
    pub saving: bool,
    pub on_edit: Callback<Link>,
    pub on_original_input: Callback<String>,
    pub on_short_input: Callback<String>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

fn input_value(callback: Callback<String>) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        if let Some(element) = event.target_dyn_into::<HtmlInputElement>() {
            callback.emit(element.value());
        }
    })
}

#[function_component(LinkRow)]
pub fn link_row(props: &LinkRowProps) -> Html {
    let (i18n, ..) = use_translation();
    let link = &props.link;
    let expiration = link
        .expiration_display()
        .unwrap_or_else(|| i18n.t("dashboard.no_expiration"));

    let Some(draft) = &props.draft else {
        let on_edit = {
            let on_edit = props.on_edit.clone();
            let link = link.clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(link.clone()))
        };
        return html! {
            <tr>
                <td class="max-w-xs truncate">
                    <a class="link" href={link.original_url.clone()} target="_blank" rel="noopener noreferrer">
                        {&link.original_url}
                    </a>
                </td>
                <td>
                    <div class="flex items-center gap-2">
                        <a class="link link-primary" href={link.shortened_url.clone()} target="_blank" rel="noopener noreferrer">
                            {&link.shortened_url}
                        </a>
                        <CopyButton text={link.shortened_url.clone()} class="btn btn-xs btn-ghost gap-1" />
                    </div>
                </td>
                <td>{link.clicks.to_string()}</td>
                <td>{expiration}</td>
                <td>
                    <button type="button" class="btn btn-xs btn-outline gap-1" onclick={on_edit}>
                        <Icon icon_id={IconId::HeroiconsOutlinePencilSquare} class="w-4 h-4" />
                        {i18n.t("dashboard.edit")}
                    </button>
                </td>
            </tr>
        };
    };

    let on_save = props.on_save.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <tr class="bg-base-200">
            <td>
                <input
                    class="input input-sm input-bordered w-full"
                    type="text"
                    value={draft.original_url.clone()}
                    oninput={input_value(props.on_original_input.clone())}
                />
            </td>
            <td>
                <input
                    class="input input-sm input-bordered w-full"
                    type="text"
                    value={draft.shortened_url.clone()}
                    oninput={input_value(props.on_short_input.clone())}
                />
            </td>
            <td>{link.clicks.to_string()}</td>
            <td>{expiration}</td>
            <td class="flex gap-2">
                <button type="button" class="btn btn-xs btn-primary gap-1" disabled={props.saving} onclick={on_save}>
                    <Icon icon_id={IconId::HeroiconsOutlineCheck} class="w-4 h-4" />
                    {i18n.t("dashboard.save")}
                </button>
                <button type="button" class="btn btn-xs btn-ghost gap-1" disabled={props.saving} onclick={on_cancel}>
                    <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-4 h-4" />
                    {i18n.t("dashboard.cancel")}
                </button>
            </td>
        </tr>
    }
}
