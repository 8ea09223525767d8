use crate::browser;
use i18nrs::yew::use_translation;
use yew::{AttrValue, Callback, Html, MouseEvent, Properties, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct CopyButtonProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub class: AttrValue,
}

/// Copies `text` and confirms with an alert.
#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let (i18n, ..) = use_translation();
    let onclick = {
        let text = props.text.clone();
        let confirmation = i18n.t("clipboard.copied");
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            browser::copy_to_clipboard(&text);
            browser::alert(&confirmation);
        })
    };
    let class = if props.class.is_empty() {
        AttrValue::from("btn btn-sm btn-ghost gap-1")
    } else {
        props.class.clone()
    };

    html! {
        <button type="button" {class} {onclick}>
            <Icon icon_id={IconId::HeroiconsOutlineClipboardDocument} class="w-4 h-4" />
            <span>{i18n.t("shorten.copy")}</span>
        </button>
    }
}
