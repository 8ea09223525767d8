use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

use crate::language::LanguageInfo;

#[derive(Properties, PartialEq)]
pub struct LanguageSelectorButtonProps {
    pub is_active: bool,
    pub info: LanguageInfo,
    pub on_click: Callback<String>,
}

#[function_component(LanguageSelectorButton)]
pub fn language_selector_button(props: &LanguageSelectorButtonProps) -> Html {
    let LanguageInfo {
        code,
        flag,
        native_name,
        ..
    } = props.info;
    let onclick = props.on_click.reform(move |event: MouseEvent| {
        event.prevent_default();
        code.to_string()
    });
    html! {
        <li>
            <a
                class={if props.is_active { "active" } else { "" }}
                aria-current={props.is_active.then_some("true")}
                lang={code}
                {onclick}>
                <span>{flag}</span>
                <span>{native_name}</span>
            </a>
        </li>
    }
}
