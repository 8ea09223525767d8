use strum::{EnumIter, IntoEnumIterator};
use yew::{AttrValue, Callback, Html, MouseEvent, Properties, function_component, html};
use yew_icons::{Icon, IconId};

/// Sign-in providers shown on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum SocialProvider {
    Google,
    Facebook,
    Apple,
}

impl SocialProvider {
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Google => "social.google",
            Self::Facebook => "social.facebook",
            Self::Apple => "social.apple",
        }
    }

    /// Only Google is wired to the identity provider.
    pub fn is_available(self) -> bool {
        matches!(self, Self::Google)
    }

    fn class(self) -> &'static str {
        match self {
            Self::Google => "btn btn-outline w-full gap-2",
            Self::Facebook => "btn btn-outline btn-info w-full gap-2",
            Self::Apple => "btn btn-outline btn-neutral w-full gap-2",
        }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[derive(Properties, PartialEq)]
pub struct SocialButtonProps {
    pub provider: SocialProvider,
    pub label: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SocialButton)]
pub fn social_button(props: &SocialButtonProps) -> Html {
    let onclick = props.onclick.clone();
    html! {
        <button
            type="button"
            class={props.provider.class()}
            disabled={props.disabled}
            data-provider={format!("{:?}", props.provider).to_lowercase()}
            onclick={move |event: MouseEvent| {
                event.prevent_default();
                onclick.emit(event);
            }}
        >
            <Icon icon_id={IconId::HeroiconsOutlineUserCircle} class="w-5 h-5" />
            <span>{props.label.clone()}</span>
        </button>
    }
}
