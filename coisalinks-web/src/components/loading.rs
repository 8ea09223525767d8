use yew::{AttrValue, Html, Properties, function_component, html};

#[derive(Properties, PartialEq, Default)]
pub struct LoadingProps {
    #[prop_or_default]
    pub message: AttrValue,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full py-16 animate-fadeIn">
            <span class="loading loading-dots loading-lg text-primary"></span>
            if !props.message.is_empty() {
                <span class="mt-3 text-base-content/80">{props.message.clone()}</span>
            }
        </div>
    }
}
