use crate::containers::{footer::Footer, header::Header};
use yew::{Children, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex flex-col bg-base-100">
            <Header />
            <main class={classes!(
                "flex-grow",
                "w-full",
                "max-w-6xl",
                "mx-auto",
                "p-4",
            )}>
                {props.children.clone()}
            </main>
            <Footer />
        </div>
    }
}
