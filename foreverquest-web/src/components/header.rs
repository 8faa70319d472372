use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    html! {
        <header role="banner" class="quest-header">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <h1 class="app-title">{ p.title.clone() }</h1>
        </header>
    }
}
