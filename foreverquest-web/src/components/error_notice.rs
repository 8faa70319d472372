use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub detail: Option<AttrValue>,
}

#[function_component(ErrorNotice)]
pub fn error_notice(p: &Props) -> Html {
    html! {
        <section class="card error-notice" role="alert">
            <h2>{ "Something went wrong" }</h2>
            <p>{ "We couldn't load your journey. Please refresh the page to try again." }</p>
            if let Some(detail) = p.detail.clone() {
                <details>
                    <summary>{ "Details" }</summary>
                    <code>{ detail }</code>
                </details>
            }
        </section>
    }
}
