use crate::components::figure::Figure;
use crate::game::{GalleryImage, Interlude};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub interlude: Interlude,
    #[prop_or_default]
    pub image: Option<GalleryImage>,
}

#[function_component(InterludeCard)]
pub fn interlude_card(p: &Props) -> Html {
    let interlude = &p.interlude;
    html! {
        <section class="card interlude-card" data-step={interlude.id.clone()}>
            <Figure image={p.image.clone()} />
            if !interlude.intro.is_empty() {
                <p class="intro">{ interlude.intro.clone() }</p>
            }
            { for interlude.text.split("\n\n").filter(|para| !para.trim().is_empty()).map(|para| html! {
                <p class="interlude-text">{ para.trim().to_string() }</p>
            }) }
            if !interlude.outro.is_empty() {
                <p class="outro">{ interlude.outro.clone() }</p>
            }
        </section>
    }
}
