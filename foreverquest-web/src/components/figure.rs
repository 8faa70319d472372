use crate::game::GalleryImage;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub image: Option<GalleryImage>,
}

/// Gallery image with optional caption. Renders nothing for a missing image.
#[function_component(Figure)]
pub fn figure(p: &Props) -> Html {
    let Some(image) = p.image.as_ref() else {
        return Html::default();
    };
    html! {
        <figure class="quest-figure">
            <img src={image.url.clone()} alt={image.alt.clone()} loading="lazy" />
            if !image.caption.is_empty() {
                <figcaption>{ image.caption.clone() }</figcaption>
            }
        </figure>
    }
}
