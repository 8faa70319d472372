use crate::game::Ending;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` when the resolved ending is missing from the quest document.
    #[prop_or_default]
    pub ending: Option<Ending>,
    pub on_confirm: Callback<()>,
}

#[function_component(EndingCard)]
pub fn ending_card(p: &Props) -> Html {
    let confirm = {
        let cb = p.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (title, description) = p.ending.as_ref().map_or_else(
        || (String::from("Our Forever"), String::new()),
        |ending| (ending.title.clone(), ending.description.clone()),
    );
    html! {
        <section class="card ending-card" aria-labelledby="ending-title">
            if let Some(ending) = p.ending.as_ref().filter(|e| !e.image.is_empty()) {
                <img class="ending-image" src={ending.image.clone()} alt={ending.alt.clone()} />
            }
            <h2 id="ending-title">{ title }</h2>
            if !description.is_empty() {
                <p class="ending-description">{ description }</p>
            }
            <div class="actions">
                <button class="btn btn-primary" onclick={confirm.clone()}>
                    { "Yes, a thousand times yes! 💍" }
                </button>
                <button class="btn btn-primary" onclick={confirm}>
                    { "Always and forever! ❤️" }
                </button>
            </div>
        </section>
    }
}
