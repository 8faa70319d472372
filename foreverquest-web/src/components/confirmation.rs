use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_restart: Callback<()>,
}

#[function_component(Confirmation)]
pub fn confirmation(p: &Props) -> Html {
    let restart = {
        let cb = p.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="card confirmation" aria-labelledby="confirmation-title">
            <h2 id="confirmation-title">{ "You Made Me the Happiest Person! 🥹❤️" }</h2>
            <p class="letter">
                { "Every step of this journey was a little piece of us. Thank you for walking it with me, and for saying yes to all the steps still to come." }
            </p>
            <button class="btn btn-secondary" onclick={restart}>{ "Relive Our Journey" }</button>
        </section>
    }
}
