use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_continue: Callback<()>,
    pub on_restart: Callback<()>,
}

#[function_component(ResumePrompt)]
pub fn resume_prompt(p: &Props) -> Html {
    let on_continue = {
        let cb = p.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_restart = {
        let cb = p.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="card resume-prompt" aria-labelledby="resume-title">
            <h2 id="resume-title">{ "Welcome Back, My Love" }</h2>
            <p>{ "Our adventure is waiting for you..." }</p>
            <div class="actions">
                <button class="btn btn-primary" onclick={on_continue}>{ "Continue Our Journey" }</button>
                <button class="btn btn-secondary" onclick={on_restart}>{ "Start Over" }</button>
            </div>
        </section>
    }
}
