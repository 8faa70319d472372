use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub can_back: bool,
    pub can_skip: bool,
    pub can_next: bool,
    pub on_back: Callback<()>,
    pub on_skip: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component(NavBar)]
pub fn nav_bar(p: &Props) -> Html {
    let click = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <nav class="nav-bar" aria-label="Quest navigation">
            <button class="btn btn-secondary" disabled={!p.can_back} onclick={click(&p.on_back)}>
                { "← Back" }
            </button>
            <button class="btn btn-ghost" disabled={!p.can_skip} onclick={click(&p.on_skip)}>
                { "Skip" }
            </button>
            <button class="btn btn-primary" disabled={!p.can_next} onclick={click(&p.on_next)}>
                { "Next →" }
            </button>
        </nav>
    }
}
