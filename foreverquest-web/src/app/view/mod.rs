mod handlers;
mod phases;

pub use handlers::AppHandlers;

use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::components::{
    confetti_layer::ConfettiLayer, header::Header, nav_bar::NavBar, progress_bar::ProgressBar,
};
use crate::game::Intent;
use yew::prelude::*;

pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);
    let main_view = phases::render_main_view(state, &handlers);
    let session = state.session.as_ref();
    let in_quest = *state.phase == Phase::Quest;

    let progress = session.filter(|_| in_quest).map_or_else(Html::default, |sess| {
        html! { <ProgressBar progress={sess.progress()} /> }
    });

    let nav = match session {
        Some(sess) if state.phase.shows_navigation(Some(sess)) => html! {
            <NavBar
                can_back={sess.can_go_back()}
                can_skip={sess.can_skip()}
                can_next={sess.can_go_next()}
                on_back={handlers.dispatch.reform(|()| Intent::Back)}
                on_skip={handlers.dispatch.reform(|()| Intent::Skip)}
                on_next={handlers.dispatch.reform(|()| Intent::Next)}
            />
        },
        _ => Html::default(),
    };

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <Header title={state.app_title()} />
            { progress }
            <main id="main" role="main" class="quest-main">
                { main_view }
            </main>
            { nav }
            <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            <ConfettiLayer
                pieces={(*state.confetti).clone()}
                burst={*state.confetti_burst}
                on_done={handlers.clear_confetti.clone()}
            />
        </>
    }
}
