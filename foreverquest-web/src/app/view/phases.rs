use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::app::view::handlers::AppHandlers;
use crate::components::{
    confirmation::Confirmation, ending_card::EndingCard, error_notice::ErrorNotice,
    games::GameCard, interlude_card::InterludeCard, question_card::QuestionCard,
    resume_prompt::ResumePrompt,
};
use crate::game::{GameOutcome, Intent, QuizSession, Step, View, derive_game_seed, session_seed};
use yew::prelude::*;

pub fn render_main_view(state: &AppState, handlers: &AppHandlers) -> Html {
    match *state.phase {
        Phase::Loading => html! {
            <section class="card loading" aria-busy="true">
                <p>{ "Loading our journey..." }</p>
            </section>
        },
        Phase::Failed => html! { <ErrorNotice detail={(*state.load_error).clone()} /> },
        Phase::ResumePrompt => html! {
            <ResumePrompt
                on_continue={handlers.continue_saved.clone()}
                on_restart={handlers.start_over.clone()}
            />
        },
        Phase::Quest => state
            .session
            .as_ref()
            .map_or_else(Html::default, |sess| render_session(sess, handlers)),
    }
}

fn render_session(session: &QuizSession, handlers: &AppHandlers) -> Html {
    match session.view() {
        View::Step(_) => session
            .current_step()
            .map_or_else(Html::default, |step| render_step(session, step, handlers)),
        View::Ending => html! {
            <EndingCard
                ending={session.ending().cloned()}
                on_confirm={handlers.dispatch.reform(|()| Intent::Confirm)}
            />
        },
        View::Confirmation => html! {
            <Confirmation on_restart={handlers.dispatch.reform(|()| Intent::Restart)} />
        },
    }
}

fn render_step(session: &QuizSession, step: &Step, handlers: &AppHandlers) -> Html {
    let config = session.config();
    let state = session.state();
    match step {
        Step::Interlude(interlude) => html! {
            <InterludeCard
                key={interlude.id.clone()}
                interlude={interlude.clone()}
                image={config.image(interlude.image_id.as_deref()).cloned()}
            />
        },
        Step::Question(question) => html! {
            <QuestionCard
                key={question.id.clone()}
                question={question.clone()}
                answer={state.answer(&question.id).cloned()}
                image={config.image(question.image_id.as_deref()).cloned()}
                on_intent={handlers.dispatch.clone()}
            />
        },
        Step::Game(spec) => {
            let on_finish = {
                let game = spec.id.clone();
                handlers
                    .dispatch
                    .reform(move |outcome: GameOutcome| Intent::GameFinished {
                        game: game.clone(),
                        outcome,
                    })
            };
            html! {
                <GameCard
                    key={spec.id.clone()}
                    spec={spec.clone()}
                    seed={derive_game_seed(session_seed(state.started_at), &spec.id)}
                    won={state.game_won(&spec.id)}
                    image={config.image(spec.settings.image_id.as_deref()).cloned()}
                    reduced_motion={state.settings.reduced_motion}
                    {on_finish}
                />
            }
        }
        Step::Ending => Html::default(),
    }
}
