use crate::components::figure::Figure;
use crate::game::questions::{char_counter, clamp_short_text};
use crate::game::{Answer, GalleryImage, Intent, Question, QuestionKind};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub question: Question,
    #[prop_or_default]
    pub answer: Option<Answer>,
    #[prop_or_default]
    pub image: Option<GalleryImage>,
    pub on_intent: Callback<Intent>,
}

#[function_component(QuestionCard)]
pub fn question_card(p: &Props) -> Html {
    let q = &p.question;
    let body = match q.kind {
        QuestionKind::Single => render_single(p),
        QuestionKind::Multi => render_multi(p),
        QuestionKind::Scale => html! {
            <ScaleHearts
                question={q.id.clone()}
                labels={q.labels.clone()}
                selected={match p.answer { Some(Answer::Scale { value }) => Some(value), _ => None }}
                on_intent={p.on_intent.clone()}
            />
        },
        QuestionKind::Short => html! {
            <ShortAnswer
                question={q.id.clone()}
                placeholder={q.placeholder.clone()}
                initial={match &p.answer { Some(Answer::Short { value }) => value.clone(), _ => String::new() }}
                on_intent={p.on_intent.clone()}
            />
        },
    };
    let answered = p.answer.as_ref().is_some_and(Answer::is_filled);
    html! {
        <section class="card question-card" aria-labelledby={format!("q-{}", q.id)}>
            <Figure image={p.image.clone()} />
            if !q.intro.is_empty() {
                <p class="intro">{ q.intro.clone() }</p>
            }
            <h2 id={format!("q-{}", q.id)} class="prompt">{ q.prompt.clone() }</h2>
            { body }
            if answered && !q.outro.is_empty() {
                <p class="outro" aria-live="polite">{ q.outro.clone() }</p>
            }
        </section>
    }
}

fn render_single(p: &Props) -> Html {
    let selected = match p.answer {
        Some(Answer::Single { value, .. }) => Some(value),
        _ => None,
    };
    html! {
        <div class="options" role="radiogroup">
            { for p.question.options.iter().enumerate().map(|(index, text)| {
                let checked = selected == Some(index);
                let onclick = {
                    let cb = p.on_intent.clone();
                    let question = p.question.id.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(Intent::SelectOption {
                        question: question.clone(),
                        index,
                    }))
                };
                html! {
                    <button
                        class={classes!("option", checked.then_some("selected"))}
                        role="radio"
                        aria-checked={checked.to_string()}
                        {onclick}>
                        { text.clone() }
                    </button>
                }
            }) }
        </div>
    }
}

fn render_multi(p: &Props) -> Html {
    let chosen: Vec<usize> = match &p.answer {
        Some(Answer::Multi { value }) => value.iter().map(|s| s.value).collect(),
        _ => Vec::new(),
    };
    html! {
        <div class="options" role="group">
            { for p.question.options.iter().enumerate().map(|(index, text)| {
                let checked = chosen.contains(&index);
                let onclick = {
                    let cb = p.on_intent.clone();
                    let question = p.question.id.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(Intent::ToggleOption {
                        question: question.clone(),
                        index,
                    }))
                };
                html! {
                    <button
                        class={classes!("option", checked.then_some("selected"))}
                        role="checkbox"
                        aria-checked={checked.to_string()}
                        {onclick}>
                        { text.clone() }
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ScaleProps {
    question: String,
    labels: Vec<String>,
    selected: Option<u8>,
    on_intent: Callback<Intent>,
}

/// Row of hearts; hovering previews a level, clicking records it.
#[function_component(ScaleHearts)]
fn scale_hearts(p: &ScaleProps) -> Html {
    let hover = use_state(|| None::<u8>);
    let shown = (*hover).or(p.selected);
    let levels = u8::try_from(p.labels.len()).unwrap_or(u8::MAX);
    let label = shown
        .and_then(|level| p.labels.get(usize::from(level).saturating_sub(1)))
        .cloned()
        .unwrap_or_default();
    let on_leave = {
        let hover = hover.clone();
        Callback::from(move |_: MouseEvent| hover.set(None))
    };
    html! {
        <div class="scale" role="radiogroup" onmouseleave={on_leave}>
            <div class="hearts">
                { for (1..=levels).map(|level| {
                    let filled = shown.is_some_and(|s| level <= s);
                    let onclick = {
                        let cb = p.on_intent.clone();
                        let question = p.question.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(Intent::SetScale {
                            question: question.clone(),
                            level,
                        }))
                    };
                    let onmouseenter = {
                        let hover = hover.clone();
                        Callback::from(move |_: MouseEvent| hover.set(Some(level)))
                    };
                    let aria = p.labels.get(usize::from(level) - 1).cloned().unwrap_or_default();
                    html! {
                        <button
                            class={classes!("heart", filled.then_some("filled"))}
                            role="radio"
                            aria-checked={(p.selected == Some(level)).to_string()}
                            aria-label={aria}
                            {onclick}
                            {onmouseenter}>
                            { if filled { "❤️" } else { "🤍" } }
                        </button>
                    }
                }) }
            </div>
            <p class="scale-label">{ label }</p>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ShortProps {
    question: String,
    placeholder: String,
    initial: String,
    on_intent: Callback<Intent>,
}

#[function_component(ShortAnswer)]
fn short_answer(p: &ShortProps) -> Html {
    let text = use_state(|| p.initial.clone());
    let oninput = {
        let text = text.clone();
        let cb = p.on_intent.clone();
        let question = p.question.clone();
        Callback::from(move |e: InputEvent| {
            let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let raw = input.value();
            // Limit counts chars, not UTF-16 units.
            let value = clamp_short_text(&raw).to_string();
            if value.len() != raw.len() {
                input.set_value(&value);
            }
            text.set(value.clone());
            cb.emit(Intent::SetText {
                question: question.clone(),
                text: value,
            });
        })
    };
    html! {
        <div class="short-answer">
            <input
                type="text"
                class="text-input"
                placeholder={p.placeholder.clone()}
                value={(*text).clone()}
                aria-label={p.placeholder.clone()}
                {oninput}
            />
            <span class="char-counter" aria-live="polite">{ char_counter(&text) }</span>
        </div>
    }
}
