use crate::game::Progress;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub progress: Progress,
}

#[function_component(ProgressBar)]
pub fn progress_bar(p: &Props) -> Html {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = p.progress.percent().round().clamp(0.0, 100.0) as u8;
    let label = p.progress.label();
    html! {
        <div class="progress"
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={percent.to_string()}
            aria-valuetext={label.clone()}>
            <div class="progress-fill" style={format!("width:{percent}%")}></div>
            <span class="progress-label">{ label }</span>
        </div>
    }
}
