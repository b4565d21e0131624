use scape_core::{EndStats, format_play_time};
use yew::prelude::*;

pub(crate) const RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

#[derive(Properties, PartialEq)]
pub(crate) struct EndGridProps {
    pub stats: EndStats,
    #[prop_or_default]
    pub completion_message: Option<AttrValue>,
    #[prop_or_default]
    pub feedback_message: Option<AttrValue>,
    #[prop_or_default]
    pub feedback_email: Option<AttrValue>,
    pub can_rate: bool,
    pub rated: bool,
    pub on_rate: Callback<u8>,
    pub on_close: Callback<()>,
}

#[function_component(EndGrid)]
pub(crate) fn end_grid(props: &EndGridProps) -> Html {
    let stats = props.stats;
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    let rating = if props.rated {
        html! { <p>{"Thank you for your feedback!"}</p> }
    } else if props.can_rate {
        html! {
            <div class="rating" role="group" aria-label="Rating">
                {
                    for RATINGS.iter().map(|&stars| {
                        let onclick = props.on_rate.reform(move |_: MouseEvent| stars);
                        html! { <button {onclick} aria-label={format!("{stars} stars")}>{ String::from("★").repeat(stars.into()) }</button> }
                    })
                }
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <dialog class="end-grid" open={true}>
            <article>
                <header>
                    <h2>{props.completion_message.clone().unwrap_or_else(|| "Congratulations!".into())}</h2>
                </header>
                <dl>
                    <dt>{"Time"}</dt>
                    <dd>{format_play_time(stats.elapsed_ms)}</dd>
                    <dt>{"Puzzles solved"}</dt>
                    <dd>{format!("{} / {}", stats.solved_puzzles, stats.total_puzzles)}</dd>
                    <dt>{"Hints used"}</dt>
                    <dd>{stats.hints_used.to_string()}</dd>
                </dl>
                if let Some(message) = props.feedback_message.clone() {
                    <p>{message}</p>
                }
                {rating}
                if let Some(email) = props.feedback_email.clone() {
                    <p><a href={format!("mailto:{email}")}>{email}</a></p>
                }
                <footer>
                    <button onclick={on_close}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}
