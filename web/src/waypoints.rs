use scape_core::{EndStats, format_play_time};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct WaypointsProps {
    pub stats: EndStats,
    pub running: bool,
    pub on_start: Callback<()>,
    pub on_pause: Callback<()>,
}

#[function_component(WaypointsView)]
pub(crate) fn waypoints_view(props: &WaypointsProps) -> Html {
    let EndStats {
        solved_puzzles,
        total_puzzles,
        hints_used,
        elapsed_ms,
    } = props.stats;

    let toggle = if props.running {
        let onclick = props.on_pause.reform(|_: MouseEvent| ());
        html! { <button {onclick}>{"Pause"}</button> }
    } else {
        let onclick = props.on_start.reform(|_: MouseEvent| ());
        html! { <button {onclick}>{"Start"}</button> }
    };

    html! {
        <section class="waypoints">
            <p class="time"><time>{format_play_time(elapsed_ms)}</time>{toggle}</p>
            <dl>
                <dt>{"Solved"}</dt>
                <dd>{format!("{solved_puzzles} / {total_puzzles}")}</dd>
                <dt>{"Hints used"}</dt>
                <dd>{hints_used.to_string()}</dd>
            </dl>
        </section>
    }
}
