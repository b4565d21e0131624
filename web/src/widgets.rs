use scape_core::{self as game, Card, Command, Strip, WidgetKind};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// What a widget reports back into the session.
#[derive(Clone, PartialEq)]
pub(crate) struct Gateway {
    dispatch: Callback<Command>,
}

impl Gateway {
    pub(crate) fn new(dispatch: Callback<Command>) -> Self {
        Self { dispatch }
    }

    pub(crate) fn on_complete(&self, card_id: &str) {
        self.dispatch.emit(Command::PuzzleSolved(card_id.into()));
    }

    fn submit_answer(&self, answer: String) {
        self.dispatch.emit(Command::SubmitAnswer(answer));
    }

    fn submit_arrangement(&self, arranged: String, typed: String) {
        self.dispatch
            .emit(Command::SubmitArrangement { arranged, typed });
    }

    fn submit_name(&self, name: String) {
        self.dispatch.emit(Command::SubmitName(name));
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct WidgetProps {
    pub card: Card,
    #[prop_or_default]
    pub player_name: Option<AttrValue>,
    pub gateway: Gateway,
}

/// Input surface of one kind of card.
pub(crate) trait PuzzleWidget {
    fn render(&self, props: WidgetProps) -> Html;
}

struct TextWidget;
struct StripWidget;
struct NameWidget;
struct PassiveWidget;

impl PuzzleWidget for TextWidget {
    fn render(&self, props: WidgetProps) -> Html {
        html! { <TextAnswer ..props/> }
    }
}

impl PuzzleWidget for StripWidget {
    fn render(&self, props: WidgetProps) -> Html {
        html! { <StripPuzzle ..props/> }
    }
}

impl PuzzleWidget for NameWidget {
    fn render(&self, props: WidgetProps) -> Html {
        html! { <NameForm ..props/> }
    }
}

impl PuzzleWidget for PassiveWidget {
    fn render(&self, props: WidgetProps) -> Html {
        let WidgetProps { card, gateway, .. } = props;
        let onclick = Callback::from(move |_: MouseEvent| gateway.on_complete(&card.id));
        html! {
            <footer><button {onclick}>{"Continue"}</button></footer>
        }
    }
}

pub(crate) fn widget_for(kind: WidgetKind) -> &'static dyn PuzzleWidget {
    match kind {
        WidgetKind::FreeText => &TextWidget,
        WidgetKind::Arrangement => &StripWidget,
        WidgetKind::NameCapture => &NameWidget,
        WidgetKind::Passive => &PassiveWidget,
    }
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[function_component]
fn TextAnswer(props: &WidgetProps) -> Html {
    let answer = use_state(String::new);

    let oninput = {
        let answer = answer.clone();
        Callback::from(move |e: InputEvent| answer.set(input_value(e)))
    };
    let onsubmit = {
        let answer = answer.clone();
        let gateway = props.gateway.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            gateway.submit_answer((*answer).clone());
            answer.set(String::new());
        })
    };

    html! {
        <form class="answer" {onsubmit}>
            if let Some(question) = &props.card.question {
                <p class="question">{question.clone()}</p>
            }
            <input
                type="text"
                autocomplete="off"
                placeholder={props.card.placeholder.clone().unwrap_or_default()}
                value={(*answer).clone()}
                {oninput}
            />
            <button type="submit">{"Submit"}</button>
        </form>
    }
}

/// Word spelled by the strips in their current order.
pub(crate) fn arranged_word(strips: &[Strip]) -> String {
    strips.iter().map(|strip| strip.label.as_str()).collect()
}

/// Moves the strip at `index` one step up (`-1`) or down (`1`).
pub(crate) fn move_strip(strips: &mut [Strip], index: usize, step: isize) -> bool {
    match index.checked_add_signed(step) {
        Some(target) if target < strips.len() && index < strips.len() => {
            strips.swap(index, target);
            true
        }
        _ => false,
    }
}

#[function_component]
fn StripPuzzle(props: &WidgetProps) -> Html {
    let strips = use_state(|| props.card.strips.clone());
    let typed = use_state(String::new);

    let mover = |index: usize, step: isize| {
        let strips = strips.clone();
        Callback::from(move |_: MouseEvent| {
            let mut order = (*strips).clone();
            if move_strip(&mut order, index, step) {
                strips.set(order);
            }
        })
    };
    let oninput = {
        let typed = typed.clone();
        Callback::from(move |e: InputEvent| typed.set(input_value(e)))
    };
    let onsubmit = {
        let strips = strips.clone();
        let typed = typed.clone();
        let gateway = props.gateway.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            gateway.submit_arrangement(arranged_word(&strips), (*typed).clone());
            typed.set(String::new());
        })
    };

    let last = strips.len().saturating_sub(1);
    html! {
        <form class="strips" {onsubmit}>
            <ol>
                {
                    for strips.iter().enumerate().map(|(index, strip)| html! {
                        <li key={strip.id}>
                            <button type="button" disabled={index == 0} onclick={mover(index, -1)}>{"▲"}</button>
                            <span>{strip.label.clone()}</span>
                            <button type="button" disabled={index == last} onclick={mover(index, 1)}>{"▼"}</button>
                        </li>
                    })
                }
            </ol>
            if let Some(question) = &props.card.question {
                <p class="question">{question.clone()}</p>
            }
            <input
                type="text"
                autocomplete="off"
                placeholder={props.card.placeholder.clone().unwrap_or_default()}
                value={(*typed).clone()}
                {oninput}
            />
            <button type="submit">{"Submit"}</button>
        </form>
    }
}

#[function_component]
fn NameForm(props: &WidgetProps) -> Html {
    let name = use_state(String::new);

    let oninput = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| name.set(input_value(e)))
    };
    // The typed name stays in the field so a failed registration can be retried.
    let onsubmit = {
        let name = name.clone();
        let gateway = props.gateway.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            gateway.submit_name((*name).clone());
        })
    };

    html! {
        <form class="name" {onsubmit}>
            <label>
                {"Your name"}
                <input
                    type="text"
                    autocomplete="nickname"
                    maxlength={game::NAME_MAX_CHARS.to_string()}
                    value={(*name).clone()}
                    {oninput}
                />
            </label>
            <button type="submit">{"Start"}</button>
        </form>
    }
}
