use crate::widgets::{Gateway, WidgetProps, widget_for};
use scape_core::{self as game, Attempt, AttemptPhase, Card, Command, HintKind, PinReveal, WidgetKind};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CardViewProps {
    pub card: Card,
    pub attempt: Attempt,
    /// Intro text resolved against the current progress.
    #[prop_or_default]
    pub intro_text: Option<AttrValue>,
    #[prop_or_default]
    pub player_name: Option<AttrValue>,
    pub dispatch: Callback<Command>,
}

#[function_component(CardView)]
pub(crate) fn card_view(props: &CardViewProps) -> Html {
    let CardViewProps {
        card,
        attempt,
        intro_text,
        player_name,
        dispatch,
    } = props.clone();
    let page = use_state(|| 0_usize);

    let pages = card.instruction_pages.len();
    let on_last_page = pages == 0 || *page + 1 >= pages;
    let kind = WidgetKind::for_card(&card);
    let named = player_name.is_some();

    let on_close = dispatch.reform(|_: MouseEvent| Command::CloseCard);
    let on_next = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(*page + 1))
    };
    let on_previous = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.saturating_sub(1)))
    };

    let body = match attempt.phase {
        AttemptPhase::Succeeded { .. } => success_view(&card),
        AttemptPhase::Registering => html! { <p aria-busy="true">{"Saving your name..."}</p> },
        AttemptPhase::Answering if !on_last_page => html! {},
        AttemptPhase::Answering if kind == WidgetKind::NameCapture && named => {
            let card_id = card.id.clone();
            let on_return = dispatch.reform(move |_: MouseEvent| Command::PuzzleSolved(card_id.clone()));
            html! {
                <footer>
                    <p>{format!("Welcome back, {}!", player_name.clone().unwrap_or_default())}</p>
                    <button onclick={on_return}>{"Return to the cards"}</button>
                </footer>
            }
        }
        AttemptPhase::Answering => {
            let widget = widget_for(kind).render(WidgetProps {
                card: card.clone(),
                player_name: player_name.clone(),
                gateway: Gateway::new(dispatch.clone()),
            });
            html! {
                <>
                    {hint_view(&card, &attempt, player_name.as_deref(), &dispatch)}
                    {widget}
                    if let Some(error) = &attempt.error {
                        <p class="error" role="alert">{error.to_string()}</p>
                    }
                </>
            }
        }
    };

    html! {
        <article class="card-view">
            <header>
                <button class="close" aria-label="Close" onclick={on_close}/>
                <h2>{card.title.clone()}</h2>
            </header>
            if let Some(intro) = intro_text {
                <p class="intro">{intro}</p>
            }
            if let Some(current) = card.instruction_pages.get(*page) {
                <section class="page">
                    <h3>{current.title.clone()}</h3>
                    if let Some(image) = &current.image {
                        <img src={image.clone()} alt={current.title.clone()}/>
                    }
                    <p>{current.content.clone()}</p>
                    <nav>
                        <button disabled={*page == 0} onclick={on_previous}>{"Back"}</button>
                        <small>{format!("{} / {}", *page + 1, pages)}</small>
                        <button disabled={on_last_page} onclick={on_next}>{"Next"}</button>
                    </nav>
                </section>
            }
            {body}
        </article>
    }
}

fn success_view(card: &Card) -> Html {
    let reveal = card.pin_reveal_message.as_deref().map(PinReveal::parse);
    html! {
        <section class="success" role="status">
            <p>{card.success_text.clone().unwrap_or_else(|| "Well done!".to_string())}</p>
            {
                match reveal {
                    Some(PinReveal::Clue(clue)) => html! {
                        <p class="clue"><strong>{"Clue: "}</strong>{clue.to_string()}</p>
                    },
                    Some(PinReveal::Pin(message)) => html! {
                        <p class="pin">{message.to_string()}</p>
                    },
                    None => html! {},
                }
            }
        </section>
    }
}

fn hint_view(
    card: &Card,
    attempt: &Attempt,
    player_name: Option<&str>,
    dispatch: &Callback<Command>,
) -> Html {
    let shown = |kind: HintKind, visible: bool| match card.hint(kind) {
        Some(text) if visible => html! { <p class={classes!("hint", kind_class(kind))}>{text.to_string()}</p> },
        _ => html! {},
    };

    let offer = attempt.hints.pending_offer().map(|kind| {
        let on_accept = dispatch.reform(|_: MouseEvent| Command::RespondToHint(true));
        let on_decline = dispatch.reform(|_: MouseEvent| Command::RespondToHint(false));
        html! {
            <aside class="hint-offer">
                <p>{game::hint_prompt(card, kind, player_name)}</p>
                <button onclick={on_accept}>{"Yes"}</button>
                <button class="secondary" onclick={on_decline}>{"No"}</button>
            </aside>
        }
    });
    let retry = (attempt.wrong_answers > 0 && offer.is_none()).then(|| {
        html! { <p class="wrong">{"Not quite, try again."}</p> }
    });

    html! {
        <>
            {shown(HintKind::Small, attempt.hints.small_hint_shown())}
            {shown(HintKind::Big, attempt.hints.big_hint_shown())}
            {offer}
            {retry}
        </>
    }
}

const fn kind_class(kind: HintKind) -> &'static str {
    match kind {
        HintKind::Small => "small",
        HintKind::Big => "big",
    }
}
