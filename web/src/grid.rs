use scape_core::{CardId, CardTile, CardType};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TileData {
    pub id: CardId,
    pub title: String,
    pub icon: Option<String>,
    pub text: Option<String>,
    pub kind: CardType,
    pub playable: bool,
    pub completed: bool,
    pub pin_locked: bool,
}

impl From<&CardTile<'_>> for TileData {
    fn from(tile: &CardTile<'_>) -> Self {
        Self {
            id: tile.card.id.clone(),
            title: tile.card.title.clone(),
            icon: tile.card.display_icon.clone(),
            text: tile.intro_text.map(Into::into),
            kind: tile.card.kind,
            playable: tile.playable,
            completed: tile.completed,
            pin_locked: !tile.playable && tile.card.pin_code.is_some(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct CardGridProps {
    pub tiles: Vec<TileData>,
    pub on_open: Callback<CardId>,
    pub on_pin: Callback<CardId>,
}

#[function_component(CardGrid)]
pub(crate) fn card_grid(props: &CardGridProps) -> Html {
    html! {
        <section class="grid">
            {
                for props.tiles.iter().map(|tile| {
                    let onclick = {
                        let id = tile.id.clone();
                        match (tile.playable, tile.pin_locked) {
                            (true, _) => props.on_open.reform(move |_: MouseEvent| id.clone()),
                            (false, true) => props.on_pin.reform(move |_: MouseEvent| id.clone()),
                            (false, false) => Callback::noop(),
                        }
                    };
                    let class = classes!(
                        "tile",
                        (tile.kind == CardType::Info).then_some("info"),
                        tile.completed.then_some("completed"),
                        (!tile.playable).then_some("locked"),
                    );
                    html! {
                        <button key={tile.id.clone()} {class} {onclick}>
                            if let Some(icon) = &tile.icon {
                                <span class="icon">{icon.clone()}</span>
                            }
                            <strong>{tile.title.clone()}</strong>
                            if tile.completed {
                                <span class="done" aria-label="Completed">{"✓"}</span>
                            }
                            if let Some(text) = &tile.text {
                                <small>{text.clone()}</small>
                            }
                        </button>
                    }
                })
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PinPadProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub wrong: bool,
    pub on_submit: Callback<String>,
    pub on_close: Callback<()>,
}

pub(crate) const PIN_MAX_DIGITS: usize = 8;

/// Appends `digit` unless the pin is already full.
pub(crate) fn push_digit(pin: &str, digit: char) -> Option<String> {
    (pin.chars().count() < PIN_MAX_DIGITS && digit.is_ascii_digit()).then(|| {
        let mut pin = pin.to_string();
        pin.push(digit);
        pin
    })
}

#[function_component(PinPad)]
pub(crate) fn pin_pad(props: &PinPadProps) -> Html {
    let pin = use_state(String::new);

    let key = |digit: char| {
        let pin = pin.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            if let Some(next) = push_digit(&pin, digit) {
                pin.set(next);
            }
        });
        html! { <button type="button" {onclick}>{digit.to_string()}</button> }
    };
    let on_clear = {
        let pin = pin.clone();
        Callback::from(move |_: MouseEvent| pin.set(String::new()))
    };
    let on_enter = {
        let pin = pin.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| {
            on_submit.emit((*pin).clone());
            pin.set(String::new());
        })
    };
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <dialog class="pin-pad" open={true}>
            <article>
                <header>
                    <button class="close" aria-label="Close" onclick={on_close}/>
                    <h2>{props.title.clone()}</h2>
                </header>
                <output>{ String::from("•").repeat(pin.chars().count()) }</output>
                if props.wrong {
                    <p class="error" role="alert">{"Wrong PIN"}</p>
                }
                <div class="keys">
                    {for ['1', '2', '3', '4', '5', '6', '7', '8', '9'].into_iter().map(&key)}
                    <button type="button" class="secondary" onclick={on_clear}>{"C"}</button>
                    {key('0')}
                    <button type="button" onclick={on_enter}>{"OK"}</button>
                </div>
            </article>
        </dialog>
    }
}
