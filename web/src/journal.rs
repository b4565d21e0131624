use scape_core::{CardId, JournalRow};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct JournalRowData {
    pub card_id: CardId,
    pub title: String,
    pub unlock_pin: Option<String>,
    pub pin_message: Option<String>,
    pub notes: String,
}

impl From<&JournalRow<'_>> for JournalRowData {
    fn from(row: &JournalRow<'_>) -> Self {
        Self {
            card_id: row.card_id.into(),
            title: row.title.into(),
            unlock_pin: row.unlock_pin.or(row.received_pin).map(Into::into),
            pin_message: row.pin_message.map(Into::into),
            notes: row.notes.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct JournalProps {
    pub rows: Vec<JournalRowData>,
    pub on_notes: Callback<(CardId, String)>,
}

#[function_component(JournalView)]
pub(crate) fn journal_view(props: &JournalProps) -> Html {
    if props.rows.is_empty() {
        return html! { <p>{"Nothing here yet. Solve puzzles and enter PIN codes to fill your journal."}</p> };
    }

    html! {
        <ul class="journal">
            {
                for props.rows.iter().map(|row| {
                    let oninput = {
                        let card_id = row.card_id.clone();
                        props.on_notes.reform(move |e: InputEvent| {
                            let notes = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                            (card_id.clone(), notes)
                        })
                    };
                    html! {
                        <li key={row.card_id.clone()}>
                            <h3>{row.title.clone()}</h3>
                            if let Some(pin) = &row.unlock_pin {
                                <p>{"PIN used: "}<code>{pin.clone()}</code></p>
                            }
                            if let Some(message) = &row.pin_message {
                                <p class="pin">{message.clone()}</p>
                            }
                            <textarea placeholder="Notes" value={row.notes.clone()} {oninput}/>
                        </li>
                    }
                })
            }
        </ul>
    }
}
