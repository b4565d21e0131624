use chrono::prelude::*;
use yew::prelude::*;

/// Local storage slot of a persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Load-or-default and save against the value's [`StorageKey`].
pub(crate) trait LocalOrDefault: StorageKey + Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);

    fn local_delete() {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::delete(Self::KEY);
    }
}

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_id() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Dialog attached to document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    create_portal(
        html! {
            <dialog open={true}>
                <article>
                    <header>
                        <button class="close" aria-label="Close" onclick={on_close}/>
                        <h2>{props.title.clone()}</h2>
                    </header>
                    {props.children.clone()}
                </article>
            </dialog>
        },
        modal_host.into(),
    )
}
