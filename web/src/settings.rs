use crate::theme;
use scape_core::Theme;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub theme: Theme,
    pub on_theme: Callback<Theme>,
    pub on_clear: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| {
            if gloo::dialogs::confirm("This will reset all progress and clear cached data.") {
                on_clear.emit(());
            }
        })
    };

    html! {
        <section class="settings">
            <h3>{"Theme"}</h3>
            <ul>
                {
                    for Theme::ALL.into_iter().map(|choice| {
                        let onclick = props.on_theme.reform(move |_: MouseEvent| choice);
                        html! {
                            <li>
                                <button
                                    class={classes!((choice != props.theme).then_some("outline"))}
                                    aria-pressed={(choice == props.theme).to_string()}
                                    data-theme-switcher={choice.scheme()}
                                    {onclick}
                                >
                                    {theme::label(choice)}
                                </button>
                            </li>
                        }
                    })
                }
            </ul>
            <h3>{"Data"}</h3>
            <button class="secondary" onclick={on_clear}>{"Clear data"}</button>
        </section>
    }
}
