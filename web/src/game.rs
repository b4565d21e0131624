use crate::card_view::CardView;
use crate::end_grid::EndGrid;
use crate::grid::{CardGrid, PinPad, TileData};
use crate::journal::{JournalRowData, JournalView};
use crate::remote::Backend;
use crate::settings::SettingsView;
use crate::theme;
use crate::utils::*;
use gloo::storage::{LocalStorage, Storage, errors::StorageError};
use gloo::timers::callback::{Interval, Timeout};
use scape_core::{
    self as game, Catalog, CardId, Command, Effect, Progress, Session, Stopwatch, TimerToken,
    codec,
};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

impl StorageKey for Progress {
    const KEY: &'static str = "scape:game:v1";
}

impl LocalOrDefault for Progress {
    fn local_or_default() -> Self {
        match LocalStorage::get::<serde_json::Value>(Self::KEY) {
            Ok(value) => codec::decode(&value),
            Err(StorageError::KeyNotFound(_)) => Progress::new(),
            Err(err) => {
                log::warn!("discarding stored progress: {err}");
                Progress::new()
            }
        }
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, codec::encode(self)) {
            log::error!("failed to save progress: {err}");
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Panel {
    Journal,
    Waypoints,
    Settings,
}

impl Panel {
    const fn title(self) -> &'static str {
        match self {
            Self::Journal => "Journal",
            Self::Waypoints => "Progress",
            Self::Settings => "Settings",
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub catalog: Rc<Catalog>,
    pub backend: Rc<Backend>,
}

pub(crate) enum Msg {
    Dispatch(Command),
    OpenPanel(Panel),
    ClosePanel,
    ShowPinPad(CardId),
    ClosePinPad,
    CloseEndGrid,
}

pub(crate) struct GameView {
    session: Session,
    backend: Rc<Backend>,
    timers: BTreeMap<TimerToken, Timeout>,
    ticker: Option<Interval>,
    panel: Option<Panel>,
    end_grid_open: bool,
    pin_pad: Option<CardId>,
    pin_error: bool,
    notice: Option<String>,
}

impl GameView {
    fn dispatch(&mut self, ctx: &Context<Self>, command: Command) -> bool {
        if let Command::CompletionDue(token) = &command {
            self.timers.remove(token);
        }
        let pin_attempt = matches!(command, Command::SubmitPin { .. });
        let tick = matches!(command, Command::Tick);
        let theme = self.session.progress().theme();

        let outcome = self.session.dispatch(command);

        if pin_attempt {
            if outcome.changed {
                self.pin_pad = None;
                self.pin_error = false;
            } else {
                self.pin_error = true;
            }
        }
        match &outcome.rejection {
            Some(rejection) => self.notice = Some(rejection.to_string()),
            None if outcome.changed && !tick => self.notice = None,
            None => {}
        }
        if outcome.progress_changed {
            self.session.progress().local_save();
        }
        if self.session.progress().theme() != theme {
            theme::apply(self.session.progress().theme());
        }

        let rerender = outcome.changed || pin_attempt || !outcome.effects.is_empty();
        self.run_effects(ctx, outcome.effects);
        self.sync_ticker(ctx);
        rerender
    }

    fn run_effects(&mut self, ctx: &Context<Self>, effects: Vec<Effect>) {
        for effect in effects {
            log::debug!("effect: {:?}", effect);
            match effect {
                Effect::ScheduleCompletion { token, delay_ms } => {
                    let link = ctx.link().clone();
                    let timeout = Timeout::new(delay_ms, move || {
                        link.send_message(Msg::Dispatch(Command::CompletionDue(token)))
                    });
                    self.timers.insert(token, timeout);
                }
                Effect::CancelCompletions(tokens) => {
                    for token in tokens {
                        // Dropping a Timeout cancels it.
                        self.timers.remove(&token);
                    }
                }
                Effect::ShowEndGrid => self.end_grid_open = true,
                Effect::ClearStorage => {
                    Progress::local_delete();
                    self.panel = None;
                    self.end_grid_open = false;
                    self.notice = None;
                }
                Effect::RegisterPlayer { track_id, name } => {
                    let backend = self.backend.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let command = match backend.register_player(&track_id, &name, utc_now()).await {
                            Ok(player_id) => Command::PlayerRegistered { name, player_id },
                            Err(err) => {
                                log::error!("player registration failed: {err}");
                                Command::RegistrationFailed
                            }
                        };
                        link.send_message(Msg::Dispatch(command));
                    });
                }
                Effect::UpdatePlaytime(report) => {
                    let backend = self.backend.clone();
                    spawn_local(async move {
                        if let Err(err) = backend.update_playtime(&report.player_id, report.minutes).await {
                            log::error!("failed to update playtime: {err}");
                        }
                    });
                }
                Effect::RecordHintUsage {
                    player_id,
                    kind,
                    card_id,
                    card_title,
                } => {
                    let backend = self.backend.clone();
                    spawn_local(async move {
                        if let Err(err) = backend
                            .record_hint_usage(&player_id, kind, &card_id, &card_title)
                            .await
                        {
                            log::error!("failed to record hint usage: {err}");
                        }
                    });
                }
                Effect::SubmitRating {
                    player_id,
                    rating,
                    track_id,
                } => {
                    let backend = self.backend.clone();
                    spawn_local(async move {
                        if let Err(err) = backend.submit_rating(&player_id, rating, &track_id).await {
                            log::error!("failed to submit rating: {err}");
                        }
                    });
                }
            }
        }
    }

    /// Keeps a tick interval alive only while the stopwatch runs.
    fn sync_ticker(&mut self, ctx: &Context<Self>) {
        let running = self.session.progress().stopwatch().is_running();
        match (running, self.ticker.is_some()) {
            (true, false) => {
                let link = ctx.link().clone();
                self.ticker = Some(Interval::new(Stopwatch::TICK_MS as u32, move || {
                    link.send_message(Msg::Dispatch(Command::Tick))
                }));
            }
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn panel_view(&self, ctx: &Context<Self>, panel: Panel) -> Html {
        use crate::waypoints::WaypointsView;

        let progress = self.session.progress();
        let dispatch = ctx.link().callback(Msg::Dispatch);
        match panel {
            Panel::Journal => {
                let rows: Vec<JournalRowData> = game::journal_rows(progress)
                    .iter()
                    .map(JournalRowData::from)
                    .collect();
                let on_notes = dispatch.reform(|(card_id, notes): (CardId, String)| {
                    Command::UpdateNotes { card_id, notes }
                });
                html! { <JournalView {rows} {on_notes}/> }
            }
            Panel::Waypoints => {
                let stats = game::end_stats(self.session.catalog(), progress);
                let running = progress.stopwatch().is_running();
                let on_start = dispatch.reform(|_: ()| Command::StartStopwatch);
                let on_pause = dispatch.reform(|_: ()| Command::PauseStopwatch);
                html! { <WaypointsView {stats} {running} {on_start} {on_pause}/> }
            }
            Panel::Settings => {
                let on_theme = dispatch.reform(Command::SetTheme);
                let on_clear = dispatch.reform(|_: ()| Command::ClearData);
                html! { <SettingsView theme={progress.theme()} {on_theme} {on_clear}/> }
            }
        }
    }

    fn end_grid_view(&self, ctx: &Context<Self>) -> Html {
        let catalog = self.session.catalog();
        let progress = self.session.progress();
        let instruction = catalog.instruction_card();
        let message = |pick: fn(&game::Card) -> Option<&String>| {
            instruction.and_then(pick).map(|text| AttrValue::from(text.clone()))
        };

        html! {
            <EndGrid
                stats={game::end_stats(catalog, progress)}
                completion_message={message(|card| card.end_completion_message.as_ref())}
                feedback_message={message(|card| card.end_feedback_message.as_ref())}
                feedback_email={message(|card| card.end_feedback_email.as_ref())}
                can_rate={progress.player_id().is_some()}
                rated={self.session.rating_submitted()}
                on_rate={ctx.link().callback(|rating| Msg::Dispatch(Command::SubmitRating(rating)))}
                on_close={ctx.link().callback(|()| Msg::CloseEndGrid)}
            />
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { catalog, backend } = ctx.props().clone();
        let session =
            Session::with_progress(Catalog::clone(&catalog), Progress::local_or_default());
        theme::apply(session.progress().theme());
        session.progress().local_save();

        let mut view = Self {
            session,
            backend,
            timers: BTreeMap::new(),
            ticker: None,
            panel: None,
            end_grid_open: false,
            pin_pad: None,
            pin_error: false,
            notice: None,
        };
        view.sync_ticker(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Dispatch(command) => self.dispatch(ctx, command),
            OpenPanel(panel) => {
                if self.session.is_navigation_locked() {
                    return false;
                }
                self.panel.replace(panel) != Some(panel)
            }
            ClosePanel => self.panel.take().is_some(),
            ShowPinPad(card_id) => {
                self.pin_error = false;
                self.pin_pad.replace(card_id.clone()) != Some(card_id)
            }
            ClosePinPad => {
                self.pin_error = false;
                self.pin_pad.take().is_some()
            }
            CloseEndGrid => std::mem::take(&mut self.end_grid_open),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let catalog = self.session.catalog();
        let progress = self.session.progress();
        let locked = self.session.is_navigation_locked();
        let dispatch = ctx.link().callback(Dispatch);

        let tiles: Vec<TileData> = game::card_tiles(catalog, progress)
            .iter()
            .map(TileData::from)
            .collect();
        let on_open = dispatch.reform(Command::OpenCard);
        let on_pin = ctx.link().callback(ShowPinPad);
        let panel_button = |panel: Panel| {
            let onclick = ctx.link().callback(move |_: MouseEvent| OpenPanel(panel));
            html! { <button class="outline" disabled={locked} {onclick}>{panel.title()}</button> }
        };

        let card_view = match (self.session.active_card(), self.session.attempt()) {
            (Some(card), Some(attempt)) => {
                let intro_text = game::display_text(card, progress.completed())
                    .map(|text| AttrValue::from(text.to_string()));
                let player_name = progress.player_name().map(|name| AttrValue::from(name.to_string()));
                html! {
                    <CardView
                        key={card.id.clone()}
                        card={card.clone()}
                        attempt={attempt.clone()}
                        {intro_text}
                        {player_name}
                        dispatch={dispatch.clone()}
                    />
                }
            }
            _ => html! {},
        };

        let pin_pad = self.pin_pad.as_ref().and_then(|card_id| catalog.get(card_id)).map(|card| {
            let card_id = card.id.clone();
            let on_submit = dispatch.reform(move |pin| Command::SubmitPin {
                card_id: card_id.clone(),
                pin,
            });
            html! {
                <PinPad
                    title={card.title.clone()}
                    wrong={self.pin_error}
                    {on_submit}
                    on_close={ctx.link().callback(|()| ClosePinPad)}
                />
            }
        });

        html! {
            <main class="scape">
                <nav>
                    <strong>{game::format_play_time(progress.stopwatch().elapsed_ms())}</strong>
                    {panel_button(Panel::Journal)}
                    {panel_button(Panel::Waypoints)}
                    {panel_button(Panel::Settings)}
                </nav>
                if let Some(notice) = &self.notice {
                    <p class="notice" role="alert">{notice.clone()}</p>
                }
                if progress.active_card().is_none() {
                    <CardGrid {tiles} {on_open} {on_pin}/>
                }
                {card_view}
                if let Some(panel) = self.panel {
                    <Modal title={panel.title()} on_close={ctx.link().callback(|()| ClosePanel)}>
                        {self.panel_view(ctx, panel)}
                    </Modal>
                }
                if self.end_grid_open {
                    {self.end_grid_view(ctx)}
                }
                {pin_pad}
            </main>
        }
    }
}
