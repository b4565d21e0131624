use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// Visible success delay before a solved card's completion propagates.
pub const SUCCESS_DELAY_MS: u32 = 10_000;
/// Delay used once the instruction card's name capture succeeds.
pub const NAME_CAPTURE_DELAY_MS: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttemptPhase {
    Answering,
    /// Player name submitted, waiting for the backend to register it.
    Registering,
    /// Success message on screen, completion scheduled under `token`.
    Succeeded { token: TimerToken },
}

/// Per-card interaction state of the currently open card.
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub card_id: CardId,
    pub hints: HintFlow,
    pub phase: AttemptPhase,
    pub wrong_answers: u32,
    pub error: Option<ScapeError>,
}

impl Attempt {
    pub fn new(card_id: impl Into<CardId>) -> Self {
        Self {
            card_id: card_id.into(),
            hints: HintFlow::new(),
            phase: AttemptPhase::Answering,
            wrong_answers: 0,
            error: None,
        }
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self.phase, AttemptPhase::Succeeded { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    OpenCard(CardId),
    CloseCard,
    /// PIN pad input for a locked card; a correct PIN also opens it.
    SubmitPin {
        card_id: CardId,
        pin: String,
    },
    SubmitAnswer(String),
    /// Arrangement puzzles report the word spelled by the pieces and the typed answer.
    SubmitArrangement {
        arranged: String,
        typed: String,
    },
    /// Widget-reported completion, applied immediately.
    PuzzleSolved(CardId),
    /// Widget-reported hint acceptance.
    HintUsed,
    RespondToHint(bool),
    SubmitName(String),
    PlayerRegistered {
        name: String,
        player_id: String,
    },
    RegistrationFailed,
    CompletionDue(TimerToken),
    Tick,
    StartStopwatch,
    PauseStopwatch,
    ResetStopwatch,
    UpdateNotes {
        card_id: CardId,
        notes: String,
    },
    SetTheme(Theme),
    SubmitRating(u8),
    ClearData,
}

/// Side effects the host executes after a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RegisterPlayer {
        track_id: String,
        name: String,
    },
    UpdatePlaytime(PlaytimeReport),
    RecordHintUsage {
        player_id: String,
        kind: HintKind,
        card_id: CardId,
        card_title: String,
    },
    SubmitRating {
        player_id: String,
        rating: u8,
        track_id: String,
    },
    ScheduleCompletion {
        token: TimerToken,
        delay_ms: u32,
    },
    CancelCompletions(Vec<TimerToken>),
    ShowEndGrid,
    ClearStorage,
}

#[derive(Clone, Debug, PartialEq, Default)]
#[must_use]
pub struct Outcome {
    /// Session state changed; the host re-renders.
    pub changed: bool,
    /// Persisted progress changed; the host saves the snapshot.
    pub progress_changed: bool,
    pub effects: Vec<Effect>,
    /// User-visible reason the command was refused, if any.
    pub rejection: Option<ScapeError>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self::from_flag(true)
    }

    pub fn from_flag(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    pub fn rejected(error: ScapeError) -> Self {
        Self {
            changed: true,
            rejection: Some(error),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Folds `other` into `self`.
    pub fn and(mut self, other: Outcome) -> Self {
        self.changed |= other.changed;
        self.progress_changed |= other.progress_changed;
        self.effects.extend(other.effects);
        self.rejection = self.rejection.or(other.rejection);
        self
    }
}

/// The contract every puzzle widget reports through.
pub trait PuzzleResultGateway {
    fn on_complete(&mut self, card_id: &str) -> Outcome;
    fn on_hint_used(&mut self) -> Outcome;
}

/// Owns the catalog and progress, and applies every mutation through [`Session::dispatch`].
#[derive(Clone, Debug)]
pub struct Session {
    catalog: Catalog,
    progress: Progress,
    attempt: Option<Attempt>,
    scheduler: CompletionScheduler,
    rating_submitted: bool,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        let progress = Progress::bootstrap(&catalog);
        Self::with_progress(catalog, progress)
    }

    /// Resumes a session from decoded progress.
    pub fn with_progress(catalog: Catalog, progress: Progress) -> Self {
        let progress = progress.restore(&catalog);
        let attempt = progress.active_card().map(Attempt::new);
        Self {
            catalog,
            progress,
            attempt,
            scheduler: CompletionScheduler::new(),
            rating_submitted: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn active_card(&self) -> Option<&Card> {
        self.progress
            .active_card()
            .and_then(|card_id| self.catalog.get(card_id))
    }

    /// Navigation is locked while a success message is on screen.
    pub fn is_navigation_locked(&self) -> bool {
        self.attempt.as_ref().is_some_and(Attempt::is_succeeded)
    }

    pub fn rating_submitted(&self) -> bool {
        self.rating_submitted
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        log::trace!("dispatch: {command:?}");
        let before = self.progress.clone();
        let mut outcome = self.apply(command);
        outcome.progress_changed = self.progress != before;
        outcome
    }

    fn apply(&mut self, command: Command) -> Outcome {
        use Command::*;
        match command {
            OpenCard(card_id) => self.open(&card_id),
            CloseCard => self.close(),
            SubmitPin { card_id, pin } => self.submit_pin(&card_id, &pin),
            SubmitAnswer(input) => self.submit_answer(|card| card.accepts(&input)),
            SubmitArrangement { arranged, typed } => {
                self.submit_answer(|card| card.accepts_arrangement(&arranged, &typed))
            }
            PuzzleSolved(card_id) => self.complete(&card_id),
            HintUsed => {
                self.progress.record_hint();
                Outcome::changed()
            }
            RespondToHint(accept) => self.respond_to_hint(accept),
            SubmitName(input) => self.submit_name(&input),
            PlayerRegistered { name, player_id } => self.player_registered(name, player_id),
            RegistrationFailed => self.registration_failed(),
            CompletionDue(token) => self.completion_due(token),
            Tick => Outcome::from_flag(self.progress.stopwatch.tick()),
            StartStopwatch => Outcome::from_flag(self.progress.stopwatch.start()),
            PauseStopwatch => Outcome::from_flag(self.progress.stopwatch.pause()),
            ResetStopwatch => Outcome::from_flag(self.progress.stopwatch.reset()),
            UpdateNotes { card_id, notes } => {
                Outcome::from_flag(self.progress.update_notes(&card_id, &notes))
            }
            SetTheme(theme) => Outcome::from_flag(self.progress.set_theme(theme)),
            SubmitRating(rating) => self.submit_rating(rating),
            ClearData => self.clear_data(),
        }
    }

    /// Cancels pending completions of the attempt being torn down.
    fn tear_down_attempt(&mut self) -> Outcome {
        let Some(attempt) = self.attempt.take() else {
            return Outcome::unchanged();
        };
        let cancelled = self.scheduler.cancel_card(&attempt.card_id);
        if cancelled.is_empty() {
            Outcome::changed()
        } else {
            log::debug!("cancelled pending completion of {}", attempt.card_id);
            Outcome::changed().with_effect(Effect::CancelCompletions(cancelled))
        }
    }

    fn open(&mut self, card_id: &str) -> Outcome {
        if !self.progress.open_card(&self.catalog, card_id) {
            return Outcome::unchanged();
        }
        let outcome = self.tear_down_attempt();
        self.attempt = Some(Attempt::new(card_id));
        outcome.and(Outcome::changed())
    }

    fn close(&mut self) -> Outcome {
        let closed = self.progress.close_card();
        self.tear_down_attempt().and(Outcome::from_flag(closed))
    }

    fn submit_pin(&mut self, card_id: &str, pin: &str) -> Outcome {
        if !self.progress.unlock_by_pin(&self.catalog, card_id, pin) {
            return Outcome::unchanged();
        }
        Outcome::changed().and(self.open(card_id))
    }

    /// Answering attempt on a playable card, if there is one.
    fn answering(&self) -> Option<(&Attempt, &Card)> {
        let attempt = self.attempt.as_ref()?;
        if attempt.phase != AttemptPhase::Answering {
            return None;
        }
        let card = self.catalog.get(&attempt.card_id)?;
        Some((attempt, card))
    }

    fn submit_answer(&mut self, accepts: impl FnOnce(&Card) -> bool) -> Outcome {
        let Some((_, card)) = self.answering() else {
            log::debug!("answer ignored: no card is waiting for one");
            return Outcome::unchanged();
        };
        let delay_ms = card.success_delay_ms.unwrap_or(SUCCESS_DELAY_MS);
        if accepts(card) {
            return self.succeed(delay_ms);
        }

        let Some(attempt) = self.attempt.as_mut() else {
            return Outcome::unchanged();
        };
        attempt.wrong_answers += 1;
        if let Some(kind) = attempt.hints.wrong_answer() {
            log::debug!("offering {kind:?} hint for {}", attempt.card_id);
        }
        Outcome::changed()
    }

    fn succeed(&mut self, delay_ms: u32) -> Outcome {
        let Some(attempt) = self.attempt.as_mut() else {
            return Outcome::unchanged();
        };
        let token = self.scheduler.schedule(&attempt.card_id);
        attempt.phase = AttemptPhase::Succeeded { token };
        attempt.error = None;
        Outcome::changed().with_effect(Effect::ScheduleCompletion { token, delay_ms })
    }

    fn completion_due(&mut self, token: TimerToken) -> Outcome {
        let Some(card_id) = self.scheduler.fire(token) else {
            log::debug!("ignoring stale completion timer {}", token.get());
            return Outcome::unchanged();
        };
        if self
            .attempt
            .as_ref()
            .is_some_and(|attempt| attempt.phase == AttemptPhase::Succeeded { token })
        {
            self.attempt = None;
        }
        self.complete(&card_id)
    }

    fn complete(&mut self, card_id: &str) -> Outcome {
        // The end grid shows frozen play time.
        if let Some(card) = self.catalog.get(card_id)
            && card.triggers_end_grid
            && self.progress.is_playable(&self.catalog, card)
        {
            self.progress.stopwatch.pause();
        }

        let Some(completion) = self.progress.complete_card(&self.catalog, card_id) else {
            return Outcome::unchanged();
        };
        // Completion closes whichever card was open, so its pending timers go too.
        let mut outcome = self.tear_down_attempt().and(Outcome::changed());
        let cancelled = self.scheduler.cancel_card(card_id);
        if !cancelled.is_empty() {
            outcome = outcome.with_effect(Effect::CancelCompletions(cancelled));
        }
        if let Some(report) = completion.playtime {
            outcome = outcome.with_effect(Effect::UpdatePlaytime(report));
        }
        if completion.triggers_end_grid {
            outcome = outcome.with_effect(Effect::ShowEndGrid);
        }
        outcome
    }

    fn respond_to_hint(&mut self, accept: bool) -> Outcome {
        let Some(attempt) = self.attempt.as_mut() else {
            return Outcome::unchanged();
        };
        let kind = match attempt.hints.respond(accept) {
            HintResponse::NoOffer => return Outcome::unchanged(),
            HintResponse::Declined(_) => return Outcome::changed(),
            HintResponse::Accepted(kind) => kind,
        };
        let card_id = attempt.card_id.clone();

        self.progress.record_hint();
        let outcome = Outcome::changed();
        let (Some(player_id), Some(card)) =
            (self.progress.player_id(), self.catalog.get(&card_id))
        else {
            log::warn!("hint usage on {card_id} not reported: no registered player");
            return outcome;
        };
        outcome.with_effect(Effect::RecordHintUsage {
            player_id: player_id.into(),
            kind,
            card_id,
            card_title: card.title.clone(),
        })
    }

    fn submit_name(&mut self, input: &str) -> Outcome {
        if self.progress.player().is_some() {
            log::debug!("name ignored: player already registered");
            return Outcome::unchanged();
        }
        let Some((attempt, _)) = self.answering() else {
            return Outcome::unchanged();
        };
        if !self.catalog.is_instruction(&attempt.card_id) {
            return Outcome::unchanged();
        }

        let track_id = self.catalog.track_id();
        let Some(attempt) = self.attempt.as_mut() else {
            return Outcome::unchanged();
        };
        match validate_player_name(input) {
            Ok(name) => {
                attempt.phase = AttemptPhase::Registering;
                attempt.error = None;
                Outcome::changed().with_effect(Effect::RegisterPlayer {
                    track_id,
                    name: name.into(),
                })
            }
            Err(err) => {
                attempt.error = Some(err.clone());
                Outcome::rejected(err)
            }
        }
    }

    fn player_registered(&mut self, name: String, player_id: String) -> Outcome {
        if !self.progress.set_player(Player {
            name,
            id: player_id,
        }) {
            return Outcome::unchanged();
        }

        let capturing = self.attempt.as_ref().is_some_and(|attempt| {
            attempt.phase == AttemptPhase::Registering
                && self.catalog.is_instruction(&attempt.card_id)
        });
        if capturing {
            Outcome::changed().and(self.succeed(NAME_CAPTURE_DELAY_MS))
        } else {
            Outcome::changed()
        }
    }

    fn registration_failed(&mut self) -> Outcome {
        match self.attempt.as_mut() {
            Some(attempt) if attempt.phase == AttemptPhase::Registering => {
                attempt.phase = AttemptPhase::Answering;
                attempt.error = Some(ScapeError::RegistrationFailed);
                Outcome::rejected(ScapeError::RegistrationFailed)
            }
            _ => Outcome::unchanged(),
        }
    }

    fn submit_rating(&mut self, rating: u8) -> Outcome {
        if self.rating_submitted {
            return Outcome::unchanged();
        }
        if !(1..=5).contains(&rating) {
            return Outcome::rejected(ScapeError::InvalidRating(rating));
        }
        let Some(player_id) = self.progress.player_id() else {
            log::error!("no player id available for rating submission");
            return Outcome::rejected(ScapeError::NoPlayer);
        };

        let effect = Effect::SubmitRating {
            player_id: player_id.into(),
            rating,
            track_id: self.catalog.track_id(),
        };
        self.rating_submitted = true;
        Outcome::changed().with_effect(effect)
    }

    fn clear_data(&mut self) -> Outcome {
        let cancelled = self.scheduler.cancel_all();
        self.attempt = None;
        self.rating_submitted = false;
        self.progress = Progress::bootstrap(&self.catalog);

        let outcome = Outcome::changed();
        let outcome = if cancelled.is_empty() {
            outcome
        } else {
            outcome.with_effect(Effect::CancelCompletions(cancelled))
        };
        outcome.with_effect(Effect::ClearStorage)
    }
}

impl PuzzleResultGateway for Session {
    fn on_complete(&mut self, card_id: &str) -> Outcome {
        self.dispatch(Command::PuzzleSolved(card_id.into()))
    }

    fn on_hint_used(&mut self) -> Outcome {
        self.dispatch(Command::HintUsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use alloc::string::ToString;
    use alloc::vec;

    fn session() -> Session {
        Session::new(fixtures::catalog())
    }

    fn answer(session: &mut Session, input: &str) -> Outcome {
        session.dispatch(Command::SubmitAnswer(input.to_string()))
    }

    fn scheduled_token(outcome: &Outcome) -> TimerToken {
        outcome
            .effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ScheduleCompletion { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    fn register(session: &mut Session) {
        let _ = session.dispatch(Command::OpenCard("instruction".to_string()));
        let _ = session.dispatch(Command::SubmitName(" Ada ".to_string()));
        let outcome = session.dispatch(Command::PlayerRegistered {
            name: "Ada".to_string(),
            player_id: "42".to_string(),
        });
        let _ = session.dispatch(Command::CompletionDue(scheduled_token(&outcome)));
    }

    #[test]
    fn normalized_answer_schedules_completion() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));

        let outcome = answer(&mut session, " Blue ");
        assert_eq!(
            outcome.effects,
            [Effect::ScheduleCompletion {
                token: scheduled_token(&outcome),
                delay_ms: SUCCESS_DELAY_MS,
            }]
        );
        assert!(session.is_navigation_locked());
        assert!(!session.progress().is_completed("p1"));

        let _ = session.dispatch(Command::CompletionDue(scheduled_token(&outcome)));
        assert!(session.progress().is_completed("p1"));
        assert_eq!(session.progress().active_card(), None);
        assert_eq!(session.attempt(), None);
    }

    #[test]
    fn uppercase_answer_is_accepted() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));

        let _ = answer(&mut session, "BLUE");
        assert!(session.attempt().unwrap().is_succeeded());
    }

    #[test]
    fn wrong_answer_starts_hint_offer() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));

        let outcome = answer(&mut session, "blu");
        assert!(outcome.changed);
        assert!(outcome.effects.is_empty());
        let attempt = session.attempt().unwrap();
        assert_eq!(attempt.hints.stage(), HintStage::HintOffered);
        assert_eq!(attempt.phase, AttemptPhase::Answering);
    }

    #[test]
    fn three_wrong_answers_make_two_offers_and_count_nothing() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));

        let mut offers = Vec::new();
        for _ in 0..3 {
            let _ = answer(&mut session, "red");
            offers.push(session.attempt().unwrap().hints.pending_offer());
        }

        assert_eq!(
            offers,
            [Some(HintKind::Small), Some(HintKind::Big), Some(HintKind::Big)]
        );
        assert_eq!(session.progress().hints_used(), 0);
    }

    #[test]
    fn accepted_hint_counts_and_reports_usage() {
        let mut session = session();
        register(&mut session);
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let _ = answer(&mut session, "red");

        let outcome = session.dispatch(Command::RespondToHint(true));
        assert_eq!(session.progress().hints_used(), 1);
        assert_eq!(
            outcome.effects,
            [Effect::RecordHintUsage {
                player_id: "42".to_string(),
                kind: HintKind::Small,
                card_id: "p1".to_string(),
                card_title: "Projector".to_string(),
            }]
        );

        let outcome = session.dispatch(Command::RespondToHint(true));
        assert_eq!(outcome, Outcome::unchanged());
        assert_eq!(session.progress().hints_used(), 1);
    }

    #[test]
    fn declined_hint_is_not_counted() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let _ = answer(&mut session, "red");

        let outcome = session.dispatch(Command::RespondToHint(false));
        assert!(outcome.changed);
        assert!(outcome.effects.is_empty());
        assert_eq!(session.progress().hints_used(), 0);
    }

    #[test]
    fn closing_cancels_pending_completion() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let token = scheduled_token(&answer(&mut session, "blue"));

        let outcome = session.dispatch(Command::CloseCard);
        assert_eq!(outcome.effects, [Effect::CancelCompletions(vec![token])]);

        let late = session.dispatch(Command::CompletionDue(token));
        assert_eq!(late, Outcome::unchanged());
        assert!(!session.progress().is_completed("p1"));
    }

    #[test]
    fn opening_another_card_cancels_pending_completion() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let token = scheduled_token(&answer(&mut session, "blue"));

        let outcome = session.dispatch(Command::OpenCard("p2".to_string()));
        assert!(outcome.effects.contains(&Effect::CancelCompletions(vec![token])));

        let _ = session.dispatch(Command::CompletionDue(token));
        assert!(!session.progress().is_completed("p1"));
        assert_eq!(session.progress().active_card(), Some("p2"));
    }

    #[test]
    fn widget_completion_of_another_card_cancels_pending_completion() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let token = scheduled_token(&answer(&mut session, "blue"));

        let outcome = session.on_complete("p2");
        assert!(outcome.effects.contains(&Effect::CancelCompletions(vec![token])));
        assert_eq!(session.attempt(), None);
        assert_eq!(session.progress().active_card(), None);

        let late = session.dispatch(Command::CompletionDue(token));
        assert!(!late.changed);
        assert!(!session.progress().is_completed("p1"));
        assert!(session.progress().is_completed("p2"));
    }

    #[test]
    fn final_card_reports_playtime_on_every_completion() {
        let mut session = session();
        register(&mut session);
        let _ = session.dispatch(Command::OpenCard("final_m01".to_string()));
        let first = session.on_complete("final_m01");
        assert!(first.effects.iter().any(|e| matches!(e, Effect::UpdatePlaytime(_))));

        let _ = session.dispatch(Command::OpenCard("final_m01".to_string()));
        for _ in 0..60 {
            let _ = session.dispatch(Command::Tick);
        }
        let second = session.on_complete("final_m01");
        assert!(second.effects.contains(&Effect::UpdatePlaytime(PlaytimeReport {
            player_id: "42".to_string(),
            minutes: 1,
        })));
    }

    #[test]
    fn rejections_do_not_touch_saved_progress() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("instruction".to_string()));

        let name = session.dispatch(Command::SubmitName("x".to_string()));
        assert!(name.changed);
        assert!(!name.progress_changed);

        let rating = session.dispatch(Command::SubmitRating(3));
        assert_eq!(rating.rejection, Some(ScapeError::NoPlayer));
        assert!(!rating.progress_changed);

        assert!(session.dispatch(Command::HintUsed).progress_changed);
    }

    #[test]
    fn locked_card_open_is_a_silent_guard() {
        let mut session = session();

        assert_eq!(
            session.dispatch(Command::OpenCard("archive".to_string())),
            Outcome::unchanged()
        );
        assert_eq!(
            session.dispatch(Command::OpenCard("info".to_string())),
            Outcome::unchanged()
        );
    }

    #[test]
    fn correct_pin_unlocks_and_opens() {
        let mut session = session();

        let wrong = session.dispatch(Command::SubmitPin {
            card_id: "archive".to_string(),
            pin: "0000".to_string(),
        });
        assert_eq!(wrong, Outcome::unchanged());

        let _ = session.dispatch(Command::SubmitPin {
            card_id: "archive".to_string(),
            pin: "4321".to_string(),
        });
        assert!(session.progress().is_unlocked("archive"));
        assert_eq!(session.progress().active_card(), Some("archive"));
        assert!(!session.progress().is_completed("archive"));
    }

    #[test]
    fn invalid_name_is_rejected_without_registration() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("instruction".to_string()));

        let outcome = session.dispatch(Command::SubmitName("x".to_string()));
        assert_eq!(outcome.rejection, Some(ScapeError::InvalidName));
        assert!(outcome.effects.is_empty());
        assert_eq!(session.progress().player(), None);
    }

    #[test]
    fn name_is_recorded_only_after_registration() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("instruction".to_string()));

        let outcome = session.dispatch(Command::SubmitName("  Ada ".to_string()));
        assert_eq!(
            outcome.effects,
            [Effect::RegisterPlayer {
                track_id: "track-1".to_string(),
                name: "Ada".to_string(),
            }]
        );
        assert_eq!(session.progress().player_name(), None);

        let outcome = session.dispatch(Command::PlayerRegistered {
            name: "Ada".to_string(),
            player_id: "42".to_string(),
        });
        let token = scheduled_token(&outcome);
        assert!(outcome.effects.contains(&Effect::ScheduleCompletion {
            token,
            delay_ms: NAME_CAPTURE_DELAY_MS,
        }));
        assert_eq!(session.progress().player_id(), Some("42"));

        let _ = session.dispatch(Command::CompletionDue(token));
        assert!(session.progress().is_completed("instruction"));
    }

    #[test]
    fn failed_registration_allows_retry() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("instruction".to_string()));
        let _ = session.dispatch(Command::SubmitName("Ada".to_string()));

        let outcome = session.dispatch(Command::RegistrationFailed);
        assert_eq!(outcome.rejection, Some(ScapeError::RegistrationFailed));
        assert_eq!(session.progress().player(), None);

        let retry = session.dispatch(Command::SubmitName("Ada".to_string()));
        assert_eq!(retry.effects.len(), 1);
    }

    #[test]
    fn final_card_pauses_reports_playtime_and_ends_game() {
        let mut session = session();
        register(&mut session);
        let _ = session.dispatch(Command::OpenCard("final_m01".to_string()));
        for _ in 0..120 {
            let _ = session.dispatch(Command::Tick);
        }

        let token = scheduled_token(&answer(&mut session, "curtain"));
        let outcome = session.dispatch(Command::CompletionDue(token));

        assert_eq!(
            session.progress().stopwatch().state(),
            StopwatchState::Paused
        );
        assert!(outcome.effects.contains(&Effect::ShowEndGrid));
        assert!(outcome.effects.contains(&Effect::UpdatePlaytime(PlaytimeReport {
            player_id: "42".to_string(),
            minutes: 2,
        })));
    }

    #[test]
    fn gateway_completion_is_idempotent() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p2".to_string()));

        let _ = session.on_complete("p2");
        let snapshot = session.progress().clone();
        let _ = session.on_complete("p2");

        assert_eq!(session.progress(), &snapshot);
        assert_eq!(session.progress().journal().len(), 1);
        assert_eq!(session.progress().active_card(), None);
    }

    #[test]
    fn gateway_hint_increments_counter() {
        let mut session = session();

        let _ = session.on_hint_used();
        let _ = session.dispatch(Command::HintUsed);

        assert_eq!(session.progress().hints_used(), 2);
    }

    #[test]
    fn ticks_stop_exactly_on_pause() {
        let mut session = session();
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        for _ in 0..5 {
            let _ = session.dispatch(Command::Tick);
        }
        let _ = session.dispatch(Command::PauseStopwatch);
        assert!(!session.dispatch(Command::Tick).changed);

        assert_eq!(session.progress().stopwatch().elapsed_ms(), 5000);
    }

    #[test]
    fn rating_is_validated_and_sent_once() {
        let mut session = session();
        assert_eq!(
            session.dispatch(Command::SubmitRating(3)).rejection,
            Some(ScapeError::NoPlayer)
        );

        register(&mut session);
        assert_eq!(
            session.dispatch(Command::SubmitRating(6)).rejection,
            Some(ScapeError::InvalidRating(6))
        );

        let outcome = session.dispatch(Command::SubmitRating(5));
        assert_eq!(
            outcome.effects,
            [Effect::SubmitRating {
                player_id: "42".to_string(),
                rating: 5,
                track_id: "track-1".to_string(),
            }]
        );
        assert!(session.rating_submitted());
        assert_eq!(session.dispatch(Command::SubmitRating(4)), Outcome::unchanged());
    }

    #[test]
    fn clear_data_resets_to_bootstrap() {
        let mut session = session();
        register(&mut session);
        let _ = session.dispatch(Command::OpenCard("p1".to_string()));
        let token = scheduled_token(&answer(&mut session, "blue"));

        let outcome = session.dispatch(Command::ClearData);
        assert_eq!(
            outcome.effects,
            [Effect::CancelCompletions(vec![token]), Effect::ClearStorage]
        );
        assert_eq!(
            session.progress(),
            &Progress::bootstrap(session.catalog())
        );
        assert_eq!(session.attempt(), None);
    }

    #[test]
    fn resumed_session_reopens_active_card() {
        let catalog = fixtures::catalog();
        let mut progress = Progress::bootstrap(&catalog);
        progress.open_card(&catalog, "p2");

        let session = Session::with_progress(catalog, progress);
        assert_eq!(session.attempt().map(|a| a.card_id.as_str()), Some("p2"));
        assert!(!session.is_navigation_locked());
    }
}
