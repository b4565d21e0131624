use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    BlueGreen,
    Grayscale,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::BlueGreen, Theme::Grayscale];

    pub const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Default => "default",
            BlueGreen => "blue-green",
            Grayscale => "grayscale",
        }
    }
}

/// Remote playtime report produced by completing the final card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaytimeReport {
    pub player_id: String,
    pub minutes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub card_id: CardId,
    pub newly_completed: bool,
    pub triggers_end_grid: bool,
    pub playtime: Option<PlaytimeReport>,
}

/// Mutable session progress. Only ever grows, apart from an explicit reset.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Progress {
    pub(crate) unlocked: BTreeSet<CardId>,
    pub(crate) completed: BTreeSet<CardId>,
    pub(crate) active_card: Option<CardId>,
    pub(crate) journal: Journal,
    pub(crate) hints_used: u32,
    pub(crate) stopwatch: Stopwatch,
    pub(crate) player: Option<Player>,
    pub(crate) theme: Theme,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session state for `catalog`.
    pub fn bootstrap(catalog: &Catalog) -> Self {
        Self {
            unlocked: catalog.bootstrap_unlocked().clone(),
            ..Self::default()
        }
    }

    /// Reconciles decoded progress with the catalog it is used with.
    ///
    /// The bootstrap cards are unlocked again and an active card that can no
    /// longer be played is closed.
    pub fn restore(mut self, catalog: &Catalog) -> Self {
        self.unlocked
            .extend(catalog.bootstrap_unlocked().iter().cloned());
        if let Some(active) = self.active_card.take() {
            match catalog.get(&active) {
                Some(card) if self.is_playable(catalog, card) => self.active_card = Some(active),
                _ => log::warn!("dropping stale active card {active}"),
            }
        }
        self
    }

    pub fn unlocked(&self) -> &BTreeSet<CardId> {
        &self.unlocked
    }

    pub fn completed(&self) -> &BTreeSet<CardId> {
        &self.completed
    }

    pub fn is_completed(&self, card_id: &str) -> bool {
        self.completed.contains(card_id)
    }

    pub fn is_unlocked(&self, card_id: &str) -> bool {
        self.unlocked.contains(card_id)
    }

    pub fn active_card(&self) -> Option<&str> {
        self.active_card.as_deref()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player.as_ref().map(|player| player.name.as_str())
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player.as_ref().map(|player| player.id.as_str())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Entry rule shared by the grid and `open_card`.
    pub fn is_playable(&self, catalog: &Catalog, card: &Card) -> bool {
        if card.is_info() {
            return false;
        }
        catalog.is_instruction(&card.id)
            || (catalog.is_final(&card.id) && self.player.is_some())
            || card.kind.is_always_open()
            || self.unlocked.contains(&card.id)
    }

    pub fn open_card(&mut self, catalog: &Catalog, card_id: &str) -> bool {
        let Some(card) = catalog.get(card_id) else {
            log::debug!("open: unknown card {card_id}");
            return false;
        };
        if !self.is_playable(catalog, card) {
            log::debug!("open: card {card_id} is locked");
            return false;
        }

        self.active_card = Some(card.id.clone());
        self.stopwatch.start();
        true
    }

    pub fn close_card(&mut self) -> bool {
        self.active_card.take().is_some()
    }

    pub fn unlock_by_pin(&mut self, catalog: &Catalog, card_id: &str, pin: &str) -> bool {
        let Some(card) = catalog.get(card_id) else {
            return false;
        };
        if card.pin_code.as_deref() != Some(pin) {
            log::debug!("pin rejected for {card_id}");
            return false;
        }

        self.unlocked.insert(card.id.clone());
        self.journal
            .upsert(card, |entry| entry.pin_code = Some(pin.into()));
        true
    }

    /// Marks a card solved. Re-completing a card re-applies the same end state.
    pub fn complete_card(&mut self, catalog: &Catalog, card_id: &str) -> Option<Completion> {
        let card = catalog.get(card_id)?;
        if !self.is_playable(catalog, card) {
            log::warn!("complete: card {card_id} was never playable");
            return None;
        }

        let newly_completed = self.completed.insert(card.id.clone());
        self.journal.upsert(card, |entry| {
            if let Some(message) = &card.pin_reveal_message {
                entry.pin_code_message = Some(message.clone());
            }
        });
        self.active_card = None;

        let playtime = match (&self.player, catalog.is_final(card_id)) {
            (Some(player), true) => Some(PlaytimeReport {
                player_id: player.id.clone(),
                minutes: self.stopwatch.elapsed_minutes(),
            }),
            _ => None,
        };

        Some(Completion {
            card_id: card.id.clone(),
            newly_completed,
            triggers_end_grid: card.triggers_end_grid,
            playtime,
        })
    }

    /// Assigns the registered player. The identity is set only once.
    pub fn set_player(&mut self, player: Player) -> bool {
        if let Some(existing) = &self.player {
            log::warn!("player already registered as {}", existing.id);
            return false;
        }
        self.player = Some(player);
        true
    }

    pub fn record_hint(&mut self) {
        self.hints_used = self.hints_used.saturating_add(1);
    }

    pub fn update_notes(&mut self, card_id: &str, notes: &str) -> bool {
        self.journal.update_notes(card_id, notes)
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        let changed = self.theme != theme;
        self.theme = theme;
        changed
    }
}
