//! Presentation data derived from a catalog and progress, without mutating either.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// Picks the most specific fully satisfied entry, falling back to the first one.
///
/// Ties keep the entry that comes first.
pub fn resolve_dynamic_info<'a>(
    content: &'a [DynamicInfoContent],
    completed: &BTreeSet<CardId>,
) -> Option<&'a DynamicInfoContent> {
    let mut best: Option<&DynamicInfoContent> = None;
    for entry in content {
        let satisfied = entry
            .required_completed_cards
            .iter()
            .all(|card_id| completed.contains(card_id));
        let more_specific = best.is_none_or(|best| {
            entry.required_completed_cards.len() > best.required_completed_cards.len()
        });
        if satisfied && more_specific {
            best = Some(entry);
        }
    }
    best.or_else(|| content.first())
}

/// Text a card shows on its face and as its introduction.
pub fn display_text<'a>(card: &'a Card, completed: &BTreeSet<CardId>) -> Option<&'a str> {
    if card.is_info() && !card.dynamic_info_content.is_empty() {
        resolve_dynamic_info(&card.dynamic_info_content, completed).map(|entry| entry.text.as_str())
    } else {
        card.intro_text.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardTile<'a> {
    pub card: &'a Card,
    pub intro_text: Option<&'a str>,
    pub playable: bool,
    pub completed: bool,
    pub active: bool,
}

pub fn card_tiles<'a>(catalog: &'a Catalog, progress: &Progress) -> Vec<CardTile<'a>> {
    catalog
        .iter()
        .map(|card| CardTile {
            card,
            intro_text: display_text(card, progress.completed()),
            playable: progress.is_playable(catalog, card),
            completed: progress.is_completed(&card.id),
            active: progress.active_card() == Some(card.id.as_str()),
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EndStats {
    pub solved_puzzles: usize,
    pub total_puzzles: usize,
    pub hints_used: u32,
    pub elapsed_ms: u64,
}

/// Statistics for the end grid and the progress panel.
///
/// The solved count discounts the instruction card, assuming it is completed
/// whenever anything else is.
pub fn end_stats(catalog: &Catalog, progress: &Progress) -> EndStats {
    EndStats {
        solved_puzzles: progress.completed().len().saturating_sub(1),
        total_puzzles: catalog.total_puzzles(),
        hints_used: progress.hints_used(),
        elapsed_ms: progress.stopwatch().elapsed_ms(),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinReveal<'a> {
    Clue(&'a str),
    Pin(&'a str),
}

impl<'a> PinReveal<'a> {
    pub const CLUE_PREFIX: &'static str = "Clue: ";

    pub fn parse(message: &'a str) -> Self {
        match message.strip_prefix(Self::CLUE_PREFIX) {
            Some(clue) => Self::Clue(clue),
            None => Self::Pin(message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalRow<'a> {
    pub card_id: &'a str,
    pub title: &'a str,
    pub unlock_pin: Option<&'a str>,
    pub received_pin: Option<&'a str>,
    pub pin_message: Option<&'a str>,
    pub notes: &'a str,
}

pub fn journal_rows(progress: &Progress) -> Vec<JournalRow<'_>> {
    progress
        .journal()
        .entries()
        .iter()
        .map(|entry| JournalRow {
            card_id: &entry.card_id,
            title: &entry.card_title,
            unlock_pin: entry.pin_code.as_deref(),
            received_pin: entry.received_pin_code.as_deref(),
            pin_message: entry.pin_code_message.as_deref(),
            notes: &entry.notes,
        })
        .collect()
}

/// Prompt offering a hint, addressed to the player when a name is known.
pub fn hint_prompt(card: &Card, kind: HintKind, player_name: Option<&str>) -> String {
    let text = card.wrong_answer_text(kind).unwrap_or_default();
    match player_name {
        Some(name) if !name.is_empty() => format!("{text}, {name}?"),
        _ => format!("{text}?"),
    }
}

/// `HH:MM:SS` rendering of a millisecond duration.
pub fn format_play_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
