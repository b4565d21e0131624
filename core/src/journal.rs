use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{Card, CardId, CardType};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub card_id: CardId,
    pub card_title: String,
    #[serde(default)]
    pub notes: String,
    /// PIN the player used to unlock the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_pin_code: Option<String>,
    #[serde(rename = "type")]
    pub kind: CardType,
    /// Message the card revealed once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code_message: Option<String>,
}

impl JournalEntry {
    pub fn for_card(card: &Card) -> Self {
        Self {
            card_id: card.id.clone(),
            card_title: card.title.clone(),
            notes: String::new(),
            pin_code: None,
            received_pin_code: None,
            kind: card.kind,
            pin_code_message: None,
        }
    }
}

/// Ordered journal holding at most one entry per card.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a journal from decoded entries, keeping the first entry per card.
    pub fn from_entries(entries: impl IntoIterator<Item = JournalEntry>) -> Self {
        let mut journal = Self::new();
        for entry in entries {
            if journal.get(&entry.card_id).is_none() {
                journal.entries.push(entry);
            } else {
                log::warn!("dropping duplicate journal entry for {}", entry.card_id);
            }
        }
        journal
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, card_id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.card_id == card_id)
    }

    /// Creates the card's entry if missing, then applies `update` to it in place.
    pub fn upsert(&mut self, card: &Card, update: impl FnOnce(&mut JournalEntry)) {
        let index = match self.entries.iter().position(|entry| entry.card_id == card.id) {
            Some(index) => index,
            None => {
                self.entries.push(JournalEntry::for_card(card));
                self.entries.len() - 1
            }
        };
        update(&mut self.entries[index]);
    }

    pub fn update_notes(&mut self, card_id: &str, notes: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.card_id == card_id) {
            Some(entry) if entry.notes != notes => {
                entry.notes = notes.into();
                true
            }
            _ => false,
        }
    }
}
