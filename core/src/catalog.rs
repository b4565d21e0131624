use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_INSTRUCTION_ID: &str = "instruction";
pub const DEFAULT_FINAL_ID: &str = "final_m01";

fn default_instruction_id() -> CardId {
    DEFAULT_INSTRUCTION_ID.to_string()
}

fn default_final_id() -> CardId {
    DEFAULT_FINAL_ID.to_string()
}

/// Deck as supplied by the content source, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default = "default_instruction_id")]
    pub instruction_id: CardId,
    #[serde(default = "default_final_id")]
    pub final_id: CardId,
    /// Cards unlocked at session start. Defaults to the instruction card, every
    /// puzzle card and the final card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_unlocked: Option<Vec<CardId>>,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            instruction_id: default_instruction_id(),
            final_id: default_final_id(),
            bootstrap_unlocked: None,
            cards,
        }
    }
}

/// Immutable, language-resolved card list.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    cards: Vec<Card>,
    instruction_id: CardId,
    final_id: CardId,
    bootstrap: BTreeSet<CardId>,
}

impl Catalog {
    pub fn new(deck: Deck) -> Result<Self> {
        let Deck {
            instruction_id,
            final_id,
            bootstrap_unlocked,
            cards,
        } = deck;

        let mut seen = BTreeSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(ScapeError::DuplicateCard(card.id.clone()));
            }
        }
        if !seen.contains(instruction_id.as_str()) {
            return Err(ScapeError::MissingCard(instruction_id));
        }

        let bootstrap = match bootstrap_unlocked {
            Some(ids) => ids.into_iter().collect(),
            None => cards
                .iter()
                .filter(|card| card.kind.is_always_open() || card.id == final_id)
                .map(|card| card.id.clone())
                .chain(core::iter::once(instruction_id.clone()))
                .collect(),
        };

        Ok(Self {
            cards,
            instruction_id,
            final_id,
            bootstrap,
        })
    }

    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        Self::new(Deck::new(cards))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let deck: Deck =
            serde_json::from_str(json).map_err(|err| ScapeError::MalformedDeck(err.to_string()))?;
        Self::new(deck)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.get(card_id).is_some()
    }

    pub fn instruction_id(&self) -> &str {
        &self.instruction_id
    }

    pub fn final_id(&self) -> &str {
        &self.final_id
    }

    pub fn is_instruction(&self, card_id: &str) -> bool {
        self.instruction_id == card_id
    }

    pub fn is_final(&self, card_id: &str) -> bool {
        self.final_id == card_id
    }

    pub fn instruction_card(&self) -> Option<&Card> {
        self.get(&self.instruction_id)
    }

    /// Track identifier reported to the backend.
    pub fn track_id(&self) -> String {
        self.instruction_card()
            .and_then(|card| card.track_id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn bootstrap_unlocked(&self) -> &BTreeSet<CardId> {
        &self.bootstrap
    }

    pub fn total_puzzles(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.kind.is_countable())
            .count()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Card;
    type IntoIter = core::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use alloc::vec;

    /// Small deck: instruction, two puzzles, an info card, a pin-locked end card
    /// and the final card.
    pub(crate) fn catalog() -> Catalog {
        let mut instruction = Card::new("instruction", "Welcome", CardType::Instruction);
        instruction.track_id = Some("track-1".to_string());

        let p1 = Card::new("p1", "Projector", CardType::Puzzle)
            .with_answer("blue")
            .with_hints("Look at the light", "It is the colour of the sky");
        let mut p2 = Card::new("p2", "Reels", CardType::Puzzle).with_answer("reel");
        p2.pin_reveal_message = Some("PIN for the archive: 4321".to_string());

        let mut info = Card::new("info", "Notice board", CardType::Info);
        info.dynamic_info_content = vec![
            DynamicInfoContent {
                text: "T0".to_string(),
                required_completed_cards: vec![],
            },
            DynamicInfoContent {
                text: "T1".to_string(),
                required_completed_cards: vec!["p1".to_string()],
            },
            DynamicInfoContent {
                text: "T2".to_string(),
                required_completed_cards: vec!["p1".to_string(), "p2".to_string()],
            },
        ];

        let archive = Card::new("archive", "Archive", CardType::End)
            .with_answer("vault")
            .with_pin("4321");

        let mut last = Card::new("final_m01", "Premiere", CardType::Final).with_answer("curtain");
        last.triggers_end_grid = true;
        last.is_final_puzzle = true;

        Catalog::from_cards(vec![instruction, p1, p2, info, archive, last]).unwrap()
    }
}
