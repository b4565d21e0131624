use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{HintKind, answer_matches};

/// Identifier of a card, unique within one deck.
pub type CardId = String;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Puzzle,
    Final,
    Instruction,
    End,
    Info,
}

impl CardType {
    /// Puzzle cards can always be entered, regardless of unlock state.
    pub const fn is_always_open(self) -> bool {
        matches!(self, Self::Puzzle)
    }

    /// Counted towards the "n / total" puzzle tally.
    pub const fn is_countable(self) -> bool {
        matches!(self, Self::Puzzle | Self::Final)
    }
}

/// Tag selecting which widget renders a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleSubtype {
    Text,
    Rearrange,
    Grid,
    Rosegrid,
    Foodgrid,
    Jigsaw,
    Lever,
    Audio,
    Visual,
    Sequence,
    Endgrid,
    Logic,
    Splitscreen,
    Colorcode,
    Ar,
    #[serde(rename = "3d")]
    ThreeD,
    Multimedia,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicInfoContent {
    pub text: String,
    #[serde(default)]
    pub required_completed_cards: Vec<CardId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionPage {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One movable piece of an arrangement puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strip {
    pub id: u32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<PuzzleSubtype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "haamuvastaus")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_hint_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_answer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_answer_text2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    /// Message revealed on completion, usually a PIN for another card.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "pinCodeViesti")]
    pub pin_reveal_message: Option<String>,
    #[serde(default)]
    pub triggers_end_grid: bool,
    #[serde(default)]
    pub is_final_puzzle: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_info_content: Vec<DynamicInfoContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instruction_pages: Vec<InstructionPage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strips: Vec<Strip>,
    /// Overrides the success delay before completion propagates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_delay_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "trackID")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_completion_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_feedback_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_feedback_email: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, title: impl Into<String>, kind: CardType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            subtype: None,
            display_icon: None,
            intro_text: None,
            question: None,
            placeholder: None,
            hint_text: None,
            big_hint_text: None,
            success_text: None,
            wrong_answer_text: None,
            wrong_answer_text2: None,
            code_answer: None,
            alternate_answers: Vec::new(),
            pin_code: None,
            pin_reveal_message: None,
            triggers_end_grid: false,
            is_final_puzzle: false,
            dynamic_info_content: Vec::new(),
            instruction_pages: Vec::new(),
            strips: Vec::new(),
            success_delay_ms: None,
            track_id: None,
            end_completion_message: None,
            end_feedback_message: None,
            end_feedback_email: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.code_answer = Some(answer.into());
        self
    }

    pub fn with_hints(mut self, small: impl Into<String>, big: impl Into<String>) -> Self {
        self.hint_text = Some(small.into());
        self.big_hint_text = Some(big.into());
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin_code = Some(pin.into());
        self
    }

    pub const fn is_info(&self) -> bool {
        matches!(self.kind, CardType::Info)
    }

    pub const fn is_instruction(&self) -> bool {
        matches!(self.kind, CardType::Instruction)
    }

    /// Free-text answer check against `codeAnswer` and `alternateAnswers`.
    pub fn accepts(&self, input: &str) -> bool {
        answer_matches(input, self.code_answer.as_deref(), &self.alternate_answers)
    }

    /// Arrangement puzzles: the derived value and the typed answer must both match.
    pub fn accepts_arrangement(&self, derived: &str, typed: &str) -> bool {
        self.accepts(derived) && self.accepts(typed)
    }

    pub fn hint(&self, kind: HintKind) -> Option<&str> {
        match kind {
            HintKind::Small => self.hint_text.as_deref(),
            HintKind::Big => self.big_hint_text.as_deref(),
        }
    }

    pub fn wrong_answer_text(&self, kind: HintKind) -> Option<&str> {
        match kind {
            HintKind::Small => self.wrong_answer_text.as_deref(),
            HintKind::Big => self.wrong_answer_text2.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn card_deserializes_from_legacy_field_names() {
        let card: Card = serde_json::from_str(
            r#"{
                "id": "m01_p_1",
                "title": "Projector",
                "type": "puzzle",
                "subtype": "3d",
                "haamuvastaus": "colour?",
                "pinCodeViesti": "Clue: look under the seat",
                "codeAnswer": "blue",
                "alternateAnswers": ["navy"],
                "unknownField": 42
            }"#,
        )
        .unwrap();

        assert_eq!(card.kind, CardType::Puzzle);
        assert_eq!(card.subtype, Some(PuzzleSubtype::ThreeD));
        assert_eq!(card.placeholder.as_deref(), Some("colour?"));
        assert_eq!(
            card.pin_reveal_message.as_deref(),
            Some("Clue: look under the seat")
        );
        assert_eq!(card.alternate_answers, vec!["navy".to_string()]);
        assert!(!card.triggers_end_grid);
    }

    #[test]
    fn arrangement_requires_both_values_to_match() {
        let card = Card::new("strip", "Strips", CardType::Puzzle).with_answer("reel");

        assert!(card.accepts_arrangement("REEL", " reel "));
        assert!(!card.accepts_arrangement("leer", "reel"));
        assert!(!card.accepts_arrangement("reel", "leer"));
    }

    #[test]
    fn hint_texts_follow_kind() {
        let card = Card::new("p", "P", CardType::Puzzle).with_hints("small", "big");

        assert_eq!(card.hint(HintKind::Small), Some("small"));
        assert_eq!(card.hint(HintKind::Big), Some("big"));
    }
}
