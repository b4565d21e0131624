use crate::{Card, CardType, PuzzleSubtype};

/// Which input surface a card is played through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// Instruction pages ending in the player name form.
    NameCapture,
    /// Pieces rearranged into a word, confirmed by a typed answer.
    Arrangement,
    /// Single free-text answer.
    FreeText,
    /// Nothing to solve.
    Passive,
}

impl WidgetKind {
    pub fn for_card(card: &Card) -> Self {
        match (card.kind, card.subtype) {
            (CardType::Info, _) => Self::Passive,
            (CardType::Instruction, _) => Self::NameCapture,
            (_, Some(PuzzleSubtype::Rearrange)) if !card.strips.is_empty() => Self::Arrangement,
            _ if card.code_answer.is_some() => Self::FreeText,
            _ => Self::Passive,
        }
    }

    pub const fn takes_answers(self) -> bool {
        matches!(self, Self::Arrangement | Self::FreeText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    use crate::Strip;

    #[test]
    fn subtypes_pick_widgets() {
        let mut strips = Card::new("s", "Strips", CardType::Puzzle).with_answer("reel");
        strips.subtype = Some(PuzzleSubtype::Rearrange);
        assert_eq!(WidgetKind::for_card(&strips), WidgetKind::FreeText);

        strips.strips = vec![Strip {
            id: 1,
            label: "R".to_string(),
        }];
        assert_eq!(WidgetKind::for_card(&strips), WidgetKind::Arrangement);

        let mut dice = Card::new("d", "Dice", CardType::Puzzle).with_answer("six");
        dice.subtype = Some(PuzzleSubtype::ThreeD);
        assert_eq!(WidgetKind::for_card(&dice), WidgetKind::FreeText);
    }

    #[test]
    fn cards_without_answers_are_passive() {
        let instruction = Card::new("instruction", "Hi", CardType::Instruction);
        let info = Card::new("info", "Board", CardType::Info).with_answer("x");
        let end = Card::new("end", "End", CardType::End);

        assert_eq!(WidgetKind::for_card(&instruction), WidgetKind::NameCapture);
        assert_eq!(WidgetKind::for_card(&info), WidgetKind::Passive);
        assert!(!WidgetKind::for_card(&end).takes_answers());
    }
}
