use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    Small,
    Big,
}

/// Position of one card attempt in the two-stage hint escalation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum HintStage {
    #[default]
    Idle,
    HintOffered,
    HintShown,
    BigHintOffered,
    BigHintShown,
}

impl HintStage {
    pub const fn pending_offer(self) -> Option<HintKind> {
        match self {
            Self::HintOffered => Some(HintKind::Small),
            Self::BigHintOffered => Some(HintKind::Big),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintResponse {
    /// No offer was pending.
    NoOffer,
    Accepted(HintKind),
    Declined(HintKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct HintFlow {
    stage: HintStage,
    small_shown: bool,
}

impl HintFlow {
    pub const fn new() -> Self {
        Self {
            stage: HintStage::Idle,
            small_shown: false,
        }
    }

    pub const fn stage(&self) -> HintStage {
        self.stage
    }

    pub const fn small_hint_shown(&self) -> bool {
        self.small_shown
    }

    pub const fn big_hint_shown(&self) -> bool {
        matches!(self.stage, HintStage::BigHintShown)
    }

    pub const fn pending_offer(&self) -> Option<HintKind> {
        self.stage.pending_offer()
    }

    /// Advances the flow after a wrong answer, returning a newly made offer.
    ///
    /// A small-hint offer left unanswered escalates to the big-hint offer on the
    /// next wrong answer. Once the big hint is offered or shown nothing new is
    /// offered.
    pub fn wrong_answer(&mut self) -> Option<HintKind> {
        use HintStage::*;

        let (next, offer) = match self.stage {
            Idle => (HintOffered, Some(HintKind::Small)),
            HintOffered | HintShown => (BigHintOffered, Some(HintKind::Big)),
            BigHintOffered => (BigHintOffered, None),
            BigHintShown => (BigHintShown, None),
        };
        self.stage = next;
        offer
    }

    pub fn respond(&mut self, accept: bool) -> HintResponse {
        use HintStage::*;

        match (self.stage, accept) {
            (HintOffered, true) => {
                self.stage = HintShown;
                self.small_shown = true;
                HintResponse::Accepted(HintKind::Small)
            }
            (HintOffered, false) => {
                self.stage = Idle;
                HintResponse::Declined(HintKind::Small)
            }
            (BigHintOffered, true) => {
                // The big hint is never shown without the small one.
                self.stage = BigHintShown;
                self.small_shown = true;
                HintResponse::Accepted(HintKind::Big)
            }
            (BigHintOffered, false) => {
                // An escalated offer that skipped the small hint falls back to Idle.
                self.stage = if self.small_shown { HintShown } else { Idle };
                HintResponse::Declined(HintKind::Big)
            }
            _ => HintResponse::NoOffer,
        }
    }
}
