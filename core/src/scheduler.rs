use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::CardId;

/// Handle of one scheduled delayed completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Bookkeeping for delayed completions keyed by card id.
///
/// A token only resolves to its card while it is pending. Cancelling a card's
/// tokens makes any late timer callback a no-op.
#[derive(Clone, Debug, Default)]
pub struct CompletionScheduler {
    next_token: u64,
    pending: BTreeMap<TimerToken, CardId>,
}

impl CompletionScheduler {
    pub const fn new() -> Self {
        Self {
            next_token: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn schedule(&mut self, card_id: &str) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending.insert(token, card_id.into());
        token
    }

    /// Drops every pending completion of `card_id`, returning the cancelled tokens.
    pub fn cancel_card(&mut self, card_id: &str) -> Vec<TimerToken> {
        let cancelled: Vec<TimerToken> = self
            .pending
            .iter()
            .filter(|(_, pending_card)| pending_card.as_str() == card_id)
            .map(|(&token, _)| token)
            .collect();
        for token in &cancelled {
            self.pending.remove(token);
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> Vec<TimerToken> {
        let cancelled = self.pending.keys().copied().collect();
        self.pending.clear();
        cancelled
    }

    /// Consumes a due token, yielding its card only if it was still pending.
    pub fn fire(&mut self, token: TimerToken) -> Option<CardId> {
        self.pending.remove(&token)
    }

    pub fn is_pending(&self, card_id: &str) -> bool {
        self.pending.values().any(|pending| pending == card_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_token_fires_once() {
        let mut scheduler = CompletionScheduler::new();
        let token = scheduler.schedule("p1");

        assert!(scheduler.is_pending("p1"));
        assert_eq!(scheduler.fire(token).as_deref(), Some("p1"));
        assert_eq!(scheduler.fire(token), None);
        assert!(!scheduler.is_pending("p1"));
    }

    #[test]
    fn cancelled_tokens_never_fire() {
        let mut scheduler = CompletionScheduler::new();
        let first = scheduler.schedule("p1");
        let second = scheduler.schedule("p1");
        let other = scheduler.schedule("p2");

        assert_eq!(scheduler.cancel_card("p1"), [first, second]);
        assert_eq!(scheduler.fire(first), None);
        assert_eq!(scheduler.fire(second), None);
        assert_eq!(scheduler.fire(other).as_deref(), Some("p2"));
    }

    #[test]
    fn tokens_are_unique() {
        let mut scheduler = CompletionScheduler::new();
        let first = scheduler.schedule("p1");
        scheduler.cancel_all();
        let second = scheduler.schedule("p1");

        assert_ne!(first, second);
        assert_eq!(scheduler.pending_count(), 1);
    }
}
