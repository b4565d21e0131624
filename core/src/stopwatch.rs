use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl StopwatchState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Play-time counter advanced by whole-second ticks while running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Stopwatch {
    state: StopwatchState,
    elapsed_ms: u64,
}

impl Stopwatch {
    pub const TICK_MS: u64 = 1000;

    pub const fn new() -> Self {
        Self {
            state: StopwatchState::Stopped,
            elapsed_ms: 0,
        }
    }

    /// Rebuilds a stopwatch from persisted parts. A stopped stopwatch is always at zero.
    pub const fn restore(state: StopwatchState, elapsed_ms: u64) -> Self {
        let elapsed_ms = match state {
            StopwatchState::Stopped => 0,
            _ => elapsed_ms,
        };
        Self { state, elapsed_ms }
    }

    pub const fn state(&self) -> StopwatchState {
        self.state
    }

    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub const fn elapsed_minutes(&self) -> u64 {
        self.elapsed_ms / 60_000
    }

    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn start(&mut self) -> bool {
        self.transition(StopwatchState::Running)
    }

    /// Freezes the time. Only a running stopwatch can be paused.
    pub fn pause(&mut self) -> bool {
        if self.is_running() {
            self.transition(StopwatchState::Paused)
        } else {
            false
        }
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.state != StopwatchState::Stopped || self.elapsed_ms != 0;
        self.state = StopwatchState::Stopped;
        self.elapsed_ms = 0;
        changed
    }

    /// Adds one tick of play time. No-op unless running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(Self::TICK_MS);
            true
        } else {
            false
        }
    }

    fn transition(&mut self, state: StopwatchState) -> bool {
        if self.state == state {
            return false;
        }
        log::debug!("stopwatch: {:?} -> {:?}", self.state, state);
        self.state = state;
        true
    }
}
