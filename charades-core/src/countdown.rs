use serde::{Deserialize, Serialize};
use ts_rs::TS;

const WARNING_SECONDS: u32 = 30;
const CRITICAL_SECONDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { remaining: u32 },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

/// Per-turn clock. Holds no timer of its own; whoever drives it calls
/// `tick` once a second while the turn is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new(total_seconds: u32) -> Self {
        Self {
            total_seconds,
            remaining: total_seconds,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if self.remaining > 0 || self.total_seconds == 0 {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self, total_seconds: u32) {
        *self = Self::new(total_seconds);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total_seconds
    }

    /// Advance one second. Returns `Expired` exactly once, on the tick that
    /// reaches zero; a stopped clock returns `None`.
    pub fn tick(&mut self) -> Option<CountdownEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Some(CountdownEvent::Expired)
        } else {
            Some(CountdownEvent::Tick {
                remaining: self.remaining,
            })
        }
    }

    /// `M:SS`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    pub fn fraction_remaining(&self) -> f64 {
        if self.total_seconds == 0 {
            0.0
        } else {
            f64::from(self.remaining) / f64::from(self.total_seconds)
        }
    }

    pub fn urgency(&self) -> Urgency {
        if self.remaining <= CRITICAL_SECONDS {
            Urgency::Critical
        } else if self.remaining <= WARNING_SECONDS {
            Urgency::Warning
        } else {
            Urgency::Calm
        }
    }
}
