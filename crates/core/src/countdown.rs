//! Tick-driven countdown for timed sessions.
//!
//! The countdown does not own a timer; the caller feeds it one `tick()` per
//! second. The first tick is expected at start (elapsed zero), so a limit of
//! `L` seconds expires on the tick delivered at elapsed `L`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Running,
    Expired,
    Cancelled,
}

/// Outcome of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remains; `displayed` is the value to render for this tick.
    Running { displayed: u32 },
    /// This tick displayed zero and the countdown stopped.
    Expired { displayed: u32 },
    /// Countdown already stopped; nothing to render.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    #[must_use]
    pub fn new(limit_secs: u32) -> Self {
        Self {
            remaining: limit_secs,
            state: CountdownState::Running,
        }
    }

    /// Render-then-decrement step. Expires on the tick whose displayed value is zero.
    pub fn tick(&mut self) -> Tick {
        if self.state != CountdownState::Running {
            return Tick::Idle;
        }
        let displayed = self.remaining;
        if displayed == 0 {
            self.state = CountdownState::Expired;
            return Tick::Expired { displayed };
        }
        self.remaining -= 1;
        Tick::Running { displayed }
    }

    /// Stop the countdown. Later ticks are `Tick::Idle`.
    pub fn cancel(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Cancelled;
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }
}

/// Formats seconds as `M:SS`.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
