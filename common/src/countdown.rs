use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

/// What the countdown does once it reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownPolicy {
    /// Keep decrementing past zero, one second per tick, forever.
    #[default]
    Unbounded,
    /// Hold at zero and report expiry once.
    ClampAtZero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    Running(String),
    /// Terminal tick, only produced under [`CountdownPolicy::ClampAtZero`].
    Expired(String),
}

impl CountdownTick {
    pub fn display(&self) -> &str {
        match self {
            CountdownTick::Running(text) | CountdownTick::Expired(text) => text,
        }
    }
}

/// Local session clock seeded once from the server.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: i64,
    policy: CountdownPolicy,
}

impl Countdown {
    pub fn new(remaining: i64, policy: CountdownPolicy) -> Self {
        Self {
            remaining,
            policy,
        }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Renders the current value, then steps the clock down by one second.
    pub fn tick(&mut self) -> CountdownTick {
        match self.policy {
            CountdownPolicy::Unbounded => {
                let text = format_clock(self.remaining);
                self.remaining = self.remaining.saturating_sub(1);
                CountdownTick::Running(text)
            }
            CountdownPolicy::ClampAtZero => {
                if self.remaining <= 0 {
                    self.remaining = 0;
                    return CountdownTick::Expired(format_clock(0));
                }
                let text = format_clock(self.remaining);
                self.remaining = self.remaining.saturating_sub(1);
                CountdownTick::Running(text)
            }
        }
    }
}

/// `MM:SS` where minutes are taken from the sub-hour remainder only, so the
/// display wraps every hour (3661 renders as `01:01`). Negative values render
/// the magnitude with a leading `-`.
pub fn format_clock(seconds: i64) -> String {
    if seconds < 0 {
        return format!("-{}", format_clock_unsigned(seconds.unsigned_abs()));
    }
    format_clock_unsigned(seconds as u64)
}

fn format_clock_unsigned(t: u64) -> String {
    let minutes = (t % 3600) / 60;
    let seconds = t % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

pub fn parse_remaining(body: &str) -> Result<i64, ParseIntError> {
    body.trim().parse::<i64>()
}
