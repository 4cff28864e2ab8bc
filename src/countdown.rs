use std::time::Instant;

use crate::clock::elapsed_secs;

pub const DEFAULT_COUNTDOWN_SECS: u64 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownTick {
    pub label: String,
    pub complete: bool,
}

/// "3", "2", "1", "GO" before play starts.
#[derive(Clone, Debug)]
pub struct Countdown {
    pub start_time: Option<Instant>,
    pub duration_secs: u64,
}

impl Countdown {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            start_time: None,
            duration_secs,
        }
    }

    pub fn advance(&mut self, now: Instant) -> CountdownTick {
        let Some(start) = self.start_time else {
            self.start_time = Some(now);
            return CountdownTick {
                label: self.duration_secs.to_string(),
                complete: false,
            };
        };

        let elapsed = elapsed_secs(start, now);
        if elapsed > self.duration_secs as f64 {
            self.start_time = None;
            CountdownTick {
                label: "GO".to_string(),
                complete: true,
            }
        } else {
            CountdownTick {
                label: self.duration_secs.saturating_sub(elapsed as u64).to_string(),
                complete: false,
            }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}
