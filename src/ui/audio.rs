use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use log::debug;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::devices::{Audio, Cue};

/// Cue player without sound files: each cue counts as playing for a fixed
/// length of time after it was started.
#[derive(Debug)]
pub struct TimedAudio<C: Clock> {
    clock: C,
    lengths: HashMap<Cue, Duration>,
    started: HashMap<Cue, Instant>,
    bell: bool,
}

impl<C: Clock> TimedAudio<C> {
    pub fn new(clock: C, hit: Duration, level_complete: Duration) -> Self {
        Self {
            clock,
            lengths: HashMap::from([(Cue::Hit, hit), (Cue::LevelComplete, level_complete)]),
            started: HashMap::new(),
            bell: false,
        }
    }

    pub fn from_config(config: &GameConfig, clock: C) -> Self {
        let mut audio = Self::new(
            clock,
            config.hit_cue(),
            config.level_cue(),
        );
        audio.bell = config.bell;
        audio
    }
}

impl<C: Clock> Audio for TimedAudio<C> {
    fn play(&mut self, cue: Cue) {
        debug!("playing cue {cue}");
        self.started.insert(cue, self.clock.now());
        if self.bell {
            let mut out = std::io::stdout();
            if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
                debug!("terminal bell failed: {e}");
            }
        }
    }

    fn is_playing(&self, cue: Cue) -> bool {
        match (self.started.get(&cue), self.lengths.get(&cue)) {
            (Some(start), Some(length)) => {
                self.clock.now().saturating_duration_since(*start) < *length
            }
            _ => false,
        }
    }
}
