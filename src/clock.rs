use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of wall-clock instants for every timing gate in the game.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// session and its audio player can be advanced together.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// Moves the clock to `secs` after its creation. Never goes backwards.
    pub fn set_secs(&self, secs: f64) {
        let target = Duration::from_secs_f64(secs);
        if target > self.offset.get() {
            self.offset.set(target);
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Seconds between `start` and `now` as a float, zero if `now` is earlier.
pub fn elapsed_secs(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}

/// Formats whole seconds as `MM:SS`; the hour component is dropped.
pub fn format_elapsed(secs: u64) -> String {
    let delta = chrono::Duration::seconds(secs as i64);
    format!(
        "{:02}:{:02}",
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    )
}
