use std::time::{Duration, Instant};

use log::{debug, info};

use crate::clock::elapsed_secs;
use crate::devices::Stage;
use crate::error::GameError;

pub const DEFAULT_SAMPLE_WINDOW_SECS: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationStep {
    /// Measuring the object size.
    Measure,
    /// Size known, completion reported on the next call.
    Finalize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureStage {
    Prompt,
    Sampling,
}

/// Measures the player's object size at arm's length.
#[derive(Debug, Clone)]
pub struct CalibrationState {
    pub step: CalibrationStep,
    pub sub_step: MeasureStage,
    pub start_time: Option<Instant>,
    pub sample_window: Duration,
    min_object_size: Option<u32>,
}

impl CalibrationState {
    pub fn new(sample_window: Duration) -> Self {
        Self {
            step: CalibrationStep::Measure,
            sub_step: MeasureStage::Prompt,
            start_time: None,
            sample_window,
            min_object_size: None,
        }
    }

    /// Size of the target square, known once calibration has completed.
    pub fn min_object_size(&self) -> Option<u32> {
        self.min_object_size
    }

    pub fn is_sampling(&self) -> bool {
        self.step == CalibrationStep::Measure && self.sub_step == MeasureStage::Sampling
    }

    /// Whole seconds left in the sampling window, rounded up.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        match self.start_time {
            Some(start) if self.is_sampling() => {
                let left = self.sample_window.as_secs_f64() - elapsed_secs(start, now);
                left.max(0.0).ceil() as u64
            }
            _ => self.sample_window.as_secs_f64().ceil() as u64,
        }
    }

    /// Advances one tick. Returns `Ok(true)` exactly once, on the call after
    /// the size was measured.
    pub fn advance<S: Stage + ?Sized>(&mut self, now: Instant, stage: &S) -> Result<bool, GameError> {
        match (self.step, self.sub_step) {
            (CalibrationStep::Measure, MeasureStage::Prompt) => {
                info!("Hold object farthest from screen");
                self.start_time = Some(now);
                self.sub_step = MeasureStage::Sampling;
                Ok(false)
            }
            (CalibrationStep::Measure, MeasureStage::Sampling) => {
                let start = self.start_time.unwrap_or(now);
                if elapsed_secs(start, now) <= self.sample_window.as_secs_f64() {
                    return Ok(false);
                }

                let extents = stage.detection_extents();
                match (extents.x, extents.y) {
                    (Some(x), Some(y)) => {
                        let size = x.min(y);
                        debug!("calibration sample: {x}x{y}px");
                        info!("calibrated object size: {size}px");
                        self.min_object_size = Some(size);
                        self.step = CalibrationStep::Finalize;
                        self.sub_step = MeasureStage::Prompt;
                        self.start_time = None;
                        Ok(false)
                    }
                    _ => Err(GameError::CalibrationFailed {
                        step: 1,
                        sub_step: 2,
                    }),
                }
            }
            (CalibrationStep::Finalize, _) => {
                self.step = CalibrationStep::Measure;
                self.sub_step = MeasureStage::Prompt;
                info!("Calibration complete!");
                Ok(true)
            }
        }
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(DEFAULT_SAMPLE_WINDOW_SECS))
    }
}
