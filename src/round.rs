use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;

use crate::clock::{elapsed_secs, format_elapsed};
use crate::devices::{Audio, Cue, RectStyle, Rgb, Stage, TextStyle};
use crate::error::GameError;
use crate::geometry::{random_target, Point, TargetRect};

pub const DEFAULT_MAX_REP: u32 = 2;

const HUD_LABEL_STYLE: TextStyle = TextStyle::new(1.0, Rgb::BROWN, 2);
const HUD_VALUE_STYLE: TextStyle = TextStyle::new(1.5, Rgb::BROWN, 3);
const BANNER_STYLE: TextStyle = TextStyle::new(4.0, Rgb::YELLOW, 8);
const TARGET_THICKNESS: u32 = 6;

/// What one tick of play decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_complete: bool,
    /// False while a result is on screen, so a stale hit can't re-trigger.
    pub label_detections: bool,
}

/// Rep bookkeeping for one level of play.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub target: Option<TargetRect>,
    pub is_object_in_position: bool,
    pub show_result: bool,
    pub current_rep: u32,
    pub max_rep: u32,
    pub win_level: bool,
    pub win_level_elapsed_secs: u64,
    pub rep_start_time: Option<Instant>,
}

impl RoundState {
    pub fn new(max_rep: u32) -> Self {
        Self {
            target: None,
            is_object_in_position: false,
            show_result: false,
            current_rep: 0,
            max_rep,
            win_level: false,
            win_level_elapsed_secs: 0,
            rep_start_time: None,
        }
    }

    /// Whole seconds since the rep sequence started.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.rep_start_time
            .map_or(0, |start| elapsed_secs(start, now) as u64)
    }

    /// Runs one tick of play and queues the HUD for this frame.
    pub fn advance<S, A, R>(
        &mut self,
        now: Instant,
        object_size: Option<u32>,
        stage: &mut S,
        audio: &mut A,
        rng: &mut R,
    ) -> Result<RoundOutcome, GameError>
    where
        S: Stage + ?Sized,
        A: Audio + ?Sized,
        R: Rng + ?Sized,
    {
        let mut outcome = RoundOutcome {
            round_complete: false,
            label_detections: true,
        };
        let mut box_color = Rgb::YELLOW;
        let mut elapsed = self.elapsed_secs(now);

        if self.target.is_none() {
            self.rep_start_time = Some(now);
            self.target = Some(place_target(&*stage, object_size, rng)?);
        } else if self.show_result {
            box_color = Rgb::GREEN;
            if self.win_level {
                elapsed = self.win_level_elapsed_secs;
                if audio.is_playing(Cue::LevelComplete) {
                    outcome.label_detections = false;
                } else {
                    outcome.round_complete = true;
                    self.reset(now, place_target(&*stage, object_size, rng)?);
                }
            } else if audio.is_playing(Cue::Hit) {
                outcome.label_detections = false;
            } else {
                self.target = Some(place_target(&*stage, object_size, rng)?);
                self.show_result = false;
            }
        } else if self.is_object_in_position {
            box_color = Rgb::GREEN;
            outcome.label_detections = false;
            self.current_rep += 1;
            self.is_object_in_position = false;
            self.show_result = true;
            if self.current_rep == self.max_rep {
                self.win_level = true;
                self.win_level_elapsed_secs = elapsed;
                info!(
                    "level complete: {} reps in {}",
                    self.max_rep,
                    format_elapsed(elapsed)
                );
                audio.play(Cue::LevelComplete);
            } else {
                debug!("hit {}/{}", self.current_rep, self.max_rep);
                audio.play(Cue::Hit);
            }
        }

        self.draw_hud(stage, elapsed, box_color);
        Ok(outcome)
    }

    fn reset(&mut self, now: Instant, target: TargetRect) {
        self.target = Some(target);
        self.rep_start_time = Some(now);
        self.win_level_elapsed_secs = 0;
        self.show_result = false;
        self.win_level = false;
        self.current_rep = 0;
        self.is_object_in_position = false;
    }

    fn draw_hud<S: Stage + ?Sized>(&self, stage: &mut S, elapsed: u64, box_color: Rgb) {
        let width = stage.bounds().width;
        let elapsed_str = format_elapsed(elapsed);
        let progress_offset = if self.current_rep < 10 { 175 } else { 200 };

        stage.draw_text("PROGRESS", Point::new(width - 200, 90), HUD_LABEL_STYLE);
        stage.draw_text(
            &format!("{}/{}", self.current_rep, self.max_rep),
            Point::new(width - progress_offset, 140),
            HUD_VALUE_STYLE,
        );
        stage.draw_text("TIME", Point::new(50, 90), HUD_LABEL_STYLE);
        stage.draw_text(&elapsed_str, Point::new(20, 140), HUD_VALUE_STYLE);

        if self.win_level {
            stage.draw_text(&elapsed_str, Point::new(150, 270), BANNER_STYLE);
        } else if let Some(target) = self.target {
            stage.draw_rect(
                target.top_left,
                target.bottom_right,
                RectStyle::outline(box_color, TARGET_THICKNESS),
            );
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REP)
    }
}

fn place_target<S, R>(stage: &S, object_size: Option<u32>, rng: &mut R) -> Result<TargetRect, GameError>
where
    S: Stage + ?Sized,
    R: Rng + ?Sized,
{
    let size = object_size.ok_or(GameError::NotCalibrated)?;
    let bounds = stage.bounds();
    if size > bounds.max_target_size() {
        warn!(
            "object size {size}px exceeds playable area ({}px)",
            bounds.max_target_size()
        );
    }
    let target = random_target(bounds, size, rng);
    debug!("new target at {:?}", target);
    Ok(target)
}
