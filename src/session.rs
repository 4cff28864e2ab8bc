use std::fmt;
use std::str::FromStr;

use log::info;
use rand::Rng;

use crate::calibration::CalibrationState;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::countdown::Countdown;
use crate::devices::{Audio, Stage};
use crate::error::GameError;
use crate::input::InputEvent;
use crate::matcher::{SpotMatcher, DEFAULT_TRACKING_THRESHOLD_PX};
use crate::menus;
use crate::round::RoundState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    AwaitingCalibrationConfirm,
    Calibrating,
    SelectingPlayers,
    Countdown,
    Playing,
    AwaitingPlayAgainConfirm,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::AwaitingCalibrationConfirm,
        GameMode::Calibrating,
        GameMode::SelectingPlayers,
        GameMode::Countdown,
        GameMode::Playing,
        GameMode::AwaitingPlayAgainConfirm,
    ];

    /// Short code used in logs.
    pub fn code(self) -> &'static str {
        match self {
            GameMode::AwaitingCalibrationConfirm => "AWCL",
            GameMode::Calibrating => "CLBT",
            GameMode::SelectingPlayers => "GTPL",
            GameMode::Countdown => "CTDN",
            GameMode::Playing => "PLAY",
            GameMode::AwaitingPlayAgainConfirm => "AWPL",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a mode code. A closed enum cannot hold an out-of-set mode, so this
/// is the one place `GameError::UnknownMode` is raised.
impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| GameError::UnknownMode(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    One,
    Two,
}

impl PlayerMode {
    pub fn count(self) -> u8 {
        match self {
            PlayerMode::One => 1,
            PlayerMode::Two => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Exit,
}

/// One play session: owns every piece of game state and advances it one
/// frame per `step`.
#[derive(Debug)]
pub struct GameSession<C: Clock, R: Rng> {
    pub mode: GameMode,
    class_to_detect: String,
    pub tracking_threshold_px: u32,
    pub player_mode: Option<PlayerMode>,
    pub calibration: CalibrationState,
    pub round: RoundState,
    pub countdown: Countdown,
    clock: C,
    rng: R,
}

impl<C: Clock, R: Rng> GameSession<C, R> {
    pub fn new(class_to_detect: impl Into<String>, clock: C, rng: R) -> Self {
        Self {
            mode: GameMode::AwaitingCalibrationConfirm,
            class_to_detect: class_to_detect.into(),
            tracking_threshold_px: DEFAULT_TRACKING_THRESHOLD_PX,
            player_mode: None,
            calibration: CalibrationState::default(),
            round: RoundState::default(),
            countdown: Countdown::default(),
            clock,
            rng,
        }
    }

    pub fn from_config(config: &GameConfig, clock: C, rng: R) -> Self {
        let mut session = Self::new(config.class_to_detect.clone(), clock, rng);
        session.tracking_threshold_px = config.tracking_threshold_px;
        session.calibration = CalibrationState::new(config.calibration_window());
        session.round = RoundState::new(config.max_rep);
        session.countdown = Countdown::new(config.countdown_secs);
        session
    }

    pub fn class_to_detect(&self) -> &str {
        &self.class_to_detect
    }

    pub fn min_object_size(&self) -> Option<u32> {
        self.calibration.min_object_size()
    }

    /// Advances the game by one frame.
    ///
    /// `Cancel` ends the session from any mode. Otherwise the handler for
    /// the current mode runs and the frame is presented afterwards.
    pub fn step<S, A>(
        &mut self,
        input: Option<InputEvent>,
        stage: &mut S,
        audio: &mut A,
    ) -> Result<StepOutcome, GameError>
    where
        S: Stage + ?Sized,
        A: Audio + ?Sized,
    {
        if input == Some(InputEvent::Cancel) {
            info!("cancelled in mode {}", self.mode);
            return Ok(StepOutcome::Exit);
        }

        let now = self.clock.now();
        let mut outcome = StepOutcome::Continue;

        match self.mode {
            GameMode::AwaitingCalibrationConfirm => {
                stage.capture_frame();
                menus::show_calibrate_menu(stage);
                if input == Some(InputEvent::Confirm) {
                    self.switch_mode(GameMode::Calibrating);
                }
            }
            GameMode::Calibrating => {
                stage.run_detection();
                let complete = self.calibration.advance(now, &*stage)?;
                menus::show_calibration_progress(stage, self.calibration.remaining_secs(now));
                stage.label_detections(&self.class_to_detect, &|_| false);
                if complete {
                    self.switch_mode(GameMode::SelectingPlayers);
                }
            }
            GameMode::SelectingPlayers => {
                stage.capture_frame();
                menus::show_player_mode_menu(stage);
                let selected = match input {
                    Some(InputEvent::SelectOnePlayer) => Some(PlayerMode::One),
                    Some(InputEvent::SelectTwoPlayers) => Some(PlayerMode::Two),
                    _ => None,
                };
                if let Some(players) = selected {
                    info!("{} player(s)", players.count());
                    self.player_mode = Some(players);
                    self.switch_mode(GameMode::Countdown);
                }
            }
            GameMode::Countdown => {
                stage.capture_frame();
                let tick = self.countdown.advance(now);
                menus::show_countdown(stage, &tick.label);
                if tick.complete {
                    self.switch_mode(GameMode::Playing);
                }
            }
            GameMode::Playing => {
                stage.run_detection();
                let size = self.calibration.min_object_size();
                let result = self
                    .round
                    .advance(now, size, stage, audio, &mut self.rng)?;
                if result.label_detections {
                    if let Some(target) = self.round.target {
                        let matcher = SpotMatcher::new(target, self.tracking_threshold_px);
                        self.round.is_object_in_position =
                            stage.label_detections(&self.class_to_detect, &|det| {
                                matcher.matches(det)
                            });
                    }
                }
                if result.round_complete {
                    self.player_mode = None;
                    self.switch_mode(GameMode::AwaitingPlayAgainConfirm);
                }
            }
            GameMode::AwaitingPlayAgainConfirm => {
                stage.capture_frame();
                menus::show_play_again_menu(stage);
                match input {
                    Some(InputEvent::No) => outcome = StepOutcome::Exit,
                    Some(InputEvent::Yes) => self.switch_mode(GameMode::SelectingPlayers),
                    _ => {}
                }
            }
        }

        stage.present();
        Ok(outcome)
    }

    fn switch_mode(&mut self, mode: GameMode) {
        info!("Switching game mode: {} -> {}", self.mode, mode);
        self.mode = mode;
    }
}
