use thiserror::Error;

/// Fatal conditions that end a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The sampling window elapsed but the tracked object was not detected.
    #[error("calibration failed at step {step}.{sub_step}: tracked object lost during sampling")]
    CalibrationFailed { step: u8, sub_step: u8 },

    #[error("game mode error: unknown mode {0:?}")]
    UnknownMode(String),

    #[error("play started before calibration produced an object size")]
    NotCalibrated,

    #[error("invalid configuration: {0}")]
    Config(String),
}
