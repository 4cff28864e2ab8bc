// Library surface for the binary and for headless integration tests.
pub mod app_dirs;
pub mod calibration;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod devices;
pub mod error;
pub mod geometry;
pub mod input;
pub mod matcher;
pub mod menus;
pub mod round;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::GameError;
pub use session::{GameMode, GameSession, PlayerMode, StepOutcome};
