//! Contracts for the collaborators the game drives: the vision/display
//! stage and the audio cue player.

use crate::geometry::{DetectionBox, FrameBounds, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const BROWN: Rgb = Rgb(20, 70, 114);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub scale: f32,
    pub color: Rgb,
    pub thickness: u32,
}

impl TextStyle {
    pub const fn new(scale: f32, color: Rgb, thickness: u32) -> Self {
        Self {
            scale,
            color,
            thickness,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectStyle {
    pub color: Rgb,
    pub thickness: u32,
    pub filled: bool,
}

impl RectStyle {
    pub const fn outline(color: Rgb, thickness: u32) -> Self {
        Self {
            color,
            thickness,
            filled: false,
        }
    }

    pub const fn filled(color: Rgb) -> Self {
        Self {
            color,
            thickness: 1,
            filled: true,
        }
    }
}

/// Horizontal and vertical extent of the current detection, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extents {
    pub x: Option<u32>,
    pub y: Option<u32>,
}

/// Frame capture, detection and drawing.
pub trait Stage {
    fn bounds(&self) -> FrameBounds;

    /// Grab a fresh frame without running detection.
    fn capture_frame(&mut self);

    /// Grab a fresh frame and run detection on it.
    fn run_detection(&mut self);

    /// Draws detections of `class` and reports whether any satisfied `predicate`.
    fn label_detections(&mut self, class: &str, predicate: &dyn Fn(&DetectionBox) -> bool)
        -> bool;

    fn detection_extents(&self) -> Extents;

    fn draw_rect(&mut self, corner1: Point, corner2: Point, style: RectStyle);

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle);

    fn present(&mut self);

    fn shutdown(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Cue {
    Hit,
    LevelComplete,
}

/// Fire-and-forget cue playback with a polled status.
pub trait Audio {
    fn play(&mut self, cue: Cue);
    fn is_playing(&self, cue: Cue) -> bool;
}
