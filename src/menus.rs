//! Menu overlays drawn while waiting for a key.

use crate::devices::{RectStyle, Rgb, Stage, TextStyle};
use crate::geometry::Point;

const MENU_COLOR: Rgb = Rgb::RED;
const MENU_TEXT: TextStyle = TextStyle::new(1.0, Rgb::WHITE, 2);
const COUNTDOWN_STYLE: TextStyle = TextStyle::new(4.0, Rgb::YELLOW, 8);
const CALIBRATION_STYLE: TextStyle = TextStyle::new(1.0, Rgb::YELLOW, 2);

pub fn show_calibrate_menu<S: Stage + ?Sized>(stage: &mut S) {
    stage.draw_rect(
        Point::new(170, 310),
        Point::new(530, 370),
        RectStyle::filled(MENU_COLOR),
    );
    stage.draw_text("Press 'C' to calibrate", Point::new(180, 350), MENU_TEXT);
}

pub fn show_player_mode_menu<S: Stage + ?Sized>(stage: &mut S) {
    choice_box(stage, "Players?", Point::new(250, 350), "1", "2");
}

pub fn show_play_again_menu<S: Stage + ?Sized>(stage: &mut S) {
    choice_box(stage, "Play again?", Point::new(220, 350), "Y", "N");
}

pub fn show_countdown<S: Stage + ?Sized>(stage: &mut S, label: &str) {
    stage.draw_text(label, Point::new(250, 270), COUNTDOWN_STYLE);
}

pub fn show_calibration_progress<S: Stage + ?Sized>(stage: &mut S, seconds_left: u64) {
    stage.draw_text(
        &format!("Hold still... {seconds_left}"),
        Point::new(20, 40),
        CALIBRATION_STYLE,
    );
}

fn choice_box<S: Stage + ?Sized>(stage: &mut S, title: &str, at: Point, left: &str, right: &str) {
    stage.draw_rect(
        Point::new(200, 310),
        Point::new(420, 410),
        RectStyle::filled(MENU_COLOR),
    );
    stage.draw_text(title, at, MENU_TEXT);
    stage.draw_text(left, Point::new(240, 400), MENU_TEXT);
    stage.draw_text(right, Point::new(360, 400), MENU_TEXT);
}
