pub mod audio;
pub mod stage;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
        Block, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::devices::{RectStyle, Rgb, Stage};
use crate::geometry::Point;
use crate::input::{map_key, map_object_control, InputEvent};
use crate::runtime::GameEvent;
use stage::{DrawCommand, TerminalStage};

const HELP: &str =
    " arrows/wasd move · shift faster · space hide · c calibrate · 1/2 players · y/n · esc quit ";
const SHORT_HELP: &str = " esc quit ";
// Frame pixels between scan lines of a filled rectangle.
const FILL_STEP: i32 = 4;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Widget for &TerminalStage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = self.bounds();
        let width = bounds.width as f64;
        let height = bounds.height as f64;
        // canvas y grows upwards, frame y grows downwards
        let flip = |p: Point| (p.x as f64, height - p.y as f64);

        let help = if HELP.width() as u16 + 2 <= area.width {
            HELP
        } else {
            SHORT_HELP
        };
        let block = Block::bordered()
            .title(" spotter ")
            .title_bottom(Line::from(help).centered());

        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for cmd in self.shown() {
                    match cmd {
                        DrawCommand::Rect {
                            corner1,
                            corner2,
                            style,
                        } => paint_rect(ctx, flip(*corner1), flip(*corner2), *style),
                        DrawCommand::Text {
                            text,
                            position,
                            style,
                        } => {
                            let (x, y) = flip(*position);
                            let mut s = Style::default().fg(color(style.color));
                            if style.scale >= 1.5 || style.thickness >= 3 {
                                s = s.add_modifier(Modifier::BOLD);
                            }
                            ctx.print(x, y, Line::styled(text.clone(), s));
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

/// Applies object controls to the stage and returns the game input for this
/// frame. Cancel wins over anything else pressed in the same frame.
pub fn route_keys(events: &[GameEvent], stage: &mut TerminalStage, nudge_px: i32) -> Option<InputEvent> {
    let mut input = None;
    for ev in events {
        let GameEvent::Key(key) = ev else { continue };
        if let Some(mapped) = map_key(key) {
            if input.is_none() || mapped == InputEvent::Cancel {
                input = Some(mapped);
            }
        } else if let Some(control) = map_object_control(key, nudge_px) {
            stage.control(control);
        }
    }
    input
}

fn paint_rect(ctx: &mut Context, a: (f64, f64), b: (f64, f64), style: RectStyle) {
    let (x1, x2) = (a.0.min(b.0), a.0.max(b.0));
    let (y1, y2) = (a.1.min(b.1), a.1.max(b.1));
    let c = color(style.color);

    if style.filled {
        let mut y = y1;
        while y <= y2 {
            ctx.draw(&CanvasLine {
                x1,
                y1: y,
                x2,
                y2: y,
                color: c,
            });
            y += FILL_STEP as f64;
        }
    } else {
        ctx.draw(&Rectangle {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            color: c,
        });
    }
}
