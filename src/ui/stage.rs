use log::info;

use crate::devices::{Extents, RectStyle, Rgb, Stage, TextStyle};
use crate::geometry::{DetectionBox, FrameBounds, Point};
use crate::input::ObjectControl;

const DETECTION_COLOR: Rgb = Rgb(80, 160, 255);
const LABEL_STYLE: TextStyle = TextStyle::new(0.5, DETECTION_COLOR, 1);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        corner1: Point,
        corner2: Point,
        style: RectStyle,
    },
    Text {
        text: String,
        position: Point,
        style: TextStyle,
    },
}

/// Stand-in for the camera: a square the player steers with the keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedObject {
    pub class: String,
    pub center: Point,
    pub size: u32,
    pub visible: bool,
}

impl SimulatedObject {
    pub fn bbox(&self) -> DetectionBox {
        let half = self.size as i32 / 2;
        DetectionBox::new(
            self.center.x - half,
            self.center.y - half,
            self.center.x - half + self.size as i32,
            self.center.y - half + self.size as i32,
        )
    }
}

/// `Stage` for the terminal: draw requests are queued per frame and the
/// last presented frame is what the ratatui widget renders.
#[derive(Debug)]
pub struct TerminalStage {
    bounds: FrameBounds,
    pub object: SimulatedObject,
    detection: Option<DetectionBox>,
    pending: Vec<DrawCommand>,
    shown: Vec<DrawCommand>,
    frames: u64,
    running: bool,
}

impl TerminalStage {
    pub fn new(bounds: FrameBounds, class: impl Into<String>, object_size: u32) -> Self {
        Self {
            bounds,
            object: SimulatedObject {
                class: class.into(),
                center: Point::new(bounds.width / 2, bounds.height / 2),
                size: object_size,
                visible: true,
            },
            detection: None,
            pending: Vec::new(),
            shown: Vec::new(),
            frames: 0,
            running: true,
        }
    }

    pub fn control(&mut self, control: ObjectControl) {
        match control {
            ObjectControl::Nudge { dx, dy } => {
                let c = self.object.center;
                self.move_object_to(Point::new(c.x + dx, c.y + dy));
            }
            ObjectControl::ToggleVisible => self.object.visible = !self.object.visible,
        }
    }

    /// Centre clamps to the frame.
    pub fn move_object_to(&mut self, center: Point) {
        self.object.center = Point::new(
            center.x.clamp(0, self.bounds.width),
            center.y.clamp(0, self.bounds.height),
        );
    }

    /// Moves the object so its box is exactly `top_left`-anchored.
    pub fn place_object_at(&mut self, top_left: Point) {
        let half = self.object.size as i32 / 2;
        self.move_object_to(Point::new(top_left.x + half, top_left.y + half));
    }

    pub fn shown(&self) -> &[DrawCommand] {
        &self.shown
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shown_texts(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }

    fn new_frame(&mut self) {
        self.frames += 1;
        self.pending.clear();
        self.detection = None;
    }
}

impl Stage for TerminalStage {
    fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    fn capture_frame(&mut self) {
        self.new_frame();
    }

    fn run_detection(&mut self) {
        self.new_frame();
        if self.object.visible {
            self.detection = Some(self.object.bbox());
        }
    }

    fn label_detections(
        &mut self,
        class: &str,
        predicate: &dyn Fn(&DetectionBox) -> bool,
    ) -> bool {
        let Some(det) = self.detection.filter(|_| self.object.class == class) else {
            return false;
        };

        let hit = predicate(&det);
        let color = if hit { Rgb::GREEN } else { DETECTION_COLOR };
        self.draw_rect(
            Point::new(det.x_left, det.y_top),
            Point::new(det.x_right, det.y_bottom),
            RectStyle::outline(color, 2),
        );
        self.draw_text(
            class,
            Point::new(det.x_left, det.y_top - 10),
            TextStyle { color, ..LABEL_STYLE },
        );
        hit
    }

    fn detection_extents(&self) -> Extents {
        Extents {
            x: self.detection.map(|d| d.width()),
            y: self.detection.map(|d| d.height()),
        }
    }

    fn draw_rect(&mut self, corner1: Point, corner2: Point, style: RectStyle) {
        self.pending.push(DrawCommand::Rect {
            corner1,
            corner2,
            style,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style,
        });
    }

    fn present(&mut self) {
        self.shown = std::mem::take(&mut self.pending);
    }

    fn shutdown(&mut self) {
        if self.running {
            info!("stage shut down after {} frames", self.frames);
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> TerminalStage {
        TerminalStage::new(FrameBounds::new(640, 480, 40), "sports ball", 60)
    }

    #[test]
    fn object_starts_centred_and_visible() {
        let s = stage();
        assert_eq!(s.object.center, Point::new(320, 240));
        assert_eq!(s.object.bbox(), DetectionBox::new(290, 210, 350, 270));
    }

    #[test]
    fn detection_only_after_run_detection() {
        let mut s = stage();
        s.capture_frame();
        assert_eq!(s.detection_extents(), Extents::default());
        s.run_detection();
        assert_eq!(
            s.detection_extents(),
            Extents {
                x: Some(60),
                y: Some(60)
            }
        );
    }

    #[test]
    fn hidden_object_is_not_detected() {
        let mut s = stage();
        s.control(ObjectControl::ToggleVisible);
        s.run_detection();
        assert_eq!(s.detection_extents(), Extents::default());
        assert!(!s.label_detections("sports ball", &|_| true));
    }

    #[test]
    fn label_requires_matching_class() {
        let mut s = stage();
        s.run_detection();
        assert!(!s.label_detections("cup", &|_| true));
        assert!(s.label_detections("sports ball", &|_| true));
        assert!(!s.label_detections("sports ball", &|_| false));
    }

    #[test]
    fn nudges_clamp_to_frame() {
        let mut s = stage();
        s.control(ObjectControl::Nudge { dx: -1000, dy: 5 });
        assert_eq!(s.object.center, Point::new(0, 245));
        s.control(ObjectControl::Nudge { dx: 5000, dy: 5000 });
        assert_eq!(s.object.center, Point::new(640, 480));
    }

    #[test]
    fn place_object_aligns_box_corner() {
        let mut s = stage();
        s.place_object_at(Point::new(100, 120));
        let b = s.object.bbox();
        assert_eq!((b.x_left, b.y_top), (100, 120));
    }

    #[test]
    fn present_swaps_in_pending_frame() {
        let mut s = stage();
        s.capture_frame();
        s.draw_text("hello", Point::new(1, 2), LABEL_STYLE);
        assert_eq!(s.shown_texts().count(), 0);
        s.present();
        assert_eq!(s.shown_texts().collect::<Vec<_>>(), ["hello"]);
        s.capture_frame();
        s.present();
        assert_eq!(s.shown_texts().count(), 0);
    }

    #[test]
    fn shutdown_stops_stage() {
        let mut s = stage();
        s.shutdown();
        assert!(!s.is_running());
    }
}
