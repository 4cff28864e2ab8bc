use crate::geometry::{DetectionBox, TargetRect};

pub const DEFAULT_TRACKING_THRESHOLD_PX: u32 = 20;

/// True when every corner coordinate of `detection` is strictly closer than
/// `threshold` pixels to the matching corner of `target`.
pub fn is_in_spot(detection: &DetectionBox, target: &TargetRect, threshold: u32) -> bool {
    detection.x_left.abs_diff(target.top_left.x) < threshold
        && detection.y_top.abs_diff(target.top_left.y) < threshold
        && detection.x_right.abs_diff(target.bottom_right.x) < threshold
        && detection.y_bottom.abs_diff(target.bottom_right.y) < threshold
}

/// Predicate handed to the vision side, which only ever sees boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpotMatcher {
    pub target: TargetRect,
    pub threshold: u32,
}

impl SpotMatcher {
    pub fn new(target: TargetRect, threshold: u32) -> Self {
        Self { target, threshold }
    }

    pub fn matches(&self, detection: &DetectionBox) -> bool {
        is_in_spot(detection, &self.target, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn target() -> TargetRect {
        TargetRect {
            top_left: Point::new(100, 120),
            bottom_right: Point::new(160, 180),
        }
    }

    #[test]
    fn exact_detection_matches() {
        let det = DetectionBox::from(target());
        assert!(is_in_spot(&det, &target(), 20));
    }

    #[test]
    fn threshold_is_strict_on_every_corner() {
        let t = target();
        let shifted = [
            DetectionBox::new(120, 120, 160, 180),
            DetectionBox::new(100, 100, 160, 180),
            DetectionBox::new(100, 120, 140, 180),
            DetectionBox::new(100, 120, 160, 200),
        ];
        for det in shifted {
            assert!(!is_in_spot(&det, &t, 20), "{det:?} should miss");
        }
    }

    #[test]
    fn one_under_threshold_on_all_corners_matches() {
        let det = DetectionBox::new(81, 139, 179, 161);
        assert!(is_in_spot(&det, &target(), 20));
    }

    #[test]
    fn zero_threshold_never_matches() {
        let det = DetectionBox::from(target());
        assert!(!is_in_spot(&det, &target(), 0));
    }

    #[test]
    fn spot_matcher_delegates() {
        let m = SpotMatcher::new(target(), DEFAULT_TRACKING_THRESHOLD_PX);
        assert!(m.matches(&DetectionBox::new(105, 125, 165, 185)));
        assert!(!m.matches(&DetectionBox::new(0, 0, 60, 60)));
    }
}
