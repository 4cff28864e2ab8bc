use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from(v: (i32, i32)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Axis-aligned square the player has to fill, as two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl TargetRect {
    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y
    }
}

/// Bounding box of one detection, in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionBox {
    pub x_left: i32,
    pub y_top: i32,
    pub x_right: i32,
    pub y_bottom: i32,
}

impl DetectionBox {
    pub fn new(x_left: i32, y_top: i32, x_right: i32, y_bottom: i32) -> Self {
        Self {
            x_left,
            y_top,
            x_right,
            y_bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_right.abs_diff(self.x_left)
    }

    pub fn height(&self) -> u32 {
        self.y_bottom.abs_diff(self.y_top)
    }
}

impl From<TargetRect> for DetectionBox {
    fn from(r: TargetRect) -> Self {
        DetectionBox::new(r.top_left.x, r.top_left.y, r.bottom_right.x, r.bottom_right.y)
    }
}

/// Frame dimensions plus the vertical margin kept free for the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBounds {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
}

impl FrameBounds {
    pub fn new(width: i32, height: i32, margin: i32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn min_y(&self) -> i32 {
        self.margin
    }

    pub fn max_y(&self) -> i32 {
        self.height - self.margin
    }

    /// Largest square that still fits inside the playable area.
    pub fn max_target_size(&self) -> u32 {
        self.width.min(self.max_y() - self.min_y()).max(0) as u32
    }
}

// Far edge at the anchor, slid forward if the near edge would cross `floor`.
fn grow_back(anchor: i32, size: i32, floor: i32) -> (i32, i32) {
    let near = (anchor - size).max(floor);
    (near, near + size)
}

/// Places a `size` x `size` target with a uniformly drawn anchor.
///
/// The anchor is drawn in `[0, width] x [margin, height - margin]`. On each
/// axis the square grows right/down from the anchor unless that would cross
/// the upper bound, in which case the anchor becomes its far edge (pushed
/// back inside when the square is wider than the anchor's distance from the
/// lower bound). Every
/// draw is therefore inside the playable area when `size` is at most
/// `bounds.max_target_size()`.
pub fn random_target<R: Rng + ?Sized>(bounds: FrameBounds, size: u32, rng: &mut R) -> TargetRect {
    let size = size as i32;
    let anchor_x = rng.gen_range(0..=bounds.width);
    let anchor_y = rng.gen_range(bounds.min_y()..=bounds.max_y());

    let (x_left, x_right) = if anchor_x + size > bounds.width {
        grow_back(anchor_x, size, 0)
    } else {
        (anchor_x, anchor_x + size)
    };
    let (y_top, y_bottom) = if anchor_y + size > bounds.max_y() {
        grow_back(anchor_y, size, bounds.min_y())
    } else {
        (anchor_y, anchor_y + size)
    };

    TargetRect {
        top_left: Point::new(x_left, y_top),
        bottom_right: Point::new(x_right, y_bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_inside(rect: TargetRect, bounds: FrameBounds, size: u32) {
        assert!(0 <= rect.top_left.x, "{rect:?}");
        assert!(rect.top_left.x <= rect.bottom_right.x, "{rect:?}");
        assert!(rect.bottom_right.x <= bounds.width, "{rect:?}");
        assert!(bounds.min_y() <= rect.top_left.y, "{rect:?}");
        assert!(rect.top_left.y <= rect.bottom_right.y, "{rect:?}");
        assert!(rect.bottom_right.y <= bounds.max_y(), "{rect:?}");
        assert_eq!(rect.width(), size as i32);
        assert_eq!(rect.height(), size as i32);
    }

    #[test]
    fn targets_stay_inside_playable_area() {
        let mut rng = StdRng::seed_from_u64(7);
        let frames = [
            FrameBounds::new(640, 480, 40),
            FrameBounds::new(320, 240, 0),
            FrameBounds::new(100, 300, 100),
            FrameBounds::new(50, 50, 10),
        ];
        for bounds in frames {
            for size in [0, 1, 17, bounds.max_target_size()] {
                for _ in 0..500 {
                    assert_inside(random_target(bounds, size, &mut rng), bounds, size);
                }
            }
        }
    }

    #[test]
    fn full_size_target_fills_the_height() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = FrameBounds::new(640, 480, 40);
        let size = bounds.max_target_size();
        assert_eq!(size, 400);
        for _ in 0..100 {
            let rect = random_target(bounds, size, &mut rng);
            assert_eq!(rect.top_left.y, 40);
            assert_eq!(rect.bottom_right.y, 440);
        }
    }

    #[test]
    fn same_seed_same_target() {
        let bounds = FrameBounds::new(640, 480, 40);
        let a = random_target(bounds, 60, &mut StdRng::seed_from_u64(99));
        let b = random_target(bounds, 60, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn detection_box_extents() {
        let det = DetectionBox::new(10, 20, 70, 100);
        assert_eq!(det.width(), 60);
        assert_eq!(det.height(), 80);
    }

    #[test]
    fn max_target_size_never_negative() {
        assert_eq!(FrameBounds::new(640, 80, 50).max_target_size(), 0);
    }
}
