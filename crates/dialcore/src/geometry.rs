// Angles are degrees from +x, growing clockwise since y points down.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rotated_about(self, pivot: Point, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = (self.x - pivot.x, self.y - pivot.y);
        Self::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn inscribed_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }
}

pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle of `point` as seen from `center`, in `[0, 360)`.
pub fn pointer_angle_deg(center: Point, point: Point) -> f64 {
    let (dy, dx) = (point.y - center.y, point.x - center.x);
    let angle = dy.atan2(dx).to_degrees();
    if !angle.is_finite() {
        return 0.0;
    }
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    // -tiny + 360.0 rounds to 360.0
    if angle >= 360.0 { 0.0 } else { angle }
}

pub fn is_within_radial_band(
    center: Point,
    point: Point,
    target_radius: f64,
    band_width: f64,
) -> bool {
    (distance(center, point) - target_radius).abs() <= band_width
}
