//! Screen-space geometry and the small angle helpers the cursor needs.
//!
//! Everything here is in CSS pixels relative to the viewport; the cursor
//! canvas covers the whole viewport so no camera transform is involved.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move each coordinate toward `target` by `factor`.
    #[must_use]
    pub fn lerp(self, target: Point, factor: f64) -> Point {
        Point { x: lerp(self.x, target.x, factor), y: lerp(self.y, target.y, factor) }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn square(side: f64) -> Self {
        Self { width: side, height: side }
    }

    /// The same size with the axes exchanged.
    #[must_use]
    pub fn transposed(self) -> Self {
        Self { width: self.height, height: self.width }
    }
}

/// An axis-aligned bounding box, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Center of a bounding box.
#[must_use]
pub fn center_of(rect: &Rect) -> Point {
    Point { x: rect.left + rect.width / 2.0, y: rect.top + rect.height / 2.0 }
}

/// Linear interpolation from `current` toward `target`.
#[must_use]
pub fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_deg(deg: f64) -> f64 {
    ((deg % 360.0) + 360.0) % 360.0
}

/// Shortest angular distance between two angles, in `[0, 180]`.
#[must_use]
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Whether `deg` sits closer to 90°/270° than to 0°/180°.
///
/// Used to pick which box axis is drawn as width so the brackets never
/// render skewed while rotating toward a quarter turn.
#[must_use]
pub fn is_closer_to_vertical(deg: f64) -> bool {
    let n = normalize_deg(deg);
    let to_vertical = angle_distance(n, 90.0).min(angle_distance(n, 270.0));
    let to_horizontal = angle_distance(n, 0.0).min(angle_distance(n, 180.0));
    to_vertical < to_horizontal
}

/// Round to the nearest multiple of 90°, keeping the winding (not normalized).
#[must_use]
pub fn snap_to_right_angle(deg: f64) -> f64 {
    (deg / 90.0).round() * 90.0
}
