//! Screen-space geometry used by merge detection.

pub struct ScreenSpace;

pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type ScreenSize = euclid::Size2D<f64, ScreenSpace>;
pub type ScreenRect = euclid::Rect<f64, ScreenSpace>;

pub fn point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> ScreenRect {
    euclid::rect(x, y, width, height)
}

/// Strict containment: a point on the edge is outside.
pub fn contains_strict(rect: &ScreenRect, p: ScreenPoint) -> bool {
    p.x > rect.min_x() && p.x < rect.max_x() && p.y > rect.min_y() && p.y < rect.max_y()
}

pub fn overlap_area(a: &ScreenRect, b: &ScreenRect) -> f64 {
    a.intersection(b).map(|r| r.area()).unwrap_or(0.0)
}
