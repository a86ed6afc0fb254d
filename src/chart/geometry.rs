//! Polar geometry for the donut ring. Angles are degrees, `0` at 12 o'clock, increasing
//! clockwise.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point on the circle of `radius` around `center` at `angle` degrees.
pub fn polar_to_cartesian(center: Point, radius: f64, angle: f64) -> Point {
    let radians = (angle - 90.0).to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// SVG path data for the arc between `start` and `end` degrees.
///
/// The path runs from the end point back to the start point with the sweep flag off; the
/// large-arc flag is set once the span passes 180 degrees. A full 360 degree span has equal
/// endpoints and draws nothing, so callers render that case as a circle.
pub fn arc_path(center: Point, radius: f64, start: f64, end: f64) -> String {
    let from = polar_to_cartesian(center, radius, end);
    let to = polar_to_cartesian(center, radius, start);
    let large_arc = if end - start <= 180.0 { 0 } else { 1 };
    format!(
        "M {} {} A {radius} {radius} 0 {large_arc} 0 {} {}",
        from.x, from.y, to.x, to.y
    )
}

/// Size and position of the donut inside its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutLayout {
    pub center: Point,
    pub radius: f64,
    /// Ring thickness, centered on `radius`.
    pub stroke: f64,
}

impl Default for DonutLayout {
    fn default() -> Self {
        Self {
            center: Point::new(130.0, 130.0),
            radius: 100.0,
            stroke: 30.0,
        }
    }
}

impl DonutLayout {
    /// Square viewport edge that fits the ring around its center.
    pub fn viewport(&self) -> f64 {
        self.center.x.max(self.center.y) * 2.0
    }

    /// Whether `point` lies on the painted band of the ring.
    pub fn band_contains(&self, point: Point) -> bool {
        let distance = self.center.distance_to(point);
        let half = self.stroke / 2.0;
        distance >= self.radius - half && distance <= self.radius + half
    }

    /// Angle of `point` around the center, in `[0, 360)`.
    pub fn angle_of(&self, point: Point) -> f64 {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx.atan2(-dy).to_degrees().rem_euclid(360.0)
    }
}
