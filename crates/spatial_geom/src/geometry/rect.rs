use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Axis-aligned 2D rectangle given by its top-left corner and size
///
/// "Top" is the minimum y edge, matching screen-space conventions: the
/// north quadrants of a rectangle are the ones with smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum x
    pub x: f32,
    /// Minimum y
    pub y: f32,
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle spanning two corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Maximum x
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Maximum y
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Point containment test
    ///
    /// Half-open along x (`x <= px < right`) but closed along y
    /// (`y <= py <= bottom`). Quadtree insertion relies on this exact rule.
    pub fn contains_point(&self, p: &Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Overlap test with another rectangle (edges touching counts)
    pub fn intersects_rect(&self, other: &Rect) -> bool {
        self.x <= other.right() && self.right() >= other.x &&
        self.y <= other.bottom() && self.bottom() >= other.y
    }

    /// Overlap test with a circle
    pub fn intersects_circle(&self, center: &Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.x, self.right()),
            center.y.clamp(self.y, self.bottom()),
        );
        (closest - center).magnitude_squared() <= radius * radius
    }

    /// The four equal quarters in NW, NE, SW, SE order
    pub fn quadrants(&self) -> [Rect; 4] {
        let w2 = self.width * 0.5;
        let h2 = self.height * 0.5;
        [
            Rect::new(self.x, self.y, w2, h2),
            Rect::new(self.x + w2, self.y, w2, h2),
            Rect::new(self.x, self.y + h2, w2, h2),
            Rect::new(self.x + w2, self.y + h2, w2, h2),
        ]
    }
}
