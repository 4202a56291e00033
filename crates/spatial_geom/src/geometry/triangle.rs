use crate::foundation::math::Vec2;

/// A 2D triangle produced by tesselation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2 {
    /// First vertex
    pub a: Vec2,
    /// Second vertex
    pub b: Vec2,
    /// Third vertex
    pub c: Vec2,
}

impl Triangle2 {
    /// Creates a new triangle
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Mean of the three vertices
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Returns the vertices as an array
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Signed area, positive for counter-clockwise winding
    pub fn signed_area(&self) -> f32 {
        0.5 * ((self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.c.x - self.a.x) * (self.b.y - self.a.y))
    }
}
