use crate::foundation::math::Vec2;
use crate::geometry::Rect;

/// A simple polygon given by its ordered vertex loop
///
/// The loop is implicitly closed; the last vertex connects back to the
/// first. Self-intersecting input is not detected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon2 {
    vertices: Vec<Vec2>,
}

impl Polygon2 {
    /// Create a polygon from its vertices
    pub fn new(vertices: impl Into<Vec<Vec2>>) -> Self {
        Self { vertices: vertices.into() }
    }

    /// The vertex loop
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex to the loop
    pub fn push(&mut self, v: Vec2) {
        self.vertices.push(v);
    }

    /// Bounding rectangle of the vertices (zero-sized at the origin when empty)
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.vertices.first() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (min, max) = self
            .vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.inf(v), max.sup(v)));
        Rect::from_min_max(min, max)
    }

    /// Even-odd crossing test
    ///
    /// Points exactly on an edge may land either side, depending on the
    /// edge orientation.
    pub fn contains_point(&self, p: &Vec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y < p.y && vj.y >= p.y) || (vj.y < p.y && vi.y >= p.y) {
                let cross_x = vi.x + (p.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
                if cross_x < p.x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Signed area (shoelace), positive for counter-clockwise loops
    pub fn area(&self) -> f32 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    /// Mean of the vertices
    pub fn centroid(&self) -> Option<Vec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self.vertices.iter().fold(Vec2::zeros(), |acc, v| acc + v);
        Some(sum / self.vertices.len() as f32)
    }
}

impl From<Vec<Vec2>> for Polygon2 {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self::new(vertices)
    }
}
