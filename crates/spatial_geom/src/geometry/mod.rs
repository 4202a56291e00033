//! Geometric primitives consumed by the spatial indexes
//!
//! These are pure value types: containment and overlap predicates used to
//! prune tree traversal, plus the 2D polygon/triangle types the tesselator
//! works with.

mod aabb;
mod polygon;
mod rect;
mod sphere;
mod triangle;

pub use aabb::Aabb;
pub use polygon::Polygon2;
pub use rect::Rect;
pub use sphere::Sphere;
pub use triangle::Triangle2;
