//! Polygon tesselation
//!
//! A grid-sampling tesselator on top of an incremental Delaunay
//! triangulation.

mod delaunay;
mod grid;


pub use delaunay::{DelaunayTriangulation, Triangulator, DEFAULT_ROOT_SIZE};
pub use grid::{GridSampling, GridTesselator, PolygonTesselator};
