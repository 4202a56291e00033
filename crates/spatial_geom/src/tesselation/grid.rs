//! Grid-based polygon tesselation
//!
//! The polygon's boundary vertices plus a grid of interior sample points are
//! fed to a Delaunay triangulator. Triangles attached to the triangulator's
//! root corners, or whose centroid falls outside the polygon, are discarded.
//! The result covers the interior reasonably well but is not a conforming
//! triangulation: concave corners may be cut or left uncovered.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::math::{utils, Vec2};
use crate::geometry::{Polygon2, Triangle2};

use super::delaunay::{DelaunayTriangulation, Triangulator, DEFAULT_ROOT_SIZE};

/// How interior sample points are placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridSampling {
    /// World-aligned grid with a fixed spacing
    ///
    /// Independent of polygon size; polygons smaller than one cell may get
    /// no interior points at all.
    Global {
        /// Distance between neighbouring grid points
        spacing: f32,
    },
    /// `resolution × resolution` grid stretched over the polygon bounds
    Local {
        /// Grid points along each axis
        resolution: u32,
    },
}

impl Default for GridSampling {
    fn default() -> Self {
        Self::Local { resolution: 8 }
    }
}

impl GridSampling {
    /// Check the sampling parameters
    pub fn validate(&self) -> GeometryResult<()> {
        match *self {
            Self::Global { spacing } if !(spacing.is_finite() && spacing > 0.0) => Err(
                GeometryError::invalid(format!("grid spacing must be finite and > 0, got {spacing}")),
            ),
            Self::Local { resolution: 0 } => {
                Err(GeometryError::invalid("grid resolution must be at least 1"))
            }
            _ => Ok(()),
        }
    }
}

/// Decomposes a polygon into triangles
pub trait PolygonTesselator {
    /// Triangulate the polygon's interior
    fn tesselate(&self, polygon: &Polygon2) -> GeometryResult<Vec<Triangle2>>;
}

/// Tesselator sampling a grid inside the polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTesselator {
    sampling: GridSampling,
    root_size: f32,
}

impl GridTesselator {
    /// Create a tesselator with the given sampling strategy
    pub fn new(sampling: GridSampling) -> GeometryResult<Self> {
        sampling.validate()?;
        Ok(Self {
            sampling,
            root_size: DEFAULT_ROOT_SIZE,
        })
    }

    /// World-aligned grid with `spacing` between points
    pub fn global(spacing: f32) -> GeometryResult<Self> {
        Self::new(GridSampling::Global { spacing })
    }

    /// `resolution × resolution` grid over the polygon bounds
    pub fn local(resolution: u32) -> GeometryResult<Self> {
        Self::new(GridSampling::Local { resolution })
    }

    /// Use a different root triangle size for the triangulator
    ///
    /// Polygons must lie well inside `[-root_size, root_size]` on both axes.
    pub fn with_root_size(mut self, root_size: f32) -> GeometryResult<Self> {
        if !(root_size.is_finite() && root_size > 0.0) {
            return Err(GeometryError::invalid(format!(
                "root size must be finite and > 0, got {root_size}"
            )));
        }
        self.root_size = root_size;
        Ok(self)
    }

    /// Sampling strategy
    pub fn sampling(&self) -> GridSampling {
        self.sampling
    }

    /// Root triangle size handed to the triangulator
    pub fn root_size(&self) -> f32 {
        self.root_size
    }

    /// Grid sample points that fall inside the polygon
    pub fn inside_points(&self, polygon: &Polygon2) -> Vec<Vec2> {
        let bounds = polygon.bounds();
        let mut points = Vec::new();
        match self.sampling {
            GridSampling::Global { spacing } => {
                let cols = (bounds.width / spacing).ceil() as usize;
                let rows = (bounds.height / spacing).ceil() as usize;
                for row in 0..rows {
                    let y = bounds.y + row as f32 * spacing;
                    for col in 0..cols {
                        let x = bounds.x + col as f32 * spacing;
                        let p = Vec2::new(utils::round_to(x, spacing), utils::round_to(y, spacing));
                        if polygon.contains_point(&p) {
                            points.push(p);
                        }
                    }
                }
            }
            GridSampling::Local { resolution } => {
                let res = resolution as f32;
                for row in 0..resolution {
                    let y = utils::lerp(bounds.y, bounds.bottom(), row as f32 / res);
                    for col in 0..resolution {
                        let x = utils::lerp(bounds.x, bounds.right(), col as f32 / res);
                        let p = Vec2::new(x, y);
                        if polygon.contains_point(&p) {
                            points.push(p);
                        }
                    }
                }
            }
        }
        points
    }

    /// Run the tesselation on a caller-supplied triangulator
    ///
    /// The triangulator should be fresh; any sites already in it take part
    /// in the triangulation.
    pub fn tesselate_with(
        &self,
        polygon: &Polygon2,
        triangulator: &mut impl Triangulator,
    ) -> GeometryResult<Vec<Triangle2>> {
        if polygon.len() < 3 {
            return Err(GeometryError::DegenerateInput(format!(
                "polygon needs at least 3 vertices, got {}",
                polygon.len()
            )));
        }

        let boundary = polygon
            .vertices()
            .iter()
            .filter(|v| triangulator.add_point(**v))
            .count();
        let interior = self.inside_points(polygon);
        let sampled = interior.iter().filter(|p| triangulator.add_point(**p)).count();

        let root = triangulator.root_size();
        let all = triangulator.triangles();
        let total = all.len();
        let triangles: Vec<Triangle2> = all
            .into_iter()
            .filter(|t| {
                t.vertices()
                    .iter()
                    .all(|v| v.x.abs() != root && v.y.abs() != root)
            })
            .filter(|t| polygon.contains_point(&t.centroid()))
            .collect();

        log::debug!(
            "Tesselated polygon ({} boundary, {} interior sites): kept {} of {} triangles",
            boundary,
            sampled,
            triangles.len(),
            total
        );
        Ok(triangles)
    }
}

impl PolygonTesselator for GridTesselator {
    fn tesselate(&self, polygon: &Polygon2) -> GeometryResult<Vec<Triangle2>> {
        let mut triangulator = DelaunayTriangulation::with_root_size(self.root_size)?;
        self.tesselate_with(polygon, &mut triangulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> Polygon2 {
        Polygon2::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ])
    }

    #[test]
    fn test_invalid_sampling() {
        assert!(matches!(
            GridTesselator::global(0.0),
            Err(GeometryError::InvalidConfiguration(_))
        ));
        assert!(GridTesselator::global(f32::NAN).is_err());
        assert!(GridTesselator::local(0).is_err());
        assert!(GridTesselator::local(4).unwrap().with_root_size(-1.0).is_err());
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        let tess = GridTesselator::local(4).unwrap();
        let line = Polygon2::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
        assert!(matches!(
            tess.tesselate(&line),
            Err(GeometryError::DegenerateInput(_))
        ));
        assert!(tess.tesselate(&Polygon2::new(Vec::new())).is_err());
    }

    #[test]
    fn test_local_grid_points() {
        let tess = GridTesselator::local(4).unwrap();
        let poly = Polygon2::new(vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(9.0, 1.0),
            Vec2::new(9.0, 9.0),
            Vec2::new(1.0, 9.0),
        ]);
        let points = tess.inside_points(&poly);
        // rows/columns at 1, 3, 5, 7; the first row and column sit on the boundary
        assert!(points.contains(&Vec2::new(3.0, 3.0)));
        assert!(points.contains(&Vec2::new(7.0, 7.0)));
        assert!(points.len() <= 16);
        assert!(points.len() >= 9);
        assert!(points.iter().all(|p| poly.contains_point(p)));
    }

    #[test]
    fn test_local_grid_scales_with_polygon() {
        let tess = GridTesselator::local(5).unwrap();
        let small = tess.inside_points(&square(0.01)).len();
        let large = tess.inside_points(&square(1000.0)).len();
        assert_eq!(small, large);
        assert!(small > 0);
    }

    #[test]
    fn test_global_grid_is_world_aligned() {
        let tess = GridTesselator::global(2.0).unwrap();
        let poly = Polygon2::new(vec![
            Vec2::new(0.5, 0.5),
            Vec2::new(9.5, 0.5),
            Vec2::new(9.5, 9.5),
            Vec2::new(0.5, 9.5),
        ]);
        let points = tess.inside_points(&poly);
        assert!(!points.is_empty());
        for p in &points {
            assert_eq!(p.x % 2.0, 0.0);
            assert_eq!(p.y % 2.0, 0.0);
        }
    }

    #[test]
    fn test_global_grid_skips_tiny_polygons() {
        let tess = GridTesselator::global(10.0).unwrap();
        let tiny = Polygon2::new(vec![
            Vec2::new(3.1, 3.1),
            Vec2::new(3.4, 3.1),
            Vec2::new(3.3, 3.4),
        ]);
        assert!(tess.inside_points(&tiny).is_empty());

        // falls back to the boundary triangle alone
        let triangles = tess.tesselate(&tiny).unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_concave_polygon_triangles_stay_inside() {
        let l_shape = Polygon2::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 4.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(4.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let triangles = GridTesselator::local(6).unwrap().tesselate(&l_shape).unwrap();
        assert!(!triangles.is_empty());
        for t in &triangles {
            assert!(l_shape.contains_point(&t.centroid()));
        }
        let area: f32 = triangles.iter().map(|t| t.signed_area().abs()).sum();
        assert!(area <= 64.0 + 1e-3);
    }

    #[test]
    fn test_custom_triangulator_root() {
        let tess = GridTesselator::local(3).unwrap().with_root_size(50.0).unwrap();
        let mut dt = DelaunayTriangulation::with_root_size(tess.root_size()).unwrap();
        let triangles = tess.tesselate_with(&square(10.0), &mut dt).unwrap();
        assert!(!triangles.is_empty());
        assert!(triangles
            .iter()
            .flat_map(|t| t.vertices())
            .all(|v| v.x.abs() != 50.0 && v.y.abs() != 50.0));
    }
}
