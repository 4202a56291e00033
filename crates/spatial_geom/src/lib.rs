//! # Spatial Geom
//!
//! Point indexing and polygon tesselation for 2D and 3D geometry.
//!
//! ## Features
//!
//! - **Point Octree**: 3D points bucketed into leaves of a minimum size, with
//!   box and sphere queries and optional pruning on removal
//! - **Point Quadtree**: one point per leaf, split on collision and
//!   rebalanced on removal, with radius/rectangle queries and pre-order walks
//! - **Spatial Bins**: uniform 1D buckets over any item type
//! - **Grid Tesselation**: polygon triangulation from a sampled interior grid
//!   on top of an incremental Delaunay triangulation
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_geom::prelude::*;
//!
//! let mut octree = PointOctree::new(Vec3::zeros(), 100.0).unwrap();
//! octree.add_point(Vec3::new(10.0, 20.0, 30.0));
//! assert_eq!(octree.points_within_radius(Vec3::new(10.0, 20.0, 30.0), 1.0).len(), 1);
//!
//! let square = Polygon2::new(vec![
//!     Vec2::new(0.0, 0.0),
//!     Vec2::new(10.0, 0.0),
//!     Vec2::new(10.0, 10.0),
//!     Vec2::new(0.0, 10.0),
//! ]);
//! let triangles = GridTesselator::local(4).unwrap().tesselate(&square).unwrap();
//! assert!(!triangles.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod error;
pub mod foundation;
pub mod geometry;
pub mod spatial;
pub mod tesselation;

pub use error::{GeometryError, GeometryResult};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{BinsConfig, Config, SpatialConfig, TesselatorConfig},
        error::{GeometryError, GeometryResult},
        foundation::math::{Vec2, Vec3},
        geometry::{Aabb, Polygon2, Rect, Sphere, Triangle2},
        spatial::{
            LeafMatch, OctreeConfig, PointOctree, PointQuadtree, QuadtreeConfig, SpatialBins,
            SpatialIndex,
        },
        tesselation::{DelaunayTriangulation, GridSampling, GridTesselator, PolygonTesselator, Triangulator},
    };
}
