//! Spatial partitioning data structures
//!
//! Provides point indexing in 1D (uniform bins), 2D (quadtree) and
//! 3D (octree) for proximity and region queries.

mod bins;
mod octree;
mod quadtree;
mod spatial_index;

#[cfg(test)]
mod tests;

pub use bins::{CoordinateExtractor, SpatialBins};
pub use octree::{NodeState, OctreeConfig, OctreeNode, PointOctree};
pub use quadtree::{
    LeafMatch, PointQuadtree, QuadNode, QuadNodeType, QuadState, QuadtreeConfig, QuadtreeVisitor,
};
pub use spatial_index::SpatialIndex;
