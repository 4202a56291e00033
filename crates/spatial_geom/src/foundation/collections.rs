//! Arena collections backing the tree structures and the triangulation
//!
//! Tree nodes and triangulation faces live in slot maps and refer to each
//! other through keys, so back-references never own their target.

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node of a [`PointOctree`](crate::spatial::PointOctree)
    pub struct NodeId;

    /// Handle to a node of a [`PointQuadtree`](crate::spatial::PointQuadtree)
    pub struct QuadNodeId;

    /// Handle to a face of a [`DelaunayTriangulation`](crate::tesselation::DelaunayTriangulation)
    pub struct FaceId;
}
