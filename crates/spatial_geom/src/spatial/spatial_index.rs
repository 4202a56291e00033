//! Common interface over the point indexes
//!
//! Lets callers swap an octree, quadtree or bin index without changing the
//! code that feeds and queries it. Each structure also exposes a richer
//! inherent API; the trait only covers the shared subset.

use std::hash::Hash;

use crate::foundation::math::{Vec2, Vec3};
use crate::spatial::{CoordinateExtractor, PointOctree, PointQuadtree, SpatialBins};

/// Shared operations of the spatial indexes
pub trait SpatialIndex<T> {
    /// Insert an item, returning whether it was accepted
    fn index(&mut self, item: T) -> bool;

    /// Remove an item, returning whether it was found
    fn unindex(&mut self, item: &T) -> bool;

    /// Check whether an item is indexed
    fn is_indexed(&self, item: &T) -> bool;

    /// Replace `old` with `new`, returning whether `new` was accepted
    fn reindex(&mut self, old: &T, new: T) -> bool {
        self.unindex(old);
        self.index(new)
    }

    /// Items near `item`
    ///
    /// Exactness depends on the structure; see each implementation.
    fn items_within_radius(&self, item: &T, radius: f32) -> Vec<T>;

    /// Number of indexed items
    fn size(&self) -> usize;

    /// Remove every item
    fn clear(&mut self);
}

impl SpatialIndex<Vec3> for PointOctree {
    fn index(&mut self, item: Vec3) -> bool {
        self.add_point(item)
    }

    fn unindex(&mut self, item: &Vec3) -> bool {
        self.remove(item)
    }

    fn is_indexed(&self, item: &Vec3) -> bool {
        self.leaf_for_point(item)
            .and_then(|leaf| self.node(leaf))
            .is_some_and(|node| node.points().contains(item))
    }

    fn items_within_radius(&self, item: &Vec3, radius: f32) -> Vec<Vec3> {
        self.points_within_radius(*item, radius)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        PointOctree::clear(self);
    }
}

impl SpatialIndex<Vec2> for PointQuadtree {
    fn index(&mut self, item: Vec2) -> bool {
        PointQuadtree::index(self, item)
    }

    fn unindex(&mut self, item: &Vec2) -> bool {
        PointQuadtree::unindex(self, item)
    }

    fn is_indexed(&self, item: &Vec2) -> bool {
        PointQuadtree::is_indexed(self, item)
    }

    fn reindex(&mut self, old: &Vec2, new: Vec2) -> bool {
        PointQuadtree::reindex(self, old, new)
    }

    fn items_within_radius(&self, item: &Vec2, radius: f32) -> Vec<Vec2> {
        PointQuadtree::items_within_radius(self, item, radius)
    }

    fn size(&self) -> usize {
        PointQuadtree::size(self)
    }

    fn clear(&mut self) {
        PointQuadtree::clear(self);
    }
}

/// Bin-based radius queries are the 1D window pre-filter of
/// [`SpatialBins::items_within`], not an exact distance test.
impl<T, E> SpatialIndex<T> for SpatialBins<T, E>
where
    T: Eq + Hash + Clone,
    E: CoordinateExtractor<T>,
{
    fn index(&mut self, item: T) -> bool {
        if SpatialBins::is_indexed(self, &item) {
            return false;
        }
        SpatialBins::index(self, item);
        true
    }

    fn unindex(&mut self, item: &T) -> bool {
        SpatialBins::unindex(self, item)
    }

    fn is_indexed(&self, item: &T) -> bool {
        SpatialBins::is_indexed(self, item)
    }

    fn items_within_radius(&self, item: &T, radius: f32) -> Vec<T> {
        let pos = self.coordinate_of(item);
        self.items_within(pos, radius)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        SpatialBins::clear(self);
    }
}
