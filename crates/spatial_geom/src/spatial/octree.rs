//! Point octree spatial partitioning structure
//!
//! Recursively divides a cube into 8 octants down to a minimum node size.
//! Points are only stored in leaves, i.e. nodes whose half-size has reached
//! [`OctreeConfig::min_node_size`]. Child octants are created lazily on the
//! first point that lands in them, and can optionally be pruned again when
//! removals leave a branch empty.
//!
//! Nodes live in a slot map; a node refers to its parent and children
//! through [`NodeId`] handles.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::collections::{NodeId, SlotMap};
use crate::foundation::math::{utils, Vec3};
use crate::geometry::{Aabb, Sphere};

/// Configuration for octree behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Half-size at or below which a node stores points instead of subdividing
    pub min_node_size: f32,

    /// Prune empty branches as soon as a removal empties a leaf
    pub auto_reduce: bool,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            min_node_size: 4.0,
            auto_reduce: false,
        }
    }
}

impl OctreeConfig {
    /// Set the leaf half-size threshold
    pub fn with_min_node_size(mut self, min_node_size: f32) -> Self {
        self.min_node_size = min_node_size;
        self
    }

    /// Enable or disable branch reduction on removal
    pub fn with_auto_reduce(mut self, enabled: bool) -> Self {
        self.auto_reduce = enabled;
        self
    }

    /// Validate the configuration
    ///
    /// A non-positive threshold would make subdivision recurse until float
    /// precision runs out.
    pub fn validate(&self) -> GeometryResult<()> {
        if !(self.min_node_size.is_finite() && self.min_node_size > 0.0) {
            return Err(GeometryError::invalid(format!(
                "octree min_node_size must be finite and > 0, got {}",
                self.min_node_size
            )));
        }
        Ok(())
    }
}

/// Content of an octree node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Nothing stored below this node
    Empty,
    /// Leaf holding points directly
    Leaf(Vec<Vec3>),
    /// Interior node; `None` slots are octants never populated (or pruned)
    Branch([Option<NodeId>; 8]),
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    offset: Vec3,
    half_size: f32,
    depth: u32,
    parent: Option<NodeId>,
    state: NodeState,
    // min_node_size in force when the node became a leaf
    leaf_threshold: f32,
}

impl OctreeNode {
    fn new(offset: Vec3, half_size: f32, depth: u32, parent: Option<NodeId>) -> Self {
        Self {
            offset,
            half_size,
            depth,
            parent,
            state: NodeState::Empty,
            leaf_threshold: 0.0,
        }
    }

    /// Minimum corner of the node cube
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Half of the cube edge length
    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// Cube edge length
    pub fn size(&self) -> f32 {
        self.half_size * 2.0
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Parent handle, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Node content
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    /// Center of the node cube
    pub fn center(&self) -> Vec3 {
        self.offset.add_scalar(self.half_size)
    }

    /// World-space bounds of the node cube
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.center(), Vec3::repeat(self.half_size))
    }

    /// Check whether a point lies inside the node cube (faces inclusive)
    pub fn contains_point(&self, p: &Vec3) -> bool {
        self.bounds().contains_point(p)
    }

    /// Points stored directly in this node (empty unless it is a leaf)
    pub fn points(&self) -> &[Vec3] {
        match &self.state {
            NodeState::Leaf(points) => points,
            _ => &[],
        }
    }

    /// Child slots, all `None` unless this node is a branch
    pub fn children(&self) -> [Option<NodeId>; 8] {
        match &self.state {
            NodeState::Branch(children) => *children,
            _ => [None; 8],
        }
    }

    /// Number of instantiated children
    pub fn num_children(&self) -> usize {
        self.children().iter().flatten().count()
    }

    /// Check if this node stores points
    pub fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf(_))
    }

    /// Check if this node has children
    pub fn is_branch(&self) -> bool {
        matches!(self.state, NodeState::Branch(_))
    }

    /// Get the octant index (0-7) for a point relative to this node
    ///
    /// Octant layout:
    /// bit 0 set: x in the upper half, bit 1: y upper half, bit 2: z upper half.
    pub fn octant_id(&self, p: &Vec3) -> usize {
        let local = p - self.offset;
        let h = self.half_size;
        let x_bit = usize::from(local.x >= h);
        let y_bit = usize::from(local.y >= h);
        let z_bit = usize::from(local.z >= h);
        (z_bit << 2) | (y_bit << 1) | x_bit
    }

    /// Minimum corner of the child cube for an octant
    fn child_offset(&self, octant: usize) -> Vec3 {
        let h = self.half_size;
        self.offset
            + Vec3::new(
                if octant & 1 != 0 { h } else { 0.0 },
                if octant & 2 != 0 { h } else { 0.0 },
                if octant & 4 != 0 { h } else { 0.0 },
            )
    }
}

/// Octree storing owned copies of 3D points
///
/// Removal matches points by exact coordinate equality. Duplicate points are
/// allowed and each copy is removed individually.
#[derive(Debug, Clone)]
pub struct PointOctree {
    nodes: SlotMap<NodeId, OctreeNode>,
    root: NodeId,
    config: OctreeConfig,
    num_points: usize,
}

impl PointOctree {
    /// Create an octree covering the cube `[origin, origin + size]` with the default config
    pub fn new(origin: Vec3, size: f32) -> GeometryResult<Self> {
        Self::with_config(origin, size, OctreeConfig::default())
    }

    /// Create an octree covering the cube `[origin, origin + size]`
    pub fn with_config(origin: Vec3, size: f32, config: OctreeConfig) -> GeometryResult<Self> {
        config.validate()?;
        if !(size.is_finite() && size > 0.0) {
            return Err(GeometryError::invalid(format!(
                "octree size must be finite and > 0, got {size}"
            )));
        }
        if !utils::is_finite3(&origin) {
            return Err(GeometryError::invalid("octree origin must be finite"));
        }

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(OctreeNode::new(origin, size * 0.5, 0, None));
        log::debug!(
            "Created point octree at {:?} with size {} (min node size {})",
            origin,
            size,
            config.min_node_size
        );
        Ok(Self {
            nodes,
            root,
            config,
            num_points: 0,
        })
    }

    /// Root node handle
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle
    pub fn node(&self, id: NodeId) -> Option<&OctreeNode> {
        self.nodes.get(id)
    }

    /// Root node
    pub fn root_node(&self) -> &OctreeNode {
        &self.nodes[self.root]
    }

    /// Current configuration
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// True when no points are stored
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Number of instantiated nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Enable or disable branch reduction on removal
    pub fn set_auto_reduce(&mut self, enabled: bool) {
        self.config.auto_reduce = enabled;
    }

    /// Change the leaf threshold
    ///
    /// Only affects nodes that are still empty; existing leaves and branches
    /// keep their role.
    pub fn set_min_node_size(&mut self, min_node_size: f32) -> GeometryResult<()> {
        let candidate = self.config.with_min_node_size(min_node_size);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Check whether a point lies inside the root cube
    pub fn contains_point(&self, p: &Vec3) -> bool {
        self.root_node().contains_point(p)
    }

    /// Octant a point falls into relative to the given node
    pub fn octant_id(&self, node: NodeId, p: &Vec3) -> Option<usize> {
        self.nodes.get(node).map(|n| n.octant_id(p))
    }

    /// Insert a point
    ///
    /// Returns `false` if the point lies outside the root cube.
    pub fn add_point(&mut self, p: Vec3) -> bool {
        if !self.contains_point(&p) {
            log::trace!("Rejected point {:?} outside octree bounds", p);
            return false;
        }

        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            let becomes_leaf = match node.state {
                NodeState::Leaf(_) => true,
                NodeState::Branch(_) => false,
                NodeState::Empty => node.half_size <= self.config.min_node_size,
            };

            if becomes_leaf {
                let threshold = self.config.min_node_size;
                let node = &mut self.nodes[current];
                match &mut node.state {
                    NodeState::Leaf(points) => points.push(p),
                    state => {
                        *state = NodeState::Leaf(vec![p]);
                        node.leaf_threshold = threshold;
                    }
                }
                self.num_points += 1;
                return true;
            }

            let octant = node.octant_id(&p);
            let existing = match &node.state {
                NodeState::Branch(children) => children[octant],
                _ => None,
            };
            current = match existing {
                Some(child) => child,
                None => self.create_child(current, octant),
            };
        }
    }

    /// Insert every point; returns `true` only if all of them were inserted
    ///
    /// Points that were accepted stay in the tree even when others fail.
    pub fn add_all(&mut self, points: impl IntoIterator<Item = Vec3>) -> bool {
        points
            .into_iter()
            .fold(true, |added_all, p| self.add_point(p) & added_all)
    }

    fn create_child(&mut self, parent: NodeId, octant: usize) -> NodeId {
        let parent_node = &self.nodes[parent];
        let child = OctreeNode::new(
            parent_node.child_offset(octant),
            parent_node.half_size * 0.5,
            parent_node.depth + 1,
            Some(parent),
        );
        let child_id = self.nodes.insert(child);

        let parent_node = &mut self.nodes[parent];
        match &mut parent_node.state {
            NodeState::Branch(children) => children[octant] = Some(child_id),
            state => {
                debug_assert!(
                    matches!(state, NodeState::Empty),
                    "octree leaf asked to grow children"
                );
                let mut children = [None; 8];
                children[octant] = Some(child_id);
                *state = NodeState::Branch(children);
            }
        }
        log::trace!("Created octree child {} at depth {}", octant, self.nodes[child_id].depth);
        child_id
    }

    /// Find the leaf whose cube contains the point
    ///
    /// Returns `None` if the point is outside the tree or no leaf has been
    /// created along its descent path.
    pub fn leaf_for_point(&self, p: &Vec3) -> Option<NodeId> {
        if !self.contains_point(p) {
            return None;
        }
        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            match &node.state {
                NodeState::Empty => return None,
                NodeState::Leaf(_) => return Some(current),
                NodeState::Branch(children) => current = children[node.octant_id(p)]?,
            }
        }
    }

    /// Remove one stored instance of a point
    ///
    /// Returns `false` if no equal point is stored.
    pub fn remove(&mut self, p: &Vec3) -> bool {
        let Some(leaf) = self.leaf_for_point(p) else {
            return false;
        };

        let now_empty = match &mut self.nodes[leaf].state {
            NodeState::Leaf(points) => match points.iter().position(|q| q == p) {
                Some(index) => {
                    points.swap_remove(index);
                    points.is_empty()
                }
                None => return false,
            },
            _ => return false,
        };

        self.num_points -= 1;
        if self.config.auto_reduce && now_empty {
            self.reduce_branch(leaf);
        }
        true
    }

    /// Remove every listed point, returning how many were found
    pub fn remove_all<'a>(&mut self, points: impl IntoIterator<Item = &'a Vec3>) -> usize {
        points.into_iter().filter(|p| self.remove(p)).count()
    }

    /// Collapse empty structure upward starting at `start`
    ///
    /// Each visited node drops empty leaf storage and frees child subtrees
    /// holding no points. The walk stops at the first node that still has
    /// content, or at the root.
    fn reduce_branch(&mut self, start: NodeId) {
        let mut freed = 0;
        let mut current = Some(start);

        while let Some(id) = current {
            let state = std::mem::replace(&mut self.nodes[id].state, NodeState::Empty);
            let reduced = match state {
                NodeState::Leaf(points) if points.is_empty() => NodeState::Empty,
                NodeState::Branch(mut children) => {
                    for slot in &mut children {
                        if let Some(child) = *slot {
                            if self.subtree_is_empty(child) {
                                freed += self.free_subtree(child);
                                *slot = None;
                            }
                        }
                    }
                    if children.iter().all(Option::is_none) {
                        NodeState::Empty
                    } else {
                        NodeState::Branch(children)
                    }
                }
                other => other,
            };

            let node = &mut self.nodes[id];
            let has_content = !matches!(reduced, NodeState::Empty);
            node.state = reduced;
            if has_content {
                break;
            }
            current = node.parent;
        }

        if freed > 0 {
            log::debug!("Octree reduction freed {} node(s)", freed);
        }
    }

    fn subtree_is_empty(&self, id: NodeId) -> bool {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match &self.nodes[id].state {
                NodeState::Empty => {}
                NodeState::Leaf(points) => {
                    if !points.is_empty() {
                        return false;
                    }
                }
                NodeState::Branch(children) => stack.extend(children.iter().flatten()),
            }
        }
        true
    }

    /// Remove a node and all its descendants from the arena
    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                freed += 1;
                if let NodeState::Branch(children) = node.state {
                    stack.extend(children.iter().flatten());
                }
            }
        }
        freed
    }

    /// All points inside (or on) the given box
    pub fn points_within_box(&self, query: &Aabb) -> Vec<Vec3> {
        let mut results = Vec::new();
        self.collect_points(
            self.root,
            &|node: &OctreeNode| node.bounds().intersects(query),
            &|p: &Vec3| query.contains_point(p),
            &mut results,
        );
        results
    }

    /// All points inside (or on) the given sphere
    pub fn points_within_sphere(&self, sphere: &Sphere) -> Vec<Vec3> {
        let mut results = Vec::new();
        self.collect_points(
            self.root,
            &|node: &OctreeNode| node.bounds().intersects_sphere(sphere),
            &|p: &Vec3| sphere.contains_point(p),
            &mut results,
        );
        results
    }

    /// All points within `radius` of `center`
    pub fn points_within_radius(&self, center: Vec3, radius: f32) -> Vec<Vec3> {
        self.points_within_sphere(&Sphere::new(center, radius))
    }

    /// Every stored point
    pub fn points(&self) -> Vec<Vec3> {
        let mut results = Vec::with_capacity(self.num_points);
        self.collect_points(self.root, &|_: &OctreeNode| true, &|_: &Vec3| true, &mut results);
        results
    }

    fn collect_points(
        &self,
        id: NodeId,
        node_test: &impl Fn(&OctreeNode) -> bool,
        point_test: &impl Fn(&Vec3) -> bool,
        results: &mut Vec<Vec3>,
    ) {
        let node = &self.nodes[id];
        if !node_test(node) {
            return;
        }
        match &node.state {
            NodeState::Empty => {}
            NodeState::Leaf(points) => {
                results.extend(points.iter().filter(|p| point_test(*p)).copied());
            }
            NodeState::Branch(children) => {
                for child in children.iter().flatten() {
                    self.collect_points(*child, node_test, point_test, results);
                }
            }
        }
    }

    /// Walk the tree and verify its bookkeeping
    ///
    /// Checks parent and depth links, that points only sit in nodes at the
    /// leaf size and that the stored point count matches the leaves.
    pub fn check_invariants(&self) -> GeometryResult<()> {
        let violation = |msg: String| Err(GeometryError::InvariantViolation(msg));
        let mut points = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                return violation(format!("dangling octree node {id:?}"));
            };
            match &node.state {
                NodeState::Empty => {}
                NodeState::Leaf(stored) => {
                    if node.half_size > node.leaf_threshold {
                        return violation(format!(
                            "octree leaf at depth {} is above the leaf size",
                            node.depth
                        ));
                    }
                    points += stored.len();
                }
                NodeState::Branch(children) => {
                    for &child in children.iter().flatten() {
                        let linked = self
                            .nodes
                            .get(child)
                            .is_some_and(|c| c.parent == Some(id) && c.depth == node.depth + 1);
                        if !linked {
                            return violation(format!("octree child {child:?} not linked to parent {id:?}"));
                        }
                        stack.push(child);
                    }
                }
            }
        }
        if points != self.num_points {
            return violation(format!(
                "octree leaves hold {points} points but counts {}",
                self.num_points
            ));
        }
        Ok(())
    }

    /// Remove every point and node below the root
    pub fn clear(&mut self) {
        let root = &self.nodes[self.root];
        let fresh = OctreeNode::new(root.offset, root.half_size, 0, None);
        self.nodes.clear();
        self.root = self.nodes.insert(fresh);
        self.num_points = 0;
        log::debug!("Cleared point octree");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(min_node_size: f32, auto_reduce: bool) -> PointOctree {
        let config = OctreeConfig::default()
            .with_min_node_size(min_node_size)
            .with_auto_reduce(auto_reduce);
        PointOctree::with_config(Vec3::zeros(), 100.0, config).unwrap()
    }

    #[test]
    fn test_octree_basic_insertion() {
        let mut octree = tree(4.0, false);
        assert!(octree.add_point(Vec3::new(10.0, 20.0, 30.0)));
        assert_eq!(octree.len(), 1);
        assert!(octree.root_node().is_branch());
    }

    #[test]
    fn test_rejects_points_outside_cube() {
        let mut octree = tree(4.0, false);
        assert!(!octree.add_point(Vec3::new(-0.1, 5.0, 5.0)));
        assert!(!octree.add_point(Vec3::new(5.0, 100.5, 5.0)));
        assert!(!octree.add_point(Vec3::new(f32::NAN, 5.0, 5.0)));
        // faces are inclusive
        assert!(octree.add_point(Vec3::new(100.0, 100.0, 100.0)));
        assert!(!octree.is_empty());
    }

    #[test]
    fn test_invalid_configuration() {
        let zero = OctreeConfig::default().with_min_node_size(0.0);
        assert!(matches!(
            PointOctree::with_config(Vec3::zeros(), 10.0, zero),
            Err(GeometryError::InvalidConfiguration(_))
        ));
        assert!(PointOctree::new(Vec3::zeros(), -1.0).is_err());
        assert!(PointOctree::new(Vec3::zeros(), f32::INFINITY).is_err());
        assert!(PointOctree::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0).is_err());

        let mut octree = tree(4.0, false);
        assert!(octree.set_min_node_size(-2.0).is_err());
        assert_eq!(octree.config().min_node_size, 4.0);
    }

    #[test]
    fn test_lowering_threshold_keeps_existing_leaves_valid() {
        let mut octree = tree(4.0, false);
        let a = Vec3::new(1.0, 1.0, 1.0);
        octree.add_point(a);
        let old_leaf = octree.leaf_for_point(&a).unwrap();

        octree.set_min_node_size(1.0).unwrap();
        octree.check_invariants().unwrap();

        // the old leaf still collects points; new octants subdivide further
        octree.add_point(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(octree.leaf_for_point(&Vec3::new(2.0, 2.0, 2.0)), Some(old_leaf));
        let b = Vec3::new(90.0, 90.0, 90.0);
        octree.add_point(b);
        let new_leaf = octree.node(octree.leaf_for_point(&b).unwrap()).unwrap();
        assert!(new_leaf.half_size() <= 1.0);
        octree.check_invariants().unwrap();
    }

    #[test]
    fn test_leaf_depth_follows_min_node_size() {
        // 100 -> half sizes 50, 25, 12.5, 6.25, 3.125
        let mut octree = tree(4.0, false);
        let p = Vec3::new(1.0, 1.0, 1.0);
        octree.add_point(p);
        let leaf = octree.leaf_for_point(&p).unwrap();
        let node = octree.node(leaf).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.depth(), 4);
        assert_eq!(node.half_size(), 3.125);
        assert_eq!(node.points(), &[p]);
    }

    #[test]
    fn test_root_is_leaf_when_small() {
        let mut octree = tree(50.0, false);
        assert!(octree.add_point(Vec3::new(3.0, 3.0, 3.0)));
        assert!(octree.root_node().is_leaf());
        assert_eq!(octree.node_count(), 1);
    }

    #[test]
    fn test_child_offsets_follow_octant_bits() {
        let mut octree = tree(10.0, false);
        octree.add_point(Vec3::new(75.0, 10.0, 80.0));
        let root = octree.root_node();
        assert_eq!(root.octant_id(&Vec3::new(75.0, 10.0, 80.0)), 0b101);
        let child = root.children()[0b101].unwrap();
        assert_eq!(octree.node(child).unwrap().offset(), Vec3::new(50.0, 0.0, 50.0));
        assert_eq!(root.num_children(), 1);
    }

    #[test]
    fn test_remove_point() {
        let mut octree = tree(4.0, false);
        let p = Vec3::new(12.0, 40.0, 3.0);
        octree.add_point(p);
        octree.add_point(p);
        assert!(octree.remove(&p));
        assert_eq!(octree.points(), vec![p]);
        assert!(octree.remove(&p));
        assert!(!octree.remove(&p));
        assert!(octree.is_empty());
        // without reduction the emptied leaf stays in place
        assert!(octree.leaf_for_point(&p).is_some());
    }

    #[test]
    fn test_remove_absent_point() {
        let mut octree = tree(4.0, false);
        octree.add_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(!octree.remove(&Vec3::new(1.5, 1.0, 1.0)));
        assert!(!octree.remove(&Vec3::new(90.0, 90.0, 90.0)));
        assert!(!octree.remove(&Vec3::new(500.0, 0.0, 0.0)));
        assert_eq!(octree.len(), 1);
    }

    #[test]
    fn test_auto_reduce_prunes_empty_branches() {
        let mut octree = tree(4.0, true);
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(99.0, 99.0, 99.0);
        octree.add_point(a);
        octree.add_point(b);
        let populated = octree.node_count();

        assert!(octree.remove(&b));
        assert!(octree.node_count() < populated);
        assert!(octree.leaf_for_point(&b).is_none());
        assert_eq!(octree.root_node().num_children(), 1);

        assert!(octree.remove(&a));
        assert_eq!(octree.node_count(), 1);
        assert_eq!(octree.root_node().state(), &NodeState::Empty);

        // tree is reusable after full reduction
        assert!(octree.add_point(a));
        assert_eq!(octree.points(), vec![a]);
    }

    #[test]
    fn test_reduction_keeps_sibling_content() {
        let mut octree = tree(4.0, true);
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(2.0, 2.0, 2.0);
        let c = Vec3::new(7.0, 1.0, 1.0);
        octree.add_all([a, b, c]);
        assert!(octree.remove(&c));
        assert!(octree.remove(&a));
        assert_eq!(octree.points(), vec![b]);
        assert!(octree.leaf_for_point(&b).is_some());
    }

    #[test]
    fn test_add_all_reports_partial_failure() {
        let mut octree = tree(4.0, false);
        let added = octree.add_all([
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(200.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        ]);
        assert!(!added);
        assert_eq!(octree.len(), 2);
    }

    #[test]
    fn test_sphere_and_box_queries() {
        let mut octree = tree(4.0, false);
        octree.add_all([
            Vec3::new(10.0, 10.0, 10.0),
            Vec3::new(15.0, 10.0, 10.0),
            Vec3::new(60.0, 10.0, 10.0),
        ]);

        let near = octree.points_within_radius(Vec3::new(10.0, 10.0, 10.0), 6.0);
        assert_eq!(near.len(), 2);

        let boxed = octree.points_within_box(&Aabb::new(
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(70.0, 20.0, 20.0),
        ));
        assert_eq!(boxed, vec![Vec3::new(60.0, 10.0, 10.0)]);

        let none = octree.points_within_sphere(&Sphere::new(Vec3::new(90.0, 90.0, 90.0), 5.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut octree = tree(4.0, false);
        octree.add_all([Vec3::new(1.0, 2.0, 3.0), Vec3::new(70.0, 2.0, 3.0)]);
        octree.clear();
        assert!(octree.is_empty());
        assert_eq!(octree.node_count(), 1);
        assert!(octree.points().is_empty());
        assert_eq!(octree.root_node().offset(), Vec3::zeros());
        assert_eq!(octree.root_node().size(), 100.0);
    }
}
