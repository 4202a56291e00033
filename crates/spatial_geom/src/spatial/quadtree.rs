//! Point quadtree (one point per leaf)
//!
//! A region quadtree where each leaf holds exactly one point. Inserting into
//! an occupied leaf splits it into four quadrants and pushes both points
//! down until they are separated. Removal rebalances upward, collapsing
//! branches that are left with at most a single leaf.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::collections::{QuadNodeId, SlotMap};
use crate::foundation::math::Vec2;
use crate::geometry::Rect;

/// How a leaf decides it holds the point being looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafMatch {
    /// The leaf value must equal the searched point
    #[default]
    QueryPoint,
    /// The leaf value must equal the leaf rectangle's top-left corner
    ///
    /// Legacy rule kept for compatibility with data sets built against it.
    /// Lookups and removals only succeed for points sitting exactly on
    /// their leaf corner.
    NodeCorner,
}

/// Configuration for quadtree behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// Maximum depth a split may create; deeper inserts are rejected
    pub max_depth: u32,

    /// Leaf matching rule used by lookups and removal
    pub leaf_match: LeafMatch,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 48,
            leaf_match: LeafMatch::QueryPoint,
        }
    }
}

impl QuadtreeConfig {
    /// Set the maximum split depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the leaf matching rule
    pub fn with_leaf_match(mut self, leaf_match: LeafMatch) -> Self {
        self.leaf_match = leaf_match;
        self
    }
}

/// Kind of a quadtree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadNodeType {
    /// No point stored at or below this node
    Empty,
    /// Holds exactly one point
    Leaf,
    /// Has exactly four children
    Branch,
}

/// Content of a quadtree node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadState {
    /// No point stored
    Empty,
    /// Holds exactly one point
    Leaf(Vec2),
    /// Children in NW, NE, SW, SE order
    Branch([QuadNodeId; 4]),
}

/// Single node of a [`PointQuadtree`]
#[derive(Debug, Clone)]
pub struct QuadNode {
    rect: Rect,
    parent: Option<QuadNodeId>,
    depth: u32,
    state: QuadState,
}

impl QuadNode {
    fn new(rect: Rect, parent: Option<QuadNodeId>, depth: u32) -> Self {
        Self {
            rect,
            parent,
            depth,
            state: QuadState::Empty,
        }
    }

    /// Region covered by the node
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Parent handle, `None` for the root
    pub fn parent(&self) -> Option<QuadNodeId> {
        self.parent
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Node content
    pub fn state(&self) -> &QuadState {
        &self.state
    }

    /// Node kind
    pub fn node_type(&self) -> QuadNodeType {
        match self.state {
            QuadState::Empty => QuadNodeType::Empty,
            QuadState::Leaf(_) => QuadNodeType::Leaf,
            QuadState::Branch(_) => QuadNodeType::Branch,
        }
    }

    /// The stored point, if this is a leaf
    pub fn value(&self) -> Option<Vec2> {
        match self.state {
            QuadState::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Children in NW, NE, SW, SE order, if this is a branch
    pub fn children(&self) -> Option<[QuadNodeId; 4]> {
        match self.state {
            QuadState::Branch(children) => Some(children),
            _ => None,
        }
    }

    /// Quadrant index (0 = NW, 1 = NE, 2 = SW, 3 = SE) for a point
    ///
    /// West is `x < mid`, north is `y < mid`.
    pub fn quadrant_for(&self, p: &Vec2) -> usize {
        let mid = self.rect.center();
        let east = usize::from(p.x >= mid.x);
        let south = usize::from(p.y >= mid.y);
        (south << 1) | east
    }
}

/// Visitor invoked by [`PointQuadtree::prewalk`]
pub trait QuadtreeVisitor {
    /// Called once per LEAF or BRANCH node, parents before children
    fn visit_node(&mut self, node: &QuadNode);
}

impl<F: FnMut(&QuadNode)> QuadtreeVisitor for F {
    fn visit_node(&mut self, node: &QuadNode) {
        self(node);
    }
}

/// Quadtree indexing 2D points, at most one per leaf
#[derive(Debug, Clone)]
pub struct PointQuadtree {
    nodes: SlotMap<QuadNodeId, QuadNode>,
    root: QuadNodeId,
    config: QuadtreeConfig,
    num_points: usize,
}

impl PointQuadtree {
    /// Create an empty quadtree covering the given rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> GeometryResult<Self> {
        Self::with_config(Rect::new(x, y, width, height), QuadtreeConfig::default())
    }

    /// Create an empty quadtree with an explicit configuration
    pub fn with_config(rect: Rect, config: QuadtreeConfig) -> GeometryResult<Self> {
        let valid = [rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|v| v.is_finite())
            && rect.width > 0.0
            && rect.height > 0.0;
        if !valid {
            return Err(GeometryError::invalid(format!(
                "quadtree rectangle must be finite with positive size, got {rect:?}"
            )));
        }

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(QuadNode::new(rect, None, 0));
        Ok(Self {
            nodes,
            root,
            config,
            num_points: 0,
        })
    }

    /// Root node handle
    pub fn root(&self) -> QuadNodeId {
        self.root
    }

    /// Look up a node by handle
    pub fn node(&self, id: QuadNodeId) -> Option<&QuadNode> {
        self.nodes.get(id)
    }

    /// Kind of the node behind a handle
    pub fn node_type(&self, id: QuadNodeId) -> Option<QuadNodeType> {
        self.nodes.get(id).map(QuadNode::node_type)
    }

    /// Region covered by the whole tree
    pub fn bounds(&self) -> &Rect {
        &self.nodes[self.root].rect
    }

    /// Current configuration
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Number of indexed points
    pub fn size(&self) -> usize {
        self.num_points
    }

    /// True when no points are indexed
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Number of live nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a point
    ///
    /// Returns `false` if the point is outside the tree, already indexed at
    /// the same coordinates, or could only be separated from its neighbour
    /// by splitting beyond [`QuadtreeConfig::max_depth`].
    pub fn index(&mut self, p: Vec2) -> bool {
        if !self.nodes[self.root].rect.contains_point(&p) {
            log::trace!("Rejected point {:?} outside quadtree bounds", p);
            return false;
        }
        if self.insert_below(self.root, p) {
            self.num_points += 1;
            true
        } else {
            false
        }
    }

    fn insert_below(&mut self, start: QuadNodeId, p: Vec2) -> bool {
        let mut current = start;
        loop {
            let node = &self.nodes[current];
            match node.state {
                QuadState::Empty => {
                    self.nodes[current].state = QuadState::Leaf(p);
                    return true;
                }
                QuadState::Leaf(value) => {
                    if value == p {
                        return false;
                    }
                    if node.depth >= self.config.max_depth {
                        log::warn!(
                            "Quadtree cannot separate {:?} from {:?} within depth {}",
                            p,
                            value,
                            self.config.max_depth
                        );
                        // undo splits made on the way down that now hold a single leaf
                        if let Some(parent) = self.nodes[current].parent {
                            self.balance(parent);
                        }
                        return false;
                    }
                    self.split(current);
                }
                QuadState::Branch(children) => {
                    current = children[node.quadrant_for(&p)];
                }
            }
        }
    }

    /// Turn a leaf into a branch, pushing its point into the matching child
    fn split(&mut self, id: QuadNodeId) {
        let node = &self.nodes[id];
        let QuadState::Leaf(old_value) = node.state else {
            return;
        };
        let rect = node.rect;
        let depth = node.depth + 1;

        let quadrants = rect.quadrants();
        let children = quadrants.map(|r| self.nodes.insert(QuadNode::new(r, Some(id), depth)));
        let node = &mut self.nodes[id];
        node.state = QuadState::Branch(children);
        let target = children[node.quadrant_for(&old_value)];
        self.nodes[target].state = QuadState::Leaf(old_value);
        log::trace!("Split quadtree node at depth {} ({:?})", depth - 1, rect);
    }

    /// Find the leaf holding a point
    ///
    /// Descends by quadrant and applies the configured [`LeafMatch`] rule
    /// at the leaf.
    pub fn find_node(&self, p: &Vec2) -> Option<QuadNodeId> {
        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            match node.state {
                QuadState::Empty => return None,
                QuadState::Leaf(value) => {
                    let matched = match self.config.leaf_match {
                        LeafMatch::QueryPoint => value == *p,
                        LeafMatch::NodeCorner => value.x == node.rect.x && value.y == node.rect.y,
                    };
                    return matched.then_some(current);
                }
                QuadState::Branch(children) => current = children[node.quadrant_for(p)],
            }
        }
    }

    /// Check whether a point is indexed
    pub fn is_indexed(&self, p: &Vec2) -> bool {
        self.find_node(p).is_some()
    }

    /// Remove a point, rebalancing the tree above it
    pub fn unindex(&mut self, p: &Vec2) -> bool {
        let Some(id) = self.find_node(p) else {
            return false;
        };
        self.nodes[id].state = QuadState::Empty;
        self.num_points -= 1;
        if let Some(parent) = self.nodes[id].parent {
            self.balance(parent);
        }
        true
    }

    /// Move a point: unindex `p`, then index `q`
    ///
    /// Returns whether `q` was inserted, regardless of whether `p` was found.
    pub fn reindex(&mut self, p: &Vec2, q: Vec2) -> bool {
        self.unindex(p);
        self.index(q)
    }

    /// Collapse branches left with at most one leaf, walking upward
    ///
    /// A branch becomes EMPTY when all children are empty, or adopts the
    /// value of its single non-empty child when that child is a leaf. In
    /// every other case the walk stops.
    fn balance(&mut self, start: QuadNodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let QuadState::Branch(children) = self.nodes[id].state else {
                current = self.nodes[id].parent;
                continue;
            };

            let mut occupied = children
                .iter()
                .filter(|child| self.nodes[**child].state != QuadState::Empty);
            let only = occupied.next().copied();
            if occupied.next().is_some() {
                break;
            }

            let collapsed = match only.map(|child| self.nodes[child].state) {
                None => QuadState::Empty,
                Some(QuadState::Leaf(value)) => QuadState::Leaf(value),
                Some(_) => break,
            };

            for child in children {
                self.nodes.remove(child);
            }
            let node = &mut self.nodes[id];
            node.state = collapsed;
            log::trace!("Collapsed quadtree branch at depth {} to {:?}", node.depth, node.node_type());
            current = node.parent;
        }
    }

    /// Points strictly closer than `radius` to `p`
    pub fn items_within_radius(&self, p: &Vec2, radius: f32) -> Vec<Vec2> {
        let mut results = Vec::new();
        let radius_sq = radius * radius;
        self.collect(
            self.root,
            &|rect: &Rect| rect.intersects_circle(p, radius),
            &|value: &Vec2| (value - p).magnitude_squared() < radius_sq,
            &mut results,
        );
        results
    }

    /// Points inside the query rectangle (using its containment rule)
    pub fn items_within_rect(&self, bounds: &Rect) -> Vec<Vec2> {
        let mut results = Vec::new();
        self.collect(
            self.root,
            &|rect: &Rect| bounds.intersects_rect(rect),
            &|value: &Vec2| bounds.contains_point(value),
            &mut results,
        );
        results
    }

    /// Every indexed point
    pub fn items(&self) -> Vec<Vec2> {
        let mut results = Vec::with_capacity(self.num_points);
        self.collect(self.root, &|_: &Rect| true, &|_: &Vec2| true, &mut results);
        results
    }

    fn collect(
        &self,
        id: QuadNodeId,
        node_test: &impl Fn(&Rect) -> bool,
        point_test: &impl Fn(&Vec2) -> bool,
        results: &mut Vec<Vec2>,
    ) {
        let node = &self.nodes[id];
        if !node_test(&node.rect) {
            return;
        }
        match node.state {
            QuadState::Empty => {}
            QuadState::Leaf(value) => {
                if point_test(&value) {
                    results.push(value);
                }
            }
            QuadState::Branch(children) => {
                for child in children {
                    self.collect(child, node_test, point_test, results);
                }
            }
        }
    }

    /// Pre-order traversal over LEAF and BRANCH nodes
    ///
    /// Children are visited in NW, NE, SW, SE order. EMPTY nodes are skipped.
    pub fn prewalk(&self, visitor: &mut impl QuadtreeVisitor) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            match node.state {
                QuadState::Empty => {}
                QuadState::Leaf(_) => visitor.visit_node(node),
                QuadState::Branch(children) => {
                    visitor.visit_node(node);
                    stack.extend(children.iter().rev());
                }
            }
        }
    }

    /// Walk the tree and verify its bookkeeping
    ///
    /// Checks parent and depth links, that no LEAF sits below the depth
    /// limit and that the stored point count matches the leaves.
    pub fn check_invariants(&self) -> GeometryResult<()> {
        let mut leaves = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id).ok_or_else(|| {
                GeometryError::InvariantViolation(format!("dangling quadtree node {id:?}"))
            })?;
            match node.state {
                QuadState::Empty => {}
                QuadState::Leaf(_) => leaves += 1,
                QuadState::Branch(children) => {
                    for child in children {
                        let child_node = self.nodes.get(child).ok_or_else(|| {
                            GeometryError::InvariantViolation(format!("dangling quadtree child {child:?}"))
                        })?;
                        if child_node.parent != Some(id) || child_node.depth != node.depth + 1 {
                            return Err(GeometryError::InvariantViolation(format!(
                                "quadtree child {child:?} not linked to parent {id:?}"
                            )));
                        }
                    }
                    stack.extend(children);
                }
            }
        }
        if leaves != self.num_points {
            return Err(GeometryError::InvariantViolation(format!(
                "quadtree holds {leaves} leaves but counts {} points",
                self.num_points
            )));
        }
        Ok(())
    }

    /// Remove every point, leaving an EMPTY root
    pub fn clear(&mut self) {
        let rect = self.nodes[self.root].rect;
        self.nodes.clear();
        self.root = self.nodes.insert(QuadNode::new(rect, None, 0));
        self.num_points = 0;
    }
}
