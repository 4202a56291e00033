//! Incremental Delaunay triangulation (Bowyer-Watson)
//!
//! The triangulation starts from a fixed root triangle with corners
//! `(-s, -s)`, `(s, -s)` and `(0, s)`. Every inserted site must lie strictly
//! inside it. Triangles touching the root corners stay in the output; callers
//! recognise them by a coordinate of magnitude `s`.

use std::collections::{HashMap, HashSet};

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::collections::{FaceId, SlotMap};
use crate::foundation::math::{utils, Vec2};
use crate::geometry::Triangle2;

/// Half-extent of the root triangle when none is given
pub const DEFAULT_ROOT_SIZE: f32 = 10_000.0;

/// Point-insertion triangulation engine
pub trait Triangulator {
    /// Insert a site, returning whether it changed the triangulation
    fn add_point(&mut self, p: Vec2) -> bool;

    /// Current triangles, including those attached to the root corners
    fn triangles(&self) -> Vec<Triangle2>;

    /// Coordinate magnitude of the root triangle corners
    fn root_size(&self) -> f32;
}

/// Counter-clockwise triangle with its edge neighbours
///
/// `neighbors[k]` lies across the edge `vertices[k] -> vertices[k + 1]`;
/// `None` marks an edge of the root triangle.
#[derive(Debug, Clone, Copy)]
struct Face {
    vertices: [usize; 3],
    neighbors: [Option<FaceId>; 3],
}

impl Face {
    fn edge(&self, k: usize) -> (usize, usize) {
        (self.vertices[k], self.vertices[(k + 1) % 3])
    }
}

/// Cavity edge kept when its inner face is removed
struct BoundaryEdge {
    from: usize,
    to: usize,
    outer: Option<FaceId>,
}

/// Bowyer-Watson triangulation seeded with a fixed root triangle
///
/// Faces live in a slot map and keep links to their edge neighbours, so a
/// site is located by walking from the most recently created face and its
/// cavity is grown through those links. The first three vertices are the
/// root corners.
#[derive(Debug, Clone)]
pub struct DelaunayTriangulation {
    root_size: f32,
    vertices: Vec<Vec2>,
    faces: SlotMap<FaceId, Face>,
    last: FaceId,
}

impl Default for DelaunayTriangulation {
    fn default() -> Self {
        Self::build(DEFAULT_ROOT_SIZE)
    }
}

impl DelaunayTriangulation {
    /// Create an empty triangulation with [`DEFAULT_ROOT_SIZE`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty triangulation with a custom root size
    pub fn with_root_size(root_size: f32) -> GeometryResult<Self> {
        if !(root_size.is_finite() && root_size > 0.0) {
            return Err(GeometryError::invalid(format!(
                "root size must be finite and > 0, got {root_size}"
            )));
        }
        Ok(Self::build(root_size))
    }

    fn build(s: f32) -> Self {
        let mut faces = SlotMap::with_key();
        let last = faces.insert(Face {
            vertices: [0, 1, 2],
            neighbors: [None; 3],
        });
        Self {
            root_size: s,
            vertices: vec![Vec2::new(-s, -s), Vec2::new(s, -s), Vec2::new(0.0, s)],
            faces,
            last,
        }
    }

    /// Number of inserted sites
    pub fn num_sites(&self) -> usize {
        self.vertices.len() - 3
    }

    /// Inserted sites in insertion order
    pub fn sites(&self) -> &[Vec2] {
        &self.vertices[3..]
    }

    /// Number of triangles, including root-attached ones
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Triangles whose corners are all inserted sites
    pub fn inner_triangles(&self) -> Vec<Triangle2> {
        self.faces
            .values()
            .filter(|f| f.vertices.iter().all(|&v| v >= 3))
            .map(|f| self.triangle(f))
            .collect()
    }

    fn triangle(&self, face: &Face) -> Triangle2 {
        let [a, b, c] = face.vertices;
        Triangle2::new(self.vertices[a], self.vertices[b], self.vertices[c])
    }

    fn point(&self, index: usize) -> [f64; 2] {
        let v = self.vertices[index];
        [f64::from(v.x), f64::from(v.y)]
    }

    /// Strictly inside the root triangle
    fn inside_root(&self, p: [f64; 2]) -> bool {
        let [a, b, c] = [self.point(0), self.point(1), self.point(2)];
        orient(a, b, p) > 0.0 && orient(b, c, p) > 0.0 && orient(c, a, p) > 0.0
    }

    fn face_contains(&self, face: &Face, p: [f64; 2]) -> bool {
        (0..3).all(|k| {
            let (a, b) = face.edge(k);
            orient(self.point(a), self.point(b), p) >= 0.0
        })
    }

    /// Face containing `p` (possibly on its boundary)
    ///
    /// Walks across edges that separate the current face from `p`, starting
    /// at the most recently created face. The edge tested first rotates each
    /// step to break cycles; a linear scan takes over if the walk runs longer
    /// than there are faces.
    fn locate(&self, p: [f64; 2]) -> Option<FaceId> {
        let mut current = self.last;
        'walk: for step in 0..=self.faces.len() {
            let face = self.faces.get(current)?;
            for i in 0..3 {
                let k = (i + step) % 3;
                let (a, b) = face.edge(k);
                if orient(self.point(a), self.point(b), p) < 0.0 {
                    match face.neighbors[k] {
                        Some(next) => {
                            current = next;
                            continue 'walk;
                        }
                        None => return None,
                    }
                }
            }
            return Some(current);
        }
        log::debug!("Triangulation walk did not settle, scanning all faces");
        self.faces
            .iter()
            .find(|(_, face)| self.face_contains(face, p))
            .map(|(id, _)| id)
    }

    fn in_circumcircle(&self, face: &Face, p: [f64; 2]) -> bool {
        let [a, b, c] = face.vertices;
        incircle(self.point(a), self.point(b), self.point(c), p) > 0.0
    }

    /// Faces whose circumcircle holds `p`, grown from the one containing it
    fn cavity(&self, start: FaceId, p: [f64; 2]) -> (Vec<FaceId>, HashSet<FaceId>) {
        let mut members = HashSet::from([start]);
        let mut cavity = vec![start];
        let mut next = 0;
        while next < cavity.len() {
            let face = self.faces[cavity[next]];
            next += 1;
            for &neighbor in face.neighbors.iter().flatten() {
                if !members.contains(&neighbor) && self.in_circumcircle(&self.faces[neighbor], p) {
                    members.insert(neighbor);
                    cavity.push(neighbor);
                }
            }
        }
        (cavity, members)
    }

    /// Replace the cavity by a fan of faces around the new site
    fn retriangulate(&mut self, cavity: &[FaceId], members: &HashSet<FaceId>, site: usize) {
        let mut boundary = Vec::new();
        for &id in cavity {
            let face = self.faces[id];
            for k in 0..3 {
                let outer = face.neighbors[k];
                if outer.map_or(true, |o| !members.contains(&o)) {
                    let (from, to) = face.edge(k);
                    boundary.push(BoundaryEdge { from, to, outer });
                }
            }
        }
        for &id in cavity {
            self.faces.remove(id);
        }

        let mut starting_at = HashMap::with_capacity(boundary.len());
        let mut ending_at = HashMap::with_capacity(boundary.len());
        let mut created = Vec::with_capacity(boundary.len());
        for edge in &boundary {
            let id = self.faces.insert(Face {
                vertices: [edge.from, edge.to, site],
                neighbors: [edge.outer, None, None],
            });
            starting_at.insert(edge.from, id);
            ending_at.insert(edge.to, id);
            created.push(id);

            if let Some(outer) = edge.outer {
                let outer_face = &mut self.faces[outer];
                if let Some(k) = (0..3).find(|&k| outer_face.edge(k) == (edge.to, edge.from)) {
                    outer_face.neighbors[k] = Some(id);
                }
            }
        }

        // fan faces meet along the spokes to the site
        for (edge, &id) in boundary.iter().zip(&created) {
            let face = &mut self.faces[id];
            face.neighbors[1] = starting_at.get(&edge.to).copied();
            face.neighbors[2] = ending_at.get(&edge.from).copied();
        }
        if let Some(&last) = created.last() {
            self.last = last;
        }
    }
}

impl Triangulator for DelaunayTriangulation {
    fn add_point(&mut self, p: Vec2) -> bool {
        if !utils::is_finite2(&p) {
            log::warn!("Ignored non-finite triangulation site {:?}", p);
            return false;
        }
        let pd = [f64::from(p.x), f64::from(p.y)];
        if !self.inside_root(pd) {
            log::warn!("Ignored site {:?} outside root triangle of size {}", p, self.root_size);
            return false;
        }
        let Some(start) = self.locate(pd) else {
            return false;
        };
        // a site already present is a corner of every face containing it
        if self.faces[start].vertices.iter().any(|&v| self.vertices[v] == p) {
            log::trace!("Ignored duplicate site {:?}", p);
            return false;
        }

        let (cavity, members) = self.cavity(start, pd);
        let site = self.vertices.len();
        self.vertices.push(p);
        self.retriangulate(&cavity, &members, site);
        log::trace!("Inserted site {:?}, cavity of {} triangle(s)", p, cavity.len());
        true
    }

    fn triangles(&self) -> Vec<Triangle2> {
        self.faces.values().map(|f| self.triangle(f)).collect()
    }

    fn root_size(&self) -> f32 {
        self.root_size
    }
}

/// Twice the signed area of `abc`, positive when counter-clockwise
fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

/// Positive when `d` lies inside the circumcircle of counter-clockwise `abc`
fn incircle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> f64 {
    let (adx, ady) = (a[0] - d[0], a[1] - d[1]);
    let (bdx, bdy) = (b[0] - d[0], b[1] - d[1]);
    let (cdx, cdy) = (c[0] - d[0], c[1] - d[1]);
    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;
    adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx) + ad * (bdx * cdy - bdy * cdx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn total_area(triangles: &[Triangle2]) -> f32 {
        triangles.iter().map(Triangle2::signed_area).sum()
    }

    #[test]
    fn test_root_triangle_layout() {
        let dt = DelaunayTriangulation::new();
        let tris = dt.triangles();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].a, Vec2::new(-10_000.0, -10_000.0));
        assert_eq!(tris[0].b, Vec2::new(10_000.0, -10_000.0));
        assert_eq!(tris[0].c, Vec2::new(0.0, 10_000.0));
        assert_eq!(dt.root_size(), DEFAULT_ROOT_SIZE);
    }

    #[test]
    fn test_triangle_count_follows_euler() {
        let mut dt = DelaunayTriangulation::new();
        let sites = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 3.0),
            Vec2::new(0.0, 3.0),
            Vec2::new(1.5, 1.0),
        ];
        for p in sites {
            assert!(dt.add_point(p));
        }
        // every site inside the root adds exactly two triangles
        assert_eq!(dt.num_triangles(), 1 + 2 * sites.len());
        assert_relative_eq!(total_area(&dt.triangles()), 2.0 * 10_000.0 * 10_000.0, max_relative = 1e-6);
        assert!(dt.triangles().iter().all(|t| t.signed_area() > 0.0));
    }

    #[test]
    fn test_inner_triangles_cover_convex_hull() {
        let mut dt = DelaunayTriangulation::new();
        for p in [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(1.0, 1.0),
        ] {
            dt.add_point(p);
        }
        let inner = dt.inner_triangles();
        assert_eq!(inner.len(), 4);
        assert_relative_eq!(total_area(&inner), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_circumcircle_property() {
        let mut dt = DelaunayTriangulation::new();
        let sites: Vec<Vec2> = (0..6)
            .flat_map(|i| (0..5).map(move |j| Vec2::new(i as f32 * 1.7 + (j % 2) as f32 * 0.4, j as f32 * 1.3)))
            .collect();
        for p in &sites {
            dt.add_point(*p);
        }
        for t in dt.inner_triangles() {
            let [a, b, c] = t.vertices().map(|v| [f64::from(v.x), f64::from(v.y)]);
            for s in &sites {
                let d = [f64::from(s.x), f64::from(s.y)];
                assert!(incircle(a, b, c, d) <= 1e-6, "site {:?} inside circumcircle of {:?}", s, t);
            }
        }
    }

    #[test]
    fn test_duplicates_and_outside_sites_are_ignored() {
        let mut dt = DelaunayTriangulation::with_root_size(100.0).unwrap();
        assert!(dt.add_point(Vec2::new(1.0, 1.0)));
        assert!(!dt.add_point(Vec2::new(1.0, 1.0)));
        assert!(!dt.add_point(Vec2::new(500.0, 0.0)));
        // on the root boundary is not strictly inside
        assert!(!dt.add_point(Vec2::new(0.0, -100.0)));
        assert!(!dt.add_point(Vec2::new(f32::NAN, 0.0)));
        assert_eq!(dt.num_sites(), 1);
        assert_eq!(dt.sites(), &[Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_site_on_shared_edge() {
        let mut dt = DelaunayTriangulation::new();
        for p in [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0), Vec2::new(0.0, 2.0)] {
            dt.add_point(p);
        }
        // lands on the diagonal shared by the two inner triangles
        assert!(dt.add_point(Vec2::new(1.0, 1.0)));
        let inner = dt.inner_triangles();
        assert!(inner.iter().all(|t| t.signed_area() > 1e-6));
        assert_relative_eq!(total_area(&inner), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_signed_zero_duplicate_is_ignored() {
        let mut dt = DelaunayTriangulation::new();
        for p in [Vec2::new(0.0, 1.0), Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(-5.0, 3.0)] {
            assert!(dt.add_point(p));
        }
        let before = dt.num_triangles();
        assert!(!dt.add_point(Vec2::new(-0.0, 1.0)));
        assert_eq!(dt.num_sites(), 4);
        assert_eq!(dt.num_triangles(), before);
        assert!(dt.triangles().iter().all(|t| t.signed_area() > 0.0));
        assert_relative_eq!(total_area(&dt.triangles()), 2.0 * 10_000.0 * 10_000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_many_sites_keep_links_consistent() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut dt = DelaunayTriangulation::new();
        let mut added = 0;
        for _ in 0..5000 {
            let p = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            if dt.add_point(p) {
                added += 1;
            }
        }
        assert_eq!(dt.num_sites(), added);
        assert_eq!(dt.num_triangles(), 1 + 2 * added);

        // each neighbour link is mirrored across the same edge
        for (id, face) in &dt.faces {
            for k in 0..3 {
                let (a, b) = face.edge(k);
                if let Some(other) = face.neighbors[k] {
                    let back = dt.faces[other].neighbors.iter().position(|&f| f == Some(id)).unwrap();
                    assert_eq!(dt.faces[other].edge(back), (b, a));
                }
            }
        }

        let triangles = dt.triangles();
        assert!(triangles.iter().all(|t| t.signed_area() > 0.0));
        let area: f64 = triangles.iter().map(|t| f64::from(t.signed_area())).sum();
        assert_relative_eq!(area, 2.0 * 10_000.0 * 10_000.0, max_relative = 1e-4);
    }

    #[test]
    fn test_invalid_root_size() {
        assert!(matches!(
            DelaunayTriangulation::with_root_size(0.0),
            Err(GeometryError::InvalidConfiguration(_))
        ));
        assert!(DelaunayTriangulation::with_root_size(f32::INFINITY).is_err());
    }
}
