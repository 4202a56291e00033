//! Randomised scenario tests across the spatial indexes

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::{Vec2, Vec3};
use crate::geometry::{Aabb, Sphere};
use crate::spatial::{
    OctreeConfig, PointOctree, PointQuadtree, QuadNodeType, QuadState, SpatialBins,
};

const SEED: u64 = 0x5eed_0c7;

fn random_points3(rng: &mut StdRng, count: usize, extent: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
            )
        })
        .collect()
}

fn key3(p: &Vec3) -> [u32; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

#[test]
fn test_octree_box_query_returns_every_point() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for &min_size in &[1.0, 4.0, 25.0] {
        let config = OctreeConfig::default().with_min_node_size(min_size);
        let mut octree = PointOctree::with_config(Vec3::zeros(), 100.0, config).unwrap();
        let points = random_points3(&mut rng, 300, 100.0);
        assert!(octree.add_all(points.iter().copied()));

        let bounds = Aabb::from_points(&points).unwrap();
        let found: HashSet<[u32; 3]> = octree.points_within_box(&bounds).iter().map(key3).collect();
        let expected: HashSet<[u32; 3]> = points.iter().map(key3).collect();
        assert_eq!(found, expected);
        assert_eq!(octree.len(), points.len());
        octree.check_invariants().unwrap();
    }
}

#[test]
fn test_octree_removed_points_are_not_found() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let config = OctreeConfig::default().with_min_node_size(2.0).with_auto_reduce(true);
    let mut octree = PointOctree::with_config(Vec3::zeros(), 64.0, config).unwrap();
    let points = random_points3(&mut rng, 200, 64.0);
    octree.add_all(points.iter().copied());

    let (removed, kept) = points.split_at(points.len() / 2);
    assert_eq!(octree.remove_all(removed), removed.len());
    octree.check_invariants().unwrap();

    for p in removed {
        let hits = octree.points_within_sphere(&Sphere::new(*p, 1e-4));
        assert!(!hits.contains(p));
    }
    for p in kept {
        assert!(octree.points_within_radius(*p, 1e-4).contains(p));
    }

    octree.remove_all(kept);
    assert!(octree.is_empty());
    assert_eq!(octree.node_count(), 1);
}

#[test]
fn test_octant_ids_differ_across_x_midplane() {
    let octree = PointOctree::new(Vec3::new(-8.0, -8.0, -8.0), 16.0).unwrap();
    let root = octree.root();
    for &(y, z) in &[(-3.0, -3.0), (5.0, -1.0), (-2.0, 7.0), (6.0, 6.0)] {
        let low = octree.octant_id(root, &Vec3::new(-0.5, y, z)).unwrap();
        let high = octree.octant_id(root, &Vec3::new(0.5, y, z)).unwrap();
        assert_eq!(high, low + 1);
        assert_eq!(low ^ high, 1);
    }
}

#[test]
fn test_quadtree_split_separates_into_leaves() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..50 {
        let mut qt = PointQuadtree::new(0.0, 0.0, 100.0, 100.0).unwrap();
        let a = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        let b = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        if a == b {
            continue;
        }
        assert!(qt.index(a));
        assert!(qt.index(b));
        qt.check_invariants().unwrap();

        for p in [a, b] {
            assert!(qt.is_indexed(&p));
            let node = qt.node(qt.find_node(&p).unwrap()).unwrap();
            assert_eq!(node.node_type(), QuadNodeType::Leaf);
            assert!(node.rect().contains_point(&p));
        }
    }
}

#[test]
fn test_quadtree_index_unindex_restores_empty_root() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let mut qt = PointQuadtree::new(-50.0, -50.0, 100.0, 100.0).unwrap();
    let points: Vec<Vec2> = (0..64)
        .map(|_| Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
        .collect();

    for p in &points {
        assert!(qt.index(*p));
        assert!(qt.unindex(p));
        assert!(!qt.is_indexed(p));
        assert_eq!(qt.node_count(), 1);
        assert_eq!(*qt.node(qt.root()).unwrap().state(), QuadState::Empty);
    }

    // bulk insert then drain in a different order
    for p in &points {
        qt.index(*p);
    }
    qt.check_invariants().unwrap();
    for p in points.iter().rev() {
        assert!(qt.unindex(p));
    }
    qt.check_invariants().unwrap();
    assert!(qt.is_empty());
    assert_eq!(qt.node_count(), 1);
    assert!(qt.items_within_radius(&Vec2::zeros(), 100.0).is_empty());
}

#[test]
fn test_bins_item_found_in_own_bin() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let coords: Vec<f32> = (0..500).map(|_| rng.gen_range(-20.0..80.0)).collect();
    let mut bins = SpatialBins::<usize, _>::new(-20.0, 80.0, 37, |i: &usize| coords[*i]).unwrap();
    for i in 0..coords.len() {
        bins.index(i);
    }
    for (i, &c) in coords.iter().enumerate() {
        assert!(bins.items_within(c, 0.0).contains(&i));
    }
}
