//! Spatial indexing demo
//!
//! Fills each index with random points, runs a few queries against them and
//! tesselates a sample polygon. Pass a `.toml` or `.ron` configuration path
//! as the first argument to override the defaults.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_geom::foundation::logging;
use spatial_geom::prelude::*;
use spatial_geom::spatial::{QuadNode, QuadNodeType};

const POINT_COUNT: usize = 2_000;
const WORLD_SIZE: f32 = 1_000.0;

struct SpatialDemo {
    config: SpatialConfig,
    rng: StdRng,
}

impl SpatialDemo {
    fn new(config: SpatialConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_point3(&mut self) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(0.0..WORLD_SIZE),
            self.rng.gen_range(0.0..WORLD_SIZE),
            self.rng.gen_range(0.0..WORLD_SIZE),
        )
    }

    fn random_point2(&mut self) -> Vec2 {
        Vec2::new(self.rng.gen_range(0.0..WORLD_SIZE), self.rng.gen_range(0.0..WORLD_SIZE))
    }

    fn run_octree(&mut self) -> GeometryResult<()> {
        let mut octree = PointOctree::with_config(Vec3::zeros(), WORLD_SIZE, self.config.octree)?;
        let points: Vec<Vec3> = (0..POINT_COUNT).map(|_| self.random_point3()).collect();
        octree.add_all(points.iter().copied());
        log::info!(
            "Octree: {} points in {} nodes (min node size {})",
            octree.len(),
            octree.node_count(),
            self.config.octree.min_node_size
        );

        let center = Vec3::repeat(WORLD_SIZE * 0.5);
        let sphere_hits = octree.points_within_radius(center, WORLD_SIZE * 0.1).len();
        let box_hits = octree
            .points_within_box(&Aabb::from_center_extents(center, Vec3::repeat(WORLD_SIZE * 0.1)))
            .len();
        log::info!("Octree: {} points in sphere, {} in box around {:?}", sphere_hits, box_hits, center);

        let removed = octree.remove_all(&points[..POINT_COUNT / 2]);
        log::info!("Octree: removed {} points, {} nodes remain", removed, octree.node_count());
        octree.check_invariants()
    }

    fn run_quadtree(&mut self) -> GeometryResult<()> {
        let bounds = Rect::new(0.0, 0.0, WORLD_SIZE, WORLD_SIZE);
        let mut quadtree = PointQuadtree::with_config(bounds, self.config.quadtree)?;
        let points: Vec<Vec2> = (0..POINT_COUNT).map(|_| self.random_point2()).collect();
        let indexed = points.iter().filter(|p| quadtree.index(**p)).count();
        log::info!("Quadtree: indexed {} of {} points in {} nodes", indexed, points.len(), quadtree.node_count());

        let center = Vec2::repeat(WORLD_SIZE * 0.5);
        let near = quadtree.items_within_radius(&center, WORLD_SIZE * 0.05);
        log::info!("Quadtree: {} points within {} of {:?}", near.len(), WORLD_SIZE * 0.05, center);

        let (mut leaves, mut branches, mut max_depth) = (0, 0, 0);
        quadtree.prewalk(&mut |node: &QuadNode| {
            match node.node_type() {
                QuadNodeType::Leaf => leaves += 1,
                QuadNodeType::Branch => branches += 1,
                QuadNodeType::Empty => {}
            }
            max_depth = max_depth.max(node.depth());
        });
        log::info!("Quadtree: {} leaves, {} branches, depth {}", leaves, branches, max_depth);

        for p in &points {
            quadtree.unindex(p);
        }
        log::info!("Quadtree: {} nodes after removing every point", quadtree.node_count());
        quadtree.check_invariants()
    }

    fn run_bins(&mut self) -> GeometryResult<()> {
        let cfg = self.config.bins;
        let points: Vec<Vec2> = (0..POINT_COUNT).map(|_| self.random_point2()).collect();
        let mut bins = SpatialBins::<usize, _>::new(cfg.min, cfg.max, cfg.num_bins, |i: &usize| points[*i].x)?;
        for i in 0..points.len() {
            bins.index(i);
        }

        let probe = (cfg.min + cfg.max) * 0.5;
        let radius = cfg.bin_width() * 2.0;
        let candidates = bins.items_within(probe, radius);
        let exact = candidates
            .iter()
            .filter(|i| (points[**i].x - probe).abs() <= radius)
            .count();
        log::info!(
            "Bins: {} candidates near x = {}, {} within {} ({} bins)",
            candidates.len(),
            probe,
            exact,
            radius,
            bins.num_bins()
        );
        Ok(())
    }

    fn run_tesselation(&self) -> GeometryResult<()> {
        let tesselator = self.config.tesselator.build()?;
        let star = star_polygon(Vec2::new(500.0, 500.0), 200.0, 80.0, 7);
        let triangles = tesselator.tesselate(&star)?;
        let covered: f32 = triangles.iter().map(|t| t.signed_area().abs()).sum();
        log::info!(
            "Tesselation ({:?}): {} triangles covering {:.1} of {:.1} polygon area",
            tesselator.sampling(),
            triangles.len(),
            covered,
            star.area().abs()
        );
        Ok(())
    }
}

fn star_polygon(center: Vec2, outer: f32, inner: f32, spikes: usize) -> Polygon2 {
    let step = std::f32::consts::PI / spikes as f32;
    (0..spikes * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 * step;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect::<Vec<_>>()
        .into()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level("info");

    let config = match std::env::args().nth(1) {
        Some(path) => SpatialConfig::load(&path)?,
        None => {
            log::info!("No configuration given, using defaults");
            SpatialConfig::default()
        }
    };

    let mut demo = SpatialDemo::new(config, 42);
    demo.run_octree()?;
    demo.run_quadtree()?;
    demo.run_bins()?;
    demo.run_tesselation()?;
    Ok(())
}
