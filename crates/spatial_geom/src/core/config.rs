//! # Unified Configuration
//!
//! Aggregates the per-structure configurations into one serializable
//! document so an application can tune every index and the tesselator from
//! a single TOML or RON file.
//!
//! Structural bounds (octree cube, quadtree rectangle) are not part of the
//! configuration; they belong to the data being indexed.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::spatial::{OctreeConfig, QuadtreeConfig};
use crate::tesselation::{GridSampling, GridTesselator, DEFAULT_ROOT_SIZE};

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// Range and resolution for [`SpatialBins`](crate::spatial::SpatialBins)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinsConfig {
    /// Lower bound of the binned range
    pub min: f32,
    /// Upper bound of the binned range
    pub max: f32,
    /// Number of buckets
    pub num_bins: usize,
}

impl Default for BinsConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1000.0,
            num_bins: 64,
        }
    }
}

impl BinsConfig {
    /// Set the binned range
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the number of buckets
    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    /// Width of a single bucket
    pub fn bin_width(&self) -> f32 {
        (self.max - self.min) / self.num_bins as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> GeometryResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.max <= self.min {
            return Err(GeometryError::invalid(format!(
                "bins range must be finite with max > min, got [{}, {})",
                self.min, self.max
            )));
        }
        if self.num_bins == 0 {
            return Err(GeometryError::invalid("bins num_bins must be at least 1"));
        }
        Ok(())
    }
}

/// Which grid the tesselator samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// World-aligned grid, see [`GridSampling::Global`]
    Global,
    /// Grid over the polygon bounds, see [`GridSampling::Local`]
    #[default]
    Local,
}

/// Settings for [`GridTesselator`]
///
/// Only the parameter matching `strategy` is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesselatorConfig {
    /// Sampling strategy
    pub strategy: SamplingStrategy,
    /// Grid spacing for the global strategy
    pub spacing: f32,
    /// Points per axis for the local strategy
    pub resolution: u32,
    /// Root triangle size of the triangulator
    pub root_size: f32,
}

impl Default for TesselatorConfig {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::Local,
            spacing: 1.0,
            resolution: 8,
            root_size: DEFAULT_ROOT_SIZE,
        }
    }
}

impl TesselatorConfig {
    /// Use a world-aligned grid with the given spacing
    pub fn global(spacing: f32) -> Self {
        Self {
            strategy: SamplingStrategy::Global,
            spacing,
            ..Self::default()
        }
    }

    /// Use a `resolution × resolution` grid over the polygon bounds
    pub fn local(resolution: u32) -> Self {
        Self {
            strategy: SamplingStrategy::Local,
            resolution,
            ..Self::default()
        }
    }

    /// Set the triangulator root size
    pub fn with_root_size(mut self, root_size: f32) -> Self {
        self.root_size = root_size;
        self
    }

    /// Sampling the configured strategy resolves to
    pub fn sampling(&self) -> GridSampling {
        match self.strategy {
            SamplingStrategy::Global => GridSampling::Global {
                spacing: self.spacing,
            },
            SamplingStrategy::Local => GridSampling::Local {
                resolution: self.resolution,
            },
        }
    }

    /// Build the configured tesselator
    pub fn build(&self) -> GeometryResult<GridTesselator> {
        GridTesselator::new(self.sampling())?.with_root_size(self.root_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> GeometryResult<()> {
        self.build().map(|_| ())
    }
}

/// # Spatial Configuration
///
/// Top-level configuration covering every index and the tesselator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Point octree settings
    pub octree: OctreeConfig,
    /// Point quadtree settings
    pub quadtree: QuadtreeConfig,
    /// Spatial bins settings
    pub bins: BinsConfig,
    /// Tesselator settings
    pub tesselator: TesselatorConfig,
}

impl SpatialConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set octree settings
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    /// Set quadtree settings
    pub fn with_quadtree(mut self, quadtree: QuadtreeConfig) -> Self {
        self.quadtree = quadtree;
        self
    }

    /// Set spatial bins settings
    pub fn with_bins(mut self, bins: BinsConfig) -> Self {
        self.bins = bins;
        self
    }

    /// Set tesselator settings
    pub fn with_tesselator(mut self, tesselator: TesselatorConfig) -> Self {
        self.tesselator = tesselator;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> GeometryResult<()> {
        self.octree.validate()?;
        self.bins.validate()?;
        self.tesselator.validate()?;
        Ok(())
    }

    /// Load from a `.toml` or `.ron` file and validate
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!("Loaded spatial configuration from {}", path);
        Ok(config)
    }
}

impl Config for SpatialConfig {}
