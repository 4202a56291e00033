//! # Core Module
//!
//! Shared configuration for the indexes and the tesselator.

pub mod config;

pub use config::{
    BinsConfig, Config, ConfigError, ConfigFormat, SamplingStrategy, SpatialConfig, TesselatorConfig,
};
