//! Math utilities and types
//!
//! Provides the fundamental vector types consumed by the spatial indexes
//! and the tesselator.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    ///
    /// NaN is mapped to `min` so that callers deriving array indices from
    /// the result never observe an out-of-range value.
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value.is_nan() || value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Snap a value to the nearest multiple of `precision`
    pub fn round_to(value: f32, precision: f32) -> f32 {
        if precision == 0.0 {
            value
        } else {
            (value / precision).round() * precision
        }
    }

    /// True if every component of the vector is finite
    pub fn is_finite2(v: &super::Vec2) -> bool {
        v.x.is_finite() && v.y.is_finite()
    }

    /// True if every component of the vector is finite
    pub fn is_finite3(v: &super::Vec3) -> bool {
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
    }
}
