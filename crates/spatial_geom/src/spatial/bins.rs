//! One-dimensional uniform spatial bins
//!
//! Splits a scalar range `[min, max)` into equal-width buckets and files each
//! item under the bucket of its extracted coordinate. Coordinates outside
//! the range are clipped into the first or last bucket.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{GeometryError, GeometryResult};
use crate::foundation::math::utils;

/// Maps an item to the scalar coordinate it is binned by
pub trait CoordinateExtractor<T> {
    /// Coordinate of the item along the binned axis
    fn coordinate(&self, item: &T) -> f32;
}

impl<T, F: Fn(&T) -> f32> CoordinateExtractor<T> for F {
    fn coordinate(&self, item: &T) -> f32 {
        self(item)
    }
}

/// Uniform 1D bucket index
///
/// Items are kept with set semantics: indexing an item that is already
/// present does nothing. The bin each item was last filed under is tracked,
/// so removal and [`relocate`](Self::relocate) work even after the item's
/// coordinate has changed.
pub struct SpatialBins<T, E> {
    min: f32,
    max: f32,
    inv_bin_width: f32,
    bins: Vec<HashSet<T>>,
    locations: HashMap<T, usize>,
    extractor: E,
}

impl<T, E> SpatialBins<T, E>
where
    T: Eq + Hash + Clone,
    E: CoordinateExtractor<T>,
{
    /// Create `num_bins` equal buckets over `[min, max)`
    pub fn new(min: f32, max: f32, num_bins: usize, extractor: E) -> GeometryResult<Self> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(GeometryError::invalid(format!(
                "bin range must be finite with max > min, got [{min}, {max})"
            )));
        }
        if num_bins == 0 {
            return Err(GeometryError::invalid("bin count must be at least 1"));
        }

        Ok(Self {
            min,
            max,
            inv_bin_width: num_bins as f32 / (max - min),
            bins: (0..num_bins).map(|_| HashSet::new()).collect(),
            locations: HashMap::new(),
            extractor,
        })
    }

    /// Lower bound of the binned range
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound of the binned range
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Number of buckets
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when no items are indexed
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Contents of one bucket
    pub fn bin(&self, id: usize) -> Option<&HashSet<T>> {
        self.bins.get(id)
    }

    /// Bucket a coordinate falls into, clipped to the valid range
    pub fn bin_for(&self, coord: f32) -> usize {
        bin_index(coord, self.min, self.inv_bin_width, self.bins.len() - 1)
    }

    /// Coordinate the extractor reports for an item
    pub fn coordinate_of(&self, item: &T) -> f32 {
        self.extractor.coordinate(item)
    }

    fn bin_of(&self, item: &T) -> usize {
        self.bin_for(self.coordinate_of(item))
    }

    /// File an item under the bucket of its current coordinate
    ///
    /// Returns the bucket id. Re-indexing an item that is already present
    /// leaves it where it is and returns its existing bucket.
    pub fn index(&mut self, item: T) -> usize {
        if let Some(&bin) = self.locations.get(&item) {
            return bin;
        }
        let bin = self.bin_of(&item);
        self.bins[bin].insert(item.clone());
        self.locations.insert(item, bin);
        bin
    }

    /// Move an item whose coordinate changed from `old_coord`
    ///
    /// The previous bucket is derived from `old_coord`; if it differs from
    /// the bucket of the item's current coordinate the item is moved.
    /// Returns the new bucket id either way.
    pub fn reindex(&mut self, old_coord: f32, item: T) -> usize {
        let old_bin = self.bin_for(old_coord);
        let new_bin = self.bin_of(&item);
        if old_bin != new_bin {
            self.bins[old_bin].remove(&item);
            if let Some(&tracked) = self.locations.get(&item) {
                self.bins[tracked].remove(&item);
            }
            self.bins[new_bin].insert(item.clone());
            self.locations.insert(item, new_bin);
        }
        new_bin
    }

    /// Move an item to the bucket of its current coordinate
    ///
    /// Uses the tracked bucket instead of a caller-supplied old coordinate.
    /// Unknown items are indexed.
    pub fn relocate(&mut self, item: &T) -> usize {
        let new_bin = self.bin_of(item);
        match self.locations.get(item).copied() {
            Some(old_bin) if old_bin == new_bin => new_bin,
            Some(old_bin) => {
                self.bins[old_bin].remove(item);
                self.bins[new_bin].insert(item.clone());
                self.locations.insert(item.clone(), new_bin);
                log::trace!("Moved item from bin {} to bin {}", old_bin, new_bin);
                new_bin
            }
            None => self.index(item.clone()),
        }
    }

    /// Remove an item from the bucket it was filed under
    pub fn unindex(&mut self, item: &T) -> bool {
        match self.locations.remove(item) {
            Some(bin) => self.bins[bin].remove(item),
            None => false,
        }
    }

    /// Check whether an item is indexed
    pub fn is_indexed(&self, item: &T) -> bool {
        self.locations.contains_key(item)
    }

    /// All items in buckets within `radius` of `pos`, by bucket index
    ///
    /// The window is `ceil(radius / bin_width)` buckets either side of the
    /// bucket holding `pos`. This is a coarse 1D pre-filter; items further
    /// than `radius` away can be returned.
    pub fn items_within(&self, pos: f32, radius: f32) -> Vec<T> {
        let id = self.bin_for(pos);
        let tolerance = (radius.max(0.0) * self.inv_bin_width).ceil() as usize;
        let first = id.saturating_sub(tolerance);
        let last = id.saturating_add(tolerance).min(self.bins.len() - 1);
        self.bins[first..=last]
            .iter()
            .flat_map(|bin| bin.iter().cloned())
            .collect()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        for bin in &mut self.bins {
            bin.clear();
        }
        self.locations.clear();
    }
}

/// Bucket for `coord`, clipped to `0..=last`
fn bin_index(coord: f32, min: f32, inv_bin_width: f32, last: usize) -> usize {
    // `last as f32` rounds up past 2^24 buckets
    (utils::clamp((coord - min) * inv_bin_width, 0.0, last as f32) as usize).min(last)
}

impl<T, E> std::fmt::Debug for SpatialBins<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialBins")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("num_bins", &self.bins.len())
            .field("num_items", &self.locations.len())
            .finish_non_exhaustive()
    }
}
