// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Uniform-grid spatial hash for tolerance coincidence queries
//!
//! Points are bucketed by `floor(coord / cell_size)` with `cell_size` equal to
//! the weld tolerance. Any point within tolerance of a query lies in one of the
//! cells overlapping the query's `[p - tol, p + tol]` box, so a lookup scans at
//! most 27 buckets regardless of how many points are registered.

use super::error::{check_tolerance, MergeResult};
use super::GlobalId;
use ahash::AHashMap;
use nalgebra::Point3;

/// Integer cell coordinate.
type CellKey = (i64, i64, i64);

/// Spatial hash over welded node positions.
#[derive(Debug, Clone)]
pub struct SpatialHashIndex {
    /// Cell -> registered (payload, position) pairs, in insertion order
    cells: AHashMap<CellKey, Vec<(GlobalId, Point3<f64>)>>,
    /// Cell edge length, equal to the tolerance
    cell_size: f64,
    /// Squared tolerance used for the distance test
    tolerance_sq: f64,
    /// Number of registered points
    len: usize,
}

impl SpatialHashIndex {
    /// Create an empty index. Fails if `tolerance` is not a positive, finite distance.
    pub fn new(tolerance: f64) -> MergeResult<Self> {
        let tolerance = check_tolerance(tolerance)?;
        Ok(Self {
            cells: AHashMap::new(),
            cell_size: tolerance,
            tolerance_sq: tolerance * tolerance,
            len: 0,
        })
    }

    /// Create an empty index with room for `capacity` points.
    pub fn with_capacity(tolerance: f64, capacity: usize) -> MergeResult<Self> {
        let mut index = Self::new(tolerance)?;
        index.cells.reserve(capacity);
        Ok(index)
    }

    /// Register `position` under `payload`.
    pub fn insert(&mut self, position: Point3<f64>, payload: GlobalId) {
        let key = self.cell_of(&position);
        self.cells.entry(key).or_default().push((payload, position));
        self.len += 1;
    }

    /// Return the payload of the first registered point within tolerance of `position`.
    ///
    /// Cells are visited in ascending x, y, z order and each cell in insertion
    /// order. The first hit wins even if a nearer point exists further along.
    pub fn find_near(&self, position: &Point3<f64>) -> Option<GlobalId> {
        let tol = self.cell_size;
        let lo = self.cell_of(&Point3::new(position.x - tol, position.y - tol, position.z - tol));
        let hi = self.cell_of(&Point3::new(position.x + tol, position.y + tol, position.z + tol));

        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    let Some(bucket) = self.cells.get(&(cx, cy, cz)) else {
                        continue;
                    };
                    let hit = bucket
                        .iter()
                        .find(|(_, p)| (p - position).norm_squared() <= self.tolerance_sq);
                    if let Some(&(payload, _)) = hit {
                        return Some(payload);
                    }
                }
            }
        }

        None
    }

    /// Weld tolerance (also the cell edge length).
    pub fn tolerance(&self) -> f64 {
        self.cell_size
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_of(&self, position: &Point3<f64>) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
            (position.z / self.cell_size).floor() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conglomerate::MergeError;

    #[test]
    fn test_rejects_non_positive_tolerance() {
        assert!(matches!(
            SpatialHashIndex::new(0.0),
            Err(MergeError::InvalidTolerance { .. })
        ));
        assert!(SpatialHashIndex::new(-1e-3).is_err());
    }

    #[test]
    fn test_find_near_within_tolerance() {
        let mut index = SpatialHashIndex::new(0.01).unwrap();
        index.insert(Point3::new(1.0, 2.0, 3.0), 7);

        assert_eq!(index.find_near(&Point3::new(1.005, 2.0, 3.0)), Some(7));
        assert_eq!(index.find_near(&Point3::new(1.0, 2.0, 3.02)), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_find_near_across_cell_boundary() {
        let tol = 0.1;
        let mut index = SpatialHashIndex::new(tol).unwrap();
        // Just below a cell boundary on every axis
        index.insert(Point3::new(0.0999, 0.0999, 0.0999), 0);

        // Just above it, in the neighbouring cell
        let query = Point3::new(0.1001, 0.1001, 0.1001);
        assert_eq!(index.find_near(&query), Some(0));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut index = SpatialHashIndex::new(0.5).unwrap();
        index.insert(Point3::new(-0.1, -0.1, -0.1), 3);
        assert_eq!(index.find_near(&Point3::new(0.1, 0.1, 0.1)), Some(3));
        assert_eq!(index.find_near(&Point3::new(-1.0, -1.0, -1.0)), None);
    }

    #[test]
    fn test_first_match_not_nearest() {
        let mut index = SpatialHashIndex::new(1.0).unwrap();
        // Both within tolerance of the query; the farther one sits in a lower cell
        index.insert(Point3::new(-0.5, 0.5, 0.5), 10);
        index.insert(Point3::new(0.55, 0.5, 0.5), 11);

        assert_eq!(index.find_near(&Point3::new(0.5, 0.5, 0.5)), Some(10));
    }

    #[test]
    fn test_same_cell_insertion_order() {
        let mut index = SpatialHashIndex::new(1.0).unwrap();
        index.insert(Point3::new(0.9, 0.5, 0.5), 1);
        index.insert(Point3::new(0.5, 0.5, 0.5), 2);

        assert_eq!(index.find_near(&Point3::new(0.5, 0.5, 0.5)), Some(1));
        assert_eq!(index.cell_count(), 1);
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialHashIndex::new(1e-6).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.find_near(&Point3::origin()), None);
    }
}
