//! Sparse per-cell accumulation of kernel mass.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Sparse map from grid cell to accumulated density or expectation.
///
/// Only cells that received a positive contribution are present. Entry order
/// is unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMap<C: Eq + Hash> {
    cells: FxHashMap<C, f64>,
}

impl<C: Eq + Hash> DensityMap<C> {
    pub fn new() -> Self {
        Self {
            cells: FxHashMap::default(),
        }
    }

    /// Add `value` to the running total of `cell`, creating the entry if needed.
    pub fn add(&mut self, cell: C, value: f64) {
        *self.cells.entry(cell).or_insert(0.0) += value;
    }

    /// Fold another partial map into this one, summing shared cells.
    pub fn merge(&mut self, other: DensityMap<C>) {
        if self.cells.len() < other.cells.len() {
            let mine = std::mem::replace(&mut self.cells, other.cells);
            for (cell, value) in mine {
                self.add(cell, value);
            }
        } else {
            for (cell, value) in other.cells {
                self.add(cell, value);
            }
        }
    }

    pub fn get(&self, cell: &C) -> Option<f64> {
        self.cells.get(cell).copied()
    }

    pub fn contains(&self, cell: &C) -> bool {
        self.cells.contains_key(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &f64)> {
        self.cells.iter()
    }

    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.cells.keys()
    }

    /// Sum of all cell values.
    pub fn total(&self) -> f64 {
        self.cells.values().sum()
    }

    /// The cell with the largest value, if any.
    pub fn peak(&self) -> Option<(&C, f64)> {
        self.cells
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(cell, value)| (cell, *value))
    }

    pub fn into_inner(self) -> FxHashMap<C, f64> {
        self.cells
    }
}

impl<C: Eq + Hash> Default for DensityMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Eq + Hash> IntoIterator for DensityMap<C> {
    type Item = (C, f64);
    type IntoIter = std::collections::hash_map::IntoIter<C, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<C: Eq + Hash> FromIterator<(C, f64)> for DensityMap<C> {
    fn from_iter<T: IntoIterator<Item = (C, f64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (cell, value) in iter {
            map.add(cell, value);
        }
        map
    }
}
