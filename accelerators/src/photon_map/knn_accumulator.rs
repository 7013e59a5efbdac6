//! K-Nearest Neighbour Accumulator

use super::*;
use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

/// A photon found by a search together with its squared distance to the
/// query point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Neighbor {
    /// Squared distance to the query point.
    pub distance2: OrderedFloat<Float>,

    /// Index of the photon record in the photon map.
    pub index: u32,
}

/// Keeps the `k` nearest photons seen so far in a max-heap keyed on the
/// squared distance, so the farthest neighbour is evicted first.
#[derive(Clone, Debug, Default)]
pub struct KnnAccumulator {
    /// Maximum number of neighbours.
    k: usize,

    /// The neighbours; farthest on top.
    heap: BinaryHeap<Neighbor>,
}

impl KnnAccumulator {
    /// Create a new `KnnAccumulator`.
    ///
    /// * `k` - Maximum number of neighbours; must be positive.
    pub fn new(k: usize) -> Result<Self, String> {
        let mut accumulator = Self::default();
        accumulator.set_k(k)?;
        Ok(accumulator)
    }

    /// Clears the contents and sets the maximum number of neighbours.
    ///
    /// * `k` - Maximum number of neighbours; must be positive.
    pub fn set_k(&mut self, k: usize) -> Result<(), String> {
        if k == 0 {
            return Err("KnnAccumulator: k must be positive".to_string());
        }
        self.k = k;
        self.heap.clear();
        self.heap.reserve(k);
        Ok(())
    }

    /// Returns the maximum number of neighbours.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the number of neighbours held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no neighbour is held.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if `k` neighbours are held.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Removes every neighbour keeping `k`.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Offers a photon. Once full, a photon is accepted only if it is closer
    /// than the current farthest neighbour, which it then replaces.
    ///
    /// * `distance2` - Squared distance to the query point.
    /// * `index`     - Index of the photon record.
    pub fn insert(&mut self, distance2: Float, index: u32) {
        debug_assert!(self.k > 0, "KnnAccumulator used before set_k");
        let neighbor = Neighbor {
            distance2: OrderedFloat(distance2),
            index,
        };
        if self.heap.len() < self.k {
            self.heap.push(neighbor);
        } else if let Some(mut farthest) = self.heap.peek_mut() {
            if neighbor.distance2 < farthest.distance2 {
                *farthest = neighbor;
            }
        }
    }

    /// Returns the squared distance of the farthest neighbour.
    pub fn max_distance2(&self) -> Option<Float> {
        self.heap.peek().map(|n| n.distance2.into_inner())
    }

    /// Returns `1 / sqrt(max_distance2)`, or zero when empty.
    pub fn inverse_longest_distance(&self) -> Float {
        match self.max_distance2() {
            Some(d2) => 1.0 / d2.sqrt(),
            None => 0.0,
        }
    }

    /// Returns the neighbour at a position of the underlying storage. The
    /// storage order is unspecified.
    ///
    /// * `i` - Position in [0, len).
    pub fn get(&self, i: usize) -> Option<(Float, u32)> {
        self.heap
            .as_slice()
            .get(i)
            .map(|n| (n.distance2.into_inner(), n.index))
    }

    /// Returns an iterator over the neighbours in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.heap.iter()
    }

    /// Returns the neighbours sorted by increasing distance.
    pub fn sorted(&self) -> Vec<Neighbor> {
        self.heap.clone().into_sorted_vec()
    }
}
