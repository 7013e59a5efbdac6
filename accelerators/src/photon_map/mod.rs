//! Photon Map.

use hikari::base::*;
use hikari::geometry::*;
use hikari::spectrum::*;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};
use std::thread;
use std::time::Instant;

mod knn_accumulator;
mod photon_record;
mod tree;

// Re-export
pub use knn_accumulator::*;
pub use photon_record::*;
pub use tree::{NodeKind, TreeNode};
use tree::*;

/// Minimum number of photons before the two top level subtrees are built on
/// separate threads.
const PARALLEL_CONSTRUCTION_THRESHOLD: usize = 4096;

/// Stores photons concurrently during a tracing pass and answers nearest
/// neighbour queries through a median split k-d tree.
///
/// The life cycle of a pass is `initialize`, any number of concurrent
/// `store` calls, `construct`, then any number of concurrent `search` calls.
pub struct PhotonMap {
    /// Photon slots. Each slot is written once by the thread that claimed its
    /// index; the write lock is taken only to grow the arena.
    slots: RwLock<Vec<OnceLock<PhotonRecord>>>,

    /// Number of claimed slots.
    inserted: AtomicUsize,

    /// Records of the constructed tree.
    records: Vec<PhotonRecord>,

    /// The implicit tree over `records`.
    tree: Vec<Option<TreeNode>>,

    /// True once `construct` has completed for the current pass.
    constructed: bool,

    /// Number of photons of the previous pass.
    previous_count: usize,

    /// True if construction may fork.
    threaded: bool,
}

impl PhotonMap {
    /// Create a new `PhotonMap`.
    ///
    /// * `threaded` - Build the two top level subtrees in parallel.
    pub fn new(threaded: bool) -> Self {
        Self {
            slots: RwLock::new(vec![]),
            inserted: AtomicUsize::new(0),
            records: vec![],
            tree: vec![],
            constructed: false,
            previous_count: 0,
            threaded,
        }
    }

    /// Prepares for a new pass. The arena holds `estimated_count` photons or
    /// twice the previous pass's count, whichever is larger.
    ///
    /// * `estimated_count` - Expected number of photons.
    pub fn initialize(&mut self, estimated_count: usize) {
        let previous = if self.constructed {
            self.records.len()
        } else {
            self.previous_count
        };
        self.previous_count = previous;
        let capacity = max(max(estimated_count, 2 * previous), 1);

        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        slots.clear();
        slots.resize_with(capacity, OnceLock::new);
        *self.inserted.get_mut() = 0;

        self.records.clear();
        self.tree.clear();
        self.constructed = false;
        debug!("Photon map initialized for {} photons", capacity);
    }

    /// Stores a photon. Safe to call from many threads at once.
    ///
    /// * `point`                  - Hit position.
    /// * `vin`                    - Direction the photon travelled in.
    /// * `energy`                 - Radiant power carried.
    /// * `inverse_sampling_pdf`   - Inverse density of the arrival direction.
    /// * `wavelength_is_selected` - True if a wavelength was selected.
    pub fn store(
        &self,
        point: Point3f,
        vin: Vector3f,
        energy: SampledSpectra,
        inverse_sampling_pdf: Float,
        wavelength_is_selected: bool,
    ) {
        let record = PhotonRecord::new(point, vin, energy, inverse_sampling_pdf, wavelength_is_selected);
        let index = self.inserted.fetch_add(1, Ordering::Relaxed);

        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if index < slots.len() {
                let stored = slots[index].set(record);
                debug_assert!(stored.is_ok(), "photon slot {} written twice", index);
                return;
            }
        }

        self.grow(index);
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let stored = slots[index].set(record);
        debug_assert!(stored.is_ok(), "photon slot {} written twice", index);
    }

    /// Doubles the arena until it holds `index`. Another thread may have
    /// grown it already.
    fn grow(&self, index: usize) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if index < slots.len() {
            return;
        }
        let mut capacity = max(slots.len(), 1);
        while capacity <= index {
            capacity *= 2;
        }
        debug!("Growing photon map from {} to {} photons", slots.len(), capacity);
        slots.resize_with(capacity, OnceLock::new);
    }

    /// Builds the k-d tree over the stored photons. Must be called after all
    /// `store` calls of the pass have returned, and at most once per pass.
    pub fn construct(&mut self) -> Result<(), String> {
        if self.constructed {
            return Err("PhotonMap::construct(): already constructed for this pass".to_string());
        }

        let start = Instant::now();
        let count = *self.inserted.get_mut();
        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        let stored = min(count, slots.len());
        self.records = slots[..stored]
            .iter_mut()
            .filter_map(|slot| slot.take())
            .collect();
        if self.records.is_empty() {
            return Err("PhotonMap::construct(): no photons stored".to_string());
        }
        if self.records.len() > u32::MAX as usize {
            return Err(format!("PhotonMap::construct(): too many photons {}", self.records.len()));
        }

        let count = self.records.len();
        let mut indices: Vec<u32> = (0..count as u32).collect();
        self.tree = vec![None; tree_size(count)];

        if self.threaded && count >= PARALLEL_CONSTRUCTION_THRESHOLD {
            self.construct_parallel(&mut indices);
        } else {
            split_at_median(&self.records, &mut indices, 1, &mut self.tree);
        }

        self.constructed = true;
        debug!(
            "Constructed photon map of {} photons in {:.3}s",
            count,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Places the root, then builds the two child subtrees on separate
    /// threads and joins them.
    ///
    /// * `indices` - Indices of every record; reordered.
    fn construct_parallel(&mut self, indices: &mut [u32]) {
        let records = &self.records;
        let median = indices.len() / 2;
        self.tree[0] = Some(select_median(records, indices));

        let (left, right) = indices.split_at_mut(median);
        let right = &mut right[1..];
        let (left_tree, right_tree) = thread::scope(|s| {
            let left_handle = s.spawn(|| build_subtree(records, left));
            let right_tree = build_subtree(records, right);
            let left_tree = left_handle.join().unwrap_or_else(|e| panic::resume_unwind(e));
            (left_tree, right_tree)
        });
        graft_subtree(&left_tree, 2, &mut self.tree);
        graft_subtree(&right_tree, 3, &mut self.tree);
    }

    /// Returns true once the tree of the current pass is built.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Returns the number of photons of the current pass.
    pub fn len(&self) -> usize {
        if self.constructed {
            self.records.len()
        } else {
            self.inserted.load(Ordering::Relaxed)
        }
    }

    /// Returns true if no photon is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of photons the arena holds without growing.
    pub fn capacity(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns a photon record of the constructed tree.
    ///
    /// * `index` - Record index reported by a search.
    pub fn record(&self, index: u32) -> &PhotonRecord {
        &self.records[index as usize]
    }

    /// Finds the photons within `sqrt(radius2)` of `point` and offers them to
    /// `accumulator`. Photons arriving exactly tangent to the surface are
    /// never accepted.
    ///
    /// The descent enters the child on the query point's side of each
    /// splitting plane first and backtracks into its sibling only when the
    /// plane lies within the radius. This visits the same photons as a
    /// left-first traversal.
    ///
    /// * `point`       - Query point.
    /// * `normal`      - Surface normal at the query point.
    /// * `radius2`     - Squared search radius.
    /// * `cull_front`  - Reject photons arriving on the side `normal` points to.
    /// * `cull_back`   - Reject photons arriving on the opposite side.
    /// * `accumulator` - Receives the photons found.
    pub fn search(
        &self,
        point: &Point3f,
        normal: &Vector3f,
        radius2: Float,
        cull_front: bool,
        cull_back: bool,
        accumulator: &mut KnnAccumulator,
    ) -> Result<(), String> {
        if !self.constructed {
            return Err("PhotonMap::search(): called before construct()".to_string());
        }

        let tree = &self.tree;
        let size = tree.len();
        let mut index = 1_usize;
        'traversal: loop {
            // Descend towards the query point visiting every node on the way.
            while index <= size {
                let node = match tree[index - 1] {
                    Some(node) => node,
                    None => break,
                };
                let record = &self.records[node.record as usize];
                let distance2 = point.distance_squared(&record.point);
                if distance2 < radius2 {
                    let cos = record.cos_theta(normal);
                    if (!cull_front && cos > 0.0) || (!cull_back && cos < 0.0) {
                        accumulator.insert(distance2, node.record);
                    }
                }
                match node.kind {
                    NodeKind::Leaf => break,
                    NodeKind::Split(axis) => {
                        let diff = point[axis] - record.point[axis];
                        index = 2 * index + (diff >= 0.0) as usize;
                    }
                }
            }

            // Ascend until an unvisited far child within range is found.
            loop {
                if index <= 1 {
                    break 'traversal;
                }
                let parent = index >> 1;
                if let Some(TreeNode {
                    record,
                    kind: NodeKind::Split(axis),
                }) = tree[parent - 1]
                {
                    let diff = point[axis] - self.records[record as usize].point[axis];
                    let near = 2 * parent + (diff >= 0.0) as usize;
                    if index == near && diff * diff < radius2 {
                        index = near ^ 1;
                        continue 'traversal;
                    }
                }
                index = parent;
            }
        }
        Ok(())
    }

    /// Releases all photons and the tree.
    pub fn reset(&mut self) {
        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        *slots = vec![];
        *self.inserted.get_mut() = 0;
        self.records = vec![];
        self.tree = vec![];
        self.constructed = false;
        self.previous_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hikari::rng::RNG;
    use std::collections::HashSet;

    const DOWN: Vector3f = Vector3f { x: 0.0, y: 0.0, z: -1.0 };

    fn random_map(n: usize, threaded: bool, seed: u64) -> PhotonMap {
        let mut rng = RNG::new(seed);
        let mut map = PhotonMap::new(threaded);
        map.initialize(n / 4);
        for _ in 0..n {
            let p = Point3f::new(rng.uniform_float(), rng.uniform_float(), rng.uniform_float());
            map.store(p, DOWN, SampledSpectra::ONE, 1.0, false);
        }
        map.construct().unwrap();
        map
    }

    fn assert_complete(map: &PhotonMap, n: usize) {
        let mut seen = HashSet::new();
        for node in map.tree.iter().flatten() {
            assert!(seen.insert(node.record), "record {} appears twice", node.record);
        }
        assert_eq!(seen.len(), n);
        assert!((0..n as u32).all(|i| seen.contains(&i)));
    }

    fn brute_force(map: &PhotonMap, point: &Point3f, radius2: Float, k: usize) -> Vec<u32> {
        let mut candidates: Vec<(Float, u32)> = map
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (point.distance_squared(&r.point), i as u32))
            .filter(|(d2, _)| *d2 < radius2)
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        candidates.truncate(k);
        let mut indices: Vec<u32> = candidates.into_iter().map(|(_, i)| i).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn three_photon_scenario() {
        let mut map = PhotonMap::new(false);
        map.initialize(3);
        let energy = SampledSpectra::single(0, 1.0);
        map.store(Point3f::new(0.0, 0.0, 0.0), DOWN, energy, 1.0, false);
        map.store(Point3f::new(1.0, 0.0, 0.0), DOWN, energy, 1.0, false);
        map.store(Point3f::new(10.0, 10.0, 10.0), DOWN, energy, 1.0, false);
        map.construct().unwrap();

        let mut knn = KnnAccumulator::new(2).unwrap();
        map.search(&Point3f::ZERO, &Vector3f::Z_AXIS, 4.0, false, false, &mut knn)
            .unwrap();

        let found: Vec<(Float, Point3f)> = knn
            .sorted()
            .iter()
            .map(|n| (n.distance2.into_inner(), map.record(n.index).point))
            .collect();
        assert_eq!(
            found,
            vec![(0.0, Point3f::new(0.0, 0.0, 0.0)), (1.0, Point3f::new(1.0, 0.0, 0.0))]
        );
    }

    #[test]
    fn preconditions_are_errors() {
        let mut map = PhotonMap::new(true);
        let mut knn = KnnAccumulator::new(4).unwrap();
        assert!(map.search(&Point3f::ZERO, &Vector3f::Z_AXIS, 1.0, false, false, &mut knn).is_err());

        map.initialize(16);
        assert!(map.construct().is_err());
        assert!(!map.is_constructed());
        assert!(map.search(&Point3f::ZERO, &Vector3f::Z_AXIS, 1.0, false, false, &mut knn).is_err());
    }

    #[test]
    fn second_construct_keeps_the_tree() {
        let mut map = PhotonMap::new(false);
        map.initialize(2);
        map.store(Point3f::new(0.5, 0.0, 0.0), DOWN, SampledSpectra::ONE, 1.0, false);
        map.store(Point3f::new(-0.5, 0.0, 0.0), DOWN, SampledSpectra::ONE, 1.0, false);
        map.construct().unwrap();

        assert!(map.construct().is_err());
        assert!(map.is_constructed());
        assert_eq!(map.len(), 2);

        let mut knn = KnnAccumulator::new(2).unwrap();
        map.search(&Point3f::ZERO, &Vector3f::Z_AXIS, 100.0, false, false, &mut knn)
            .unwrap();
        assert_eq!(knn.sorted().len(), 2);
    }

    #[test]
    fn tree_is_complete() {
        for n in [1, 2, 7, 1000, 100_000] {
            for threaded in [false, true] {
                let map = random_map(n, threaded, n as u64);
                assert_eq!(map.len(), n);
                assert_eq!(map.tree.len(), tree_size(n));
                assert_complete(&map, n);
            }
        }
    }

    #[test]
    fn search_matches_brute_force() {
        for threaded in [false, true] {
            let map = random_map(20_000, threaded, 7);
            let mut rng = RNG::new(99);
            for k in [1, 8, 50] {
                let mut knn = KnnAccumulator::new(k).unwrap();
                for _ in 0..50 {
                    let q = Point3f::new(rng.uniform_float(), rng.uniform_float(), rng.uniform_float());
                    for radius2 in [0.0025, 0.01, 3.0] {
                        knn.clear();
                        map.search(&q, &Vector3f::Z_AXIS, radius2, false, false, &mut knn)
                            .unwrap();
                        let mut found: Vec<u32> = knn.iter().map(|n| n.index).collect();
                        found.sort_unstable();
                        assert_eq!(found, brute_force(&map, &q, radius2, k));
                    }
                }
            }
        }
    }

    #[test]
    fn culling() {
        let mut map = PhotonMap::new(false);
        map.initialize(4);
        // Arrives on the front side of a +z facing surface.
        map.store(Point3f::new(0.1, 0.0, 0.0), DOWN, SampledSpectra::ONE, 1.0, false);
        // Arrives from below.
        map.store(Point3f::new(-0.1, 0.0, 0.0), -DOWN, SampledSpectra::ONE, 1.0, false);
        // Tangent to the surface.
        map.store(Point3f::new(0.0, 0.1, 0.0), Vector3f::new(1.0, 0.0, 0.0), SampledSpectra::ONE, 1.0, false);
        map.construct().unwrap();

        let count = |cull_front, cull_back| {
            let mut knn = KnnAccumulator::new(8).unwrap();
            map.search(&Point3f::ZERO, &Vector3f::Z_AXIS, 1.0, cull_front, cull_back, &mut knn)
                .unwrap();
            knn.len()
        };
        assert_eq!(count(false, false), 2);
        assert_eq!(count(true, false), 1);
        assert_eq!(count(false, true), 1);
        assert_eq!(count(true, true), 0);
    }

    #[test]
    fn concurrent_stores_grow_the_arena() {
        let mut map = PhotonMap::new(true);
        map.initialize(16);
        let threads = 8;
        let per_thread = 5_000;
        thread::scope(|s| {
            for t in 0..threads {
                let map = &map;
                s.spawn(move || {
                    let mut rng = RNG::new(t as u64);
                    for _ in 0..per_thread {
                        let p = Point3f::new(rng.uniform_float(), rng.uniform_float(), rng.uniform_float());
                        map.store(p, DOWN, SampledSpectra::ONE, 1.0, t % 2 == 0);
                    }
                });
            }
        });
        assert_eq!(map.len(), threads * per_thread);
        assert!(map.capacity() >= threads * per_thread);

        map.construct().unwrap();
        assert_complete(&map, threads * per_thread);
        let selected = map.records.iter().filter(|r| r.wavelength_is_selected).count();
        assert_eq!(selected, threads / 2 * per_thread);
    }

    #[test]
    fn arena_adapts_to_previous_pass() {
        let mut map = random_map(100, false, 1);
        map.initialize(10);
        assert_eq!(map.capacity(), 200);
        assert!(map.is_empty());
        assert!(!map.is_constructed());

        map.reset();
        map.initialize(10);
        assert_eq!(map.capacity(), 10);
    }
}
