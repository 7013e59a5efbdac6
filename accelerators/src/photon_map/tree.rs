//! Implicit k-d tree construction.

use super::*;
use order_stat::kth_by;
use std::cmp::Ordering;

/// Splitting plane or leaf tag of a tree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Interior node splitting space at the record's coordinate.
    Split(Axis),

    /// Node without children.
    Leaf,
}

/// Node of the implicit k-d tree. The tree is stored as an array where node
/// number `i` (1-based) lives at `i - 1` and has children `2i` and `2i + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// Index of the photon record.
    pub record: u32,

    /// Splitting axis or leaf tag.
    pub kind: NodeKind,
}

/// Returns the array length holding a median split tree of `count` records.
#[inline]
pub fn tree_size(count: usize) -> usize {
    (count + 1).next_power_of_two()
}

/// Builds the subtree over `indices` rooted at node `number`.
///
/// * `records` - The photon records.
/// * `indices` - Indices of the records in this subtree; reordered.
/// * `number`  - 1-based node number of the subtree root.
/// * `tree`    - The tree array.
pub fn split_at_median(records: &[PhotonRecord], indices: &mut [u32], number: usize, tree: &mut [Option<TreeNode>]) {
    match indices.len() {
        0 => tree[number - 1] = None,
        1 => {
            tree[number - 1] = Some(TreeNode {
                record: indices[0],
                kind: NodeKind::Leaf,
            })
        }
        size => {
            let median = size / 2;
            tree[number - 1] = Some(select_median(records, indices));

            let (left, right) = indices.split_at_mut(median);
            split_at_median(records, left, 2 * number, tree);
            split_at_median(records, &mut right[1..], 2 * number + 1, tree);
        }
    }
}

/// Partitions `indices` around the median along the axis of largest extent
/// and returns the node for the median. Elements before the median are not
/// greater and elements after it are not smaller.
///
/// * `records` - The photon records.
/// * `indices` - At least two record indices; reordered.
pub fn select_median(records: &[PhotonRecord], indices: &mut [u32]) -> TreeNode {
    debug_assert!(indices.len() > 1);
    let axis = longest_axis(records, indices);
    let median = indices.len() / 2;
    kth_by(indices, median, |a, b| compare(records, *a, *b, axis));
    TreeNode {
        record: indices[median],
        kind: NodeKind::Split(axis),
    }
}

/// Builds a subtree into its own array, numbering its root 1.
///
/// * `records` - The photon records.
/// * `indices` - Indices of the records in this subtree; reordered.
pub fn build_subtree(records: &[PhotonRecord], indices: &mut [u32]) -> Vec<Option<TreeNode>> {
    let mut subtree = vec![None; tree_size(indices.len())];
    split_at_median(records, indices, 1, &mut subtree);
    subtree
}

/// Copies a subtree built by `build_subtree` into the tree under node
/// `number`. Node `r` of the subtree at depth `d` maps to
/// `(number << d) | (r ^ (1 << d))`.
///
/// * `subtree` - The subtree.
/// * `number`  - 1-based node number of the subtree root in `tree`.
/// * `tree`    - The tree array.
pub fn graft_subtree(subtree: &[Option<TreeNode>], number: usize, tree: &mut [Option<TreeNode>]) {
    for (i, node) in subtree.iter().enumerate() {
        if let Some(node) = node {
            let r = i + 1;
            let depth = usize::BITS - 1 - r.leading_zeros();
            let target = (number << depth) | (r ^ (1 << depth));
            tree[target - 1] = Some(*node);
        }
    }
}

/// Returns the axis of the largest extent of the records' bounding box.
fn longest_axis(records: &[PhotonRecord], indices: &[u32]) -> Axis {
    Bounds3f::from_points(indices.iter().map(|&i| &records[i as usize].point)).longest_axis()
}

/// Orders two records by a coordinate.
#[inline]
fn compare(records: &[PhotonRecord], a: u32, b: u32, axis: Axis) -> Ordering {
    let pa = records[a as usize].point[axis];
    let pb = records[b as usize].point[axis];
    pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: Float, y: Float, z: Float) -> PhotonRecord {
        PhotonRecord::new(
            Point3f::new(x, y, z),
            Vector3f::new(0.0, 0.0, -1.0),
            SampledSpectra::ONE,
            1.0,
            false,
        )
    }

    #[test]
    fn sizes() {
        assert_eq!(tree_size(1), 2);
        assert_eq!(tree_size(2), 4);
        assert_eq!(tree_size(3), 4);
        assert_eq!(tree_size(7), 8);
        assert_eq!(tree_size(8), 16);
    }

    #[test]
    fn median_split_along_longest_axis() {
        let records: Vec<PhotonRecord> = (0..5).map(|i| record(0.0, (4 - i) as Float, 0.1 * i as Float)).collect();
        let mut indices: Vec<u32> = (0..5).collect();
        let tree = build_subtree(&records, &mut indices);
        let root = tree[0].unwrap();
        assert_eq!(root.kind, NodeKind::Split(Axis::Y));
        assert_eq!(records[root.record as usize].point.y, 2.0);
    }

    #[test]
    fn graft_maps_relative_numbers() {
        let records: Vec<PhotonRecord> = (0..3).map(|i| record(i as Float, 0.0, 0.0)).collect();
        let mut indices: Vec<u32> = (0..3).collect();
        let subtree = build_subtree(&records, &mut indices);

        // Subtree nodes 1, 2, 3 land on 3, 6, 7.
        let mut tree = vec![None; 8];
        graft_subtree(&subtree, 3, &mut tree);
        assert_eq!(tree[2], subtree[0]);
        assert_eq!(tree[5], subtree[1]);
        assert_eq!(tree[6], subtree[2]);
        assert_eq!(tree.iter().filter(|n| n.is_some()).count(), 3);
    }
}
