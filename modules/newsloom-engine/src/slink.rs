//! Single-link hierarchical clustering via the SLINK pointer representation.
//!
//! SLINK builds the full single-link dendrogram in O(n²) time and O(n)
//! auxiliary space (three flat arrays), one point at a time. Cutting the
//! dendrogram at a distance threshold yields the partition where two
//! documents share a cluster iff a chain of consecutive pairs, each within
//! the threshold, connects them.

use crate::similarity::cosine_distance;

/// Pointer representation of a single-link dendrogram.
///
/// `merge_height[i]` is the lowest distance at which point `i` merges into
/// a cluster containing `pointer[i]`. The last point's height is infinite.
pub struct Dendrogram {
    pointer: Vec<usize>,
    merge_height: Vec<f32>,
}

/// Build the dendrogram over cosine distances between pre-normalized rows.
///
/// Points are processed in input order, so equal-distance merges resolve
/// the same way on every run over identical input.
pub fn slink<R: AsRef<[f32]>>(rows: &[R]) -> Dendrogram {
    let n = rows.len();
    let mut pointer = vec![0usize; n];
    let mut merge_height = vec![f32::INFINITY; n];
    let mut row_dist = vec![0.0f32; n];

    for i in 0..n {
        pointer[i] = i;
        merge_height[i] = f32::INFINITY;

        for j in 0..i {
            row_dist[j] = cosine_distance(rows[j].as_ref(), rows[i].as_ref());
        }
        for j in 0..i {
            let p = pointer[j];
            if merge_height[j] >= row_dist[j] {
                row_dist[p] = row_dist[p].min(merge_height[j]);
                merge_height[j] = row_dist[j];
                pointer[j] = i;
            } else {
                row_dist[p] = row_dist[p].min(row_dist[j]);
            }
        }
        for j in 0..i {
            if merge_height[j] >= merge_height[pointer[j]] {
                pointer[j] = i;
            }
        }
    }

    Dendrogram {
        pointer,
        merge_height,
    }
}

impl Dendrogram {
    pub fn len(&self) -> usize {
        self.pointer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointer.is_empty()
    }

    /// Cut the dendrogram at `threshold`: connected components of the
    /// pointer links whose merge height is within the threshold.
    ///
    /// Members keep input order and components are emitted in order of
    /// their first member, so the partition is fully deterministic.
    /// Never emits an empty component.
    pub fn cut(&self, threshold: f32) -> Vec<Vec<usize>> {
        let n = self.pointer.len();
        let mut parent: Vec<usize> = (0..n).collect();

        for j in 0..n {
            if self.merge_height[j] <= threshold {
                let a = find(&mut parent, j);
                let b = find(&mut parent, self.pointer[j]);
                if a != b {
                    parent[a] = b;
                }
            }
        }

        // first-member-order component labels
        let mut slot_of_root = vec![usize::MAX; n];
        let mut components: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = find(&mut parent, i);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = components.len();
                components.push(Vec::new());
            }
            components[slot_of_root[root]].push(i);
        }
        components
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}
