/// Dense symmetric cosine-similarity matrix over L2-normalized embeddings.
///
/// Built per cluster during ranking; the row mean is the "relevance" signal
/// of a document inside its thread (self included, so a singleton cluster
/// yields relevance 1.0).
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Pairwise inner products of pre-normalized rows.
    pub fn build<R: AsRef<[f32]>>(rows: &[R]) -> Self {
        let n = rows.len();
        let mut values = vec![0.0f32; n * n];
        for i in 0..n {
            for j in i..n {
                let sim = dot(rows[i].as_ref(), rows[j].as_ref());
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    /// Average similarity of row `i` to every row, itself included.
    pub fn row_mean(&self, i: usize) -> f64 {
        let row = &self.values[i * self.n..(i + 1) * self.n];
        row.iter().map(|&v| v as f64).sum::<f64>() / self.n as f64
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine distance between normalized vectors. A zero-norm vector is at
/// distance 1 from everything, so degenerate documents isolate into
/// singleton clusters.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - dot(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::l2_normalize;

    fn normalized(mut v: Vec<f32>) -> Vec<f32> {
        l2_normalize(&mut v);
        v
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let rows = vec![
            normalized(vec![1.0, 2.0, 3.0]),
            normalized(vec![3.0, 1.0, 0.5]),
            normalized(vec![0.1, 0.1, 5.0]),
        ];
        let m = SimilarityMatrix::build(&rows);
        for i in 0..3 {
            assert!((m.get(i, i) - 1.0).abs() < 1e-5);
            for j in 0..3 {
                assert!((m.get(i, j) - m.get(j, i)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn singleton_row_mean_is_one() {
        let rows = vec![normalized(vec![1.0, 1.0])];
        let m = SimilarityMatrix::build(&rows);
        assert!((m.row_mean(0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_norm_row_is_similarity_zero_everywhere() {
        let rows = vec![normalized(vec![1.0, 0.0]), vec![0.0, 0.0]];
        let m = SimilarityMatrix::build(&rows);
        assert_eq!(m.get(1, 0), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert!(m.row_mean(1).is_finite());
    }

    #[test]
    fn orthogonal_vectors_are_at_distance_one() {
        let a = normalized(vec![1.0, 0.0]);
        let b = normalized(vec![0.0, 1.0]);
        assert!((cosine_distance(&a, &b) - 1.0).abs() < 1e-6);
        assert!(cosine_distance(&a, &a).abs() < 1e-6);
    }
}
