use super::vectorizer::TermVectorSpace;

/// Dense symmetric matrix of pairwise cosine similarities
///
/// Row `i` belongs to corpus row `i`. The diagonal is 1.0 for every row,
/// including rows with an all-zero vector, which score 0.0 against all
/// other rows.
///
/// Dot products are accumulated in `f64` but stored as `f32`, so ranking
/// happens at `f32` precision: scores closer than `f32` resolution compare
/// equal and fall back to the row-index tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    cells: Vec<f32>,
}

impl SimilarityMatrix {
    /// Computes all pairwise similarities of the space's vectors
    pub fn build(space: &TermVectorSpace) -> Self {
        let vectors = space.vectors();
        let n = vectors.len();

        // term column -> (row, weight), rows ascending
        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); space.vocabulary_len()];
        for (row, vector) in vectors.iter().enumerate() {
            for &(col, weight) in vector {
                postings[col].push((row, weight));
            }
        }

        let mut cells = vec![0.0f32; n * n];
        let mut acc = vec![0.0f64; n];

        for (i, vector) in vectors.iter().enumerate() {
            for &(col, weight) in vector {
                for &(j, other) in &postings[col] {
                    if j > i {
                        acc[j] += weight * other;
                    }
                }
            }

            cells[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let score = acc[j].clamp(0.0, 1.0) as f32;
                cells[i * n + j] = score;
                cells[j * n + i] = score;
                acc[j] = 0.0;
            }
        }

        Self { n, cells }
    }

    /// Number of rows, equal to the number of columns
    pub fn size(&self) -> usize {
        self.n
    }

    /// Similarities of row `i` against every row
    pub fn row(&self, i: usize) -> &[f32] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.n + j]
    }
}
