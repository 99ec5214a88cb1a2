//! Compressed sparse-row storage for edge weights.
//!
//! Row `r` owns `inner[outer[r]..outer[r + 1]]` (child ids, strictly
//! ascending) and the matching slice of `data` (weights). Offsets and
//! column ids are `i32` so the arrays can be handed to foreign consumers
//! as-is.

use crate::edge::Triplet;

/// Square CSR matrix: row = parent id, column = child id, value = weight.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    dim: usize,
    outer: Vec<i32>,
    inner: Vec<i32>,
    data: Vec<f32>,
}

impl Default for CsrMatrix {
    fn default() -> Self {
        Self::zeros(0)
    }
}

impl CsrMatrix {
    /// A `dim × dim` matrix with no entries.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            outer: vec![0; dim + 1],
            inner: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Build from an unordered edit log. O(E log E).
    ///
    /// The sort is stable, so repeated `(parent, child)` pairs are summed in
    /// the order they were staged and the same log always yields the same
    /// bits.
    pub fn from_triplets(dim: usize, triplets: &[Triplet]) -> Self {
        let mut entries: Vec<(usize, usize, f32)> = triplets
            .iter()
            .map(|t| (t.parent, t.child, t.weight))
            .collect();
        entries.sort_by_key(|&(row, col, _)| (row, col));

        let mut builder = Builder::new(dim, entries.len());
        for (row, col, weight) in entries {
            builder.push(row, col, weight);
        }
        builder.finish()
    }

    /// Build from per-row adjacency, `rows[r]` holding `(child, weight)` in
    /// any order. Rows past `rows.len()` are empty.
    pub fn from_rows(dim: usize, rows: Vec<Vec<(usize, f32)>>) -> Self {
        let nnz = rows.iter().map(Vec::len).sum();
        let mut builder = Builder::new(dim, nnz);
        for (row, mut entries) in rows.into_iter().enumerate() {
            entries.sort_by_key(|&(col, _)| col);
            for (col, weight) in entries {
                builder.push(row, col, weight);
            }
        }
        builder.finish()
    }

    pub fn rows(&self) -> usize {
        self.dim
    }

    pub fn cols(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn outer(&self) -> &[i32] {
        &self.outer
    }

    pub fn inner(&self) -> &[i32] {
        &self.inner
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Column ids and weights of one row. Empty for rows outside the matrix.
    pub fn row(&self, row: usize) -> (&[i32], &[f32]) {
        if row >= self.dim {
            return (&[], &[]);
        }
        let start = self.outer[row] as usize;
        let end = self.outer[row + 1] as usize;
        (&self.inner[start..end], &self.data[start..end])
    }

    /// `(child, weight)` pairs of one row in column order.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let (cols, weights) = self.row(row);
        cols.iter()
            .zip(weights)
            .map(|(&col, &weight)| (col as usize, weight))
    }

    /// Every entry as `(parent, child, weight)`, row-major.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.dim).flat_map(move |row| {
            self.row_iter(row)
                .map(move |(col, weight)| (row, col, weight))
        })
    }

    /// Linear scan of `row` for `col`. O(row size).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_iter(row).any(|(c, _)| c == col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.row_iter(row)
            .find(|&(c, _)| c == col)
            .map(|(_, weight)| weight)
    }
}

/// Row-major accumulator. Entries must arrive sorted by `(row, col)`.
struct Builder {
    dim: usize,
    row: usize,
    outer: Vec<i32>,
    inner: Vec<i32>,
    data: Vec<f32>,
}

impl Builder {
    fn new(dim: usize, capacity: usize) -> Self {
        let mut outer = Vec::with_capacity(dim + 1);
        outer.push(0);
        Self {
            dim,
            row: 0,
            outer,
            inner: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, row: usize, col: usize, weight: f32) {
        debug_assert!(row < self.dim && col < self.dim, "entry outside matrix");
        debug_assert!(row >= self.row, "rows must arrive in order");
        while self.row < row {
            self.outer.push(self.inner.len() as i32);
            self.row += 1;
        }

        let row_start = self.outer[self.row] as usize;
        let col = col as i32;
        if self.inner.len() > row_start && self.inner.last() == Some(&col) {
            if let Some(last) = self.data.last_mut() {
                *last += weight;
            }
        } else {
            self.inner.push(col);
            self.data.push(weight);
        }
    }

    fn finish(mut self) -> CsrMatrix {
        while self.row < self.dim {
            self.outer.push(self.inner.len() as i32);
            self.row += 1;
        }
        CsrMatrix {
            dim: self.dim,
            outer: self.outer,
            inner: self.inner,
            data: self.data,
        }
    }
}
