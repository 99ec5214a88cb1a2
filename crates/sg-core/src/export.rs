//! Zero-copy view of a compacted matrix for foreign consumers.
//!
//! The three arrays follow the standard CSR layout, so a consumer can map
//! them straight onto its own sparse type (scipy's `csr_matrix((data,
//! inner, outer))`, for example). The view borrows the store: it cannot
//! outlive the store, and no mutation can happen while it is alive.

use crate::csr::CsrMatrix;

#[derive(Clone, Copy, Debug)]
pub struct CsrView<'a> {
    pub nnz: i32,
    pub rows: i32,
    pub cols: i32,
    /// Weights, row-major.
    pub data: &'a [f32],
    /// Row offsets, `rows + 1` of them.
    pub outer: &'a [i32],
    /// Column id per weight.
    pub inner: &'a [i32],
}

impl<'a> CsrView<'a> {
    pub fn new(matrix: &'a CsrMatrix) -> Self {
        Self {
            nnz: matrix.nnz() as i32,
            rows: matrix.rows() as i32,
            cols: matrix.cols() as i32,
            data: matrix.data(),
            outer: matrix.outer(),
            inner: matrix.inner(),
        }
    }

    /// Whether the arrays agree with the advertised shape.
    ///
    /// An empty store is valid: zero rows, zero entries, `outer == [0]`.
    pub fn is_valid(&self) -> bool {
        let (Ok(rows), Ok(nnz)) = (usize::try_from(self.rows), usize::try_from(self.nnz)) else {
            return false;
        };
        self.outer.len() == rows + 1
            && self.data.len() == nnz
            && self.inner.len() == nnz
            && self.outer.first() == Some(&0)
            && self.outer.last() == Some(&self.nnz)
    }

    /// Column ids and weights of row `r`.
    pub fn row(&self, r: usize) -> (&'a [i32], &'a [f32]) {
        if r + 1 >= self.outer.len() {
            return (&[], &[]);
        }
        let start = self.outer[r] as usize;
        let end = self.outer[r + 1] as usize;
        (&self.inner[start..end], &self.data[start..end])
    }
}
