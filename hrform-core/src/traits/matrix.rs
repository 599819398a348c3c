//! Logical 0/1 query surface shared by storage, encoders and renderers

/// A square boolean pattern addressed in logical coordinates
///
/// Implementors only answer membership queries; how the pattern is stored
/// and permuted is up to them.
pub trait SparsePattern {
    /// Number of rows, equal to the number of columns
    fn dimension(&self) -> usize;

    /// Number of nonzero entries
    fn nnz(&self) -> usize;

    /// Whether the entry at logical `(row, col)` is nonzero
    fn is_nonzero(&self, row: usize, col: usize) -> bool;

    /// Fill `out[col]` with `is_nonzero(row, col)` for every logical column
    ///
    /// `out` must hold exactly `dimension()` slots.
    fn fill_row(&self, row: usize, out: &mut [bool]) {
        debug_assert_eq!(out.len(), self.dimension());
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = self.is_nonzero(row, col);
        }
    }
}
