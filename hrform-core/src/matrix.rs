//! Compressed row storage for square 0/1 matrices with permutation layers
//!
//! The topology (`row_ptr`, `row_len`, `col_index`) is fixed once a
//! [`CrsMatrix`] is built. Reordering only touches the two [`Permutation`]s,
//! and every public query takes logical coordinates.

use alloc::vec::Vec;
use core::ops::Range;

use crate::format::constants::COLUMN_GROWTH;
use crate::permutation::Permutation;
use crate::traits::SparsePattern;
use crate::validation::validate_column;
use crate::{HrError, Result};

/// Square boolean matrix in compressed row storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsMatrix {
    dimension: usize,
    /// `row_ptr[i]` is the start of physical row `i` in `col_index`
    row_ptr: Vec<usize>,
    /// `row_len[i]` is the number of nonzeros in physical row `i`
    row_len: Vec<usize>,
    /// Physical column indices, unsorted within each row
    col_index: Vec<usize>,
    row_order: Permutation,
    col_order: Permutation,
}

impl CrsMatrix {
    /// Start building a matrix row by row
    pub fn builder(dimension: usize) -> CrsBuilder {
        CrsBuilder::new(dimension)
    }

    /// Build a matrix from the column indices of each row
    pub fn from_rows<I, R>(dimension: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = usize>,
    {
        let mut builder = CrsBuilder::new(dimension);
        for row in rows {
            builder.push_row(row)?;
        }
        builder.finish()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.col_index.len()
    }

    /// Fraction of entries that are nonzero
    pub fn density(&self) -> f64 {
        if self.dimension == 0 {
            return 0.0;
        }
        self.nnz() as f64 / (self.dimension as f64 * self.dimension as f64)
    }

    #[inline]
    pub fn row_order(&self) -> &Permutation {
        &self.row_order
    }

    #[inline]
    pub fn col_order(&self) -> &Permutation {
        &self.col_order
    }

    /// Physical column indices stored for a physical row
    #[inline]
    pub fn physical_row(&self, physical: usize) -> &[usize] {
        let start = self.row_ptr[physical];
        &self.col_index[start..start + self.row_len[physical]]
    }

    /// Physical column indices of the row at a logical position
    #[inline]
    pub fn row_entries(&self, row: usize) -> &[usize] {
        self.physical_row(self.row_order.get(row))
    }

    /// Logical columns of a logical row, given the inverse column order
    pub fn logical_row<'a>(
        &'a self,
        row: usize,
        col_inverse: &'a [usize],
    ) -> impl Iterator<Item = usize> + 'a {
        self.row_entries(row).iter().map(move |&col| col_inverse[col])
    }

    /// Whether the logical entry `(row, col)` is nonzero
    pub fn is_nonzero(&self, row: usize, col: usize) -> bool {
        let physical_col = self.col_order.get(col);
        find_in_row(self.row_entries(row), physical_col).is_some()
    }

    /// Nonzeros of a logical row whose physical column lies in `cols`
    pub fn row_nnz_in(&self, row: usize, cols: Range<usize>) -> usize {
        self.row_entries(row)
            .iter()
            .filter(|&&col| cols.contains(&col))
            .count()
    }

    /// Smallest number of nonzeros in any row, `None` for an empty matrix
    pub fn min_nnz_per_row(&self) -> Option<usize> {
        self.row_len.iter().copied().min()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.row_order.swap(a, b);
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) {
        self.col_order.swap(a, b);
    }

    /// Move the logical row at `from` to `to`, shifting the rows in between
    pub fn move_row(&mut self, from: usize, to: usize) {
        self.row_order.move_entry(from, to);
    }

    /// Move the logical column at `from` to `to`, shifting the columns in between
    pub fn move_col(&mut self, from: usize, to: usize) {
        self.col_order.move_entry(from, to);
    }

    /// Return both orders to the identity
    pub fn reset_order(&mut self) {
        self.row_order.reset();
        self.col_order.reset();
    }

    /// Check the storage invariants: consistent offsets, `nnz == sum(row_len)`
    /// and bijective orders
    pub fn is_consistent(&self) -> bool {
        let m = self.dimension;
        if self.row_ptr.len() != m || self.row_len.len() != m {
            return false;
        }
        if self.row_len.iter().sum::<usize>() != self.col_index.len() {
            return false;
        }
        let rows_fit = self
            .row_ptr
            .iter()
            .zip(&self.row_len)
            .all(|(&start, &len)| start + len <= self.col_index.len());
        rows_fit
            && self.col_index.iter().all(|&col| col < m)
            && self.row_order.len() == m
            && self.col_order.len() == m
            && self.row_order.is_valid()
            && self.col_order.is_valid()
    }
}

impl SparsePattern for CrsMatrix {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn nnz(&self) -> usize {
        self.col_index.len()
    }

    fn is_nonzero(&self, row: usize, col: usize) -> bool {
        CrsMatrix::is_nonzero(self, row, col)
    }
}

/// Index of `col` within a row slice, if present
#[inline]
fn find_in_row(entries: &[usize], col: usize) -> Option<usize> {
    entries.iter().position(|&c| c == col)
}

/// Streaming constructor for [`CrsMatrix`]
///
/// Entries are appended to the current row with [`push`](Self::push) and the
/// row is closed with [`end_row`](Self::end_row). Nothing is sized from the
/// dimension up front: every store grows with the entries and rows actually
/// pushed, in fixed increments, and reports allocation failure instead of
/// aborting.
#[derive(Debug)]
pub struct CrsBuilder {
    dimension: usize,
    row_ptr: Vec<usize>,
    row_len: Vec<usize>,
    col_index: Vec<usize>,
    row_start: usize,
    /// `last_row[col]` is one past the last row that pushed `col`; covers
    /// the columns seen so far
    last_row: Vec<usize>,
}

impl CrsBuilder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            row_ptr: Vec::new(),
            row_len: Vec::new(),
            col_index: Vec::new(),
            row_start: 0,
            last_row: Vec::new(),
        }
    }

    /// Number of completed rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_ptr.len()
    }

    /// Entries pushed so far, including the open row
    #[inline]
    pub fn nnz(&self) -> usize {
        self.col_index.len()
    }

    /// Append a nonzero at physical column `col` to the open row
    pub fn push(&mut self, col: usize) -> Result<()> {
        let row = self.rows();
        if row >= self.dimension {
            return Err(HrError::RowCountMismatch {
                expected: self.dimension,
                found: row + 1,
            });
        }
        validate_column(row, col, self.dimension)?;
        if col >= self.last_row.len() {
            let seen = (col + 1).max(self.last_row.len() + COLUMN_GROWTH);
            let seen = seen.min(self.dimension);
            self.last_row
                .try_reserve_exact(seen - self.last_row.len())
                .map_err(|_| HrError::AllocationFailed)?;
            self.last_row.resize(seen, 0);
        }
        if self.last_row[col] == row + 1 {
            return Err(HrError::DuplicateEntry { row, col });
        }
        self.last_row[col] = row + 1;

        grow(&mut self.col_index)?;
        self.col_index.push(col);
        Ok(())
    }

    /// Close the open row
    pub fn end_row(&mut self) -> Result<()> {
        let row = self.rows();
        if row >= self.dimension {
            return Err(HrError::RowCountMismatch {
                expected: self.dimension,
                found: row + 1,
            });
        }
        grow(&mut self.row_ptr)?;
        grow(&mut self.row_len)?;
        self.row_ptr.push(self.row_start);
        self.row_len.push(self.col_index.len() - self.row_start);
        self.row_start = self.col_index.len();
        Ok(())
    }

    /// Push a complete row
    pub fn push_row<R: IntoIterator<Item = usize>>(&mut self, cols: R) -> Result<()> {
        for col in cols {
            self.push(col)?;
        }
        self.end_row()
    }

    /// Finish construction; all `dimension` rows must have been closed
    pub fn finish(self) -> Result<CrsMatrix> {
        if self.rows() != self.dimension || self.row_start != self.col_index.len() {
            return Err(HrError::RowCountMismatch {
                expected: self.dimension,
                found: self.rows(),
            });
        }

        let matrix = CrsMatrix {
            dimension: self.dimension,
            row_ptr: self.row_ptr,
            row_len: self.row_len,
            col_index: self.col_index,
            row_order: Permutation::try_identity(self.dimension)?,
            col_order: Permutation::try_identity(self.dimension)?,
        };
        debug_assert!(matrix.is_consistent());
        Ok(matrix)
    }
}

/// Make room for one more entry, growing by a fixed increment when full
#[inline]
fn grow(store: &mut Vec<usize>) -> Result<()> {
    if store.len() == store.capacity() {
        store
            .try_reserve_exact(COLUMN_GROWTH)
            .map_err(|_| HrError::AllocationFailed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn staircase() -> CrsMatrix {
        CrsMatrix::from_rows(4, [vec![0], vec![1, 0], vec![2, 1], vec![3, 2]]).unwrap()
    }

    #[test]
    fn test_from_rows() {
        let m = staircase();
        assert_eq!(m.dimension(), 4);
        assert_eq!(m.nnz(), 7);
        assert!(m.is_consistent());
        assert_eq!(m.physical_row(1), &[1, 0]);
        assert_eq!(m.density(), 7.0 / 16.0);
    }

    #[test]
    fn test_is_nonzero_identity_order() {
        let m = staircase();
        let expected = [
            [true, false, false, false],
            [true, true, false, false],
            [false, true, true, false],
            [false, false, true, true],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                assert_eq!(m.is_nonzero(i, j), bit, "entry ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_is_nonzero_follows_permutation() {
        let mut m = staircase();
        m.swap_rows(0, 3);
        m.swap_cols(1, 2);
        // logical row 0 is physical row 3 = {2, 3}; logical col 1 is physical 2
        assert!(m.is_nonzero(0, 1));
        assert!(m.is_nonzero(0, 3));
        assert!(!m.is_nonzero(0, 0));
        assert!(!m.is_nonzero(0, 2));
    }

    #[test]
    fn test_swap_cols_touches_only_columns() {
        let mut m = staircase();
        m.swap_cols(0, 2);
        assert_eq!(m.col_order().as_slice(), &[2, 1, 0, 3]);
        assert_eq!(m.row_order(), &Permutation::identity(4));
    }

    #[test]
    fn test_move_row_and_col() {
        let mut m = staircase();
        m.move_row(3, 0);
        m.move_col(0, 3);
        assert_eq!(m.row_order().as_slice(), &[3, 0, 1, 2]);
        assert_eq!(m.col_order().as_slice(), &[1, 2, 3, 0]);
        assert!(m.is_nonzero(0, 1)); // physical (3, 2)
        assert!(m.is_nonzero(1, 3)); // physical (0, 0)
        assert!(m.is_consistent());
    }

    #[test]
    fn test_topology_unchanged_by_permutation() {
        let mut m = staircase();
        let before = (m.row_ptr.clone(), m.row_len.clone(), m.col_index.clone());
        m.move_row(0, 3);
        m.swap_cols(1, 3);
        m.move_col(3, 0);
        assert_eq!(before, (m.row_ptr.clone(), m.row_len.clone(), m.col_index.clone()));
        m.reset_order();
        assert_eq!(m, staircase());
    }

    #[test]
    fn test_row_nnz_in() {
        let m = CrsMatrix::from_rows(5, [vec![0, 2, 4], vec![], vec![1], vec![3, 4], vec![0]])
            .unwrap();
        assert_eq!(m.row_nnz_in(0, 0..5), 3);
        assert_eq!(m.row_nnz_in(0, 1..4), 1);
        assert_eq!(m.row_nnz_in(0, 3..3), 0);
        assert_eq!(m.row_nnz_in(1, 0..5), 0);
        assert_eq!(m.row_nnz_in(3, 4..5), 1);
    }

    #[test]
    fn test_min_nnz_per_row() {
        assert_eq!(staircase().min_nnz_per_row(), Some(1));
        let m = CrsMatrix::from_rows(2, [vec![0, 1], vec![]]).unwrap();
        assert_eq!(m.min_nnz_per_row(), Some(0));
        let empty = CrsMatrix::from_rows(0, Vec::<Vec<usize>>::new()).unwrap();
        assert_eq!(empty.min_nnz_per_row(), None);
    }

    #[test]
    fn test_logical_row() {
        let mut m = staircase();
        m.move_col(0, 3);
        let inverse = m.col_order().inverse();
        let mut cols: Vec<usize> = m.logical_row(1, &inverse).collect();
        cols.sort_unstable();
        assert_eq!(cols, vec![0, 3]);
    }

    #[test]
    fn test_builder_errors() {
        assert_eq!(
            CrsMatrix::from_rows(2, [vec![0, 2]]),
            Err(HrError::ColumnOutOfBounds { row: 0, col: 2 })
        );
        assert_eq!(
            CrsMatrix::from_rows(2, [vec![1, 1], vec![]]),
            Err(HrError::DuplicateEntry { row: 0, col: 1 })
        );
        assert_eq!(
            CrsMatrix::from_rows(3, [vec![0], vec![1]]),
            Err(HrError::RowCountMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            CrsMatrix::from_rows(1, [vec![0], vec![0]]),
            Err(HrError::RowCountMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_builder_grows_past_increment() {
        let m = CrsMatrix::from_rows(600, (0..600).map(|i| [i, (i + 1) % 600])).unwrap();
        assert_eq!(m.nnz(), 1200);
        assert!(m.is_consistent());
        assert!(m.is_nonzero(599, 0));
    }

    #[test]
    fn test_builder_streaming() {
        let mut builder = CrsMatrix::builder(3);
        builder.push(2).unwrap();
        builder.push(0).unwrap();
        builder.end_row().unwrap();
        builder.end_row().unwrap();
        builder.push(1).unwrap();
        assert_eq!(builder.rows(), 2);
        assert_eq!(builder.nnz(), 3);
        builder.end_row().unwrap();
        let m = builder.finish().unwrap();
        assert_eq!(m.physical_row(0), &[2, 0]);
        assert!(m.physical_row(1).is_empty());
        assert_eq!(m.physical_row(2), &[1]);
    }

    #[test]
    fn test_builder_allocates_with_data_not_dimension() {
        // A claimed dimension far beyond addressable memory stays cheap
        // until entries arrive
        let mut builder = CrsMatrix::builder(usize::MAX / 2);
        builder.push(3).unwrap();
        builder.push(1).unwrap();
        builder.end_row().unwrap();
        assert_eq!(builder.rows(), 1);
        assert_eq!(builder.nnz(), 2);
        assert!(builder.last_row.len() <= COLUMN_GROWTH + 4);
        assert!(builder.row_ptr.capacity() <= COLUMN_GROWTH);
        assert_eq!(
            builder.push(1),
            Ok(()),
            "a new row may reuse a column of the previous one"
        );
        assert_eq!(builder.push(1), Err(HrError::DuplicateEntry { row: 1, col: 1 }));
    }

    #[test]
    fn test_builder_duplicate_in_far_column() {
        let mut builder = CrsMatrix::builder(10_000);
        builder.push(9_999).unwrap();
        assert_eq!(
            builder.push(9_999),
            Err(HrError::DuplicateEntry { row: 0, col: 9_999 })
        );
    }

    #[test]
    fn test_push_past_last_row() {
        let mut builder = CrsMatrix::builder(1);
        builder.end_row().unwrap();
        assert!(builder.push(0).is_err());
        assert!(builder.finish().is_ok());
    }
}
