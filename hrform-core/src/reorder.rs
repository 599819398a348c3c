//! Hellerman-Rarick reordering into bordered block-lower-triangular form
//!
//! The [`Reorderer`] repeatedly picks a block of pivot columns from the
//! active submatrix (logical rows `p..m`, logical columns `p..m-q`). Each
//! block either seats one singleton row on the diagonal or pushes all of its
//! pivots into the right-hand border of spikes. Only the permutation layers
//! of the [`CrsMatrix`] are touched.
//!
//! On return every logical row `r < p` has its nonzeros in columns `<= r` or
//! in the border `m-q..m`, and `p + q == m`.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::matrix::CrsMatrix;
use crate::traits::BlockObserver;

/// Boundaries of the active submatrix
///
/// `p` rows and columns are fixed on the diagonal, `q` columns are fixed in
/// the border. The active region is rows `p..m` by columns `p..m-q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSubmatrix {
    pub p: usize,
    pub q: usize,
}

impl ActiveSubmatrix {
    /// Number of active columns
    #[inline]
    pub const fn width(&self, dimension: usize) -> usize {
        dimension - self.p - self.q
    }

    #[inline]
    pub const fn is_complete(&self, dimension: usize) -> bool {
        self.p + self.q == dimension
    }

    /// Logical rows still to be placed
    #[inline]
    pub fn rows(&self, dimension: usize) -> Range<usize> {
        self.p..dimension
    }

    /// Logical columns still to be placed
    #[inline]
    pub fn cols(&self, dimension: usize) -> Range<usize> {
        self.p..dimension - self.q
    }

    /// Logical columns of the spike border
    #[inline]
    pub fn border(&self, dimension: usize) -> Range<usize> {
        dimension - self.q..dimension
    }

    /// Fraction of columns already placed, in `[0, 1]`
    pub fn progress(&self, dimension: usize) -> f64 {
        if dimension == 0 {
            return 1.0;
        }
        (self.p + self.q) as f64 / dimension as f64
    }

    const fn advance(self, diagonal: usize, spikes: usize) -> Self {
        Self {
            p: self.p + diagonal,
            q: self.q + spikes,
        }
    }
}

/// Nonzeros of a row inside the active columns that are not yet pivots
///
/// Rows with no such nonzero sort after every row that has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RowWeight {
    Active(usize),
    Exhausted,
}

impl RowWeight {
    #[inline]
    fn from_count(count: usize) -> Self {
        if count == 0 {
            RowWeight::Exhausted
        } else {
            RowWeight::Active(count)
        }
    }

    /// Pivot budget of a block whose first minimal row has this weight
    #[inline]
    fn block_budget(self, width: usize) -> usize {
        match self {
            RowWeight::Active(count) => count.min(width),
            RowWeight::Exhausted => width,
        }
    }
}

/// Why a block stopped selecting pivots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockStop {
    /// A minimal row had a single remaining nonzero
    Singleton,
    /// The pivot budget was used up
    Budget,
}

/// One committed block of pivots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockCommit {
    /// Zero-based block number
    pub index: usize,
    /// Maximum number of pivots the block could select
    pub budget: usize,
    /// Pivots actually selected
    pub pivots: usize,
    /// Minimal rows that intersect the last pivot
    pub shared: usize,
    /// Rows and columns seated on the diagonal
    pub diagonal: usize,
    /// Columns pushed into the border
    pub spikes: usize,
    pub stop: BlockStop,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderSummary {
    pub dimension: usize,
    pub active: ActiveSubmatrix,
    pub blocks: usize,
    pub singleton_blocks: usize,
}

impl ReorderSummary {
    /// Width of the spike border
    #[inline]
    pub fn border_width(&self) -> usize {
        self.active.q
    }
}

/// Reorders a [`CrsMatrix`] in place
///
/// Holds scratch buffers so that repeated runs do not reallocate.
#[derive(Debug, Default)]
pub struct Reorderer {
    /// Active logical rows, sorted by weight
    rows: Vec<usize>,
    /// Active logical columns that are not pivots, sorted by intersections
    cols: Vec<usize>,
    /// Indexed by logical row
    weights: Vec<RowWeight>,
    /// Indexed by logical column
    intersections: Vec<usize>,
    /// Pivots of the open block in selection order
    pivots: Vec<usize>,
    pivot_set: HashSet<usize>,
    /// Indexed by physical column: active and not a pivot
    free: Vec<bool>,
    /// Physical to logical column map, valid for the open block
    col_inverse: Vec<usize>,
    /// Physical rows seated by the open block
    seated: Vec<usize>,
}

impl Reorderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reorder `matrix`, starting from its current permutation
    pub fn run(&mut self, matrix: &mut CrsMatrix) -> ReorderSummary {
        self.run_with_observer(matrix, ())
    }

    /// Reorder `matrix`, reporting every committed block to `observer`
    pub fn run_with_observer<O: BlockObserver>(
        &mut self,
        matrix: &mut CrsMatrix,
        mut observer: O,
    ) -> ReorderSummary {
        let m = matrix.dimension();
        self.prepare(m);

        let mut active = ActiveSubmatrix::default();
        let mut blocks = 0;
        let mut singleton_blocks = 0;
        while !active.is_complete(m) {
            let block = self.commit_block(matrix, active, blocks);
            debug_assert!(block.diagonal + block.spikes >= 1);
            active = active.advance(block.diagonal, block.spikes);
            debug_assert!(active.p + active.q <= m);

            blocks += 1;
            if block.stop == BlockStop::Singleton {
                singleton_blocks += 1;
            }
            debug!(
                block = block.index,
                pivots = block.pivots,
                diagonal = block.diagonal,
                spikes = block.spikes,
                p = active.p,
                q = active.q,
                "committed block"
            );
            observer.block_committed(&block, active, m);
        }

        debug!(
            dimension = m,
            p = active.p,
            q = active.q,
            blocks,
            "reordering complete"
        );
        ReorderSummary {
            dimension: m,
            active,
            blocks,
            singleton_blocks,
        }
    }

    fn prepare(&mut self, dimension: usize) {
        self.weights.clear();
        self.weights.resize(dimension, RowWeight::Exhausted);
        self.intersections.clear();
        self.intersections.resize(dimension, 0);
        self.free.clear();
        self.free.resize(dimension, false);
    }

    /// Select one block of pivots, permute the matrix accordingly and
    /// describe what was done
    fn commit_block(
        &mut self,
        matrix: &mut CrsMatrix,
        active: ActiveSubmatrix,
        index: usize,
    ) -> BlockCommit {
        let m = matrix.dimension();
        let width = active.width(m);
        self.pivots.clear();
        self.pivot_set.clear();
        matrix.col_order().inverse_into(&mut self.col_inverse);

        let mut block_budget = None;
        let (stop, min_weight) = loop {
            self.collect_free_columns(matrix, active);
            let min_weight = self.rank_rows(matrix, active);
            let budget = *block_budget.get_or_insert(min_weight.block_budget(width));
            self.count_intersections(matrix, min_weight);

            debug_assert!(!self.cols.is_empty());
            let pivot = self.cols[self.cols.len() - 1];
            self.pivots.push(pivot);
            self.pivot_set.insert(pivot);
            trace!(
                pivot,
                intersections = self.intersections[pivot],
                ?min_weight,
                "selected pivot"
            );

            let selected = self.pivots.len();
            if min_weight == RowWeight::Active(1) && budget == 1 {
                break (BlockStop::Singleton, min_weight);
            }
            if selected == budget {
                break (BlockStop::Budget, min_weight);
            }
        };
        let budget = block_budget.unwrap_or(width);

        let last = self.pivots[self.pivots.len() - 1];
        let shared = self.intersections[last];
        let seats = match stop {
            BlockStop::Singleton => shared.min(budget),
            BlockStop::Budget => 0,
        };

        // Collect physical ids before anything moves
        self.seated.clear();
        for &row in &self.rows {
            if self.seated.len() == seats || self.weights[row] != min_weight {
                break;
            }
            if matrix.is_nonzero(row, last) {
                self.seated.push(matrix.row_order().get(row));
            }
        }
        debug_assert_eq!(self.seated.len(), seats);
        let diagonal = self.seated.len();
        for col in self.pivots.iter_mut() {
            *col = matrix.col_order().get(*col);
        }

        for &row in &self.seated {
            let Some(from) = matrix.row_order().position_of(row) else {
                unreachable!("row order lost physical row {row}")
            };
            matrix.move_row(from, active.p);
        }
        let spikes = self.pivots.len() - diagonal;
        for &col in self.pivots[spikes..].iter().rev() {
            let Some(from) = matrix.col_order().position_of(col) else {
                unreachable!("column order lost physical column {col}")
            };
            matrix.move_col(from, active.p);
        }
        let border_end = m - active.q - 1;
        for &col in &self.pivots[..spikes] {
            let Some(from) = matrix.col_order().position_of(col) else {
                unreachable!("column order lost physical column {col}")
            };
            matrix.move_col(from, border_end);
        }
        debug_assert!(matrix.row_order().is_valid() && matrix.col_order().is_valid());

        BlockCommit {
            index,
            budget,
            pivots: self.pivots.len(),
            shared,
            diagonal,
            spikes,
            stop,
        }
    }

    /// Active columns that are not yet pivots of the open block
    fn collect_free_columns(&mut self, matrix: &CrsMatrix, active: ActiveSubmatrix) {
        let m = matrix.dimension();
        self.cols.clear();
        self.cols.extend(
            active
                .cols(m)
                .filter(|col| !self.pivot_set.contains(col)),
        );
        self.free.iter_mut().for_each(|slot| *slot = false);
        for &col in &self.cols {
            self.free[matrix.col_order().get(col)] = true;
        }
    }

    /// Weigh every active row and stable-sort them; returns the minimum
    fn rank_rows(&mut self, matrix: &CrsMatrix, active: ActiveSubmatrix) -> RowWeight {
        self.rows.clear();
        self.rows.extend(active.rows(matrix.dimension()));
        for &row in &self.rows {
            let count = matrix
                .row_entries(row)
                .iter()
                .filter(|&&col| self.free[col])
                .count();
            self.weights[row] = RowWeight::from_count(count);
        }
        let weights = &self.weights;
        self.rows.sort_by_key(|&row| weights[row]);
        self.weights[self.rows[0]]
    }

    /// Count, per free column, the minimal rows it meets, then stable-sort
    /// the free columns by that count
    fn count_intersections(&mut self, matrix: &CrsMatrix, min_weight: RowWeight) {
        for &col in &self.cols {
            self.intersections[col] = 0;
        }
        for &row in &self.rows {
            if self.weights[row] != min_weight {
                break;
            }
            for &col in matrix.row_entries(row) {
                if self.free[col] {
                    self.intersections[self.col_inverse[col]] += 1;
                }
            }
        }
        let counts = &self.intersections;
        self.cols.sort_by_key(|&col| counts[col]);
    }
}

/// Reorder `matrix` with a fresh [`Reorderer`]
pub fn reorder(matrix: &mut CrsMatrix) -> ReorderSummary {
    Reorderer::new().run(matrix)
}
