//! Callback seam for watching the reorderer commit blocks

use crate::reorder::{ActiveSubmatrix, BlockCommit};

/// Receives every block the reorderer commits, in order
pub trait BlockObserver {
    /// Called after `block` was applied; `active` already includes it
    fn block_committed(&mut self, block: &BlockCommit, active: ActiveSubmatrix, dimension: usize);
}

impl BlockObserver for () {
    #[inline]
    fn block_committed(&mut self, _: &BlockCommit, _: ActiveSubmatrix, _: usize) {}
}

impl<O: BlockObserver + ?Sized> BlockObserver for &mut O {
    #[inline]
    fn block_committed(&mut self, block: &BlockCommit, active: ActiveSubmatrix, dimension: usize) {
        (**self).block_committed(block, active, dimension);
    }
}
