//! Progress reporting through `tracing`

use hrform_core::{ActiveSubmatrix, BlockCommit, BlockObserver, BlockStop};
use tracing::{info, trace};

/// Logs the share of placed columns each time it grows by `step` percent
#[derive(Debug, Clone)]
pub struct ProgressLog {
    step: usize,
    next: usize,
    singleton_blocks: usize,
    border_blocks: usize,
}

impl ProgressLog {
    pub fn new(step: usize) -> Self {
        Self {
            step: step.max(1),
            next: 0,
            singleton_blocks: 0,
            border_blocks: 0,
        }
    }

    /// Blocks that seated a diagonal entry
    pub fn singleton_blocks(&self) -> usize {
        self.singleton_blocks
    }

    /// Blocks that only added spikes
    pub fn border_blocks(&self) -> usize {
        self.border_blocks
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new(10)
    }
}

impl BlockObserver for ProgressLog {
    fn block_committed(&mut self, block: &BlockCommit, active: ActiveSubmatrix, dimension: usize) {
        match block.stop {
            BlockStop::Singleton => self.singleton_blocks += 1,
            BlockStop::Budget => self.border_blocks += 1,
        }
        trace!(
            block = block.index,
            budget = block.budget,
            shared = block.shared,
            "block stats"
        );

        let percent = (active.p + active.q) * 100 / dimension.max(1);
        if percent >= self.next {
            info!(percent, p = active.p, q = active.q, "reordering progress");
            self.next = (percent / self.step + 1) * self.step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrform_core::{CrsMatrix, Reorderer};

    #[test]
    fn test_progress_counts_blocks() {
        let mut matrix = CrsMatrix::from_rows(4, [vec![0], vec![0, 1], vec![1, 2], vec![2, 3]])
            .unwrap();
        let mut progress = ProgressLog::new(25);
        let summary = Reorderer::new().run_with_observer(&mut matrix, &mut progress);
        assert_eq!(progress.singleton_blocks(), summary.singleton_blocks);
        assert_eq!(
            progress.singleton_blocks() + progress.border_blocks(),
            summary.blocks
        );
        assert_eq!(progress.next, 125);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        assert_eq!(ProgressLog::new(0).step, 1);
    }
}
