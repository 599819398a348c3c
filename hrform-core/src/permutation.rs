//! Logical-to-physical index permutations
//!
//! A [`Permutation`] maps a logical position to the physical row or column
//! stored there: `order[logical] = physical`. Only the order changes during
//! reordering; the matrix topology it indexes stays fixed.

use alloc::vec::Vec;

/// Bijection of `[0, len)` onto itself, stored as an order array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on `len` entries
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// The identity permutation, reporting allocation failure
    pub fn try_identity(len: usize) -> crate::Result<Self> {
        let mut order = Vec::new();
        order
            .try_reserve_exact(len)
            .map_err(|_| crate::HrError::AllocationFailed)?;
        order.extend(0..len);
        Ok(Self { order })
    }

    /// Wrap an order array, returning `None` unless it is a bijection
    pub fn from_order(order: Vec<usize>) -> Option<Self> {
        let permutation = Self { order };
        permutation.is_valid().then_some(permutation)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Physical index stored at a logical position
    #[inline]
    pub fn get(&self, logical: usize) -> usize {
        self.order[logical]
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Logical position currently holding `physical`
    pub fn position_of(&self, physical: usize) -> Option<usize> {
        self.order.iter().position(|&p| p == physical)
    }

    /// Exchange two logical positions
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
    }

    /// Remove the entry at `from` and reinsert it at `to`
    ///
    /// Entries strictly between the two positions shift by one slot towards
    /// `from`, so their relative order is preserved.
    pub fn move_entry(&mut self, from: usize, to: usize) {
        if from < to {
            self.order[from..=to].rotate_left(1);
        } else if to < from {
            self.order[to..=from].rotate_right(1);
        }
    }

    /// Write the physical-to-logical map into `inverse`
    pub fn inverse_into(&self, inverse: &mut Vec<usize>) {
        inverse.clear();
        inverse.resize(self.order.len(), 0);
        for (logical, &physical) in self.order.iter().enumerate() {
            inverse[physical] = logical;
        }
    }

    /// The physical-to-logical map
    pub fn inverse(&self) -> Vec<usize> {
        let mut inverse = Vec::new();
        self.inverse_into(&mut inverse);
        inverse
    }

    /// Whether every index in `[0, len)` appears exactly once
    pub fn is_valid(&self) -> bool {
        let mut seen = alloc::vec![false; self.order.len()];
        for &physical in &self.order {
            match seen.get_mut(physical) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Restore the identity order
    pub fn reset(&mut self) {
        for (logical, slot) in self.order.iter_mut().enumerate() {
            *slot = logical;
        }
    }
}
