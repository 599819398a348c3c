#![no_std]

//! HR-form Core - sparse 0/1 matrices and the Hellerman-Rarick transform
//!
//! This crate provides the compressed row storage with row and column
//! permutation layers, the reordering algorithm that drives a square matrix
//! into bordered block-lower-triangular form, and the pure (I/O-free) parts
//! of the binary PBM format used to store such matrices.

extern crate alloc;

pub mod error;
pub mod format;
pub mod matrix;
pub mod permutation;
pub mod reorder;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use matrix::{CrsBuilder, CrsMatrix};
pub use permutation::Permutation;
pub use reorder::{
    reorder, ActiveSubmatrix, BlockCommit, BlockStop, ReorderSummary, Reorderer, RowWeight,
};
pub use traits::*;
