//! Abstract interfaces for the HR-form core
//!
//! Traits are pure interfaces; the concrete matrix and reorderer live in
//! their own modules.

pub mod matrix;
pub mod observer;

pub use matrix::SparsePattern;
pub use observer::BlockObserver;
