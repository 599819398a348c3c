//! Validation utilities for the PBM header and matrix bounds
//!
//! This module contains pure validation functions with no I/O dependencies.

pub mod bounds;
pub mod format;
pub mod parsing;

pub use bounds::{body_len, row_bytes, validate_column, validate_square};
pub use format::{classify_line, validate_magic, HeaderLine};
pub use parsing::{parse_dimensions, parse_usize};
