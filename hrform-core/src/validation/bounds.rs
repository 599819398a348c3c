//! Dimension and size validation for bitmap matrices
//!
//! This module provides pure arithmetic checks with no I/O dependencies.

use crate::format::constants::BITS_PER_BYTE;
use crate::HrError;

/// Validate that a parsed `(width, height)` pair describes a usable square matrix
///
/// Returns the common dimension.
pub const fn validate_square(width: usize, height: usize) -> Result<usize, HrError> {
    if width != height {
        return Err(HrError::NotSquare { width, height });
    }
    if width == 0 {
        return Err(HrError::EmptyMatrix);
    }
    Ok(width)
}

/// Number of bytes needed to pack one row of `dimension` bits
pub const fn row_bytes(dimension: usize) -> usize {
    dimension.div_ceil(BITS_PER_BYTE)
}

/// Total body length in bytes with overflow protection
pub const fn body_len(dimension: usize) -> Result<usize, HrError> {
    match row_bytes(dimension).checked_mul(dimension) {
        Some(len) => Ok(len),
        None => Err(HrError::SizeOverflow),
    }
}

/// Validate that a column index lies inside the matrix
pub const fn validate_column(row: usize, col: usize, dimension: usize) -> Result<(), HrError> {
    if col >= dimension {
        return Err(HrError::ColumnOutOfBounds { row, col });
    }
    Ok(())
}
