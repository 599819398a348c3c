//! Encoder writing rows in logical order

use std::io::Write;

use hrform_core::format::constants::{BITS_PER_BYTE, LEADING_BIT};
use hrform_core::{CrsMatrix, PbmHeader, SparsePattern};
use tracing::debug;

use crate::error::EncodeResult;

/// Write `matrix` with its current permutations applied
///
/// The header carries the creator comment.
pub fn write_matrix<W: Write>(mut writer: W, matrix: &CrsMatrix) -> EncodeResult<()> {
    let header = PbmHeader::new(matrix.dimension());
    writer.write_all(&header.to_bytes())?;

    let col_inverse = matrix.col_order().inverse();
    let mut row = vec![0u8; header.row_bytes()];
    for index in 0..matrix.dimension() {
        row.fill(0);
        for col in matrix.logical_row(index, &col_inverse) {
            set_bit(&mut row, col);
        }
        assert_eq!(row.len(), header.row_bytes());
        writer.write_all(&row)?;
    }
    writer.flush()?;
    debug!(
        dimension = matrix.dimension(),
        nnz = matrix.nnz(),
        "encoded matrix"
    );
    Ok(())
}

/// Write any [`SparsePattern`] under the given header
///
/// `header.dimension` must equal `pattern.dimension()`.
pub fn write_pattern<W, P>(mut writer: W, pattern: &P, header: &PbmHeader) -> EncodeResult<()>
where
    W: Write,
    P: SparsePattern + ?Sized,
{
    debug_assert_eq!(header.dimension, pattern.dimension());
    writer.write_all(&header.to_bytes())?;

    let mut cells = vec![false; header.dimension];
    let mut row = vec![0u8; header.row_bytes()];
    for index in 0..header.dimension {
        pattern.fill_row(index, &mut cells);
        row.fill(0);
        for (col, _) in cells.iter().enumerate().filter(|&(_, &set)| set) {
            set_bit(&mut row, col);
        }
        assert_eq!(row.len(), header.row_bytes());
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[inline]
fn set_bit(row: &mut [u8], col: usize) {
    row[col / BITS_PER_BYTE] |= LEADING_BIT >> (col % BITS_PER_BYTE);
}
