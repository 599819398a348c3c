//! Streaming decoder

use std::io::{self, BufRead, Read};

use hrform_core::format::constants::{BITS_PER_BYTE, LEADING_BIT, MAX_HEADER_LINE};
use hrform_core::validation::row_bytes;
use hrform_core::{CrsMatrix, HeaderParser, HrError, PbmHeader};
use tracing::{debug, info};

use crate::error::{DecodeError, DecodeResult};

/// Body bytes read per call; rows wider than this are read in pieces
const READ_CHUNK: usize = 8192;

/// Decode a matrix, discarding the header comments
pub fn read_matrix<R: BufRead>(reader: R) -> DecodeResult<CrsMatrix> {
    read_with_header(reader).map(|(_, matrix)| matrix)
}

/// Decode a matrix together with its parsed header
pub fn read_with_header<R: BufRead>(mut reader: R) -> DecodeResult<(PbmHeader, CrsMatrix)> {
    let header = read_header(&mut reader)?;
    let matrix = read_body(&mut reader, header.dimension)?;
    log_loaded(&matrix);
    Ok((header, matrix))
}

/// Decode from an in-memory (or memory-mapped) image
///
/// The body length is checked against the header before any row is read.
pub fn decode_slice(bytes: &[u8]) -> DecodeResult<(PbmHeader, CrsMatrix)> {
    let mut cursor = bytes;
    let header = read_header(&mut cursor)?;
    let body_len = header.body_len()?;
    if cursor.len() < body_len {
        return Err(DecodeError::Truncated {
            row: cursor.len() / header.row_bytes(),
            expected_rows: header.dimension,
        });
    }
    let matrix = read_body(&mut cursor, header.dimension)?;
    log_loaded(&matrix);
    Ok((header, matrix))
}

pub(super) fn read_header<R: BufRead>(reader: &mut R) -> DecodeResult<PbmHeader> {
    let mut parser = HeaderParser::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .by_ref()
            .take(MAX_HEADER_LINE as u64)
            .read_until(b'\n', &mut line)?;
        if read == 0 {
            return Err(if parser.has_magic() {
                DecodeError::UnexpectedEof { context: "header" }
            } else {
                HrError::MissingMagic.into()
            });
        }
        if read == MAX_HEADER_LINE && line.last() != Some(&b'\n') {
            return Err(HrError::MalformedHeader.into());
        }

        let text = match std::str::from_utf8(&line) {
            Ok(text) => text,
            Err(_) if !parser.has_magic() => return Err(HrError::MissingMagic.into()),
            Err(_) => return Err(DecodeError::NonUtf8Header),
        };
        if let Some(header) = parser.feed(text)? {
            debug!(
                dimension = header.dimension,
                comments = header.comments.len(),
                "parsed header"
            );
            return Ok(header);
        }
    }
}

fn read_body<R: Read>(reader: &mut R, dimension: usize) -> DecodeResult<CrsMatrix> {
    read_rows(reader, dimension, &mut [0u8; READ_CHUNK])
}

/// Stream `dimension` packed rows through `chunk`, one slice of a row at a time
fn read_rows<R: Read>(
    reader: &mut R,
    dimension: usize,
    chunk: &mut [u8],
) -> DecodeResult<CrsMatrix> {
    let width = row_bytes(dimension);
    let mut builder = CrsMatrix::builder(dimension);
    for index in 0..dimension {
        let mut offset = 0;
        while offset < width {
            let len = (width - offset).min(chunk.len());
            reader
                .read_exact(&mut chunk[..len])
                .map_err(|err| match err.kind() {
                    io::ErrorKind::UnexpectedEof => DecodeError::Truncated {
                        row: index,
                        expected_rows: dimension,
                    },
                    _ => DecodeError::Io(err),
                })?;
            for col in set_columns(&chunk[..len], offset * BITS_PER_BYTE, dimension) {
                builder.push(col)?;
            }
            offset += len;
        }
        builder.end_row()?;
    }
    Ok(builder.finish()?)
}

/// Columns whose bit is set in a run of packed bytes starting at column
/// `first`; padding bits past `dimension` are skipped
fn set_columns(
    bytes: &[u8],
    first: usize,
    dimension: usize,
) -> impl Iterator<Item = usize> + '_ {
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &byte)| byte != 0)
        .flat_map(move |(index, &byte)| {
            (0..BITS_PER_BYTE)
                .filter(move |bit| byte & (LEADING_BIT >> bit) != 0)
                .map(move |bit| first + index * BITS_PER_BYTE + bit)
                .filter(move |&col| col < dimension)
        })
}

fn log_loaded(matrix: &CrsMatrix) {
    info!(
        dimension = matrix.dimension(),
        nnz = matrix.nnz(),
        density_percent = matrix.density() * 100.0,
        min_nnz_per_row = matrix.min_nnz_per_row().unwrap_or(0),
        "loaded matrix"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_columns_msb_first() {
        let cols: Vec<usize> = set_columns(&[0b1000_0001, 0b0100_0000], 0, 10).collect();
        assert_eq!(cols, vec![0, 7, 9]);
    }

    #[test]
    fn test_set_columns_ignores_padding() {
        let cols: Vec<usize> = set_columns(&[0b1011_1111], 0, 3).collect();
        assert_eq!(cols, vec![0, 2]);
    }

    #[test]
    fn test_read_small_matrix() {
        let bytes = b"P4\n# made by hand\n3 3\n\x80\xc0\x20";
        let (header, matrix) = read_with_header(&bytes[..]).unwrap();
        assert_eq!(header.dimension, 3);
        assert_eq!(header.comments, vec!["made by hand"]);
        assert_eq!(matrix.nnz(), 4);
        assert!(matrix.is_nonzero(0, 0));
        assert!(matrix.is_nonzero(1, 0));
        assert!(matrix.is_nonzero(1, 1));
        assert!(matrix.is_nonzero(2, 2));
        assert!(!matrix.is_nonzero(0, 2));
    }

    #[test]
    fn test_read_bad_magic() {
        let err = read_matrix(&b"P1\n2 2\n"[..]).unwrap_err();
        assert!(matches!(err, DecodeError::Format(HrError::MissingMagic)));

        let err = read_matrix(&b""[..]).unwrap_err();
        assert!(matches!(err, DecodeError::Format(HrError::MissingMagic)));

        let err = read_matrix(&b"\xff\xfe\n"[..]).unwrap_err();
        assert!(matches!(err, DecodeError::Format(HrError::MissingMagic)));
    }

    #[test]
    fn test_read_not_square() {
        let err = read_matrix(&b"P4\n8 2\n\x00\x00"[..]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Format(HrError::NotSquare {
                width: 8,
                height: 2
            })
        ));
    }

    #[test]
    fn test_read_header_eof() {
        let err = read_matrix(&b"P4\n# no dimensions\n"[..]).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { context: "header" }));
    }

    #[test]
    fn test_read_truncated_body() {
        let err = read_matrix(&b"P4\n4 4\n\x80\x40"[..]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                row: 2,
                expected_rows: 4
            }
        ));

        let err = decode_slice(b"P4\n4 4\n\x80\x40").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                row: 2,
                expected_rows: 4
            }
        ));
    }

    #[test]
    fn test_set_columns_offset() {
        let cols: Vec<usize> = set_columns(&[0b0000_0001, 0b1000_0000], 16, 25).collect();
        assert_eq!(cols, vec![23, 24]);
    }

    #[test]
    fn test_oversized_dimension_is_an_error() {
        // A few header bytes claiming a matrix far larger than memory
        let err = read_matrix(&b"P4\n8000000000 8000000000\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                row: 0,
                expected_rows: 8_000_000_000
            }
        ));

        let err = read_matrix(&b"P4\n1000000000000 1000000000000\n\xff\xff"[..]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { row: 0, .. }));
    }

    #[test]
    fn test_rows_span_chunks() {
        // 19 columns need 3 bytes per row; a 2-byte chunk splits every row
        let dimension = 19;
        let mut body = Vec::new();
        for row in 0..dimension {
            let mut packed = [0u8; 3];
            for col in [row, dimension - 1] {
                packed[col / BITS_PER_BYTE] |= LEADING_BIT >> (col % BITS_PER_BYTE);
            }
            body.extend_from_slice(&packed);
        }

        let chunked = read_rows(&mut &body[..], dimension, &mut [0u8; 2]).unwrap();
        let whole = read_body(&mut &body[..], dimension).unwrap();
        assert_eq!(chunked, whole);
        assert_eq!(chunked.nnz(), 2 * dimension - 1);
        assert!(chunked.is_nonzero(0, dimension - 1));
        assert!(chunked.is_nonzero(16, 16));
        assert!(chunked.is_nonzero(dimension - 1, dimension - 1));
        assert!(!chunked.is_nonzero(dimension - 1, 0));

        let err = read_rows(&mut &body[..40], dimension, &mut [0u8; 2]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                row: 13,
                expected_rows: 19
            }
        ));
    }

    #[test]
    fn test_header_line_limit() {
        let mut bytes = b"P4\n".to_vec();
        bytes.extend(std::iter::repeat(b'#').take(MAX_HEADER_LINE + 1));
        let err = read_matrix(&bytes[..]).unwrap_err();
        assert!(matches!(err, DecodeError::Format(HrError::MalformedHeader)));
    }

    #[test]
    fn test_decode_slice_matches_stream() {
        let bytes = b"P4\n9 9\n\x80\x00\x40\x00\x20\x00\x10\x00\x08\x00\x04\x00\x02\x00\x01\x00\x00\x80";
        let (_, streamed) = read_with_header(&bytes[..]).unwrap();
        let (_, sliced) = decode_slice(bytes).unwrap();
        assert_eq!(streamed, sliced);
        for i in 0..9 {
            assert!(sliced.is_nonzero(i, i));
        }
        assert_eq!(sliced.nnz(), 9);
    }
}
