//! Binary PBM bitmaps as matrix storage
//!
//! A matrix of dimension `m` is stored as an `m x m` bitmap: a textual
//! header (`P4`, optional `#` comments, `m m`) followed by `m` rows of
//! `ceil(m/8)` bytes each, most significant bit first, with the last byte of
//! each row zero-padded.
//!
//! Decoding streams the body one row at a time into a [`CrsBuilder`], so the
//! dense bitmap is never held in memory. Encoding writes rows in logical
//! order, i.e. with the matrix's current permutations applied.
//!
//! [`CrsBuilder`]: hrform_core::CrsBuilder

mod decode;
mod encode;
mod file_io;

pub use decode::{decode_slice, read_matrix, read_with_header};
pub use encode::{write_matrix, write_pattern};
pub use file_io::PbmFile;
