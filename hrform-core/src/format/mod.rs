//! Format definitions for the binary PBM bitmap used as matrix storage
//!
//! This module contains pure data structure definitions for the on-disk
//! format. No I/O operations; decoding and encoding streams live in the
//! `hrform` crate.

pub mod constants;
pub mod header;

pub use header::{HeaderParser, PbmHeader};
