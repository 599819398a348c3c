//! HR-form - Hellerman-Rarick reordering of sparse bitmap matrices
//!
//! This library reads square 0/1 matrices stored as binary PBM bitmaps,
//! reorders them into bordered block-lower-triangular form and writes them
//! back, or renders them as ASCII.
//!
//! ## Architecture
//!
//! HR-form follows the same split as its storage format:
//!
//! - **hrform-core**: matrix storage, permutations, the reordering and the
//!   I/O-free parts of the bitmap format (`no_std`)
//! - **hrform**: streams, files, rendering, reports and the command-line driver
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hrform::{PbmFile, Reorderer};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut matrix = PbmFile::load("matrix.pbm")?;
//!     let summary = Reorderer::new().run(&mut matrix);
//!     println!("{} diagonal, {} border columns", summary.active.p, summary.active.q);
//!     PbmFile::save("matrix.hr.pbm", &matrix)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: memory-mapped input files
//! - **serde**: JSON run reports
//! - **cli**: the `hrform` binary and its logging setup

// Re-export core abstractions and format definitions
pub use hrform_core::{
    // Storage
    CrsBuilder, CrsMatrix, Permutation,
    // Reordering
    reorder, ActiveSubmatrix, BlockCommit, BlockStop, ReorderSummary, Reorderer,
    // Traits
    BlockObserver, SparsePattern,
    // Format definitions
    HeaderParser, PbmHeader,
    // Error handling
    HrError,
};

pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod pbm;
pub mod progress;
pub mod render;
#[cfg(feature = "serde")]
pub mod report;

pub use error::{DecodeError, EncodeError};
pub use pbm::{decode_slice, read_matrix, read_with_header, write_matrix, write_pattern, PbmFile};
pub use progress::ProgressLog;
pub use render::{render_dense, DenseView};
#[cfg(feature = "serde")]
pub use report::ReorderReport;
