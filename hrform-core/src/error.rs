//! Error types for HR-form core operations

/// Errors that can occur while building or parsing a sparse pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrError {
    /// The first non-comment header line is not the `P4` magic
    MissingMagic,
    /// A header line could not be interpreted
    MalformedHeader,
    /// The dimension line is not two positive decimal integers
    MalformedDimensions,
    /// Width and height differ
    NotSquare { width: usize, height: usize },
    /// A dimension of zero was given
    EmptyMatrix,
    /// A column index does not fit the matrix
    ColumnOutOfBounds { row: usize, col: usize },
    /// The same column was pushed twice into one row
    DuplicateEntry { row: usize, col: usize },
    /// The builder was finished with the wrong number of rows
    RowCountMismatch { expected: usize, found: usize },
    /// Growing the column index store failed
    AllocationFailed,
    /// A size calculation overflowed `usize`
    SizeOverflow,
}

impl core::fmt::Display for HrError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HrError::MissingMagic => write!(f, "Unsupported file format (expected binary PBM)"),
            HrError::MalformedHeader => write!(f, "Malformed PBM header"),
            HrError::MalformedDimensions => write!(f, "Malformed dimension line"),
            HrError::NotSquare { width, height } => {
                write!(f, "Image/matrix is not square ({width} x {height})")
            }
            HrError::EmptyMatrix => write!(f, "Matrix dimension must be positive"),
            HrError::ColumnOutOfBounds { row, col } => {
                write!(f, "Column {col} out of bounds in row {row}")
            }
            HrError::DuplicateEntry { row, col } => {
                write!(f, "Duplicate entry at ({row}, {col})")
            }
            HrError::RowCountMismatch { expected, found } => {
                write!(f, "Expected {expected} rows, found {found}")
            }
            HrError::AllocationFailed => write!(f, "Unable to allocate more memory"),
            HrError::SizeOverflow => write!(f, "Size calculation overflowed"),
        }
    }
}

/// Result type for HR-form core operations
pub type Result<T> = core::result::Result<T, HrError>;

impl core::error::Error for HrError {}
