//! Format constants and magic tokens for binary PBM bitmaps

/// Magic line of a binary PBM file
pub const MAGIC: &str = "P4";

/// Header lines starting with this byte are comments
pub const COMMENT_PREFIX: u8 = b'#';

/// Comment written into every generated header
pub const CREATOR_COMMENT: &str = "CREATOR: hrform Hellerman-Rarick matrix transform";

/// Matrix columns packed into one body byte
pub const BITS_PER_BYTE: usize = 8;

/// Most significant bit of a body byte, i.e. the leftmost column of the group
pub const LEADING_BIT: u8 = 0x80;

/// The column index store grows by this many entries at a time
pub const COLUMN_GROWTH: usize = 256;

/// Longest header line a reader accepts before giving up
pub const MAX_HEADER_LINE: usize = 4096;
