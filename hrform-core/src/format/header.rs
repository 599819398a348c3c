//! Binary PBM header definitions
//!
//! The header is textual: a `P4` magic line, optional `#` comment lines and a
//! `width height` line. The packed body follows immediately after the final
//! newline of the dimension line.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::constants::{CREATOR_COMMENT, MAGIC};
use crate::validation::{
    body_len, classify_line, parse_dimensions, row_bytes, validate_magic, validate_square,
    HeaderLine,
};
use crate::HrError;

/// Header of a square binary PBM bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PbmHeader {
    /// Number of rows and columns
    pub dimension: usize,
    /// Comment lines, without the `#` prefix
    pub comments: Vec<String>,
}

impl PbmHeader {
    /// Create a header carrying the creator comment
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            comments: alloc::vec![CREATOR_COMMENT.to_string()],
        }
    }

    /// Create a header without comments
    pub fn bare(dimension: usize) -> Self {
        Self {
            dimension,
            comments: Vec::new(),
        }
    }

    /// Bytes used by one packed row
    pub const fn row_bytes(&self) -> usize {
        row_bytes(self.dimension)
    }

    /// Bytes used by the whole packed body
    pub const fn body_len(&self) -> crate::Result<usize> {
        body_len(self.dimension)
    }

    /// Serialize the header, including the trailing newline of the dimension line
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = String::with_capacity(32);
        text.push_str(MAGIC);
        text.push('\n');
        for comment in &self.comments {
            text.push_str("# ");
            text.push_str(comment);
            text.push('\n');
        }
        let dimension = self.dimension.to_string();
        text.push_str(&dimension);
        text.push(' ');
        text.push_str(&dimension);
        text.push('\n');
        text.into_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    AwaitingMagic,
    AwaitingDimensions,
    Complete,
}

/// Incremental header parser, fed one line at a time
///
/// Comment and blank lines may appear anywhere before the dimension line.
/// `feed` returns the finished header once the dimension line was consumed;
/// the caller must then stop feeding lines and read the body.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    state: ParseState,
    comments: Vec<String>,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitingMagic,
            comments: Vec::new(),
        }
    }

    /// Whether the magic line has been seen
    pub fn has_magic(&self) -> bool {
        self.state != ParseState::AwaitingMagic
    }

    /// Consume one header line (with or without its line terminator)
    pub fn feed(&mut self, line: &str) -> crate::Result<Option<PbmHeader>> {
        if self.state == ParseState::Complete {
            return Err(HrError::MalformedHeader);
        }

        let content = match classify_line(line) {
            HeaderLine::Blank => return Ok(None),
            HeaderLine::Comment(comment) => {
                self.comments.push(comment.to_string());
                return Ok(None);
            }
            HeaderLine::Content(content) => content,
        };

        match self.state {
            ParseState::AwaitingMagic => {
                validate_magic(content)?;
                self.state = ParseState::AwaitingDimensions;
                Ok(None)
            }
            ParseState::AwaitingDimensions => {
                let (width, height) = parse_dimensions(content)?;
                let dimension = validate_square(width, height)?;
                self.state = ParseState::Complete;
                Ok(Some(PbmHeader {
                    dimension,
                    comments: core::mem::take(&mut self.comments),
                }))
            }
            ParseState::Complete => Err(HrError::MalformedHeader),
        }
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn parse_all(lines: &[&str]) -> crate::Result<Option<PbmHeader>> {
        let mut parser = HeaderParser::new();
        for line in lines {
            if let Some(header) = parser.feed(line)? {
                return Ok(Some(header));
            }
        }
        Ok(None)
    }

    #[test]
    fn test_header_to_bytes() {
        let header = PbmHeader::new(10);
        let expected = alloc::format!("P4\n# {CREATOR_COMMENT}\n10 10\n");
        assert_eq!(header.to_bytes(), expected.into_bytes());

        assert_eq!(PbmHeader::bare(3).to_bytes(), b"P4\n3 3\n".to_vec());
    }

    #[test]
    fn test_header_sizes() {
        let header = PbmHeader::bare(10);
        assert_eq!(header.row_bytes(), 2);
        assert_eq!(header.body_len(), Ok(20));
    }

    #[test]
    fn test_parse_minimal_header() {
        let header = parse_all(&["P4\n", "4 4\n"]).unwrap().unwrap();
        assert_eq!(header, PbmHeader::bare(4));
    }

    #[test]
    fn test_parse_header_with_comments() {
        let header = parse_all(&["# before\n", "P4\n", "# one\n", "\n", "#two\n", "5 5\n"])
            .unwrap()
            .unwrap();
        assert_eq!(header.dimension, 5);
        assert_eq!(header.comments, vec!["before", "one", "two"]);
    }

    #[test]
    fn test_parse_header_round_trip() {
        let header = PbmHeader::new(17);
        let bytes = header.to_bytes();
        let text = core::str::from_utf8(&bytes).unwrap();
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        assert_eq!(parse_all(&lines), Ok(Some(header)));
    }

    #[test]
    fn test_parse_header_errors() {
        assert_eq!(parse_all(&["P1\n"]), Err(HrError::MissingMagic));
        assert_eq!(parse_all(&["4 4\n"]), Err(HrError::MissingMagic));
        assert_eq!(
            parse_all(&["P4\n", "4 5\n"]),
            Err(HrError::NotSquare {
                width: 4,
                height: 5
            })
        );
        assert_eq!(parse_all(&["P4\n", "0 0\n"]), Err(HrError::EmptyMatrix));
        assert_eq!(
            parse_all(&["P4\n", "four four\n"]),
            Err(HrError::MalformedDimensions)
        );
    }

    #[test]
    fn test_parse_incomplete_header() {
        let mut parser = HeaderParser::new();
        assert!(!parser.has_magic());
        assert_eq!(parser.feed("P4\n"), Ok(None));
        assert!(parser.has_magic());
        assert_eq!(parser.feed("# still going\n"), Ok(None));
    }

    #[test]
    fn test_feed_after_complete() {
        let mut parser = HeaderParser::new();
        parser.feed("P4").unwrap();
        assert!(parser.feed("2 2").unwrap().is_some());
        assert_eq!(parser.feed("2 2"), Err(HrError::MalformedHeader));
    }
}
