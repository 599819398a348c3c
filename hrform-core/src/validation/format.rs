//! Header line classification for the PBM format

use crate::format::constants::{COMMENT_PREFIX, MAGIC};
use crate::HrError;

/// Kind of a single header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// `#` comment, with the prefix and surrounding whitespace removed
    Comment(&'a str),
    /// Anything else, with trailing whitespace and line terminators removed
    Content(&'a str),
}

/// Classify a raw header line
pub fn classify_line(line: &str) -> HeaderLine<'_> {
    let trimmed = line.trim_end_matches(['\n', '\r', ' ', '\t']);
    if trimmed.trim_start().is_empty() {
        HeaderLine::Blank
    } else if trimmed.as_bytes()[0] == COMMENT_PREFIX {
        HeaderLine::Comment(trimmed[1..].trim())
    } else {
        HeaderLine::Content(trimmed)
    }
}

/// Validate that a content line is the binary PBM magic
pub fn validate_magic(content: &str) -> Result<(), HrError> {
    if content.trim() != MAGIC {
        return Err(HrError::MissingMagic);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("\n"), HeaderLine::Blank);
        assert_eq!(classify_line("   \r\n"), HeaderLine::Blank);
        assert_eq!(classify_line("# hello\n"), HeaderLine::Comment("hello"));
        assert_eq!(classify_line("#\n"), HeaderLine::Comment(""));
        assert_eq!(classify_line("P4\r\n"), HeaderLine::Content("P4"));
        assert_eq!(classify_line("4 4 \n"), HeaderLine::Content("4 4"));
    }

    #[test]
    fn test_validate_magic() {
        assert_eq!(validate_magic("P4"), Ok(()));
        assert_eq!(validate_magic("P1"), Err(HrError::MissingMagic));
        assert_eq!(validate_magic("P44"), Err(HrError::MissingMagic));
        assert_eq!(validate_magic("4 4"), Err(HrError::MissingMagic));
    }
}
