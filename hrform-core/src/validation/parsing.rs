//! Parsing utilities for PBM header strings
//!
//! This module provides pure parsing functions for the textual part of the
//! bitmap header with no I/O dependencies.

use crate::HrError;

/// Parse a dimension line of the form `"width height"`
///
/// Any run of ASCII whitespace separates the two numbers. Exactly two
/// tokens must be present.
pub fn parse_dimensions(line: &str) -> Result<(usize, usize), HrError> {
    let mut tokens = line.split_ascii_whitespace();

    let width = tokens.next().ok_or(HrError::MalformedDimensions)?;
    let height = tokens.next().ok_or(HrError::MalformedDimensions)?;
    if tokens.next().is_some() {
        return Err(HrError::MalformedDimensions);
    }

    Ok((parse_usize(width)?, parse_usize(height)?))
}

/// Parse a usize from a string with error handling
///
/// Only plain decimal digits are accepted; signs and whitespace are rejected.
pub fn parse_usize(s: &str) -> Result<usize, HrError> {
    if s.is_empty() {
        return Err(HrError::MalformedDimensions);
    }

    let mut result: usize = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(HrError::MalformedDimensions);
        }

        let digit = (byte - b'0') as usize;

        if result > (usize::MAX - digit) / 10 {
            return Err(HrError::SizeOverflow);
        }

        result = result * 10 + digit;
    }

    Ok(result)
}
