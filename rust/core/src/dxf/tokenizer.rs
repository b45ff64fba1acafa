// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF group-pair tokenizer using nom
//!
//! An ASCII DXF file is a flat sequence of two-line records: an integer group
//! code followed by its value.

use nom::{
    branch::alt,
    character::complete::{char, digit1, line_ending, not_line_ending, space0},
    combinator::{eof, map_res, opt, recognize},
    sequence::{delimited, pair, terminated},
    IResult,
};

use crate::error::{Error, Result};

/// One (group code, value) record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPair<'a> {
    pub code: i32,
    /// Value with surrounding whitespace removed
    pub value: &'a str,
    /// 1-based line of the group code; the value sits on `line + 1`
    pub line: usize,
}

impl<'a> GroupPair<'a> {
    /// Parse the value as a finite float, reporting the value line on failure.
    ///
    /// `nan`, `inf` and out-of-range literals are rejected.
    pub fn as_f64(&self) -> Result<f64> {
        match fast_float::parse::<f64, _>(self.value) {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(Error::parse(
                self.line + 1,
                format!("non-finite number for group code {}: '{}'", self.code, self.value),
            )),
            Err(_) => Err(Error::parse(
                self.line + 1,
                format!("expected number for group code {}, got '{}'", self.code, self.value),
            )),
        }
    }

    /// Whether this pair starts a new entity/section marker with the given name
    #[inline]
    pub fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.value.eq_ignore_ascii_case(name)
    }
}

/// Parse a group code line: optional padding, signed integer, line ending
fn code_line(input: &str) -> IResult<&str, i32> {
    terminated(
        delimited(
            space0,
            map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
                s.parse::<i32>()
            }),
            space0,
        ),
        line_ending,
    )(input)
}

/// Parse a value line; the last line of a file may lack its line ending
fn value_line(input: &str) -> IResult<&str, &str> {
    terminated(not_line_ending, alt((line_ending, eof)))(input)
}

/// Split DXF content into group pairs
pub fn tokenize(content: &str) -> Result<Vec<GroupPair<'_>>> {
    let mut pairs = Vec::new();
    let mut rest = content;
    let mut line = 1;

    while !rest.trim().is_empty() {
        let (after_code, code) =
            code_line(rest).map_err(|_| Error::parse(line, "expected integer group code"))?;

        if after_code.is_empty() {
            return Err(Error::parse(
                line + 1,
                format!("missing value for group code {}", code),
            ));
        }

        let (after_value, value) = value_line(after_code)
            .map_err(|_| Error::parse(line + 1, "unterminated group value"))?;

        pairs.push(GroupPair {
            code,
            value: value.trim(),
            line,
        });

        rest = after_value;
        line += 2;
    }

    Ok(pairs)
}
