//! Module for parsing JSON data
//!
//! [`JsonPushParser`] is a chunk-fed parser: input may arrive in arbitrary
//! fragments (for example from a network socket) and is pushed into the
//! parser with [`process_chunk`](JsonPushParser::process_chunk). The whole
//! input helper [`parse`] covers the common case where the complete document
//! is already in memory.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::code_unit::CodeUnit;
use crate::value::JsonValue;

mod push_parser;
// Re-export the chunk-fed implementation under the `parser` module
pub use push_parser::*;

/// Line and column position
///
/// # Examples
/// Consider the following JSON document:
/// ```json
/// {
///   "a": null
/// }
/// ```
/// The position of `null` is:
/// - line: 2\
///   Line numbering starts at 1 and it is in the second line
/// - column: 7\
///   Column numbering starts at 0 and the `n` of `null` is the 8th code unit
///   in that line, respectively there are 7 code units in front of it
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct LinePosition {
    /// Line number, starting at 1
    ///
    /// Only _LF_ (U+000A) starts a new line; a _CR LF_ sequence therefore
    /// counts as one line break as well.
    pub line: u64,
    /// Code unit column within the current line, starting at 0 and reset on
    /// every line break
    pub column: u64,
}

impl Display for LinePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Result of processing a chunk of JSON data
///
/// A syntax error is not a status but an [`Err`](ParseError) of
/// [`process_chunk`](JsonPushParser::process_chunk).
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum ParseStatus {
    /// A complete top-level value has been produced and all input up to here
    /// has been accepted
    Success,
    /// More input is required
    ///
    /// When this is returned for the last chunk the document was truncated;
    /// the caller decides whether to treat that as an error.
    Pending,
    /// A complete top-level value has been produced and trailing data exists
    /// which is irrelevant to the document
    NoNeedMore,
}

/// Describes why a syntax error occurred
#[non_exhaustive]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum SyntaxErrorKind {
    /// A literal value is incomplete or invalid, for example `tru` instead of `true`
    InvalidLiteral,
    /// A closing bracket (`]` or `}`) did not match the open container
    UnexpectedClosingBracket,
    /// A comma (`,`) is missing between array items or object members
    MissingComma,
    /// A colon (`:`) is missing between member name and member value
    MissingColon,
    /// A JSON number is malformed, for example `1.` or `-e2`
    MalformedNumber,
    /// A member name or the end of an object (`}`) was expected but something
    /// else was encountered
    ExpectingMemberNameOrObjectEnd,
    /// The same member name occurred twice in one object
    DuplicateMemberName,
    /// The JSON data is malformed for a reason other than any of the other
    /// kinds
    ///
    /// This is the case when a value was expected but the code unit cannot
    /// start one; units ≥ 0x80 can never start a value.
    MalformedJson,

    /// A control character was encountered in the raw data of a member name
    /// or string value
    ///
    /// Code units in the range from `0x00` to `0x1F` (inclusive) must be
    /// escaped when part of a member name or string value, either with a
    /// `\uXXXX` escape or with a short escape sequence such as `\n`.
    NotEscapedControlCharacter,
    /// An unknown escape sequence (`\...`) was encountered
    UnknownEscapeSequence,
    /// A malformed escape sequence was encountered, for example `\u00` followed
    /// by a non-hex character
    MalformedEscapeSequence,
    /// A `\uXXXX` escape encoding a high surrogate was not followed by a low
    /// surrogate escape
    UnpairedSurrogatePairEscapeSequence,
}

/// JSON syntax error
///
/// After a syntax error the parser is in an unrecoverable state; all further
/// [`process_chunk`](JsonPushParser::process_chunk) calls return the same
/// error until [`reset`](JsonPushParser::reset) is called.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("JSON syntax error {kind} at {location}")]
pub struct ParseError {
    /// Kind of the error
    pub kind: SyntaxErrorKind,
    /// Location where the error occurred in the JSON document
    pub location: LinePosition,
}

/// Result of the whole-input helper [`parse`]
#[derive(PartialEq, Clone, Debug)]
pub struct ParseOutcome<K: CodeUnit = u8> {
    /// The parsed value; incomplete (up to `Undefined`) when `status` is
    /// [`ParseStatus::Pending`]
    pub value: JsonValue<K>,
    /// Whether the document was complete and whether trailing data exists
    pub status: ParseStatus,
    /// Position of the first unconsumed code unit, or the end of input
    pub position: LinePosition,
}

/// Parses a complete JSON document held in memory
///
/// This is equivalent to feeding the whole input as a single last chunk into
/// a fresh [`JsonPushParser`]. Trailing data after the top-level value is not
/// an error; it is reported as [`ParseStatus::NoNeedMore`] together with the
/// position of the first unconsumed unit. A truncated document is reported as
/// [`ParseStatus::Pending`].
///
/// # Examples
/// ```
/// # use chunkson::parser::{parse, ParseStatus};
/// let outcome = parse(br#"{"a": [1, true]}"#)?;
/// assert_eq!(ParseStatus::Success, outcome.status);
/// assert_eq!(Some(1), outcome.value["a"][0].integer());
/// # Ok::<(), chunkson::parser::ParseError>(())
/// ```
pub fn parse<K: CodeUnit>(text: &[K]) -> Result<ParseOutcome<K>, ParseError> {
    let mut parser = JsonPushParser::new();
    let status = parser.process_chunk(text, true)?;
    let position = parser.position();
    Ok(ParseOutcome {
        value: parser.into_value(),
        status,
        position,
    })
}
