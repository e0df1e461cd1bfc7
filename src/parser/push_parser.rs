//! Chunk-fed implementation of the JSON parser

use std::rc::Rc;

use super::{LinePosition, ParseError, ParseStatus, SyntaxErrorKind};
use crate::code_unit::CodeUnit;
use crate::value::{JsonMap, JsonValue};

/// Classification of a code unit which may start a value
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ValueStart {
    None,
    ObjectStart,
    ArrayStart,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    StringStart,
    DigitStart,
    ZeroStart,
    MinusSign,
}

/// Dispatch table for the first unit of a value; units ≥ 128 never start a value
const VALUE_START: [ValueStart; 128] = {
    let mut table = [ValueStart::None; 128];
    table[b'{' as usize] = ValueStart::ObjectStart;
    table[b'[' as usize] = ValueStart::ArrayStart;
    table[b't' as usize] = ValueStart::TrueLiteral;
    table[b'f' as usize] = ValueStart::FalseLiteral;
    table[b'n' as usize] = ValueStart::NullLiteral;
    table[b'"' as usize] = ValueStart::StringStart;
    table[b'-' as usize] = ValueStart::MinusSign;
    table[b'0' as usize] = ValueStart::ZeroStart;
    let mut digit = b'1';
    while digit <= b'9' {
        table[digit as usize] = ValueStart::DigitStart;
        digit += 1;
    }
    table
};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum State {
    WaitValue,
    WaitKey,
    WaitColon,
    WaitComma,
    Done,
    // `true` / `false` / `null`, one state per accepted letter
    LiteralT,
    LiteralTr,
    LiteralTru,
    LiteralF,
    LiteralFa,
    LiteralFal,
    LiteralFals,
    LiteralN,
    LiteralNu,
    LiteralNul,
    InString,
    StringEscape,
    /// `\uXXXX` with the number of hex digits consumed so far
    UnicodeEscape(u8),
    /// A high surrogate escape was read; a `\` must follow
    AwaitLowSurrogate,
    /// A high surrogate escape and `\` were read; a `u` must follow
    AwaitLowSurrogateU,
    /// Second `\uXXXX` of a surrogate pair with the digits consumed so far
    LowSurrogateEscape(u8),
    NumberSign,
    NumberInt,
    NumberZero,
    NumberDot,
    NumberFraction,
    NumberExp,
    NumberExpSign,
    NumberExpDigits,
}

/// Container under construction whose closing bracket has not been seen yet
#[derive(Debug)]
enum Frame<K: CodeUnit> {
    Array(Vec<JsonValue<K>>),
    Object {
        map: JsonMap<K>,
        /// Completed member name whose value is still outstanding
        pending_key: Option<Vec<K>>,
    },
}

/// A chunk-fed JSON parser producing a [`JsonValue`]
///
/// Input is pushed into the parser with [`process_chunk`](Self::process_chunk)
/// and may be split into fragments at arbitrary unit boundaries; the parser
/// resumes mid-token (string, escape sequence, number) without retaining any
/// reference to previously consumed chunks. The grammar is RFC 8259 JSON with
/// these deviations:
///
/// - duplicate object member names are rejected,
/// - numbers that overflow signed 64 bit silently fall back to double.
///
/// # Examples
/// ```
/// # use chunkson::parser::{JsonPushParser, ParseStatus};
/// // In this example JSON data is fed in two pieces;
/// // normally they would come from a file or a network connection
/// let mut parser = JsonPushParser::new();
/// assert_eq!(ParseStatus::Pending, parser.process_chunk(br#"{"a": [1, tr"#, false)?);
/// assert_eq!(ParseStatus::Success, parser.process_chunk(br#"ue]}"#, true)?);
///
/// let value = parser.into_value();
/// assert_eq!(Some(true), value["a"][1].boolean());
/// # Ok::<(), chunkson::parser::ParseError>(())
/// ```
///
/// # Error handling
/// A syntax error poisons the parser: every further `process_chunk` call
/// returns the same error until [`reset`](Self::reset) is called. A truncated
/// document is not an error but [`ParseStatus::Pending`]; when that is the
/// status for the last chunk the caller decides how to treat it.
#[derive(Debug)]
pub struct JsonPushParser<K: CodeUnit = u8> {
    state: State,
    /// Open containers, innermost last; the root value is built when a value
    /// completes with no open container
    frames: Vec<Frame<K>>,
    result: JsonValue<K>,
    /// Scratch buffer accumulating a token across chunk boundaries and around
    /// escape sequences
    token_buf: Vec<K>,
    /// Start of the current token in the current chunk; the contiguous fast
    /// path, flushed into [`token_buf`](Self::token_buf) on chunk exit
    token_start: Option<usize>,
    /// `\uXXXX` accumulators: high surrogate (or plain code unit) and low surrogate
    unicode: [u16; 2],
    line: u64,
    column: u64,
    failure: Option<ParseError>,
}

impl<K: CodeUnit> Default for JsonPushParser<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CodeUnit> JsonPushParser<K> {
    /// Creates a parser in its initial state
    pub fn new() -> Self {
        Self {
            state: State::WaitValue,
            frames: Vec::new(),
            result: JsonValue::Undefined,
            token_buf: Vec::new(),
            token_start: None,
            unicode: [0; 2],
            line: 1,
            column: 0,
            failure: None,
        }
    }

    /// Returns the parser to its initial state, discarding any partial result
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Position of the next unit to be examined, or of the error
    ///
    /// Lines start at 1; columns start at 0 and are reset on every line feed.
    pub fn position(&self) -> LinePosition {
        LinePosition {
            line: self.line,
            column: self.column,
        }
    }

    /// The parsed value, leaving `Undefined` behind
    ///
    /// Complete once `process_chunk` has returned [`ParseStatus::Success`] or
    /// [`ParseStatus::NoNeedMore`].
    pub fn take_value(&mut self) -> JsonValue<K> {
        std::mem::take(&mut self.result)
    }

    /// The parsed value
    ///
    /// Complete once `process_chunk` has returned [`ParseStatus::Success`] or
    /// [`ParseStatus::NoNeedMore`].
    pub fn into_value(self) -> JsonValue<K> {
        self.result
    }

    /// Consumes the next fragment of the JSON document
    ///
    /// `last` marks the final fragment: a trailing number is materialized as
    /// if a delimiter followed, and a complete document with no unconsumed
    /// data is reported as [`ParseStatus::Success`] instead of
    /// [`ParseStatus::NoNeedMore`].
    ///
    /// # Errors
    /// [`ParseError`] on malformed JSON, with the location of the offending
    /// unit. After an error the parser must be [`reset`](Self::reset) before
    /// it can be used again.
    pub fn process_chunk(&mut self, chunk: &[K], last: bool) -> Result<ParseStatus, ParseError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        match self.run(chunk, last) {
            Ok(status) => Ok(status),
            Err(error) => {
                self.failure = Some(error.clone());
                Err(error)
            }
        }
    }

    fn run(&mut self, chunk: &[K], last: bool) -> Result<ParseStatus, ParseError> {
        self.token_start = None;
        let mut pos = 0;

        'units: while pos < chunk.len() {
            let unit = chunk[pos];
            let b = unit.as_u32();
            if b == u32::from(b'\n') {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }

            // A terminated number re-dispatches its terminating unit in the
            // follow state, hence the loop
            'dispatch: loop {
                if matches!(
                    self.state,
                    State::WaitValue
                        | State::WaitKey
                        | State::WaitColon
                        | State::WaitComma
                        | State::Done
                ) && is_whitespace(b)
                {
                    pos += 1;
                    continue 'units;
                }
                if self.state == State::Done {
                    // Trailing data; leave it unconsumed
                    break 'units;
                }

                match self.state {
                    State::WaitValue => {
                        if b >= 128 {
                            return Err(self.error(SyntaxErrorKind::MalformedJson));
                        }
                        match VALUE_START[b as usize] {
                            ValueStart::None => {
                                let empty_array = matches!(
                                    self.frames.last(),
                                    Some(Frame::Array(items)) if items.is_empty()
                                );
                                if b == u32::from(b']') && empty_array {
                                    self.close_container();
                                } else {
                                    return Err(self.error(SyntaxErrorKind::MalformedJson));
                                }
                            }
                            ValueStart::ObjectStart => {
                                self.frames.push(Frame::Object {
                                    map: JsonMap::new(),
                                    pending_key: None,
                                });
                                self.state = State::WaitKey;
                            }
                            ValueStart::ArrayStart => {
                                self.frames.push(Frame::Array(Vec::new()));
                                self.state = State::WaitValue;
                            }
                            ValueStart::TrueLiteral => self.state = State::LiteralT,
                            ValueStart::FalseLiteral => self.state = State::LiteralF,
                            ValueStart::NullLiteral => self.state = State::LiteralN,
                            ValueStart::StringStart => {
                                self.state = State::InString;
                                self.token_start = Some(pos + 1);
                            }
                            ValueStart::DigitStart => {
                                self.state = State::NumberInt;
                                self.token_start = Some(pos);
                            }
                            ValueStart::ZeroStart => {
                                self.state = State::NumberZero;
                                self.token_start = Some(pos);
                            }
                            ValueStart::MinusSign => {
                                self.state = State::NumberSign;
                                self.token_start = Some(pos);
                            }
                        }
                    }
                    State::WaitKey => {
                        if b == u32::from(b'"') {
                            self.state = State::InString;
                            self.token_start = Some(pos + 1);
                        } else if b == u32::from(b'}') {
                            self.close_container();
                        } else {
                            return Err(
                                self.error(SyntaxErrorKind::ExpectingMemberNameOrObjectEnd)
                            );
                        }
                    }
                    State::WaitColon => {
                        if b == u32::from(b':') {
                            self.state = State::WaitValue;
                        } else {
                            return Err(self.error(SyntaxErrorKind::MissingColon));
                        }
                    }
                    State::WaitComma => {
                        let in_object = matches!(self.frames.last(), Some(Frame::Object { .. }));
                        if b == u32::from(b',') {
                            self.state = if in_object {
                                State::WaitKey
                            } else {
                                State::WaitValue
                            };
                        } else if (b == u32::from(b'}') && in_object)
                            || (b == u32::from(b']') && !in_object)
                        {
                            self.close_container();
                        } else if b == u32::from(b'}') || b == u32::from(b']') {
                            return Err(self.error(SyntaxErrorKind::UnexpectedClosingBracket));
                        } else {
                            return Err(self.error(SyntaxErrorKind::MissingComma));
                        }
                    }
                    State::LiteralT => self.literal_step(b, b'r', State::LiteralTr)?,
                    State::LiteralTr => self.literal_step(b, b'u', State::LiteralTru)?,
                    State::LiteralTru => {
                        self.literal_end(b, b'e')?;
                        self.complete_value(JsonValue::Boolean(true));
                    }
                    State::LiteralF => self.literal_step(b, b'a', State::LiteralFa)?,
                    State::LiteralFa => self.literal_step(b, b'l', State::LiteralFal)?,
                    State::LiteralFal => self.literal_step(b, b's', State::LiteralFals)?,
                    State::LiteralFals => {
                        self.literal_end(b, b'e')?;
                        self.complete_value(JsonValue::Boolean(false));
                    }
                    State::LiteralN => self.literal_step(b, b'u', State::LiteralNu)?,
                    State::LiteralNu => self.literal_step(b, b'l', State::LiteralNul)?,
                    State::LiteralNul => {
                        self.literal_end(b, b'l')?;
                        self.complete_value(JsonValue::Null);
                    }
                    State::InString => {
                        if b == u32::from(b'"') {
                            let text = self.take_token(chunk, pos);
                            self.complete_text(text)?;
                        } else if b == u32::from(b'\\') {
                            self.flush_contiguous(chunk, pos);
                            self.state = State::StringEscape;
                        } else if b < 0x20 {
                            return Err(self.error(SyntaxErrorKind::NotEscapedControlCharacter));
                        } else if self.token_start.is_none() {
                            self.token_buf.push(unit);
                        }
                    }
                    State::StringEscape => match char::from_u32(b) {
                        Some('"') => self.push_escaped(b'"'),
                        Some('\\') => self.push_escaped(b'\\'),
                        Some('/') => self.push_escaped(b'/'),
                        Some('b') => self.push_escaped(0x08),
                        Some('f') => self.push_escaped(0x0C),
                        Some('n') => self.push_escaped(b'\n'),
                        Some('r') => self.push_escaped(b'\r'),
                        Some('t') => self.push_escaped(b'\t'),
                        Some('u') => {
                            self.unicode[0] = 0;
                            self.state = State::UnicodeEscape(0);
                        }
                        _ => return Err(self.error(SyntaxErrorKind::UnknownEscapeSequence)),
                    },
                    State::UnicodeEscape(index) => {
                        let Some(digit) = hex_digit(b) else {
                            return Err(self.error(SyntaxErrorKind::MalformedEscapeSequence));
                        };
                        self.unicode[0] = self.unicode[0] * 16 + digit;
                        if index < 3 {
                            self.state = State::UnicodeEscape(index + 1);
                        } else if K::COMBINE_SURROGATE_PAIRS
                            && (0xD800..0xDC00).contains(&self.unicode[0])
                        {
                            self.state = State::AwaitLowSurrogate;
                        } else {
                            K::push_code_point(&mut self.token_buf, u32::from(self.unicode[0]));
                            self.state = State::InString;
                        }
                    }
                    State::AwaitLowSurrogate => {
                        if b == u32::from(b'\\') {
                            self.state = State::AwaitLowSurrogateU;
                        } else {
                            return Err(
                                self.error(SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence)
                            );
                        }
                    }
                    State::AwaitLowSurrogateU => {
                        if b == u32::from(b'u') {
                            self.unicode[1] = 0;
                            self.state = State::LowSurrogateEscape(0);
                        } else {
                            return Err(
                                self.error(SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence)
                            );
                        }
                    }
                    State::LowSurrogateEscape(index) => {
                        let Some(digit) = hex_digit(b) else {
                            return Err(self.error(SyntaxErrorKind::MalformedEscapeSequence));
                        };
                        self.unicode[1] = self.unicode[1] * 16 + digit;
                        if index < 3 {
                            self.state = State::LowSurrogateEscape(index + 1);
                        } else if (0xDC00..0xE000).contains(&self.unicode[1]) {
                            let high = u32::from(self.unicode[0]) - 0xD800;
                            let low = u32::from(self.unicode[1]) - 0xDC00;
                            K::push_code_point(&mut self.token_buf, 0x10000 + (high << 10) + low);
                            self.state = State::InString;
                        } else {
                            return Err(
                                self.error(SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence)
                            );
                        }
                    }
                    State::NumberSign => {
                        if (0x31..=0x39).contains(&b) {
                            self.state = State::NumberInt;
                        } else if b == 0x30 {
                            self.state = State::NumberZero;
                        } else {
                            return Err(self.error(SyntaxErrorKind::MalformedNumber));
                        }
                        self.push_number_unit(unit);
                    }
                    State::NumberInt => {
                        if b == u32::from(b'.') {
                            self.state = State::NumberDot;
                        } else if b == u32::from(b'e') || b == u32::from(b'E') {
                            self.state = State::NumberExp;
                        } else if !is_digit(b) {
                            self.finish_number(chunk, pos, true);
                            continue 'dispatch;
                        }
                        self.push_number_unit(unit);
                    }
                    State::NumberZero => {
                        if b == u32::from(b'.') {
                            self.state = State::NumberDot;
                        } else if b == u32::from(b'e') || b == u32::from(b'E') {
                            self.state = State::NumberExp;
                        } else {
                            self.finish_number(chunk, pos, true);
                            continue 'dispatch;
                        }
                        self.push_number_unit(unit);
                    }
                    State::NumberDot => {
                        if !is_digit(b) {
                            return Err(self.error(SyntaxErrorKind::MalformedNumber));
                        }
                        self.state = State::NumberFraction;
                        self.push_number_unit(unit);
                    }
                    State::NumberFraction => {
                        if b == u32::from(b'e') || b == u32::from(b'E') {
                            self.state = State::NumberExp;
                        } else if !is_digit(b) {
                            self.finish_number(chunk, pos, false);
                            continue 'dispatch;
                        }
                        self.push_number_unit(unit);
                    }
                    State::NumberExp => {
                        if b == u32::from(b'-') || b == u32::from(b'+') {
                            self.state = State::NumberExpSign;
                        } else if is_digit(b) {
                            self.state = State::NumberExpDigits;
                        } else {
                            return Err(self.error(SyntaxErrorKind::MalformedNumber));
                        }
                        self.push_number_unit(unit);
                    }
                    State::NumberExpSign => {
                        if !is_digit(b) {
                            return Err(self.error(SyntaxErrorKind::MalformedNumber));
                        }
                        self.state = State::NumberExpDigits;
                        self.push_number_unit(unit);
                    }
                    State::NumberExpDigits => {
                        if !is_digit(b) {
                            self.finish_number(chunk, pos, false);
                            continue 'dispatch;
                        }
                        self.push_number_unit(unit);
                    }
                    State::Done => unreachable!("handled above"),
                }
                break 'dispatch;
            }
            pos += 1;
        }

        if last {
            // A trailing complete number is materialized as if a delimiter
            // had been seen
            match self.state {
                State::NumberInt | State::NumberZero => {
                    self.finish_number(chunk, chunk.len(), true);
                }
                State::NumberFraction | State::NumberExpDigits => {
                    self.finish_number(chunk, chunk.len(), false);
                }
                _ => {}
            }
        } else {
            self.flush_contiguous(chunk, chunk.len());
        }

        if self.state == State::Done {
            if last && pos == chunk.len() {
                Ok(ParseStatus::Success)
            } else {
                Ok(ParseStatus::NoNeedMore)
            }
        } else {
            Ok(ParseStatus::Pending)
        }
    }

    fn error(&self, kind: SyntaxErrorKind) -> ParseError {
        ParseError {
            kind,
            location: self.position(),
        }
    }

    fn literal_step(&mut self, b: u32, expected: u8, next: State) -> Result<(), ParseError> {
        if b == u32::from(expected) {
            self.state = next;
            Ok(())
        } else {
            Err(self.error(SyntaxErrorKind::InvalidLiteral))
        }
    }

    fn literal_end(&mut self, b: u32, expected: u8) -> Result<(), ParseError> {
        if b == u32::from(expected) {
            Ok(())
        } else {
            Err(self.error(SyntaxErrorKind::InvalidLiteral))
        }
    }

    fn push_escaped(&mut self, byte: u8) {
        self.token_buf.push(K::from_ascii(byte));
        self.state = State::InString;
    }

    fn push_number_unit(&mut self, unit: K) {
        if self.token_start.is_none() {
            self.token_buf.push(unit);
        }
    }

    /// Moves a contiguous in-chunk slice into the scratch buffer; afterwards
    /// the buffer is authoritative
    fn flush_contiguous(&mut self, chunk: &[K], end: usize) {
        if let Some(start) = self.token_start.take() {
            if end > start {
                self.token_buf.extend_from_slice(&chunk[start..end]);
            }
        }
    }

    /// Current token, either straight out of the chunk or drained from the
    /// scratch buffer
    fn take_token(&mut self, chunk: &[K], end: usize) -> Vec<K> {
        match self.token_start.take() {
            Some(start) => chunk[start..end].to_vec(),
            None => std::mem::take(&mut self.token_buf),
        }
    }

    /// Attaches a completed value to the innermost open container, or makes
    /// it the root
    fn complete_value(&mut self, value: JsonValue<K>) {
        match self.frames.last_mut() {
            Some(Frame::Array(items)) => {
                items.push(value);
                self.state = State::WaitComma;
            }
            Some(Frame::Object { map, pending_key }) => {
                let key = pending_key
                    .take()
                    .expect("Unexpected: member value completed without member name");
                map.insert(key, value);
                self.state = State::WaitComma;
            }
            None => {
                self.result = value;
                self.state = State::Done;
            }
        }
    }

    /// Handles a completed string: a member name when the open object still
    /// lacks one, otherwise a text value
    fn complete_text(&mut self, text: Vec<K>) -> Result<(), ParseError> {
        let is_key = matches!(
            self.frames.last(),
            Some(Frame::Object {
                pending_key: None,
                ..
            })
        );
        if is_key {
            let location = self.position();
            let Some(Frame::Object { map, pending_key }) = self.frames.last_mut() else {
                unreachable!("frame checked above");
            };
            if map.contains_key(&text) {
                return Err(ParseError {
                    kind: SyntaxErrorKind::DuplicateMemberName,
                    location,
                });
            }
            *pending_key = Some(text);
            self.state = State::WaitColon;
        } else {
            self.complete_value(JsonValue::Text(text));
        }
        Ok(())
    }

    fn close_container(&mut self) {
        let frame = self
            .frames
            .pop()
            .expect("Unexpected: closing bracket without open container");
        let value = match frame {
            Frame::Array(items) => JsonValue::Array(Rc::new(items)),
            Frame::Object { map, .. } => JsonValue::Object(Rc::new(map)),
        };
        self.complete_value(value);
    }

    fn finish_number(&mut self, chunk: &[K], end: usize, integral: bool) {
        let value = {
            let units: &[K] = match self.token_start {
                Some(start) => &chunk[start..end],
                None => &self.token_buf,
            };
            // Number tokens consist of ASCII units only
            let mut text = String::with_capacity(units.len());
            for &unit in units {
                text.push(unit.as_u32() as u8 as char);
            }
            number_value(&text, integral)
        };
        self.token_start = None;
        self.token_buf.clear();
        self.complete_value(value);
    }
}

fn number_value<K: CodeUnit>(text: &str, integral: bool) -> JsonValue<K> {
    if integral {
        if let Ok(value) = text.parse::<i64>() {
            return JsonValue::Integer(value);
        }
        // i64 overflow silently falls back to double
    }
    JsonValue::Real(text.parse().unwrap_or(f64::NAN))
}

fn is_whitespace(b: u32) -> bool {
    matches!(b, 0x20 | 0x09 | 0x0A | 0x0D)
}

fn is_digit(b: u32) -> bool {
    (0x30..=0x39).contains(&b)
}

fn hex_digit(b: u32) -> Option<u16> {
    match b {
        0x30..=0x39 => Some((b - 0x30) as u16),
        0x61..=0x66 => Some((b - 0x61 + 10) as u16),
        0x41..=0x46 => Some((b - 0x41 + 10) as u16),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseOutcome};

    fn parse_value(json: &str) -> JsonValue<u8> {
        let outcome = parse(json.as_bytes()).expect(json);
        assert_eq!(ParseStatus::Success, outcome.status, "for: {json}");
        outcome.value
    }

    fn assert_error(json: &str, kind: SyntaxErrorKind) {
        match parse(json.as_bytes()) {
            Err(e) => assert_eq!(kind, e.kind, "for: {json}"),
            Ok(outcome) => panic!("Should have failed for: {json}; got {outcome:?}"),
        }
    }

    #[test]
    fn top_level_scalars() {
        assert_eq!(JsonValue::Boolean(true), parse_value("true"));
        assert_eq!(JsonValue::Boolean(false), parse_value("false"));
        assert_eq!(JsonValue::Null, parse_value("null"));
        assert_eq!(JsonValue::Integer(123), parse_value("123"));
        assert_eq!(JsonValue::Integer(-123), parse_value("-123"));
        assert_eq!(JsonValue::Integer(0), parse_value("0"));
        assert_eq!(JsonValue::Integer(0), parse_value("-0"));
        assert_eq!(JsonValue::Real(1.5), parse_value("1.5"));
        assert_eq!(JsonValue::Real(-0.5), parse_value("-0.5"));
        assert_eq!(JsonValue::Real(1500.0), parse_value("1.5e3"));
        assert_eq!(JsonValue::Real(0.15), parse_value("15E-2"));
        assert_eq!(JsonValue::Real(1500.0), parse_value("1.5e+3"));
        assert_eq!(JsonValue::from("ab"), parse_value(r#""ab""#));
        assert_eq!(JsonValue::from(""), parse_value(r#""""#));
    }

    #[test]
    fn surrounding_whitespace() {
        let outcome = parse(b"  true  ").unwrap();
        assert_eq!(ParseStatus::Success, outcome.status);
        assert_eq!(JsonValue::Boolean(true), outcome.value);
    }

    #[test]
    fn containers() {
        assert_eq!(JsonValue::new_array(), parse_value("[]"));
        assert_eq!(JsonValue::new_object(), parse_value("{}"));
        assert_eq!(JsonValue::new_array(), parse_value("[ ]"));
        assert_eq!(JsonValue::new_object(), parse_value("{ }"));

        let value = parse_value(r#"{"abc":10,"cde":[1,2,"14\n"]}"#);
        assert_eq!(2, value.len());
        assert_eq!(JsonValue::Integer(10), value["abc"]);
        assert_eq!(3, value["cde"].len());
        assert_eq!(JsonValue::Integer(1), value["cde"][0]);
        assert_eq!(JsonValue::Integer(2), value["cde"][1]);
        assert_eq!(JsonValue::from("14\n"), value["cde"][2]);
    }

    #[test]
    fn nested_containers() {
        let value = parse_value(r#"[[[]],{"a":{"b":[{}]}},[]]"#);
        assert_eq!(3, value.len());
        assert!(value[0][0].is_array());
        assert!(value[1]["a"]["b"][0].is_object());
        assert!(value[2].is_array());
    }

    #[test]
    fn member_order_is_preserved() {
        let value = parse_value(r#"{"z":1,"a":2,"m":3}"#);
        let keys: Vec<&[u8]> = value.as_object().keys().map(|k| &k[..]).collect();
        assert_eq!(vec![&b"z"[..], &b"a"[..], &b"m"[..]], keys);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            JsonValue::from("\"\\/\u{8}\u{c}\n\r\t"),
            parse_value(r#""\"\\\/\b\f\n\r\t""#)
        );
        assert_eq!(JsonValue::from("a/b"), parse_value(r#""a\/b""#));
        assert_eq!(JsonValue::from("A"), parse_value(r#""A""#));
        assert_eq!(JsonValue::from("ß€"), parse_value(r#""ß€""#));
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(JsonValue::from("A"), parse_value(r#""\u0041""#));
        assert_eq!(JsonValue::from("\u{20AC}"), parse_value(r#""\u20AC""#));
        assert_eq!(JsonValue::from("\u{20AC}"), parse_value(r#""\u20ac""#));
        assert_eq!(JsonValue::from("\u{0}"), parse_value(r#""\u0000""#));
    }

    #[test]
    fn surrogate_pair_escapes() {
        // U+1D11E (𝄞)
        assert_eq!(JsonValue::from("\u{1D11E}"), parse_value(r#""\uD834\uDD1E""#));
        assert_eq!(
            JsonValue::from("a\u{1D11E}b"),
            parse_value(r#""a\uD834\uDD1Eb""#)
        );
    }

    #[test]
    fn surrogate_pair_width_16_keeps_units() {
        let outcome = parse(&u16::text_from_str(r#""\uD834\uDD1E""#)).unwrap();
        assert_eq!(ParseStatus::Success, outcome.status);
        assert_eq!(Some(&[0xD834u16, 0xDD1E][..]), outcome.value.text());
    }

    #[test]
    fn surrogate_pair_width_32_combines() {
        let outcome = parse(&u32::text_from_str(r#""\uD834\uDD1E""#)).unwrap();
        assert_eq!(ParseStatus::Success, outcome.status);
        assert_eq!(Some(&[0x1D11Eu32][..]), outcome.value.text());
    }

    #[test]
    fn raw_units_above_ascii_pass_through_strings() {
        // Text is treated as opaque code units; only value starts are restricted
        assert_eq!(JsonValue::from("ä𝄞"), parse_value("\"ä𝄞\""));

        let outcome = parse(&u32::text_from_str("\"𝄞\"")).unwrap();
        assert_eq!(Some(&[0x1D11Eu32][..]), outcome.value.text());
    }

    #[test]
    fn number_overflow_falls_back_to_real() {
        assert_eq!(
            JsonValue::Real(9223372036854775808.0),
            parse_value("9223372036854775808")
        );
        assert_eq!(
            JsonValue::Integer(i64::MAX),
            parse_value("9223372036854775807")
        );
        assert_eq!(
            JsonValue::Integer(i64::MIN),
            parse_value("-9223372036854775808")
        );
        assert_eq!(JsonValue::Real(1e300), parse_value("1e300"));
    }

    #[test]
    fn number_termination_redispatches() {
        let value = parse_value("[1,2.5,-3e2]");
        assert_eq!(JsonValue::Integer(1), value[0]);
        assert_eq!(JsonValue::Real(2.5), value[1]);
        assert_eq!(JsonValue::Real(-300.0), value[2]);

        let value = parse_value(r#"{"a":1,"b":0}"#);
        assert_eq!(JsonValue::Integer(1), value["a"]);
        assert_eq!(JsonValue::Integer(0), value["b"]);
    }

    #[test]
    fn syntax_errors() {
        assert_error("trye", SyntaxErrorKind::InvalidLiteral);
        assert_error("falsy", SyntaxErrorKind::InvalidLiteral);
        assert_error("nule", SyntaxErrorKind::InvalidLiteral);
        assert_error("bad", SyntaxErrorKind::MalformedJson);
        assert_error("+1", SyntaxErrorKind::MalformedJson);
        assert_error("[1 2]", SyntaxErrorKind::MissingComma);
        assert_error("[1,]", SyntaxErrorKind::MalformedJson);
        assert_error(r#"{"a" 1}"#, SyntaxErrorKind::MissingColon);
        assert_error(r#"{1: 2}"#, SyntaxErrorKind::ExpectingMemberNameOrObjectEnd);
        assert_error("[1}", SyntaxErrorKind::UnexpectedClosingBracket);
        assert_error(r#"{"a":1]"#, SyntaxErrorKind::UnexpectedClosingBracket);
        assert_error("-a", SyntaxErrorKind::MalformedNumber);
        assert_error("1.e3", SyntaxErrorKind::MalformedNumber);
        assert_error("1e", SyntaxErrorKind::MalformedNumber);
        assert_error("1e+", SyntaxErrorKind::MalformedNumber);
        assert_error("[01]", SyntaxErrorKind::MissingComma);
        assert_error(r#""\x""#, SyntaxErrorKind::UnknownEscapeSequence);
        assert_error(r#""\u00g0""#, SyntaxErrorKind::MalformedEscapeSequence);
        assert_error(
            r#""\uD834x""#,
            SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
        );
        assert_error(
            r#""\uD834\n""#,
            SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
        );
        assert_error(
            r#""\uD834\uD834""#,
            SyntaxErrorKind::UnpairedSurrogatePairEscapeSequence,
        );
        assert_error("\"a\nb\"", SyntaxErrorKind::NotEscapedControlCharacter);
        assert_error("\"a\u{1}b\"", SyntaxErrorKind::NotEscapedControlCharacter);
        assert_error(
            r#"{"a":1,"a":2}"#,
            SyntaxErrorKind::DuplicateMemberName,
        );
        assert_error("\u{80}", SyntaxErrorKind::MalformedJson);
    }

    #[test]
    fn error_location() {
        let error = parse(b"[1,\n2,\nx]").unwrap_err();
        assert_eq!(SyntaxErrorKind::MalformedJson, error.kind);
        assert_eq!(3, error.location.line);
        assert_eq!(1, error.location.column);
    }

    #[test]
    fn error_poisons_parser() {
        let mut parser = JsonPushParser::<u8>::new();
        let error = parser.process_chunk(b"[x", false).unwrap_err();
        assert_eq!(error, parser.process_chunk(b"1]", true).unwrap_err());

        parser.reset();
        assert_eq!(
            ParseStatus::Success,
            parser.process_chunk(b"[1]", true).unwrap()
        );
    }

    #[test]
    fn streamed_number_across_chunks() {
        let mut parser = JsonPushParser::<u8>::new();
        assert_eq!(
            ParseStatus::Pending,
            parser.process_chunk(b"12", false).unwrap()
        );
        assert_eq!(
            ParseStatus::Success,
            parser.process_chunk(b"3", true).unwrap()
        );
        assert_eq!(JsonValue::Integer(123), parser.take_value());
    }

    #[test]
    fn streamed_trailing_data() {
        let mut parser = JsonPushParser::<u8>::new();
        assert_eq!(
            ParseStatus::NoNeedMore,
            parser.process_chunk(b" trues", false).unwrap()
        );
        assert_eq!(JsonValue::Boolean(true), parser.take_value());
        assert_eq!(1, parser.position().line);
        assert_eq!(6, parser.position().column);
    }

    #[test]
    fn trailing_number_needs_last_or_delimiter() {
        let mut parser = JsonPushParser::<u8>::new();
        assert_eq!(
            ParseStatus::Pending,
            parser.process_chunk(b"123", false).unwrap()
        );
        // The number may continue in the next chunk, so nothing was produced
        assert!(parser.take_value().is_undefined());

        assert_eq!(
            ParseStatus::Success,
            parser.process_chunk(b"", true).unwrap()
        );
        assert_eq!(JsonValue::Integer(123), parser.take_value());
    }

    #[test]
    fn truncated_document_stays_pending() {
        for json in [
            "tru", "[1,", r#"{"a""#, r#"{"a":"#, r#""ab"#, r#""ab\"#, r#""ab\u00"#, "-", "1.", "1e",
        ] {
            let outcome = parse(json.as_bytes()).expect(json);
            assert_eq!(ParseStatus::Pending, outcome.status, "for: {json}");
        }
    }

    #[test]
    fn every_split_matches_one_shot() {
        let documents = [
            r#"{"abc":10,"cde":[1,2,"14\n"],"x":{"deep":[true,false,null]}}"#,
            r#"[" 𝄞 ","ä",-12.5e-3,9223372036854775808,{"k":[]}]"#,
            "  [1, {\"a\": \"b\"},\n-4.25e2, \"\"]  ",
        ];
        for json in documents {
            let expected = parse(json.as_bytes()).unwrap();
            for split in 0..=json.len() {
                let mut parser = JsonPushParser::<u8>::new();
                parser
                    .process_chunk(&json.as_bytes()[..split], false)
                    .unwrap_or_else(|e| panic!("split {split} of {json}: {e}"));
                let status = parser
                    .process_chunk(&json.as_bytes()[split..], true)
                    .unwrap_or_else(|e| panic!("split {split} of {json}: {e}"));
                assert_eq!(expected.status, status, "split {split} of {json}");
                assert_eq!(expected.value, parser.take_value(), "split {split} of {json}");
            }
        }
    }

    #[test]
    fn every_split_reports_same_error() {
        let json = r#"{"a": [1, 2, x]}"#;
        let expected = parse(json.as_bytes()).unwrap_err();
        for split in 0..=json.len() {
            let mut parser = JsonPushParser::<u8>::new();
            let first = parser.process_chunk(&json.as_bytes()[..split], false);
            let error = match first {
                Err(e) => e,
                Ok(_) => parser
                    .process_chunk(&json.as_bytes()[split..], true)
                    .unwrap_err(),
            };
            assert_eq!(expected, error, "split {split}");
        }
    }

    #[test]
    fn three_way_splits_inside_escapes() {
        let json = r#"["𝄞","\uD834\uDD1E","\n\t"]"#;
        let expected = parse(json.as_bytes()).unwrap();
        let bytes = json.as_bytes();
        for first in 0..=bytes.len() {
            for second in first..=bytes.len() {
                let mut parser = JsonPushParser::<u8>::new();
                parser.process_chunk(&bytes[..first], false).unwrap();
                parser.process_chunk(&bytes[first..second], false).unwrap();
                let status = parser.process_chunk(&bytes[second..], true).unwrap();
                assert_eq!(expected.status, status, "splits {first}/{second}");
                assert_eq!(
                    expected.value,
                    parser.take_value(),
                    "splits {first}/{second}"
                );
            }
        }
    }

    #[test]
    fn empty_chunks_are_harmless() {
        let mut parser = JsonPushParser::<u8>::new();
        assert_eq!(ParseStatus::Pending, parser.process_chunk(b"", false).unwrap());
        assert_eq!(
            ParseStatus::Pending,
            parser.process_chunk(b"[1,", false).unwrap()
        );
        assert_eq!(ParseStatus::Pending, parser.process_chunk(b"", false).unwrap());
        assert_eq!(
            ParseStatus::Success,
            parser.process_chunk(b"2]", true).unwrap()
        );
        assert_eq!(JsonValue::array_from([1, 2]), parser.take_value());
    }

    #[test]
    fn line_and_column_tracking() {
        let outcome = parse(b"{\n  \"a\": 1\n}").unwrap();
        assert_eq!(ParseStatus::Success, outcome.status);
        assert_eq!(3, outcome.position.line);
        assert_eq!(1, outcome.position.column);
    }

    #[test]
    fn one_shot_trailing_data_position() {
        let ParseOutcome {
            value,
            status,
            position,
        } = parse(b"true false").unwrap();
        assert_eq!(ParseStatus::NoNeedMore, status);
        assert_eq!(JsonValue::Boolean(true), value);
        assert_eq!(1, position.line);
        assert_eq!(6, position.column);
    }

    #[test]
    fn wide_unit_documents() {
        let outcome = parse(&u16::text_from_str(r#"{"a": [1, "xä"], "b": -2.5}"#)).unwrap();
        assert_eq!(ParseStatus::Success, outcome.status);
        let value = outcome.value;
        assert_eq!(JsonValue::Integer(1), value["a"][0]);
        assert_eq!(Some(&u16::text_from_str("xä")[..]), value["a"][1].text());
        assert_eq!(JsonValue::Real(-2.5), value["b"]);
    }
}
