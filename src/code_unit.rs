//! Internal module for the code unit width abstraction

/// A single element of a JSON text sequence
///
/// The whole library is parameterized over the width of the character data it
/// operates on. The same logical contract applies for every width, only the
/// in-memory representation of text values and object member names differs:
///
/// - [`u8`]: 8 bit units, the natural choice for UTF-8 data
/// - [`u16`]: 16 bit units, UTF-16 style data as used by many platform APIs
/// - [`u32`]: 32 bit units, one unit per code point
///
/// Text is treated as an opaque sequence of code units; no validation of
/// multi-unit encodings is performed. Units ≥ 0x80 pass through member names
/// and string values unchanged.
///
/// Implementing this trait for custom types is not possible; the set of
/// supported widths is fixed.
pub trait CodeUnit:
    private::Sealed + Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug + 'static
{
    /// Whether a `\uXXXX` escape pair encoding a UTF-16 surrogate pair is
    /// combined into a single code point before being emitted
    ///
    /// For 16 bit units each half of the pair is emitted as its own unit;
    /// for the other widths the pair is recomposed into one Unicode scalar.
    const COMBINE_SURROGATE_PAIRS: bool;

    /// Converts an ASCII byte to a code unit
    fn from_ascii(byte: u8) -> Self;

    /// Numeric value of this code unit
    fn as_u32(self) -> u32;

    /// Appends one Unicode code point to `buf`, using as many units as the
    /// width requires
    ///
    /// A code point which cannot be represented at this width (for example a
    /// lone surrogate for 8 bit units, which must remain decodable as UTF-8)
    /// is replaced with U+FFFD.
    fn push_code_point(buf: &mut Vec<Self>, code_point: u32);

    /// Encodes a `str` as a sequence of code units of this width
    fn text_from_str(text: &str) -> Vec<Self>;

    /// Decodes a sequence of code units to a `String`, lossily replacing
    /// unit sequences which do not form valid Unicode
    fn text_to_string(text: &[Self]) -> String;
}

const REPLACEMENT: char = '\u{FFFD}';

impl CodeUnit for u8 {
    const COMBINE_SURROGATE_PAIRS: bool = true;

    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn as_u32(self) -> u32 {
        u32::from(self)
    }

    fn push_code_point(buf: &mut Vec<Self>, code_point: u32) {
        let c = char::from_u32(code_point).unwrap_or(REPLACEMENT);
        buf.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
    }

    fn text_from_str(text: &str) -> Vec<Self> {
        text.as_bytes().to_vec()
    }

    fn text_to_string(text: &[Self]) -> String {
        String::from_utf8_lossy(text).into_owned()
    }
}

impl CodeUnit for u16 {
    const COMBINE_SURROGATE_PAIRS: bool = false;

    fn from_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    fn as_u32(self) -> u32 {
        u32::from(self)
    }

    fn push_code_point(buf: &mut Vec<Self>, code_point: u32) {
        if let Ok(unit) = u16::try_from(code_point) {
            buf.push(unit);
        } else if let Some(c) = char::from_u32(code_point) {
            buf.extend_from_slice(c.encode_utf16(&mut [0; 2]));
        } else {
            buf.push(REPLACEMENT as u16);
        }
    }

    fn text_from_str(text: &str) -> Vec<Self> {
        text.encode_utf16().collect()
    }

    fn text_to_string(text: &[Self]) -> String {
        String::from_utf16_lossy(text)
    }
}

impl CodeUnit for u32 {
    const COMBINE_SURROGATE_PAIRS: bool = true;

    fn from_ascii(byte: u8) -> Self {
        u32::from(byte)
    }

    fn as_u32(self) -> u32 {
        self
    }

    fn push_code_point(buf: &mut Vec<Self>, code_point: u32) {
        buf.push(code_point);
    }

    fn text_from_str(text: &str) -> Vec<Self> {
        text.chars().map(u32::from).collect()
    }

    fn text_to_string(text: &[Self]) -> String {
        text.iter()
            .map(|&unit| char::from_u32(unit).unwrap_or(REPLACEMENT))
            .collect()
    }
}

mod private {
    use duplicate::duplicate_item;

    // Sealed trait, see https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
    pub trait Sealed {}

    #[duplicate_item(unit_type; [u8]; [u16]; [u32])]
    impl Sealed for unit_type {}
}

/// Whether every unit of `text` is an ASCII whitespace character
pub(crate) fn text_is_blank<K: CodeUnit>(text: &[K]) -> bool {
    text.iter()
        .all(|&unit| matches!(unit.as_u32(), 0x20 | 0x09 | 0x0A | 0x0D))
}
