//! Module for writing JSON data
//!
//! [`write_value`] renders a [`JsonValue`] as JSON text into a code unit
//! buffer; [`WriterSettings`] controls pretty printing and member ordering.
//! The convenience methods [`JsonValue::store`], [`JsonValue::store_pretty`]
//! and [`JsonValue::store_with`] cover the common cases.

use crate::code_unit::CodeUnit;
use crate::value::JsonValue;

/// Settings to customize the JSON output
///
/// These settings are used by [`write_value`] and [`JsonValue::store_with`].
/// To avoid repeating the default values for unchanged settings
/// `..Default::default()` can be used:
/// ```
/// # use chunkson::writer::WriterSettings;
/// WriterSettings::<u8> {
///     pretty_print: true,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct WriterSettings<K: CodeUnit = u8> {
    /// Whether to pretty print the JSON output
    ///
    /// When enabled the JSON output has line breaks and indentation to make
    /// it easier for humans to read: a line break follows every opening
    /// bracket and every comma, every entry line is indented by
    /// [`indent_count`](Self::indent_count) × [`indent_unit`](Self::indent_unit)
    /// per open container, a single space follows every `:`, and the closing
    /// bracket sits on its own line indented to the container's own depth.
    /// Empty objects and arrays are written without inner whitespace.
    ///
    /// Otherwise the output is compact and has no whitespace at all.
    pub pretty_print: bool,

    /// Whether to write object members in ascending lexicographic order of
    /// their name's code unit sequence
    ///
    /// When disabled members are written in insertion order. Ordering only
    /// ever rearranges objects with more than one member, so the output for
    /// other values is unaffected.
    pub sort_keys: bool,

    /// The code unit repeated to form one indentation step, a space by default
    ///
    /// Only used when [`pretty_print`](Self::pretty_print) is enabled.
    pub indent_unit: K,

    /// How often [`indent_unit`](Self::indent_unit) is repeated per depth, 2
    /// by default
    ///
    /// Only used when [`pretty_print`](Self::pretty_print) is enabled.
    pub indent_count: u32,
}

impl<K: CodeUnit> Default for WriterSettings<K> {
    /// Creates the default settings
    ///
    /// - pretty print: disabled (compact output)
    /// - sort keys: disabled (insertion order)
    /// - indentation: two spaces per depth
    fn default() -> Self {
        WriterSettings {
            pretty_print: false,
            sort_keys: false,
            indent_unit: K::from_ascii(b' '),
            indent_count: 2,
        }
    }
}

/// Renders a value as JSON text, appending to `out`
///
/// `Undefined` values are elided: an object member or array item whose value
/// is `Undefined` is not written at all, and an `Undefined` root produces no
/// output. The result is byte-for-byte stable for identical input, settings
/// and (unless [`WriterSettings::sort_keys`] is set) insertion order.
///
/// # Examples
/// ```
/// # use chunkson::value::JsonValue;
/// # use chunkson::writer::{write_value, WriterSettings};
/// let value = JsonValue::<u8>::object_from([("a", 1)]);
///
/// let mut out = Vec::new();
/// write_value(&value, &mut out, &WriterSettings::default());
/// assert_eq!(br#"{"a":1}"#, &out[..]);
/// ```
pub fn write_value<K: CodeUnit>(
    value: &JsonValue<K>,
    out: &mut Vec<K>,
    settings: &WriterSettings<K>,
) {
    ValueWriter { out, settings }.write(value, settings.indent_count);
}

impl<K: CodeUnit> JsonValue<K> {
    /// Renders this value as compact JSON text
    ///
    /// Equivalent to [`write_value`] with default settings.
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::array_from([1, 2]);
    /// assert_eq!(b"[1,2]", &value.store()[..]);
    /// ```
    pub fn store(&self) -> Vec<K> {
        self.store_with(&WriterSettings::default())
    }

    /// Renders this value as pretty printed JSON text with default indentation
    pub fn store_pretty(&self) -> Vec<K> {
        self.store_with(&WriterSettings {
            pretty_print: true,
            ..Default::default()
        })
    }

    /// Renders this value as JSON text with the given settings
    pub fn store_with(&self, settings: &WriterSettings<K>) -> Vec<K> {
        let mut out = Vec::new();
        write_value(self, &mut out, settings);
        out
    }
}

/// Formats the value as compact JSON text
///
/// Code unit sequences which do not form valid Unicode are rendered lossily.
impl<K: CodeUnit> std::fmt::Display for JsonValue<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&K::text_to_string(&self.store()))
    }
}

struct ValueWriter<'a, K: CodeUnit> {
    out: &'a mut Vec<K>,
    settings: &'a WriterSettings<K>,
}

impl<K: CodeUnit> ValueWriter<'_, K> {
    fn write_ascii(&mut self, text: &str) {
        debug_assert!(text.is_ascii());
        self.out.extend(text.bytes().map(K::from_ascii));
    }

    fn write_indentation(&mut self, indent: u32) {
        self.out.push(K::from_ascii(b'\n'));
        for _ in 0..indent {
            self.out.push(self.settings.indent_unit);
        }
    }

    /// Comma and line handling before an entry; `indent` is the entry's own
    /// indentation
    fn before_entry(&mut self, printed: bool, indent: u32) {
        if printed {
            self.out.push(K::from_ascii(b','));
        }
        if self.settings.pretty_print {
            self.write_indentation(indent);
        }
    }

    fn write(&mut self, value: &JsonValue<K>, indent: u32) {
        match value {
            JsonValue::Undefined => {}
            JsonValue::Null => self.write_ascii("null"),
            JsonValue::Boolean(true) => self.write_ascii("true"),
            JsonValue::Boolean(false) => self.write_ascii("false"),
            JsonValue::Integer(i) => self.write_ascii(&i.to_string()),
            JsonValue::Real(r) => self.write_ascii(&real_to_json(*r)),
            JsonValue::Text(t) => self.write_string(t),
            JsonValue::Object(map) => {
                self.out.push(K::from_ascii(b'{'));
                let mut printed = false;

                let mut entries: Vec<(&Vec<K>, &JsonValue<K>)> = map
                    .iter()
                    .filter(|(_, value)| !value.is_undefined())
                    .collect();
                if self.settings.sort_keys && map.len() > 1 {
                    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                }

                for (key, value) in entries {
                    self.before_entry(printed, indent);
                    printed = true;
                    self.write_string(key);
                    self.out.push(K::from_ascii(b':'));
                    if self.settings.pretty_print {
                        self.out.push(K::from_ascii(b' '));
                    }
                    self.write(value, indent + self.settings.indent_count);
                }

                if self.settings.pretty_print && printed {
                    self.write_indentation(indent - self.settings.indent_count);
                }
                self.out.push(K::from_ascii(b'}'));
            }
            JsonValue::Array(items) => {
                self.out.push(K::from_ascii(b'['));
                let mut printed = false;

                for item in items.iter().filter(|item| !item.is_undefined()) {
                    self.before_entry(printed, indent);
                    printed = true;
                    self.write(item, indent + self.settings.indent_count);
                }

                if self.settings.pretty_print && printed {
                    self.write_indentation(indent - self.settings.indent_count);
                }
                self.out.push(K::from_ascii(b']'));
            }
        }
    }

    fn write_string(&mut self, text: &[K]) {
        self.out.push(K::from_ascii(b'"'));
        for &unit in text {
            match unit.as_u32() {
                0x22 => self.write_ascii("\\\""),
                0x5C => self.write_ascii("\\\\"),
                0x08 => self.write_ascii("\\b"),
                0x09 => self.write_ascii("\\t"),
                0x0A => self.write_ascii("\\n"),
                0x0C => self.write_ascii("\\f"),
                0x0D => self.write_ascii("\\r"),
                // Remaining control units get the long escape, uppercase hex
                b @ 0x00..=0x1F => {
                    self.write_ascii("\\u00");
                    self.out.push(K::from_ascii(HEX_DIGITS[(b >> 4) as usize]));
                    self.out.push(K::from_ascii(HEX_DIGITS[(b & 15) as usize]));
                }
                _ => self.out.push(unit),
            }
        }
        self.out.push(K::from_ascii(b'"'));
    }
}

const HEX_DIGITS: [u8; 16] = *b"0123456789ABCDEF";

/// Shortest decimal rendering which reads back as the same `Real`
///
/// A fractional or exponent marker is kept in the output so a re-parse yields
/// a `Real` again rather than an `Integer`. Non-finite values have no JSON
/// representation and are written as `null`.
fn real_to_json(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_owned();
    }
    let mut text = value.to_string();
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}
