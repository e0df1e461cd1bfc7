//! Module for the JSON value model
//!
//! [`JsonValue`] is a tagged value with eight variants. Objects and arrays are
//! shared by reference: cloning a value never copies container contents, a
//! deep copy has to be requested explicitly with [`JsonValue::deep_clone`].
//!
//! The value model is parameterized over the code unit width, see [`CodeUnit`].
//! The default width is 8 bit units.

use std::rc::Rc;

use duplicate::duplicate_item;
use indexmap::IndexMap;

use crate::code_unit::{text_is_blank, CodeUnit};

mod coerce;

/// Ordered mapping from member name to value, as stored by [`JsonValue::Object`]
///
/// Member names are unique and iteration follows insertion order.
pub type JsonMap<K> = IndexMap<Vec<K>, JsonValue<K>>;

/// Type of a JSON value
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum ValueKind {
    /// Sentinel for missing values; distinct from `Null`
    Undefined,
    /// JSON `null`
    Null,
    /// JSON boolean value, `true` or `false`
    Boolean,
    /// JSON number value without fractional or exponent part, stored as `i64`
    Integer,
    /// JSON number value with fractional or exponent part, stored as `f64`
    Real,
    /// JSON string value, stored as a sequence of code units
    Text,
    /// JSON object: `{ ... }`
    Object,
    /// JSON array: `[ ... ]`
    Array,
}

/// A JSON value
///
/// Values are produced by the [parser](crate::parser), by the `From` and
/// `FromIterator` conversions of this module, or by building containers
/// through the mutable indexing API. The [writer](crate::writer) is the
/// inverse of the parser and renders a value as JSON text.
///
/// # Numbers
/// Unlike plain JSON this value model distinguishes two number variants:
/// [`Integer`](Self::Integer) (signed 64 bit) and [`Real`](Self::Real)
/// (IEEE-754 double). The parser produces `Integer` for numbers consisting
/// only of digits with an optional leading `-`, falling back to `Real` when
/// the value overflows. The accessors [`number_int`](Self::number_int) and
/// [`number_real`](Self::number_real) work across both variants.
///
/// # Sharing
/// `Clone` is shallow: objects and arrays are reference counted and a clone
/// only bumps the count. Mutating a shared container detaches the mutated
/// node first (copy-on-write), so value semantics are preserved without deep
/// copies. [`deep_clone`](Self::deep_clone) rebuilds the whole subtree.
///
/// The reference count is not atomic; values are intended for single-threaded
/// use and are not `Send`.
///
/// # Examples
/// ```
/// # use chunkson::value::JsonValue;
/// let mut value = JsonValue::<u8>::new_object();
/// value["a"] = 1.into();
/// value["b"]["inner"] = "text".into();
///
/// assert_eq!(Some(1), value["a"].integer());
/// assert!(value["missing"].is_undefined());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue<K: CodeUnit = u8> {
    /// Sentinel for missing values; distinct from `Null`
    ///
    /// Lookups which miss return a reference to this variant, and the
    /// serializer elides it entirely.
    Undefined,
    /// JSON `null`
    Null,
    /// JSON boolean value
    Boolean(bool),
    /// JSON number value without fractional or exponent part
    Integer(i64),
    /// JSON number value with fractional or exponent part
    Real(f64),
    /// JSON string value
    Text(Vec<K>),
    /// JSON object
    Object(Rc<JsonMap<K>>),
    /// JSON array
    Array(Rc<Vec<JsonValue<K>>>),
}

/// The default value is `Undefined`
impl<K: CodeUnit> Default for JsonValue<K> {
    fn default() -> Self {
        JsonValue::Undefined
    }
}

impl<K: CodeUnit> JsonValue<K> {
    const UNDEFINED: &'static JsonValue<K> = &JsonValue::Undefined;

    /// Shared `Undefined` sentinel
    ///
    /// This is the reference returned by the const lookup methods [`at`](Self::at)
    /// and [`at_index`](Self::at_index) when a lookup misses. It is immutable;
    /// the mutable API never routes through it.
    pub fn undefined() -> &'static JsonValue<K> {
        Self::UNDEFINED
    }

    /// Creates an empty JSON object
    pub fn new_object() -> Self {
        JsonValue::Object(Rc::new(JsonMap::new()))
    }

    /// Creates an empty JSON array
    pub fn new_array() -> Self {
        JsonValue::Array(Rc::new(Vec::new()))
    }

    /// Creates the default value for a kind: `false`, `0`, `0.0`, empty text
    /// or an empty container
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Undefined => JsonValue::Undefined,
            ValueKind::Null => JsonValue::Null,
            ValueKind::Boolean => JsonValue::Boolean(false),
            ValueKind::Integer => JsonValue::Integer(0),
            ValueKind::Real => JsonValue::Real(0.0),
            ValueKind::Text => JsonValue::Text(Vec::new()),
            ValueKind::Object => Self::new_object(),
            ValueKind::Array => Self::new_array(),
        }
    }

    /// Builds a JSON array from anything convertible to values
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::array_from([1, 2, 3]);
    /// assert_eq!(3, value.len());
    /// ```
    pub fn array_from<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<JsonValue<K>>,
    {
        JsonValue::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a JSON object from key/value pairs; for duplicate keys the last
    /// pair wins
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::object_from([("a", 1), ("b", 2)]);
    /// assert_eq!(Some(2), value["b"].integer());
    /// ```
    pub fn object_from<I, T, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, V)>,
        T: IntoText<K>,
        V: Into<JsonValue<K>>,
    {
        JsonValue::Object(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into_text(), value.into()))
                .collect(),
        ))
    }

    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Undefined => ValueKind::Undefined,
            JsonValue::Null => ValueKind::Null,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Integer(_) => ValueKind::Integer,
            JsonValue::Real(_) => ValueKind::Real,
            JsonValue::Text(_) => ValueKind::Text,
            JsonValue::Object(_) => ValueKind::Object,
            JsonValue::Array(_) => ValueKind::Array,
        }
    }

    /// Whether this value is `Undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsonValue::Undefined)
    }

    /// Whether this value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Whether this value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    /// Whether this value is an integer number
    pub fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_))
    }

    /// Whether this value is a real number
    pub fn is_real(&self) -> bool {
        matches!(self, JsonValue::Real(_))
    }

    /// Whether this value is a text
    pub fn is_text(&self) -> bool {
        matches!(self, JsonValue::Text(_))
    }

    /// Whether this value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Whether this value is an array
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }
}

// Strict accessors; the tag must match
impl<K: CodeUnit> JsonValue<K> {
    #[cold]
    fn wrong_kind(&self, expected: ValueKind) -> ! {
        panic!(
            "Incorrect value usage: expected {expected} but value is {}",
            self.kind()
        );
    }

    /// The boolean value
    ///
    /// # Panics
    /// Panics when the value is not a [`Boolean`](Self::Boolean). Use
    /// [`boolean`](Self::boolean) for a non-panicking variant.
    pub fn as_boolean(&self) -> bool {
        match self {
            JsonValue::Boolean(b) => *b,
            _ => self.wrong_kind(ValueKind::Boolean),
        }
    }

    /// The integer value
    ///
    /// # Panics
    /// Panics when the value is not an [`Integer`](Self::Integer). Use
    /// [`integer`](Self::integer) for a non-panicking variant.
    pub fn as_integer(&self) -> i64 {
        match self {
            JsonValue::Integer(i) => *i,
            _ => self.wrong_kind(ValueKind::Integer),
        }
    }

    /// The real value
    ///
    /// # Panics
    /// Panics when the value is not a [`Real`](Self::Real). Use
    /// [`real`](Self::real) for a non-panicking variant.
    pub fn as_real(&self) -> f64 {
        match self {
            JsonValue::Real(r) => *r,
            _ => self.wrong_kind(ValueKind::Real),
        }
    }

    /// The text value as code units
    ///
    /// # Panics
    /// Panics when the value is not a [`Text`](Self::Text). Use
    /// [`text`](Self::text) for a non-panicking variant.
    pub fn as_text(&self) -> &[K] {
        match self {
            JsonValue::Text(t) => t,
            _ => self.wrong_kind(ValueKind::Text),
        }
    }

    /// The object members
    ///
    /// # Panics
    /// Panics when the value is not an [`Object`](Self::Object). Use
    /// [`object`](Self::object) for a non-panicking variant.
    pub fn as_object(&self) -> &JsonMap<K> {
        match self {
            JsonValue::Object(map) => map,
            _ => self.wrong_kind(ValueKind::Object),
        }
    }

    /// Mutable access to the object members, detaching the map first when it
    /// is shared
    ///
    /// # Panics
    /// Panics when the value is not an [`Object`](Self::Object).
    pub fn as_object_mut(&mut self) -> &mut JsonMap<K> {
        match self {
            JsonValue::Object(map) => Rc::make_mut(map),
            _ => self.wrong_kind(ValueKind::Object),
        }
    }

    /// The array items
    ///
    /// # Panics
    /// Panics when the value is not an [`Array`](Self::Array). Use
    /// [`array`](Self::array) for a non-panicking variant.
    pub fn as_array(&self) -> &[JsonValue<K>] {
        match self {
            JsonValue::Array(items) => items,
            _ => self.wrong_kind(ValueKind::Array),
        }
    }

    /// Mutable access to the array items, detaching the vector first when it
    /// is shared
    ///
    /// # Panics
    /// Panics when the value is not an [`Array`](Self::Array).
    pub fn as_array_mut(&mut self) -> &mut Vec<JsonValue<K>> {
        match self {
            JsonValue::Array(items) => Rc::make_mut(items),
            _ => self.wrong_kind(ValueKind::Array),
        }
    }
}

// Optional accessors
impl<K: CodeUnit> JsonValue<K> {
    /// The boolean value, if the value is a boolean
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::from(true);
    /// assert_eq!(true, value.boolean().unwrap_or(false));
    /// ```
    pub fn boolean(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, if the value is an integer
    pub fn integer(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The real value, if the value is a real
    pub fn real(&self) -> Option<f64> {
        match self {
            JsonValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// The text value, if the value is a text
    pub fn text(&self) -> Option<&[K]> {
        match self {
            JsonValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The object members, if the value is an object
    pub fn object(&self) -> Option<&JsonMap<K>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The array items, if the value is an array
    pub fn array(&self) -> Option<&[JsonValue<K>]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

// Fallible accessors; the caller chooses the error
impl<K: CodeUnit> JsonValue<K> {
    /// The boolean value, or the caller-provided error
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::from(1);
    /// let result = value.boolean_or_else(|| "need a boolean");
    /// assert_eq!(Err("need a boolean"), result);
    /// ```
    pub fn boolean_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<bool, E> {
        self.boolean().ok_or_else(error)
    }

    /// The integer value, or the caller-provided error
    pub fn integer_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<i64, E> {
        self.integer().ok_or_else(error)
    }

    /// The real value, or the caller-provided error
    pub fn real_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<f64, E> {
        self.real().ok_or_else(error)
    }

    /// The text value, or the caller-provided error
    pub fn text_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<&[K], E> {
        self.text().ok_or_else(error)
    }

    /// The text value if it contains anything besides whitespace, or the
    /// caller-provided error
    pub fn not_empty_text_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<&[K], E> {
        match self.text() {
            Some(text) if !text_is_blank(text) => Ok(text),
            _ => Err(error()),
        }
    }

    /// The result of [`to_integer`](Self::to_integer), or the caller-provided
    /// error
    pub fn to_integer_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<i64, E> {
        self.to_integer().ok_or_else(error)
    }

    /// The result of [`number_int`](Self::number_int), or the caller-provided
    /// error
    pub fn number_int_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<i64, E> {
        self.number_int().ok_or_else(error)
    }

    /// The result of [`number_real`](Self::number_real), or the
    /// caller-provided error
    pub fn number_real_or_else<E>(&self, error: impl FnOnce() -> E) -> Result<f64, E> {
        self.number_real().ok_or_else(error)
    }
}

// Dual-number accessors working across both number variants
impl<K: CodeUnit> JsonValue<K> {
    /// The number as `i64`
    ///
    /// Returns the value for an [`Integer`](Self::Integer), and for a
    /// [`Real`](Self::Real) which has no fractional part and lies within
    /// ±2⁵³ (so the conversion is lossless). Everything else is `None`.
    pub fn number_int(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            JsonValue::Real(r) if coerce::fits_int64_exact(*r) => Some(*r as i64),
            _ => None,
        }
    }

    /// The number as `f64`
    ///
    /// Returns the value for a [`Real`](Self::Real), and the widened value
    /// for an [`Integer`](Self::Integer). Everything else is `None`.
    pub fn number_real(&self) -> Option<f64> {
        match self {
            JsonValue::Real(r) => Some(*r),
            JsonValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// Lookup and mutation
impl<K: CodeUnit> JsonValue<K> {
    /// Looks up an object member without creating it
    ///
    /// Returns the [`undefined`](Self::undefined) sentinel when the member is
    /// missing or the value is not an object. Never mutates.
    pub fn at(&self, key: &[K]) -> &JsonValue<K> {
        if let JsonValue::Object(map) = self {
            if let Some(value) = map.get(key) {
                return value;
            }
        }
        Self::undefined()
    }

    /// Looks up an array item without creating it
    ///
    /// Returns the [`undefined`](Self::undefined) sentinel when the index is
    /// out of range or the value is not an array. Never mutates.
    pub fn at_index(&self, index: usize) -> &JsonValue<K> {
        if let JsonValue::Array(items) = self {
            if let Some(value) = items.get(index) {
                return value;
            }
        }
        Self::undefined()
    }

    /// Follows a path of member names, short-circuiting to the
    /// [`undefined`](Self::undefined) sentinel on the first miss
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let mut value = JsonValue::<u8>::new_object();
    /// value["outer"]["inner"] = 1.into();
    ///
    /// assert_eq!(Some(1), value.select(["outer", "inner"]).integer());
    /// assert!(value.select(["outer", "missing", "deeper"]).is_undefined());
    /// ```
    pub fn select<I>(&self, path: I) -> &JsonValue<K>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut current = self;
        for key in path {
            if current.is_undefined() {
                break;
            }
            current = current.at(&K::text_from_str(key.as_ref()));
        }
        current
    }

    /// Slot of an object member, creating it if necessary
    ///
    /// A value which is not an object is replaced by an empty object first;
    /// a missing member is inserted as `Undefined`.
    pub fn member_mut(&mut self, key: impl IntoText<K>) -> &mut JsonValue<K> {
        if !self.is_object() {
            *self = Self::new_object();
        }
        let map = match self {
            JsonValue::Object(map) => Rc::make_mut(map),
            _ => unreachable!(),
        };
        map.entry(key.into_text()).or_insert(JsonValue::Undefined)
    }

    /// Slot of an array item, creating it if necessary
    ///
    /// A value which is not an array is replaced by an empty array first; an
    /// index beyond the current length extends the array with `Undefined`
    /// fills.
    pub fn element_mut(&mut self, index: usize) -> &mut JsonValue<K> {
        if !self.is_array() {
            *self = Self::new_array();
        }
        let items = match self {
            JsonValue::Array(items) => Rc::make_mut(items),
            _ => unreachable!(),
        };
        if index >= items.len() {
            items.resize(index + 1, JsonValue::Undefined);
        }
        &mut items[index]
    }

    /// Appends one item, replacing a non-array value by an empty array first
    ///
    /// Returns the slot of the appended item.
    pub fn push(&mut self, value: impl Into<JsonValue<K>>) -> &mut JsonValue<K> {
        if !self.is_array() {
            *self = Self::new_array();
        }
        let items = match self {
            JsonValue::Array(items) => Rc::make_mut(items),
            _ => unreachable!(),
        };
        items.push(value.into());
        items.last_mut().expect("just pushed")
    }

    /// Assigns an object member, creating it if necessary
    ///
    /// Like [`member_mut`](Self::member_mut) but overwrites the slot with the
    /// supplied value. Returns the slot.
    pub fn set(
        &mut self,
        key: impl IntoText<K>,
        value: impl Into<JsonValue<K>>,
    ) -> &mut JsonValue<K> {
        let slot = self.member_mut(key);
        *slot = value.into();
        slot
    }

    /// Item count of an array or member count of an object, 0 for everything
    /// else
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Whether [`len`](Self::len) is 0
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swaps two values
    pub fn swap(&mut self, other: &mut JsonValue<K>) {
        std::mem::swap(self, other);
    }

    /// Deep copy of the whole subtree
    ///
    /// Objects and arrays are rebuilt recursively into fresh containers which
    /// share no node with `self`; scalar leaves are copied by value.
    pub fn deep_clone(&self) -> JsonValue<K> {
        match self {
            JsonValue::Object(map) => JsonValue::Object(Rc::new(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            )),
            JsonValue::Array(items) => {
                JsonValue::Array(Rc::new(items.iter().map(JsonValue::deep_clone).collect()))
            }
            other => other.clone(),
        }
    }

    /// Merges another value into this one
    ///
    /// - Two objects are merged member-wise: members present in both recurse
    ///   with the same flags, members only present in `other` are inserted.
    /// - Two arrays are concatenated when `append_arrays` is set; otherwise
    ///   `other` replaces this array when `replace` is set.
    /// - For any other combination `other` replaces this value when `replace`
    ///   is set and `other` is not `Undefined`.
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let mut base = JsonValue::<u8>::object_from([("a", 1), ("b", 2)]);
    /// let overlay = JsonValue::<u8>::object_from([("b", 20), ("c", 30)]);
    ///
    /// base.merge(&overlay, true, false);
    /// assert_eq!(Some(1), base["a"].integer());
    /// assert_eq!(Some(20), base["b"].integer());
    /// assert_eq!(Some(30), base["c"].integer());
    /// ```
    pub fn merge(&mut self, other: &JsonValue<K>, replace: bool, append_arrays: bool) {
        if self.is_object() && other.is_object() {
            let other_map = match other {
                JsonValue::Object(map) => Rc::clone(map),
                _ => unreachable!(),
            };
            let map = self.as_object_mut();
            for (key, value) in other_map.iter() {
                match map.get_mut(key) {
                    Some(slot) => slot.merge(value, replace, append_arrays),
                    None => {
                        map.insert(key.clone(), value.clone());
                    }
                }
            }
        } else if self.is_array() && other.is_array() {
            if append_arrays {
                let other_items = match other {
                    JsonValue::Array(items) => Rc::clone(items),
                    _ => unreachable!(),
                };
                if !other_items.is_empty() {
                    self.as_array_mut().extend(other_items.iter().cloned());
                }
            } else if replace {
                *self = other.clone();
            }
        } else if replace && !other.is_undefined() {
            *self = other.clone();
        }
    }
}

/// Conversion into an owned member name or text of code units
///
/// Implemented for `str` and `String` (encoded at the target width) and for
/// code unit slices and vectors (taken verbatim).
pub trait IntoText<K: CodeUnit> {
    /// Converts `self` into a sequence of code units
    fn into_text(self) -> Vec<K>;
}

impl<K: CodeUnit> IntoText<K> for Vec<K> {
    fn into_text(self) -> Vec<K> {
        self
    }
}

impl<K: CodeUnit> IntoText<K> for &[K] {
    fn into_text(self) -> Vec<K> {
        self.to_vec()
    }
}

impl<K: CodeUnit> IntoText<K> for &str {
    fn into_text(self) -> Vec<K> {
        K::text_from_str(self)
    }
}

impl<K: CodeUnit> IntoText<K> for String {
    fn into_text(self) -> Vec<K> {
        K::text_from_str(&self)
    }
}

/// Creates an `Integer` value
#[duplicate_item(int_type; [i8]; [i16]; [i32]; [i64]; [u8]; [u16]; [u32])]
impl<K: CodeUnit> From<int_type> for JsonValue<K> {
    fn from(value: int_type) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

/// Creates a `Real` value
#[duplicate_item(float_type; [f32]; [f64])]
impl<K: CodeUnit> From<float_type> for JsonValue<K> {
    fn from(value: float_type) -> Self {
        JsonValue::Real(f64::from(value))
    }
}

/// Creates a `Boolean` value
impl<K: CodeUnit> From<bool> for JsonValue<K> {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

/// Creates a `Text` value, encoding the string at width K
impl<K: CodeUnit> From<&str> for JsonValue<K> {
    fn from(value: &str) -> Self {
        JsonValue::Text(K::text_from_str(value))
    }
}

/// Creates a `Text` value, encoding the string at width K
impl<K: CodeUnit> From<String> for JsonValue<K> {
    fn from(value: String) -> Self {
        JsonValue::Text(K::text_from_str(&value))
    }
}

/// Creates a `Text` value from code units taken verbatim
impl<K: CodeUnit> From<Vec<K>> for JsonValue<K> {
    fn from(value: Vec<K>) -> Self {
        JsonValue::Text(value)
    }
}

/// Creates a `Null` value
impl<K: CodeUnit> From<()> for JsonValue<K> {
    fn from((): ()) -> Self {
        JsonValue::Null
    }
}

/// Collects values into an `Array`
impl<K: CodeUnit> FromIterator<JsonValue<K>> for JsonValue<K> {
    fn from_iter<I: IntoIterator<Item = JsonValue<K>>>(iter: I) -> Self {
        JsonValue::Array(Rc::new(iter.into_iter().collect()))
    }
}

/// Collects key/value pairs into an `Object`; for duplicate keys the last
/// pair wins
impl<K: CodeUnit> FromIterator<(Vec<K>, JsonValue<K>)> for JsonValue<K> {
    fn from_iter<I: IntoIterator<Item = (Vec<K>, JsonValue<K>)>>(iter: I) -> Self {
        JsonValue::Object(Rc::new(iter.into_iter().collect()))
    }
}

/// Appends items with [`push`](JsonValue::push) semantics, replacing a
/// non-array receiver by an empty array first
impl<K: CodeUnit> Extend<JsonValue<K>> for JsonValue<K> {
    fn extend<I: IntoIterator<Item = JsonValue<K>>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Assigns members with [`set`](JsonValue::set) semantics, replacing a
/// non-object receiver by an empty object first
impl<K: CodeUnit> Extend<(Vec<K>, JsonValue<K>)> for JsonValue<K> {
    fn extend<I: IntoIterator<Item = (Vec<K>, JsonValue<K>)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Object member lookup; equivalent to [`JsonValue::at`] with the key encoded
/// at width K
impl<K: CodeUnit> std::ops::Index<&str> for JsonValue<K> {
    type Output = JsonValue<K>;

    fn index(&self, key: &str) -> &Self::Output {
        self.at(&K::text_from_str(key))
    }
}

/// Object member slot; equivalent to [`JsonValue::member_mut`]
impl<K: CodeUnit> std::ops::IndexMut<&str> for JsonValue<K> {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.member_mut(key)
    }
}

/// Object member lookup; equivalent to [`JsonValue::at`]
impl<K: CodeUnit> std::ops::Index<&[K]> for JsonValue<K> {
    type Output = JsonValue<K>;

    fn index(&self, key: &[K]) -> &Self::Output {
        self.at(key)
    }
}

/// Object member slot; equivalent to [`JsonValue::member_mut`]
impl<K: CodeUnit> std::ops::IndexMut<&[K]> for JsonValue<K> {
    fn index_mut(&mut self, key: &[K]) -> &mut Self::Output {
        self.member_mut(key)
    }
}

/// Array item lookup; equivalent to [`JsonValue::at_index`]
impl<K: CodeUnit> std::ops::Index<usize> for JsonValue<K> {
    type Output = JsonValue<K>;

    fn index(&self, index: usize) -> &Self::Output {
        self.at_index(index)
    }
}

/// Array item slot; equivalent to [`JsonValue::element_mut`]
impl<K: CodeUnit> std::ops::IndexMut<usize> for JsonValue<K> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.element_mut(index)
    }
}
