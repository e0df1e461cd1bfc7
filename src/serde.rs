//! Optional Serde integration for [`JsonValue`]
//!
//! `Undefined` values follow the writer's contract where the format allows
//! it: object members and array items with an `Undefined` value are skipped;
//! a top-level `Undefined` serializes like `Null` because Serde has no notion
//! of an elided root.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::code_unit::CodeUnit;
use crate::value::JsonValue;

impl<K: CodeUnit> Serialize for JsonValue<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Undefined | JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Integer(i) => serializer.serialize_i64(*i),
            JsonValue::Real(r) => serializer.serialize_f64(*r),
            JsonValue::Text(t) => serializer.serialize_str(&K::text_to_string(t)),
            JsonValue::Array(items) => {
                let items: Vec<&JsonValue<K>> =
                    items.iter().filter(|item| !item.is_undefined()).collect();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(map) => {
                let entries: Vec<_> = map
                    .iter()
                    .filter(|(_, value)| !value.is_undefined())
                    .collect();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(&K::text_to_string(key), value)?;
                }
                out.end()
            }
        }
    }
}

struct ValueVisitor<K: CodeUnit>(PhantomData<K>);

impl<'de, K: CodeUnit> Visitor<'de> for ValueVisitor<K> {
    type Value = JsonValue<K>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(JsonValue::Boolean(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(JsonValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        // Like the parser, numbers beyond i64 fall back to double
        Ok(match i64::try_from(value) {
            Ok(value) => JsonValue::Integer(value),
            Err(_) => JsonValue::Real(value as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(JsonValue::Real(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(JsonValue::Text(K::text_from_str(value)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items: Vec<JsonValue<K>> = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::array_from(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut value = JsonValue::new_object();
        while let Some((key, member)) = map.next_entry::<String, JsonValue<K>>()? {
            value.set(key, member);
        }
        Ok(value)
    }
}

impl<'de, K: CodeUnit> Deserialize<'de> for JsonValue<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor(PhantomData))
    }
}
