#![cfg(feature = "serde")]

use std::error::Error;

use chunkson::value::JsonValue;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn serializes_like_the_writer() -> TestResult {
    let mut value = JsonValue::<u8>::new_object();
    value["a"] = 1.into();
    value["b"] = JsonValue::array_from([
        JsonValue::from(true),
        JsonValue::Null,
        JsonValue::from("x"),
    ]);
    value["skipped"] = JsonValue::Undefined;

    let json = serde_json::to_string(&value)?;
    assert_eq!(r#"{"a":1,"b":[true,null,"x"]}"#, json);
    assert_eq!(json.as_bytes(), &value.store()[..]);
    Ok(())
}

#[test]
fn deserializes_to_value() -> TestResult {
    let value: JsonValue<u8> =
        serde_json::from_str(r#"{"a": 1, "b": [true, null, 2.5], "c": "x"}"#)?;
    assert_eq!(JsonValue::Integer(1), value["a"]);
    assert_eq!(JsonValue::Boolean(true), value["b"][0]);
    assert_eq!(JsonValue::Null, value["b"][1]);
    assert_eq!(JsonValue::Real(2.5), value["b"][2]);
    assert_eq!(JsonValue::from("x"), value["c"]);
    Ok(())
}

#[test]
fn round_trip_through_serde_json() -> TestResult {
    let json = r#"{"a":1,"b":[true,null,2.5],"c":"x"}"#;
    let value: JsonValue<u8> = serde_json::from_str(json)?;
    assert_eq!(json, serde_json::to_string(&value)?);
    Ok(())
}

#[test]
fn u64_beyond_i64_falls_back_to_real() -> TestResult {
    let value: JsonValue<u8> = serde_json::from_str("18446744073709551615")?;
    assert_eq!(JsonValue::Real(18446744073709551615.0), value);
    Ok(())
}

#[test]
fn wide_values_serialize_as_strings() -> TestResult {
    let mut value = JsonValue::<u16>::new_object();
    value["a"] = "a\tb".into();
    assert_eq!(r#"{"a":"a\tb"}"#, serde_json::to_string(&value)?);
    Ok(())
}
