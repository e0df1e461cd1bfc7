use std::error::Error;

use chunkson::value::{JsonValue, ValueKind};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_lookups_return_the_undefined_sentinel() {
    let mut value = JsonValue::<u8>::new_object();
    value["a"] = 1.into();
    value["items"] = JsonValue::array_from([1]);

    // Reference equality with the shared sentinel
    assert!(std::ptr::eq(JsonValue::undefined(), value.at(b"missing")));
    assert!(std::ptr::eq(JsonValue::undefined(), &value["missing"]));
    assert!(std::ptr::eq(
        JsonValue::undefined(),
        &value["items"][17]
    ));

    // Lookups on the wrong kind miss as well, without mutating
    assert!(value["a"]["nested"].is_undefined());
    assert!(value["a"][0].is_undefined());
    assert_eq!(JsonValue::Integer(1), value["a"]);
}

#[test]
fn deep_clone_is_equal_but_independent() {
    let mut original = JsonValue::<u8>::new_object();
    original["list"] = JsonValue::array_from([1, 2]);
    original["nested"]["flag"] = true.into();

    let mut copy = original.deep_clone();
    assert_eq!(original, copy);

    copy["list"].push(3);
    copy["nested"]["flag"] = false.into();
    assert_eq!(2, original["list"].len());
    assert_eq!(JsonValue::Boolean(true), original["nested"]["flag"]);
}

#[test]
fn shallow_copies_share_until_written() {
    let mut original = JsonValue::<u8>::new_object();
    original["a"] = 1.into();

    // Plain clone shares the container; writing through one handle leaves
    // the other untouched
    let mut copy = original.clone();
    copy["a"] = 2.into();
    assert_eq!(JsonValue::Integer(1), original["a"]);
    assert_eq!(JsonValue::Integer(2), copy["a"]);
}

#[test]
fn merge_subset_is_idempotent() {
    let mut base = JsonValue::<u8>::new_object();
    base["a"] = 1.into();
    base["b"]["c"] = "x".into();
    base["list"] = JsonValue::array_from([1]);

    let mut subset = JsonValue::<u8>::new_object();
    subset["a"] = 1.into();

    let mut merged = base.deep_clone();
    merged.merge(&subset, true, false);
    let once = merged.deep_clone();
    merged.merge(&subset, true, false);

    assert_eq!(once, merged);
    assert_eq!(base, merged);
}

#[test]
fn merge_flags() {
    // replace=false keeps conflicting scalars
    let mut kept = JsonValue::<u8>::object_from([("a", 1)]);
    kept.merge(&JsonValue::object_from([("a", 2)]), false, false);
    assert_eq!(JsonValue::Integer(1), kept["a"]);

    // append_arrays concatenates
    let mut appended = JsonValue::<u8>::array_from([1]);
    appended.merge(&JsonValue::array_from([2, 3]), true, true);
    assert_eq!(JsonValue::array_from([1, 2, 3]), appended);

    // without append_arrays, replace swaps the whole array
    let mut replaced = JsonValue::<u8>::array_from([1]);
    replaced.merge(&JsonValue::array_from([2, 3]), true, false);
    assert_eq!(JsonValue::array_from([2, 3]), replaced);
}

#[test]
fn integer_to_text_round_trip() {
    for n in [0i64, 7, -7, 1_000_000, i64::MIN, i64::MAX] {
        let text = JsonValue::<u8>::from(n).to_text();
        assert_eq!(Some(n), JsonValue::<u8>::Text(text).to_integer());
    }
}

#[test]
fn coercion_overview() {
    assert!(JsonValue::<u8>::from("x").to_boolean());
    assert!(!JsonValue::<u8>::Null.to_boolean());

    assert_eq!(Some(12), JsonValue::<u8>::from("12.5").to_integer());
    assert_eq!(None, JsonValue::<u8>::from("one").to_integer());

    assert_eq!(0.5, JsonValue::<u8>::from("0.5").to_real());
    assert!(JsonValue::<u8>::new_object().to_real().is_nan());

    let list = JsonValue::<u8>::array_from([
        JsonValue::from(1),
        JsonValue::Null,
        JsonValue::from("x"),
    ]);
    assert_eq!(&b"1,null,x"[..], &list.to_text()[..]);
}

#[test]
fn builders() -> TestResult {
    let array: JsonValue<u8> = (1..4).map(JsonValue::from).collect();
    assert_eq!(JsonValue::array_from([1, 2, 3]), array);

    let object: JsonValue<u8> = vec![
        (b"a".to_vec(), JsonValue::from(1)),
        (b"b".to_vec(), JsonValue::from(2)),
    ]
    .into_iter()
    .collect();
    assert_eq!(ValueKind::Object, object.kind());
    assert_eq!(JsonValue::Integer(1), object["a"]);
    assert_eq!(JsonValue::Integer(2), object["b"]);

    let defaulted = JsonValue::<u8>::default_for(ValueKind::Text);
    assert_eq!(Some(&b""[..]), defaulted.text());

    let mut extended = JsonValue::<u8>::new_array();
    extended.extend([JsonValue::from(1), JsonValue::from(2)]);
    assert_eq!(JsonValue::array_from([1, 2]), extended);

    let mut extended = JsonValue::<u8>::new_object();
    extended.extend([(b"a".to_vec(), JsonValue::from(1))]);
    assert_eq!(JsonValue::Integer(1), extended["a"]);
    Ok(())
}

#[test]
fn accessor_families() {
    let value = JsonValue::<u8>::from(2.5);

    // strict, optional and fallible views of the same payload
    assert_eq!(2.5, value.as_real());
    assert_eq!(Some(2.5), value.real());
    assert_eq!(Ok(2.5), value.real_or_else(|| "unexpected"));
    assert_eq!(Err("unexpected"), value.integer_or_else(|| "unexpected"));

    // dual-number accessors bridge the two number kinds
    assert_eq!(Some(2.5), value.number_real());
    assert_eq!(None, value.number_int());
    assert_eq!(Some(2), value.to_integer());

    let int = JsonValue::<u8>::from(2);
    assert_eq!(Some(2.0), int.number_real());
    assert_eq!(Some(2), int.number_int());
}
