// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use std::env;

use anyhow::{bail, Result};
use ragged::functions;
use ragged::*;
use serde::Deserialize;
use test_generator::test_resources;

// Process test value specified in yaml to interpret special encodings.
pub fn process_value(v: &Value) -> Result<Value> {
    match v {
        // Handle Undefined encoded as a string "#undefined"
        Value::String(s) if s.as_ref() == "#undefined" => Ok(Value::Undefined),

        // Recursively process arrays
        Value::Array(items) => {
            let mut array_value = Value::new_array();
            let array = array_value.as_array_mut()?;
            for item in items.iter() {
                array.push(process_value(item)?);
            }
            Ok(array_value)
        }

        // Recursively process objects
        Value::Object(fields) => {
            let mut object_value = Value::new_object();
            let object = object_value.as_object_mut()?;
            for (key, value) in fields.iter() {
                object.insert(key.clone(), process_value(value)?);
            }
            Ok(object_value)
        }

        // Simple variants
        _ => Ok(v.clone()),
    }
}

// Like `==`, except that NaN matches NaN so that expected outputs can name it.
fn match_values(computed: &Value, expected: &Value) -> Result<()> {
    match (computed, expected) {
        (Value::Array(a1), Value::Array(a2)) => {
            if a1.len() != a2.len() {
                bail!(
                    "array length mismatch: {} != {}\nleft  = {computed:?}\nright = {expected:?}",
                    a1.len(),
                    a2.len()
                );
            }
            for (v1, v2) in a1.iter().zip(a2.iter()) {
                match_values(v1, v2)?;
            }
            Ok(())
        }
        (Value::Number(n1), Value::Number(n2)) if n1.is_nan() && n2.is_nan() => Ok(()),
        _ if computed == expected => Ok(()),
        _ => bail!("value mismatch:\nleft  = {computed:?}\nright = {expected:?}"),
    }
}

#[derive(Deserialize, Debug)]
struct TestCase {
    note: String,
    function: String,
    args: Vec<Value>,
    want_result: Option<Value>,
    want_error: Option<String>,
    skip: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        if case.skip == Some(true) {
            println!("skipped");
            continue;
        }

        let mut args = vec![];
        for arg in &case.args {
            args.push(process_value(arg)?);
        }

        match (functions::call(&case.function, &args), &case.want_result, &case.want_error) {
            (Ok(result), Some(want_result), None) => {
                match_values(&result, &process_value(want_result)?)?;

                // Calls do not depend on earlier calls.
                match_values(&functions::call(&case.function, &args)?, &result)?;
            }
            (Err(actual), None, Some(expected)) => {
                let actual = actual.to_string();
                if !actual.contains(expected.as_str()) {
                    bail!("Error message\n`{actual}\n`\ndoes not contain `{expected}`");
                }
            }
            (Ok(result), None, Some(_)) => {
                bail!("{}: call succeeded with {result:?}, expected an error", case.note)
            }
            (Err(e), Some(_), None) => return Err(e),
            _ => panic!("either want_result or want_error must be specified in test case."),
        }

        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test_resources("tests/nested/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}

#[test]
#[ignore = "intended for running a single yaml file"]
fn one_yaml() -> Result<()> {
    env_logger::init();

    let Some(file) = env::args().find(|a| a.ends_with(".yaml")) else {
        bail!("missing <yaml-file>");
    };
    yaml_test(file.as_str())
}

fn json(s: &str) -> Value {
    match Value::from_json_str(s) {
        Ok(v) => v,
        Err(e) => panic!("invalid json {s}: {e}"),
    }
}

#[test]
fn worked_examples() -> Result<()> {
    assert_eq!(count_dimensions(&json("[]")), 1);
    assert_eq!(count_dimensions(&json("[[]]")), 2);
    assert_eq!(count_dimensions(&json("[[],[[]],[]]")), 3);

    assert!(!has_jagged_edges(&json("[[1,2,3],[1,2,3]]")));
    assert!(has_jagged_edges(&json("[[1,2,3],[1,2]]")));
    assert!(has_jagged_edges(&json("[[],[1]]")));

    assert_eq!(max_lengths(&json("[[1,2],[1],[1,2,3]]")), vec![3, 3]);
    assert_eq!(max_lengths(&json("[]")), vec![0]);

    let values = unique_values(&json("[1,2,1,3,1]"));
    assert_eq!(values, vec![Value::from(1u64), Value::from(2u64), Value::from(3u64)]);

    let nans = unique_values(&Value::from(vec![Value::nan(), Value::nan()]));
    assert_eq!(nans.len(), 2);
    Ok(())
}

#[test]
fn scalars_are_leaves() {
    let scalars = [
        Value::Null,
        Value::Undefined,
        Value::nan(),
        Value::from(1u64),
        Value::from(""),
        Value::from("string"),
        Value::Bool(false),
        json(r#"{"key": [[1], [2, 3]]}"#),
    ];

    for x in &scalars {
        assert_eq!(count_dimensions(x), 0, "{x:?}");
        assert!(!has_jagged_edges(x), "{x:?}");
        assert!(max_lengths(x).is_empty(), "{x:?}");
        for v in &scalars {
            assert_eq!(
                contains_value(x, v, Comparison::Strict),
                strict_equals(x, v),
                "{x:?} {v:?}"
            );
        }
        assert_eq!(unique_values(x).len(), 1);
    }
}

#[test]
fn objects_are_not_searched() {
    let haystack = json(r#"[{"a": 1}, [{"b": [1]}]]"#);
    assert!(!contains_value(&haystack, &Value::from(1u64), Comparison::Strict));
    assert_eq!(count_value(&haystack, &Value::from(1u64), Comparison::Loose), 0);
    assert_eq!(unique_values(&haystack).len(), 2);
    assert_eq!(count_dimensions(&haystack), 2);
}

#[test]
fn shared_objects_deduplicate() {
    let record = json(r#"{"id": 7}"#);
    let other = json(r#"{"id": 7}"#);
    let value = Value::from(vec![
        record.clone(),
        Value::from(vec![record.clone(), other.clone()]),
        record.clone(),
    ]);

    let unique = unique_values(&value);
    assert_eq!(unique.len(), 2);
    assert!(strict_equals(&unique[0], &record));
    assert!(strict_equals(&unique[1], &other));

    assert_eq!(count_value(&value, &record, Comparison::Strict), 3);
    assert_eq!(count_value(&value, &other, Comparison::Loose), 1);
}

#[test]
fn shared_arrays_are_still_traversed() {
    let row = json("[1, 2]");
    let value = Value::from(vec![row.clone(), row.clone(), row]);
    assert!(!has_jagged_edges(&value));
    assert_eq!(max_lengths(&value), vec![3, 2]);
    assert_eq!(count_value(&value, &Value::from(2u64), Comparison::Strict), 3);
}

#[test]
fn contains_agrees_with_count() {
    let haystacks = [
        json("[[1, 1], 2, 3, [1, 1, [4, 3, [1, false, true, true]]], 4, false, true]"),
        json(r#"[[null], ["", "0", [0]], [[], [[]]], "x"]"#),
        Value::from(vec![Value::Undefined, Value::nan(), Value::from(vec![Value::Null])]),
        Value::Null,
        Value::from("1"),
        Value::new_array(),
    ];
    let needles = [
        Value::Null,
        Value::Undefined,
        Value::nan(),
        Value::Bool(true),
        Value::Bool(false),
        Value::from(0u64),
        Value::from(1u64),
        Value::from(""),
        Value::from("1"),
        Value::new_array(),
    ];

    for h in &haystacks {
        for n in &needles {
            for mode in [Comparison::Strict, Comparison::Loose] {
                assert_eq!(
                    contains_value(h, n, mode),
                    count_value(h, n, mode) > 0,
                    "{h:?} {n:?} {mode:?}"
                );
            }
        }
    }
}

#[test]
fn repeated_calls_agree() {
    let value = json("[[1, [2, [3]]], [4], [], 5, [[6, 7, 8]]]");
    for _ in 0..3 {
        assert_eq!(count_dimensions(&value), 4);
        assert!(has_jagged_edges(&value));
        assert_eq!(max_lengths(&value), vec![5, 2, 3, 1]);
        assert_eq!(unique_values(&value).len(), 8);
    }
    assert_eq!(value, json("[[1, [2, [3]]], [4], [], 5, [[6, 7, 8]]]"));
}

// Builds [[[...[leaf]...]]] without recursion.
fn nest(depth: usize, leaf: Value) -> Value {
    let mut value = leaf;
    for _ in 0..depth {
        value = Value::from(vec![value]);
    }
    value
}

// Dropping a deep value recursively would overflow the test thread's stack.
fn dismantle(mut value: Value) {
    while let Ok(items) = value.as_array_mut() {
        match items.pop() {
            Some(inner) => value = inner,
            None => break,
        }
    }
}

#[test]
fn deep_nesting_uses_heap_stacks() {
    const DEPTH: usize = 200_000;
    let value = nest(DEPTH, Value::from("bottom"));

    assert_eq!(count_dimensions(&value), DEPTH);
    assert!(!has_jagged_edges(&value));

    let lengths = max_lengths(&value);
    assert_eq!(lengths.len(), DEPTH);
    assert!(lengths.iter().all(|&n| n == 1));

    assert!(contains_value(&value, &Value::from("bottom"), Comparison::Strict));
    assert_eq!(count_value(&value, &Value::from("bottom"), Comparison::Loose), 1);
    assert_eq!(unique_values(&value), vec![Value::from("bottom")]);

    dismantle(value);
}

#[test]
fn jagged_mixing_is_detected_in_either_order() {
    // Depth 2 first sees scalars, then an array.
    assert!(has_jagged_edges(&json("[[1, 2], [3, [4, 5]]]")));
    // Depth 2 first sees an array, then a scalar.
    assert!(has_jagged_edges(&json("[[[4, 5], 3], [1, 2]]")));
    // Same shape everywhere, scalars only at the leaves.
    assert!(!has_jagged_edges(&json("[[[1], [2]], [[3], [4]]]")));
    // Depth 3 disagrees only in the last branch.
    assert!(has_jagged_edges(&json("[[[1], [2]], [[3], [4, 5]]]")));
}
