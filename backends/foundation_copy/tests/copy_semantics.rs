//! Integration tests for shallow copy, deep copy and move.
//!
//! WHY: The three operations differ only in what they share with the
//! source, so every test here mutates one side and checks the other.
//!
//! WHAT: The sharing, independence and move guarantees over a set of
//! fixture values, plus the reference scenarios.

use foundation_copy::{
    deep_copy, move_out, shallow_copy, Copier, CopyConfig, CyclePolicy, Function, Value,
};

fn parse(content: &str) -> Value {
    Value::from_json_str(content).expect("fixture is valid JSON")
}

/// Containers with at least one nested container entry.
fn fixtures() -> Vec<Value> {
    vec![
        parse(r#"{"a": 1, "b": {"c": 2}}"#),
        parse(r#"{"x": [1, 2, 3]}"#),
        parse(r#"[{"id": 1}, {"id": 2}]"#),
        parse(r#"{"name": "test", "nested": {"value": 42}, "array": [1, 2, 3]}"#),
        parse(r#"{"deep": {"deeper": {"deepest": [[], {}, [null, true, "s"]]}}}"#),
        parse(r#"[[1, [2, [3, [4]]]], {"k": {"k": {"k": 0.25}}}]"#),
    ]
}

/// Mutates the first nested container found in `value`, returning false if
/// there is none.
fn mutate_first_nested(value: &Value) -> bool {
    let nested = match value {
        Value::Object(map) => map.entries().into_iter().map(|(_, v)| v).find(Value::is_container),
        Value::Array(seq) => seq.to_vec().into_iter().find(Value::is_container),
        _ => None,
    };
    match nested {
        Some(Value::Object(map)) => {
            map.insert("__touched", true);
            true
        }
        Some(Value::Array(seq)) => {
            seq.push("__touched");
            true
        }
        _ => false,
    }
}

/// Mutates every container reachable from `value`.
fn mutate_everywhere(value: &Value) {
    match value {
        Value::Object(map) => {
            for (_, item) in map.entries() {
                mutate_everywhere(&item);
            }
            map.insert("__touched", true);
        }
        Value::Array(seq) => {
            for item in seq.to_vec() {
                mutate_everywhere(&item);
            }
            seq.push("__touched");
        }
        _ => {}
    }
}

// ========================================================================
// Reference scenarios
// ========================================================================

#[test]
fn test_shallow_copy_nested_write_is_visible_in_original() {
    let original = parse(r#"{"a": 1, "b": {"c": 2}}"#);

    let shallow = shallow_copy(&original);
    shallow.get("b").unwrap().set("c", 99).unwrap();

    assert_eq!(original.get("b").unwrap().get("c"), Some(Value::from(99)));
}

#[test]
fn test_deep_copy_nested_write_is_invisible_in_original() {
    let original = parse(r#"{"a": 1, "b": {"c": 2}}"#);

    let deep = deep_copy(&original).unwrap();
    deep.get("b").unwrap().set("c", 99).unwrap();

    assert_eq!(original.get("b").unwrap().get("c"), Some(Value::from(2)));
}

#[test]
fn test_move_transfers_contents_and_empties_source() {
    let original = parse(r#"{"x": [1, 2, 3]}"#);

    let moved = move_out(&original).unwrap();

    assert_eq!(moved.get("x"), Some(parse("[1, 2, 3]")));
    assert_eq!(original.keys().len(), 0);
}

#[test]
fn test_deep_copy_of_array_of_records() {
    let original = parse(r#"[{"id": 1}, {"id": 2}]"#);

    let deep = deep_copy(&original).unwrap();
    deep.at(0).unwrap().set("id", 999).unwrap();
    deep.push(parse(r#"{"id": 3}"#)).unwrap();

    assert_eq!(original.at(0).unwrap().get("id"), Some(Value::from(1)));
    assert_eq!(original.len(), Some(2));
    assert_eq!(deep.at(0).unwrap().get("id"), Some(Value::from(999)));
    assert_eq!(deep.len(), Some(3));
}

// ========================================================================
// Properties over fixtures
// ========================================================================

#[test]
fn test_deep_copy_independence_both_directions() {
    for fixture in fixtures() {
        let pristine = deep_copy(&fixture).unwrap();

        let copied = deep_copy(&fixture).unwrap();
        mutate_everywhere(&copied);
        assert_eq!(fixture, pristine, "copy mutation leaked into source");

        let copied = deep_copy(&fixture).unwrap();
        let snapshot = deep_copy(&copied).unwrap();
        mutate_everywhere(&fixture);
        assert_eq!(copied, snapshot, "source mutation leaked into copy");
    }
}

#[test]
fn test_shallow_copy_shares_nested_but_not_top_level() {
    for fixture in fixtures() {
        let shallow = shallow_copy(&fixture);
        let before = fixture.len();

        match &shallow {
            Value::Object(map) => {
                map.insert("__top_level", 1);
            }
            Value::Array(seq) => seq.push(1),
            _ => unreachable!("fixtures are containers"),
        }
        assert_eq!(fixture.len(), before, "top-level write leaked");

        let pristine = deep_copy(&fixture).unwrap();
        assert!(mutate_first_nested(&shallow));
        assert_ne!(fixture, pristine, "nested write was not shared");
    }
}

#[test]
fn test_move_correctness_and_independence() {
    for fixture in fixtures() {
        let expected = deep_copy(&fixture).unwrap();
        let kind = fixture.kind();

        let moved = move_out(&fixture).unwrap();

        assert_eq!(moved, expected);
        assert_eq!(fixture.kind(), kind);
        assert_eq!(fixture.len(), Some(0));

        mutate_everywhere(&moved);
        assert_eq!(fixture.len(), Some(0));

        let snapshot = deep_copy(&moved).unwrap();
        mutate_everywhere(&fixture);
        assert_eq!(moved, snapshot);
    }
}

#[test]
fn test_copies_are_idempotent() {
    for fixture in fixtures() {
        let once = deep_copy(&fixture).unwrap();
        let twice = deep_copy(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(fixture, twice);

        let shallow_once = shallow_copy(&fixture);
        let shallow_twice = shallow_copy(&shallow_once);
        assert_eq!(shallow_once, shallow_twice);
        assert!(!shallow_twice.ptr_eq(&shallow_once));
    }
}

#[test]
fn test_deep_copy_reproduces_key_order() {
    let original = parse(r#"{"z": 1, "y": {"b": 1, "a": 2}, "x": 3}"#);

    let deep = deep_copy(&original).unwrap();

    assert_eq!(deep.keys(), vec!["z", "y", "x"]);
    assert_eq!(deep.get("y").unwrap().keys(), vec!["b", "a"]);
}

// ========================================================================
// Policies
// ========================================================================

#[test]
fn test_cycle_policy_from_config_file() {
    // -- Setup & Fixtures
    let path = std::env::temp_dir().join(format!("foundation_copy_{}.toml", std::process::id()));
    std::fs::write(&path, "cycles = \"reject\"\nmax_depth = 8\n").unwrap();
    let looped = Value::array();
    looped.push(looped.clone()).unwrap();

    // -- Exec
    let config = CopyConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let copier = Copier::new(config);

    // -- Check
    assert_eq!(copier.config().cycles, CyclePolicy::Reject);
    assert_eq!(
        copier.deep_copy(&looped).unwrap_err().to_string(),
        "cyclic reference at $[0]"
    );
    assert!(deep_copy(&looped).is_ok());
}

#[test]
fn test_shallow_copy_keeps_functions_deep_copy_refuses_them() {
    let original = Value::object();
    let callback = Function::new("double", |args| {
        Value::from(args.first().and_then(Value::as_f64).unwrap_or_default() * 2.0)
    });
    original.set("callback", callback).unwrap();

    let shallow = shallow_copy(&original);
    let shared = shallow.get("callback").unwrap();

    assert!(shared.ptr_eq(&original.get("callback").unwrap()));
    assert_eq!(
        shared.as_function().unwrap().call(&[Value::from(4)]),
        Value::from(8)
    );
    assert!(deep_copy(&original).is_err());
}
