//! Integration tests for grammar conversion through the library API

use rstest::rstest;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tmgrammar::{convert, ErrorKind};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Convert `source` through real files and return the output text
fn convert_source(source: &str) -> String {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("grammar.yaml");
    let output = dir.path().join("grammar.json");
    fs::write(&input, source).expect("write input");
    convert(&input, &output).expect("conversion to succeed");
    fs::read_to_string(&output).expect("read output")
}

#[test]
fn test_converts_fixture_grammar() {
    let output = convert_source(&fs::read_to_string(fixture_path("sht.tmLanguage.yaml")).unwrap());

    insta::assert_snapshot!(output.trim_end(), @r##"
    {
      "name": "sht",
      "scopeName": "source.sht",
      "fileTypes": [
        "sht"
      ],
      "patterns": [
        {
          "include": "#comments"
        },
        {
          "include": "#keywords"
        },
        {
          "include": "#strings"
        }
      ],
      "repository": {
        "comments": {
          "name": "comment.line.double-slash.sht",
          "match": "//.*$"
        },
        "keywords": {
          "patterns": [
            {
              "name": "keyword.control.sht",
              "match": "\\b(if|else|while|for|return|break|continue)\\b"
            },
            {
              "name": "constant.language.sht",
              "match": "\\b(true|false|nil)\\b"
            }
          ]
        },
        "strings": {
          "name": "string.quoted.double.sht",
          "begin": "\"",
          "end": "\"",
          "patterns": [
            {
              "name": "constant.character.escape.sht",
              "match": "\\\\."
            }
          ]
        }
      }
    }
    "##);
}

#[test]
fn test_scenario_flow_mapping() {
    let output = convert_source("{name: \"test\", values: [1, 2, 3]}\n");
    assert_eq!(
        output,
        "{\n  \"name\": \"test\",\n  \"values\": [\n    1,\n    2,\n    3\n  ]\n}\n"
    );
}

#[rstest]
#[case::empty_mapping("{}", json!({}))]
#[case::empty_sequence("[]", json!([]))]
#[case::null_root("~", Value::Null)]
#[case::scalar_root("hello", json!("hello"))]
#[case::nested("a:\n  b:\n    - [1, [2, {c: d}]]\n", json!({"a": {"b": [[1, [2, {"c": "d"}]]]}}))]
#[case::scalar_types("s: text\ni: -7\nf: 1.5\nb: false\nn: null\n", json!({"s": "text", "i": -7, "f": 1.5, "b": false, "n": null}))]
#[case::non_string_keys("1: a\nfalse: b\n", json!({"1": "a", "false": "b"}))]
#[case::anchors("base: &b {x: 1}\ncopy: *b\n", json!({"base": {"x": 1}, "copy": {"x": 1}}))]
#[case::merge_keys("base: &b {x: 1, y: 2}\nrule:\n  <<: *b\n  y: 3\n", json!({"base": {"x": 1, "y": 2}, "rule": {"x": 1, "y": 3}}))]
#[case::block_scalars("text: |\n  line one\n  line two\n", json!({"text": "line one\nline two\n"}))]
#[case::empty_input("", Value::Null)]
#[case::comment_only("# nothing here\n", Value::Null)]
#[case::repeated_keys("name: a\nscopeName: source.a\nname: b\n", json!({"name": "b", "scopeName": "source.a"}))]
#[case::yaml_1_2_scalars("a: yes\nb: on\nc: 0o17\nd: 017\n", json!({"a": "yes", "b": "on", "c": 15, "d": "017"}))]
fn test_value_tree_survives(#[case] source: &str, #[case] expected: Value) {
    let output = convert_source(source);
    let back: Value = serde_json::from_str(&output).expect("output to be JSON");
    assert_eq!(back, expected);
}

#[test]
fn test_empty_input_writes_null() {
    assert_eq!(convert_source(""), "null\n");
}

#[test]
fn test_key_order_is_preserved() {
    let output = convert_source("zulu: 1\nalpha:\n  yankee: 2\n  bravo: 3\nmike: 4\n");
    let positions: Vec<usize> = ["zulu", "alpha", "yankee", "bravo", "mike"]
        .iter()
        .map(|key| output.find(&format!("\"{}\"", key)).expect("key present"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[rstest]
#[case::unterminated_sequence("patterns: [a, b\n")]
#[case::unterminated_mapping("{name: sht\n")]
#[case::bad_indentation("a:\n  b: 1\n c: 2\n")]
#[case::multiple_documents("a: 1\n---\nb: 2\n")]
fn test_malformed_source_is_parse_error(#[case] source: &str) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("grammar.yaml");
    let output = dir.path().join("grammar.json");
    fs::write(&input, source).unwrap();

    let err = convert(&input, &output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("failed to parse"), "{}", err);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("grammar.json");

    let err = convert(dir.path().join("absent.yaml"), &output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("absent.yaml"));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_write_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("grammar.yaml");
    fs::write(&input, "a: 1\n").unwrap();

    let err = convert(&input, dir.path().join("missing-dir").join("grammar.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Write);
}

#[test]
fn test_non_finite_float_is_unrepresentable() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("grammar.yaml");
    let output = dir.path().join("grammar.json");
    fs::write(&input, "limit: .inf\n").unwrap();

    let err = convert(&input, &output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unrepresentable);
    assert!(!output.exists());
}
