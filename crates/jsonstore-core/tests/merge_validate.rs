//! Integration tests for the jsonstore-core public API.
//!
//! These tests run the pure half of a store update end-to-end: deep merge of
//! a patch onto the current tree, schema validation of the result, and
//! formatting to file text and back.

use jsonstore_core::{
    deep_merge, from_json_text, to_json_text, to_tree, Indent, Schema, SerializeOptions,
    TypedSchema,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Nested {
    a: i64,
    b: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: Theme,
    nested: Nested,
}

fn current() -> Settings {
    Settings {
        theme: Theme::Light,
        nested: Nested { a: 1, b: 2 },
    }
}

#[test]
fn test_patch_merges_and_validates() {
    // Arrange
    let schema = TypedSchema::<Settings>::new();
    let base = to_tree(&current()).unwrap();

    // Act
    let merged = deep_merge(&base, &json!({ "nested": { "b": 3 } }));
    let settings = schema.validate(&merged).expect("merged settings must validate");

    // Assert
    assert_eq!(
        settings,
        Settings {
            theme: Theme::Light,
            nested: Nested { a: 1, b: 3 },
        }
    );
}

#[test]
fn test_patch_outside_enum_fails_validation() {
    let schema = TypedSchema::<Settings>::new();
    let base = to_tree(&current()).unwrap();

    let merged = deep_merge(&base, &json!({ "theme": "red" }));

    assert!(schema.validate(&merged).is_err());
}

#[test]
fn test_patch_replacing_object_with_scalar_fails_validation() {
    let schema = TypedSchema::<Settings>::new();
    let base = to_tree(&current()).unwrap();

    let merged = deep_merge(&base, &json!({ "nested": 5 }));

    assert!(schema.validate(&merged).is_err());
}

#[test]
fn test_formatted_text_parses_back_to_the_same_tree() {
    let tree = to_tree(&current()).unwrap();

    for indent in [Indent::default(), Indent::None, Indent::Text("\t".to_string())] {
        let options = SerializeOptions::default().with_indent(indent);
        let text = to_json_text(&tree, &options).unwrap();
        assert_eq!(from_json_text(&text).unwrap(), tree);
    }
}

#[test]
fn test_replacer_output_can_fail_validation() {
    // A replacer that drops a required key yields text the schema rejects.
    let schema = TypedSchema::<Settings>::new();
    let tree = to_tree(&current()).unwrap();
    let options = SerializeOptions::default().with_replacer(["theme"]);

    let text = to_json_text(&tree, &options).unwrap();
    let reparsed = from_json_text(&text).unwrap();

    assert_eq!(reparsed, json!({ "theme": "light" }));
    assert!(schema.validate(&reparsed).is_err());
}
