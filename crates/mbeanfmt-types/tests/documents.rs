//! JSON document tests for the value model
//!
//! Documents go through the same validating constructors as values built
//! in code, so malformed open data is rejected at load time.

use mbeanfmt_types::{CompositeData, CompositeType, JmxValue, OpenType, SimpleType};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn point_type() -> CompositeType {
    CompositeType::builder("Point")
        .item("x", OpenType::simple(SimpleType::Integer))
        .item("y", OpenType::simple(SimpleType::Integer))
        .build()
        .unwrap()
}

fn point_type_json() -> serde_json::Value {
    json!({
        "type_name": "Point",
        "items": {
            "x": { "open_type": { "kind": "simple", "simple": "Integer" } },
            "y": { "open_type": { "kind": "simple", "simple": "Integer" } }
        }
    })
}

#[rstest]
#[case(json!({"type": "Null"}), JmxValue::Null)]
#[case(json!({"type": "Void"}), JmxValue::Void)]
#[case(json!({"type": "Integer", "value": 10}), JmxValue::Integer(10))]
#[case(json!({"type": "Boolean", "value": false}), JmxValue::Boolean(false))]
#[case(json!({"type": "String", "value": ""}), JmxValue::string(""))]
#[case(
    json!({"type": "ObjectName", "value": "java.lang:type=Memory"}),
    JmxValue::object_name("java.lang:type=Memory")
)]
fn test_scalar_documents(#[case] document: serde_json::Value, #[case] expected: JmxValue) {
    let value: JmxValue = serde_json::from_value(document).unwrap();
    assert_eq!(value, expected);
}

#[test]
fn test_date_document() {
    let value: JmxValue =
        serde_json::from_value(json!({"type": "Date", "value": "2021-03-05T10:20:30+01:00"}))
            .unwrap();
    let date = value.as_date().unwrap();
    assert_eq!(date.to_rfc3339(), "2021-03-05T10:20:30+01:00");
}

#[test]
fn test_composite_document() {
    let value: JmxValue = serde_json::from_value(json!({
        "type": "Composite",
        "value": {
            "composite_type": point_type_json(),
            "values": {
                "y": { "type": "Integer", "value": 2 },
                "x": { "type": "Integer", "value": 1 }
            }
        }
    }))
    .unwrap();

    let expected = CompositeData::new(
        point_type(),
        [("x", JmxValue::Integer(1)), ("y", JmxValue::Integer(2))],
    )
    .unwrap();
    assert_eq!(value, JmxValue::Composite(expected));
}

#[test]
fn test_composite_document_is_validated() {
    let result: Result<JmxValue, _> = serde_json::from_value(json!({
        "type": "Composite",
        "value": {
            "composite_type": point_type_json(),
            "values": {
                "x": { "type": "Integer", "value": 1 }
            }
        }
    }));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Missing value for item 'y'"), "{message}");
}

#[test]
fn test_tabular_document() {
    let value: JmxValue = serde_json::from_value(json!({
        "type": "Tabular",
        "value": {
            "tabular_type": {
                "type_name": "Points",
                "row_type": point_type_json(),
                "index_names": ["x"]
            },
            "rows": [
                {
                    "composite_type": point_type_json(),
                    "values": {
                        "x": { "type": "Integer", "value": 1 },
                        "y": { "type": "Integer", "value": 2 }
                    }
                }
            ]
        }
    }))
    .unwrap();

    let tabular = value.as_tabular().unwrap();
    assert_eq!(tabular.len(), 1);
    assert_eq!(tabular.tabular_type().index_names(), ["x".to_string()]);
}

#[test]
fn test_array_documents() {
    let value: JmxValue = serde_json::from_value(json!({
        "type": "Array",
        "value": {
            "element_type": { "kind": "reference", "type": "java.lang.Integer" },
            "elements": [
                { "type": "Integer", "value": 10 },
                { "type": "Null" }
            ]
        }
    }))
    .unwrap();
    assert_eq!(value.type_key().unwrap().as_str(), "[Ljava.lang.Integer;");

    let primitive: Result<JmxValue, _> = serde_json::from_value(json!({
        "type": "Array",
        "value": {
            "element_type": { "kind": "primitive", "type": "Integer" },
            "elements": [{ "type": "Long", "value": 1 }]
        }
    }));
    assert!(primitive.is_err());
}

#[test]
fn test_serialized_composite_reloads() {
    let original = JmxValue::Composite(
        CompositeData::new(
            point_type(),
            [("x", JmxValue::Integer(1)), ("y", JmxValue::Null)],
        )
        .unwrap(),
    );
    let document = serde_json::to_value(&original).unwrap();
    let reloaded: JmxValue = serde_json::from_value(document).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_composite_with_primitive_array_item() {
    let value: JmxValue = serde_json::from_value(json!({
        "type": "Composite",
        "value": {
            "composite_type": {
                "type_name": "Usage",
                "items": {
                    "samples": { "open_type": {
                        "kind": "array",
                        "dimension": 1,
                        "element": { "kind": "simple", "simple": "Long" },
                        "primitive": true
                    } }
                }
            },
            "values": {
                "samples": {
                    "type": "Array",
                    "value": {
                        "element_type": { "kind": "primitive", "type": "Long" },
                        "elements": [{ "type": "Long", "value": 3 }]
                    }
                }
            }
        }
    }))
    .unwrap();

    let samples = value.as_composite().unwrap().get("samples").unwrap();
    assert_eq!(samples.type_key().unwrap().as_str(), "[J");
}

#[rstest]
#[case(json!({ "kind": "array", "dimension": 0, "element": { "kind": "simple", "simple": "String" } }))]
#[case(json!({ "kind": "array", "dimension": 1, "element": { "kind": "simple", "simple": "String" }, "primitive": true }))]
fn test_invalid_array_types_are_rejected(#[case] document: serde_json::Value) {
    assert!(serde_json::from_value::<OpenType>(document).is_err());
}
