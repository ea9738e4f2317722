//! Tests for schema module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_json_type_display() {
    assert_eq!(JsonType::String.to_string(), "string");
    assert_eq!(JsonType::Integer.to_string(), "integer");
    assert_eq!(JsonType::Null.to_string(), "null");
}

#[test]
fn test_nullable_type() {
    let t = JsonTypeOrArray::nullable(JsonType::String);
    assert!(t.is_nullable());
    assert_eq!(t.primary_type(), Some(&JsonType::String));

    let t = JsonTypeOrArray::single(JsonType::Integer);
    assert!(!t.is_nullable());
}

#[test]
fn test_optional_field_is_nullable() {
    let property = Field::string("name").to_property();
    assert!(property.is_nullable());
    assert_eq!(
        serde_json::to_value(&property).unwrap(),
        json!({"type": ["string", "null"]})
    );
}

#[test]
fn test_required_field_is_not_nullable() {
    let property = Field::string("contactId").required().to_property();
    assert_eq!(
        serde_json::to_value(&property).unwrap(),
        json!({"type": "string"})
    );
}

#[test]
fn test_string_formats() {
    let render = |f: Field| serde_json::to_value(f.to_property()).unwrap();

    assert_eq!(render(Field::datetime("createdOn"))["format"], "date-time");
    assert_eq!(render(Field::uri("href"))["format"], "uri");
    assert_eq!(render(Field::email("email"))["format"], "email");
    assert!(render(Field::string("name")).get("format").is_none());
}

#[test]
fn test_description_and_allowed_values() {
    let property = Field::integer("engagementScore")
        .describe("Engagement score")
        .allowed([json!(null), json!(1), json!(5)])
        .to_property();

    assert_eq!(
        serde_json::to_value(&property).unwrap(),
        json!({
            "type": ["integer", "null"],
            "description": "Engagement score",
            "enum": [null, 1, 5]
        })
    );
}

#[test]
fn test_nested_object() {
    let property = Field::object(
        "campaign",
        [
            Field::string("campaignId").required(),
            Field::uri("href"),
        ],
    )
    .to_property();

    assert_eq!(
        serde_json::to_value(&property).unwrap(),
        json!({
            "type": ["object", "null"],
            "properties": {
                "campaignId": {"type": "string"},
                "href": {"type": ["string", "null"], "format": "uri"}
            },
            "required": ["campaignId"]
        })
    );
}

#[test]
fn test_array_of_objects() {
    let property = Field::array(
        "campaigns",
        FieldType::object([Field::string("campaignId").required()]),
    )
    .to_property();

    let value = serde_json::to_value(&property).unwrap();
    assert_eq!(value["type"], json!(["array", "null"]));
    assert_eq!(value["items"]["type"], json!(["object", "null"]));
    assert_eq!(value["items"]["required"], json!(["campaignId"]));
}

#[test]
fn test_schema_from_fields() {
    let schema = JsonSchema::from_fields(&[
        Field::string("smsId").required(),
        Field::uri("href").required(),
        Field::string("name"),
    ]);

    assert_eq!(schema.json_type, JsonType::Object);
    assert_eq!(schema.properties.len(), 3);
    assert_eq!(schema.required, vec!["smsId", "href"]);
    assert!(schema.is_required("smsId"));
    assert!(!schema.is_required("name"));
    assert!(schema.get_property("href").is_some());
}

#[test]
fn test_schema_to_json_omits_empty_required() {
    let schema = JsonSchema::from_fields(&[Field::string("activity")]);
    let value = schema.to_json();

    assert_eq!(value["type"], "object");
    assert!(value.get("required").is_none());
}

#[test]
fn test_ensure_string_property() {
    let mut schema = JsonSchema::from_fields(&[Field::string("contactId").required()]);
    schema.ensure_string_property("contactId");
    schema.ensure_string_property("newsletterId");

    assert!(!schema.get_property("contactId").unwrap().is_nullable());
    assert!(schema.get_property("newsletterId").unwrap().is_nullable());
}

#[test]
fn test_add_required_deduplicates() {
    let mut schema = JsonSchema::new();
    schema.add_property("id", SchemaProperty::new(JsonType::String));
    schema.add_required("id");
    schema.add_required("id");
    assert_eq!(schema.required, vec!["id"]);
}
