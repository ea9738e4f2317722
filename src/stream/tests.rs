//! Tests for stream descriptors and the registry

use super::*;
use crate::context::{ContextProjection, StreamContext};
use crate::decode::RecordShape;
use crate::error::{Error, ErrorKind};
use crate::schema::Field;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

fn record(value: serde_json::Value) -> crate::types::Record {
    value.as_object().unwrap().clone()
}

fn contacts() -> StreamDescriptor {
    StreamDescriptor::builder("contacts", "/contacts")
        .primary_key("contactId")
        .child_context(ContextProjection::key("contactId"))
        .fields([Field::string("contactId").required()])
        .build()
        .unwrap()
}

fn registry() -> StreamRegistry {
    let mut registry = StreamRegistry::new();
    let contacts = registry.register(contacts()).unwrap();
    registry
        .register(
            StreamDescriptor::builder("contact_details", "/contacts/{contactId}")
                .parent(&contacts)
                .shape(RecordShape::Object)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            StreamDescriptor::builder("contact_activities", "/contacts/{contactId}/activities")
                .parent(&contacts)
                .shape(RecordShape::wrapped("activities"))
                .inject_context()
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(StreamDescriptor::builder("sms", "/sms").build().unwrap())
        .unwrap();
    registry
}

// ============================================================================
// Post-processors
// ============================================================================

#[test]
fn test_passthrough() {
    let rec = record(json!({"a": 1}));
    assert_eq!(passthrough(rec.clone(), &StreamContext::new()), Some(rec));
}

#[test]
fn test_inject_context_adds_keys() {
    let context = StreamContext::new().with_string("contactId", "C1");
    let out = inject_context(record(json!({"activity": "open"})), &context).unwrap();

    assert_eq!(out["contactId"], "C1");
    assert_eq!(out["activity"], "open");
}

#[test]
fn test_inject_context_overwrites_payload_value() {
    let context = StreamContext::new().with_string("contactId", "C1");
    let out = inject_context(record(json!({"contactId": "other"})), &context).unwrap();
    assert_eq!(out["contactId"], "C1");
}

#[test]
fn test_custom_post_processor_can_skip() {
    fn drop_sends(record: crate::types::Record, _: &StreamContext) -> Option<crate::types::Record> {
        (record.get("activity") != Some(&json!("send"))).then_some(record)
    }

    let descriptor = StreamDescriptor::builder("activities", "/activities")
        .post_process(drop_sends)
        .build()
        .unwrap();

    let ctx = StreamContext::new();
    assert!(descriptor
        .post_process(record(json!({"activity": "send"})), &ctx)
        .is_none());
    assert!(descriptor
        .post_process(record(json!({"activity": "open"})), &ctx)
        .is_some());
}

// ============================================================================
// Descriptor
// ============================================================================

#[test]
fn test_descriptor_accessors() {
    let descriptor = StreamDescriptor::builder("campaigns", "/campaigns")
        .description("Campaign list")
        .primary_key("campaignId")
        .replication_key("createdOn")
        .build()
        .unwrap();

    assert_eq!(descriptor.name(), "campaigns");
    assert_eq!(descriptor.path(), "/campaigns");
    assert_eq!(descriptor.description(), Some("Campaign list"));
    assert_eq!(descriptor.primary_keys(), ["campaignId".to_string()]);
    assert_eq!(descriptor.replication_key(), Some("createdOn"));
    assert!(descriptor.is_root());
    assert_eq!(descriptor.parent_name(), None);
    assert_eq!(descriptor.record_shape(), &RecordShape::Array);
}

#[test]
fn test_descriptor_project_child_context() {
    let descriptor = contacts();
    let context = descriptor.project_child_context(&record(json!({"contactId": "C7", "x": 1})));

    assert_eq!(context.get_string("contactId").as_deref(), Some("C7"));
    assert_eq!(context.len(), 1);
}

#[test]
fn test_descriptor_without_projection_gives_empty_context() {
    let descriptor = StreamDescriptor::builder("sms", "/sms").build().unwrap();
    assert!(descriptor
        .project_child_context(&record(json!({"smsId": "S"})))
        .is_empty());
}

#[test]
fn test_inject_context_declares_schema_keys() {
    let parent = Arc::new(contacts());
    let child = StreamDescriptor::builder("contact_activities", "/contacts/{contactId}/activities")
        .parent(&parent)
        .inject_context()
        .fields([Field::string("activity")])
        .build()
        .unwrap();

    assert!(child.schema().get_property("contactId").is_some());
    assert!(child.schema().get_property("activity").is_some());
}

#[test]
fn test_build_rejects_empty_name() {
    let err = StreamDescriptor::builder(" ", "/x").build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_build_rejects_relative_path() {
    let err = StreamDescriptor::builder("x", "x").build().unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_build_rejects_placeholder_on_root() {
    let err = StreamDescriptor::builder("details", "/contacts/{contactId}")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("root stream 'details'"));
}

#[test]
fn test_build_rejects_unprovided_placeholder() {
    let parent = Arc::new(contacts());
    let err = StreamDescriptor::builder("x", "/campaigns/{campaignId}")
        .parent(&parent)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("campaignId"));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_lookup() {
    let registry = registry();

    assert_eq!(registry.len(), 4);
    assert!(!registry.is_empty());
    assert!(registry.get("contacts").is_some());
    assert!(registry.get("nope").is_none());
    assert!(matches!(
        registry.require("nope"),
        Err(Error::StreamNotFound { .. })
    ));
}

#[test]
fn test_registry_roots_and_children_in_order() {
    let registry = registry();

    let roots: Vec<&str> = registry.roots().map(|s| s.name()).collect();
    assert_eq!(roots, vec!["contacts", "sms"]);

    let children: Vec<&str> = registry.children_of("contacts").map(|s| s.name()).collect();
    assert_eq!(children, vec!["contact_details", "contact_activities"]);

    assert_eq!(registry.children_of("sms").count(), 0);
}

#[test]
fn test_registry_rejects_duplicates() {
    let mut registry = StreamRegistry::new();
    registry.register(contacts()).unwrap();
    let err = registry.register(contacts()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_registry_rejects_unregistered_parent() {
    let parent = Arc::new(contacts());
    let child = StreamDescriptor::builder("contact_details", "/contacts/{contactId}")
        .parent(&parent)
        .build()
        .unwrap();

    let mut registry = StreamRegistry::new();
    assert!(matches!(
        registry.register(child),
        Err(Error::StreamNotFound { .. })
    ));
}

#[test]
fn test_registry_root_of() {
    let registry = registry();
    assert_eq!(registry.root_of("contact_activities").unwrap(), "contacts");
    assert_eq!(registry.root_of("sms").unwrap(), "sms");
}

#[test]
fn test_registry_select() {
    let registry = registry();

    let all = registry.select::<&str>(&[]).unwrap();
    assert_eq!(all.len(), 4);

    let some = registry.select(&["contact_details"]).unwrap();
    assert_eq!(some, BTreeSet::from(["contact_details".to_string()]));

    assert!(registry.select(&["missing"]).is_err());
}

#[test]
fn test_registry_subtree_selected() {
    let registry = registry();
    let selected = BTreeSet::from(["contact_activities".to_string()]);

    assert!(registry.subtree_selected("contacts", &selected));
    assert!(registry.subtree_selected("contact_activities", &selected));
    assert!(!registry.subtree_selected("contact_details", &selected));
    assert!(!registry.subtree_selected("sms", &selected));
}
