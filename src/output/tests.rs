//! Tests for output module

use super::*;
use crate::schema::Field;
use crate::stream::StreamDescriptor;
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(value: serde_json::Value) -> crate::types::Record {
    value.as_object().unwrap().clone()
}

fn campaigns() -> StreamDescriptor {
    StreamDescriptor::builder("campaigns", "/campaigns")
        .primary_key("campaignId")
        .replication_key("createdOn")
        .fields([Field::string("campaignId").required(), Field::datetime("createdOn")])
        .build()
        .unwrap()
}

fn lines(buffer: Vec<u8>) -> Vec<serde_json::Value> {
    String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// SingerMessage Tests
// ============================================================================

#[test]
fn test_schema_message() {
    let value = serde_json::to_value(SingerMessage::schema(&campaigns())).unwrap();

    assert_eq!(value["type"], "SCHEMA");
    assert_eq!(value["stream"], "campaigns");
    assert_eq!(value["key_properties"], json!(["campaignId"]));
    assert_eq!(value["bookmark_properties"], json!(["createdOn"]));
    assert_eq!(value["schema"]["required"], json!(["campaignId"]));
}

#[test]
fn test_schema_message_without_replication_key() {
    let descriptor = StreamDescriptor::builder("sms", "/sms").build().unwrap();
    let value = serde_json::to_value(SingerMessage::schema(&descriptor)).unwrap();

    assert_eq!(value["key_properties"], json!([]));
    assert!(value.get("bookmark_properties").is_none());
}

#[test]
fn test_record_message() {
    let message = SingerMessage::record("campaigns", record(json!({"campaignId": "A"})));
    let value = serde_json::to_value(&message).unwrap();

    assert_eq!(value["type"], "RECORD");
    assert_eq!(value["stream"], "campaigns");
    assert_eq!(value["record"], json!({"campaignId": "A"}));
    assert!(value["time_extracted"].as_str().unwrap().ends_with('Z'));
    assert_eq!(message.stream(), Some("campaigns"));
}

#[test]
fn test_state_message() {
    let message = SingerMessage::state(json!({"bookmarks": {}}));
    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({"type": "STATE", "value": {"bookmarks": {}}})
    );
    assert!(message.is_state());
    assert_eq!(message.stream(), None);
}

#[test]
fn test_message_roundtrip_from_singer_line() {
    let line = r#"{"type":"RECORD","stream":"sms","record":{"smsId":"S1"}}"#;
    let message: SingerMessage = serde_json::from_str(line).unwrap();

    assert!(message.is_record());
    assert_eq!(message.stream(), Some("sms"));
}

// ============================================================================
// SingerWriter Tests
// ============================================================================

#[test]
fn test_singer_writer_json_lines() {
    let mut writer = SingerWriter::new(Vec::new());
    writer.write_schema(&campaigns()).unwrap();
    writer
        .write_record("campaigns", record(json!({"campaignId": "A"})))
        .unwrap();
    writer.write_state(json!({"bookmarks": {}})).unwrap();
    writer.flush().unwrap();

    let output = lines(writer.into_inner());
    assert_eq!(output.len(), 3);
    assert_eq!(output[0]["type"], "SCHEMA");
    assert_eq!(output[1]["type"], "RECORD");
    assert_eq!(output[2]["type"], "STATE");
}

#[test]
fn test_singer_writer_preserves_field_order() {
    let mut writer = SingerWriter::new(Vec::new());
    writer
        .write_record("sms", record(json!({"z": 1, "a": 2})))
        .unwrap();

    let text = String::from_utf8(writer.into_inner()).unwrap();
    let z = text.find("\"z\"").unwrap();
    let a = text.find("\"a\"").unwrap();
    assert!(z < a);
}

#[test]
fn test_singer_writer_pretty() {
    let mut writer = SingerWriter::new(Vec::new()).with_pretty(true);
    writer.write_state(json!({})).unwrap();

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert!(text.lines().count() > 1);
}

struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_singer_writer_reports_write_failure_as_io() {
    let mut writer = SingerWriter::new(ClosedPipe);
    let err = writer
        .write_record("sms", record(json!({"smsId": "1"})))
        .unwrap_err();

    assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    assert!(!err.to_string().contains("parse"), "{err}");
}

// ============================================================================
// CollectingSink Tests
// ============================================================================

#[test]
fn test_collecting_sink() {
    let mut sink = CollectingSink::new();
    sink.write_schema(&campaigns()).unwrap();
    sink.write_record("campaigns", record(json!({"campaignId": "A"})))
        .unwrap();
    sink.write_record("sms", record(json!({"smsId": "S"}))).unwrap();
    sink.write_record("campaigns", record(json!({"campaignId": "B"})))
        .unwrap();
    sink.write_state(json!({"bookmarks": {}})).unwrap();

    assert_eq!(sink.messages().len(), 5);
    assert_eq!(sink.schema_streams(), vec!["campaigns"]);
    assert_eq!(sink.record_streams(), vec!["campaigns", "sms", "campaigns"]);
    assert_eq!(
        sink.records("campaigns"),
        vec![
            &record(json!({"campaignId": "A"})),
            &record(json!({"campaignId": "B"}))
        ]
    );
    assert_eq!(sink.states(), vec![&json!({"bookmarks": {}})]);
}
