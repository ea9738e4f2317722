//! Record sinks

use super::types::SingerMessage;
use crate::error::{Error, Result};
use crate::stream::StreamDescriptor;
use crate::types::{JsonValue, Record};
use std::io::{BufWriter, Stdout, Write};

/// Destination for everything a sync emits
pub trait RecordSink: Send {
    /// Write one message
    fn write_message(&mut self, message: SingerMessage) -> Result<()>;

    /// Announce a stream before its first record
    fn write_schema(&mut self, descriptor: &StreamDescriptor) -> Result<()> {
        self.write_message(SingerMessage::schema(descriptor))
    }

    fn write_record(&mut self, stream: &str, record: Record) -> Result<()> {
        self.write_message(SingerMessage::record(stream, record))
    }

    fn write_state(&mut self, value: JsonValue) -> Result<()> {
        self.write_message(SingerMessage::state(value))
    }

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes messages as JSON lines
#[derive(Debug)]
pub struct SingerWriter<W: Write + Send> {
    writer: W,
    pretty: bool,
}

impl SingerWriter<BufWriter<Stdout>> {
    /// Writer on buffered stdout
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(std::io::stdout()))
    }
}

impl<W: Write + Send> SingerWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Pretty-print messages (not valid Singer output, for humans)
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consume the writer and return the inner `Write`
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RecordSink for SingerWriter<W> {
    fn write_message(&mut self, message: SingerMessage) -> Result<()> {
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &message)
        } else {
            serde_json::to_writer(&mut self.writer, &message)
        };
        written.map_err(write_error)?;
        self.writer.write_all(b"\n")?;

        // State marks a checkpoint; make sure it is visible downstream.
        if message.is_state() {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Serializer failures while writing are output errors, not parse errors
fn write_error(e: serde_json::Error) -> Error {
    if e.is_io() {
        Error::Io(e.into())
    } else {
        Error::Other(format!("Failed to serialize Singer message: {e}"))
    }
}

/// Keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    messages: Vec<SingerMessage>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in emission order
    pub fn messages(&self) -> &[SingerMessage] {
        &self.messages
    }

    /// Records of one stream in emission order
    pub fn records(&self, stream: &str) -> Vec<&Record> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                SingerMessage::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Stream name of every record message, in emission order
    pub fn record_streams(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|message| message.is_record())
            .filter_map(SingerMessage::stream)
            .collect()
    }

    /// Streams a schema was written for, in order
    pub fn schema_streams(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|message| message.is_schema())
            .filter_map(SingerMessage::stream)
            .collect()
    }

    /// Values of all state messages
    pub fn states(&self) -> Vec<&JsonValue> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                SingerMessage::State { value } => Some(value),
                _ => None,
            })
            .collect()
    }
}

impl RecordSink for CollectingSink {
    fn write_message(&mut self, message: SingerMessage) -> Result<()> {
        self.messages.push(message);
        Ok(())
    }
}
