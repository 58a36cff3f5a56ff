//! Transport layer for MCP JSON-RPC communication.
//!
//! MCP uses newline-delimited JSON over stdin/stdout.

use std::io::{self, BufRead, Write};

use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

/// Message that can be received from the client.
#[derive(Debug)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

/// Transport for reading/writing JSON-RPC messages.
pub struct StdioTransport {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
}

impl StdioTransport {
    /// Create a transport using stdin/stdout.
    pub fn stdio() -> Self {
        Self {
            reader: Box::new(io::BufReader::new(io::stdin())),
            writer: Box::new(io::stdout()),
        }
    }

    /// Create a transport over any reader/writer pair.
    pub fn new(reader: Box<dyn BufRead + Send>, writer: Box<dyn Write + Send>) -> Self {
        Self { reader, writer }
    }

    /// Read the next JSON-RPC message, skipping blank lines.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_message(&mut self) -> io::Result<Option<IncomingMessage>> {
        let mut line = String::new();

        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        let line = line.trim();
        tracing::debug!("Received: {}", line);

        // Requests carry an id, notifications do not
        if let Ok(request) = serde_json::from_str::<JsonRpcRequest>(line) {
            return Ok(Some(IncomingMessage::Request(request)));
        }

        if let Ok(notification) = serde_json::from_str::<JsonRpcNotification>(line) {
            return Ok(Some(IncomingMessage::Notification(notification)));
        }

        tracing::warn!("Failed to parse message: {}", line);
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid JSON-RPC message: {}", line),
        ))
    }

    /// Write a JSON-RPC response to the transport.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Serialization error: {}", e))
        })?;

        tracing::debug!("Sending: {}", json);

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }
}
