//! Server-Sent Events framing for the answer stream.
//!
//! Each message travels as a single `data: <json>\n\n` frame. The parser is
//! the consumer side: it accepts the body in arbitrarily sized byte chunks,
//! keeps incomplete trailing lines (and split UTF-8 sequences) buffered, and
//! yields every `data: ` line it can decode.

use crate::types::StreamMessage;
use crate::Result;

const DATA_PREFIX: &str = "data: ";

/// Render a message as one SSE frame.
pub fn encode_frame(message: &StreamMessage) -> Result<String> {
    Ok(format!("{}{}\n\n", DATA_PREFIX, serde_json::to_string(message)?))
}

#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of the body and collect any completed messages.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamMessage> {
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(message) = parse_line(&line[..line.len() - 1]) {
                messages.push(message);
            }
        }
        messages
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn parse_line(line: &[u8]) -> Option<StreamMessage> {
    let line = match std::str::from_utf8(line) {
        Ok(line) => line.trim_end_matches('\r'),
        Err(e) => {
            tracing::warn!("Dropping non UTF-8 SSE line: {}", e);
            return None;
        }
    };
    let payload = line.strip_prefix(DATA_PREFIX)?;
    match serde_json::from_str(payload) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!("Failed to parse SSE payload {:?}: {}", payload, e);
            None
        }
    }
}
