//! Incremental decoder for upstream `text/event-stream` bodies.
//!
//! Only `data:` fields are kept; `event:`, `id:` and `retry:` are ignored
//! because the model provider signals everything through the payload.

/// Accumulates raw bytes and yields the data payload of each complete event.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk; returns payloads of events it completed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let buffer = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();
        let mut start = 0;
        // Lines are cut on b'\n', which never occurs inside a multi-byte
        // UTF-8 sequence, so partial characters stay buffered.
        while let Some(len) = buffer[start..].iter().position(|b| *b == b'\n') {
            let mut line = &buffer[start..start + len];
            start += len + 1;
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            if let Some(event) = self.process_line(&String::from_utf8_lossy(line)) {
                events.push(event);
            }
        }

        self.buffer = buffer;
        self.buffer.drain(..start);
        events
    }

    /// Flush the final event when the body ends without a blank line.
    pub fn finish(&mut self) -> Option<String> {
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = self.process_line(line.trim_end_matches('\r')) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data).join("\n"))
    }
}
