//! mpv JSON IPC wire format: one JSON object per line.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// A command sent to mpv.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MpvCommand {
    pub command: Vec<Value>,
    pub request_id: i64,
}

impl MpvCommand {
    pub fn new(command: Vec<Value>, request_id: i64) -> Self {
        Self {
            command,
            request_id,
        }
    }

    /// `loadfile <item>`: replace the current file with `item`.
    pub fn loadfile(item: &str, request_id: i64) -> Self {
        Self::new(vec![Value::from("loadfile"), Value::from(item)], request_id)
    }

    /// Serialize as a single newline-terminated line.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self).context("Failed to encode mpv command")?;
        line.push('\n');
        Ok(line)
    }
}

/// A line received from mpv.
#[derive(Debug, Clone, PartialEq)]
pub enum MpvMessage {
    /// Unsolicited event such as `idle` or `end-file`.
    Event { name: String, raw: Value },
    /// Reply to a command. `error` is `"success"` when the command worked.
    Reply {
        request_id: Option<i64>,
        error: String,
        data: Value,
    },
}

impl MpvMessage {
    pub fn parse(line: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(line)
            .with_context(|| format!("Malformed mpv message: {line}"))?;

        if let Some(name) = raw.get("event").and_then(Value::as_str) {
            return Ok(Self::Event {
                name: name.to_string(),
                raw,
            });
        }

        Ok(Self::Reply {
            request_id: raw.get("request_id").and_then(Value::as_i64),
            error: raw
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("success")
                .to_string(),
            data: raw.get("data").cloned().unwrap_or(Value::Null),
        })
    }

    pub fn is_error_reply(&self) -> bool {
        matches!(self, Self::Reply { error, .. } if error != "success")
    }
}
