// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event envelope: a name plus an arbitrary JSON payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named message with an arbitrary payload
///
/// Events are created at publish time, consumed by the synchronous dispatch
/// pass, and never stored. The payload is deliberately schemaless: the bus
/// does not interpret or validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    payload: Value,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
