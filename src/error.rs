// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use thiserror::Error;

/// Errors that can occur when registering a subscription
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("event name must not be empty")]
    EmptyEventName,
}
