// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! crier: process-local publish/subscribe event bus
//!
//! This crate provides:
//! - `EventBus` - Route published events to subscribers by exact event name
//! - `Subscription` - Caller-owned handle for one registration, cancelled via
//!   idempotent `unsubscribe`
//! - `Event` - Named envelope around an arbitrary JSON payload
//! - `global()` - The process-wide bus, created on first access
//!
//! Delivery is synchronous and in subscription order, on the publishing
//! thread. A panicking subscriber never blocks delivery to the rest and never
//! propagates to the publisher.

pub mod bus;
pub mod error;
pub mod event;
pub mod subscription;

pub use bus::{global, EventBus};
pub use error::BusError;
pub use event::Event;
pub use subscription::{SubscriberId, Subscription};
