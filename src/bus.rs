// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for routing published events to subscribers
//!
//! Delivery is synchronous: `publish` invokes every matching subscriber on
//! the calling thread, in subscription order, before returning. The dispatch
//! pass snapshots the registration list and releases the lock before invoking
//! anything, so callbacks are free to publish, subscribe, or unsubscribe on
//! the same bus (nested publishes complete fully before the callback
//! returns). A subscriber registered during a publish sees only later
//! publishes; an unsubscribe during a publish is honored by a re-check of the
//! active flag just before each invocation.
//!
//! A panicking callback is caught and reported via `tracing::warn!`; it never
//! prevents delivery to the remaining subscribers and never reaches the
//! publisher.

use crate::error::BusError;
use crate::event::Event;
use crate::subscription::{Registry, Subscriber, Subscription};
use serde_json::Value;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, RwLock};

/// The event bus routes published events to matching subscribers
pub struct EventBus {
    subscribers: Arc<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a callback for events published under `event_name`
    ///
    /// The callback receives only the payload; it already knows the name it
    /// subscribed to. It sees events published after registration only.
    /// Returns the handle that cancels this registration; the caller must
    /// retain it, and must call `unsubscribe` when done (dropping the handle
    /// does not cancel).
    pub fn subscribe<F>(
        &self,
        event_name: impl Into<String>,
        callback: F,
    ) -> Result<Subscription, BusError>
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let event_name = event_name.into();
        if event_name.is_empty() {
            return Err(BusError::EmptyEventName);
        }

        let subscriber = Arc::new(Subscriber::new(event_name, Box::new(callback)));
        {
            let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
            subs.push(Arc::clone(&subscriber));
        }

        tracing::debug!(
            id = %subscriber.id,
            event = %subscriber.event_name,
            "subscribed"
        );

        Ok(Subscription::new(
            subscriber,
            Arc::downgrade(&self.subscribers),
        ))
    }

    /// Publish an event to all subscribers registered for `event_name`
    ///
    /// Fire-and-forget: never fails, and a name no one watches is a no-op.
    /// Matching subscribers are invoked in subscription order on the calling
    /// thread before this returns.
    pub fn publish(&self, event_name: impl Into<String>, payload: Value) {
        let event = Event::new(event_name, payload);

        // Snapshot under the read lock, invoke outside it so callbacks can
        // re-enter the bus without deadlocking.
        let matching: Vec<Arc<Subscriber>> = {
            let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
            subs.iter()
                .filter(|s| s.matches(event.name()))
                .cloned()
                .collect()
        };

        for subscriber in matching {
            // Re-check so an unsubscribe after the snapshot was taken, from
            // another thread or an earlier callback, is still honored.
            if !subscriber.is_active() {
                continue;
            }

            let invoked = catch_unwind(AssertUnwindSafe(|| {
                (subscriber.callback)(event.payload());
            }));

            if let Err(cause) = invoked {
                tracing::warn!(
                    id = %subscriber.id,
                    event = %event.name(),
                    cause = panic_message(cause.as_ref()),
                    "subscriber callback panicked"
                );
            }
        }
    }

    /// Get count of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> &str {
    if let Some(message) = cause.downcast_ref::<&str>() {
        message
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

static GLOBAL: OnceLock<EventBus> = OnceLock::new();

/// The process-wide bus, created on first access and never torn down
///
/// Components that only need the shared instance go through this accessor;
/// tests construct their own `EventBus` instead.
pub fn global() -> &'static EventBus {
    GLOBAL.get_or_init(EventBus::new)
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
